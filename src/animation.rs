// Transition curves shared by the burst and icon visuals
use bevy::math::curve::easing::{EaseFunction, EasingCurve};
use bevy::math::curve::Curve;
use bevy::prelude::*;

use crate::constants::{DISPERSAL_DURATION, ICON_FADE_DURATION};
use crate::explosion::Particle;

/// Where a particle is drawn at a given point of the dispersal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePose {
    pub translation: Vec2,
    pub rotation_degrees: f32, // Clockwise, like screen-space rotation
    pub opacity: f32,
}

impl ParticlePose {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(-self.rotation_degrees.to_radians())
    }
}

pub fn ease_out(t: f32) -> f32 {
    EasingCurve::new(0.0, 1.0, EaseFunction::CubicOut).sample_clamped(t)
}

pub fn ease_in_out(t: f32) -> f32 {
    EasingCurve::new(0.0, 1.0, EaseFunction::CubicInOut).sample_clamped(t)
}

/// Eased dispersal progress for `elapsed` seconds since the burst started exploding
pub fn dispersal_progress(elapsed: f32) -> f32 {
    ease_out(elapsed / DISPERSAL_DURATION)
}

/// Interpolate from rest (at the origin, opaque, unrotated) to the particle's
/// final offset, rotation and full transparency.
pub fn particle_pose(particle: &Particle, progress: f32) -> ParticlePose {
    let progress = progress.clamp(0.0, 1.0);
    ParticlePose {
        translation: particle.position + particle.offset * progress,
        rotation_degrees: particle.rotation * progress,
        opacity: 1.0 - progress,
    }
}

/// Icon alpha `elapsed` seconds into its fade-out
pub fn icon_fade_alpha(elapsed: f32) -> f32 {
    1.0 - ease_in_out(elapsed / ICON_FADE_DURATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explosion::{ExplosionId, ParticleId};
    use crate::icons::IconKind;

    fn particle() -> Particle {
        Particle {
            id: ParticleId { explosion: ExplosionId(0), index: 0 },
            icon: IconKind::Star,
            position: Vec2::new(100.0, 100.0),
            offset: Vec2::new(-50.0, 80.0),
            rotation: 270.0,
            size: 20.0,
        }
    }

    #[test]
    fn test_ease_out_endpoints() {
        assert!(ease_out(0.0).abs() < 1e-5);
        assert!((ease_out(1.0) - 1.0).abs() < 1e-5);
        assert!(ease_out(0.5) > 0.5, "ease-out front-loads motion");
        assert!((ease_out(3.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-4);
        assert!(ease_in_out(0.25) < 0.25);
    }

    #[test]
    fn test_pose_at_rest() {
        let pose = particle_pose(&particle(), 0.0);
        assert_eq!(pose.translation, Vec2::new(100.0, 100.0));
        assert_eq!(pose.rotation_degrees, 0.0);
        assert_eq!(pose.opacity, 1.0);
    }

    #[test]
    fn test_pose_fully_dispersed() {
        let p = particle();
        let pose = particle_pose(&p, 1.0);
        assert_eq!(pose.translation, p.target_position());
        assert_eq!(pose.rotation_degrees, 270.0);
        assert_eq!(pose.opacity, 0.0);
    }

    #[test]
    fn test_pose_clamps_progress() {
        let p = particle();
        assert_eq!(particle_pose(&p, 2.0), particle_pose(&p, 1.0));
        assert_eq!(particle_pose(&p, -1.0), particle_pose(&p, 0.0));
    }

    #[test]
    fn test_dispersal_completes_after_duration() {
        assert!(dispersal_progress(0.0).abs() < 1e-5);
        assert!((dispersal_progress(DISPERSAL_DURATION) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_icon_fade() {
        assert!((icon_fade_alpha(0.0) - 1.0).abs() < 1e-5);
        assert!(icon_fade_alpha(ICON_FADE_DURATION).abs() < 1e-5);
    }
}
