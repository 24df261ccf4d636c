// Explosion model - one burst of particles around a tapped icon
use bevy::prelude::*;
use rand::Rng;

use crate::constants::*;
use crate::icons::IconKind;

/// Stable identity of one explosion; the only key used by deferred actions
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ExplosionId(pub u64);

#[allow(dead_code)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ParticleId {
    pub explosion: ExplosionId,
    pub index: u16,
}

/// One fragment of a burst. Never mutated after construction.
#[derive(Clone, Debug)]
pub struct Particle {
    #[allow(dead_code)]
    pub id: ParticleId,
    pub icon: IconKind,
    pub position: Vec2,   // Origin, copied from the explosion center
    pub offset: Vec2,     // Final displacement from `position`
    pub rotation: f32,    // Final rotation in degrees
    pub size: f32,
}

impl Particle {
    #[allow(dead_code)]
    pub fn target_position(&self) -> Vec2 {
        self.position + self.offset
    }
}

#[derive(Clone, Debug)]
pub struct Explosion {
    id: ExplosionId,
    icon: IconKind,
    center: Vec2,
    particles: Vec<Particle>,
    is_exploding: bool,
}

impl Explosion {
    /// Build a resting explosion with `PARTICLES_PER_EXPLOSION` randomized particles
    pub fn new(id: ExplosionId, icon: IconKind, center: Vec2, rng: &mut impl Rng) -> Self {
        let particles = (0..PARTICLES_PER_EXPLOSION)
            .map(|i| Particle {
                id: ParticleId { explosion: id, index: i as u16 },
                icon,
                position: center,
                offset: Vec2::new(
                    rng.gen_range(-PARTICLE_OFFSET_RANGE..=PARTICLE_OFFSET_RANGE),
                    rng.gen_range(-PARTICLE_OFFSET_RANGE..=PARTICLE_OFFSET_RANGE),
                ),
                rotation: rng.gen_range(-PARTICLE_ROTATION_RANGE..=PARTICLE_ROTATION_RANGE),
                size: rng.gen_range(PARTICLE_SIZE_MIN..=PARTICLE_SIZE_MAX),
            })
            .collect();

        Self {
            id,
            icon,
            center,
            particles,
            is_exploding: false,
        }
    }

    pub fn id(&self) -> ExplosionId {
        self.id
    }

    pub fn icon(&self) -> IconKind {
        self.icon
    }

    #[allow(dead_code)]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_exploding(&self) -> bool {
        self.is_exploding
    }

    /// One-way transition. Returns false if the explosion was already dispersing.
    pub fn start_exploding(&mut self) -> bool {
        let changed = !self.is_exploding;
        self.is_exploding = true;
        changed
    }
}
