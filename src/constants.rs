use std::time::Duration;

use crate::icons::IconKind;

// Burst generation
pub const PARTICLES_PER_EXPLOSION: usize = 30;
pub const PARTICLE_OFFSET_RANGE: f32 = 100.0;    // Max displacement per axis, either direction
pub const PARTICLE_ROTATION_RANGE: f32 = 360.0;  // Degrees, either direction
pub const PARTICLE_SIZE_MIN: f32 = 10.0;
pub const PARTICLE_SIZE_MAX: f32 = 30.0;

// Explosion lifecycle (measured from the tap)
pub const ARM_DELAY: Duration = Duration::from_millis(50);      // Flip to exploding
pub const EXPIRE_DELAY: Duration = Duration::from_millis(1000); // Remove + restore icon

// Animation
pub const DISPERSAL_DURATION: f32 = 1.0;  // Seconds, ease-out
pub const ICON_FADE_DURATION: f32 = 0.35; // Seconds, ease-in-out (hide only)

// Icon slots
pub const SLOT_COUNT: usize = 3;
pub const SLOT_ICONS: [IconKind; SLOT_COUNT] = [IconKind::StarFill, IconKind::Star, IconKind::StarFill];
pub const ICON_SIZE: f32 = 100.0;
pub const ICON_SPACING: f32 = 8.0;
pub const ICON_TEXTURE_SIZE: u32 = 128; // Rasterized icon resolution in pixels

// Z layers
pub const ICON_Z: f32 = 0.0;
pub const PARTICLE_Z: f32 = 1.0;

// Colors
pub const BACKGROUND_COLOR: bevy::prelude::Color = bevy::prelude::Color::srgb(0.08, 0.08, 0.1);
pub const ICON_COLOR: bevy::prelude::Color = bevy::prelude::Color::srgb(1.0, 0.8, 0.2); // Gold
