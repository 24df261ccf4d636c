// Procedural star icons - rasterized once at startup into Image assets
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::constants::ICON_TEXTURE_SIZE;

/// The two logical icons the scene knows about. Particles and slots refer to
/// an icon by kind; the pixel data lives once in `IconAssets`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum IconKind {
    StarFill,
    Star,
}

impl IconKind {
    pub const ALL: [IconKind; 2] = [IconKind::StarFill, IconKind::Star];

    pub fn name(self) -> &'static str {
        match self {
            IconKind::StarFill => "star.fill",
            IconKind::Star => "star",
        }
    }
}

/// Handles to the generated icon textures
#[derive(Resource)]
pub struct IconAssets {
    star_fill: Handle<Image>,
    star: Handle<Image>,
}

impl IconAssets {
    pub fn get(&self, kind: IconKind) -> Handle<Image> {
        match kind {
            IconKind::StarFill => self.star_fill.clone(),
            IconKind::Star => self.star.clone(),
        }
    }

    #[cfg(test)]
    pub fn placeholder() -> Self {
        Self {
            star_fill: Handle::default(),
            star: Handle::default(),
        }
    }
}

pub fn setup_icon_assets(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let star_fill = images.add(icon_image(IconKind::StarFill, ICON_TEXTURE_SIZE));
    let star = images.add(icon_image(IconKind::Star, ICON_TEXTURE_SIZE));
    info!("Generated {} icon textures ({}px)", IconKind::ALL.len(), ICON_TEXTURE_SIZE);
    commands.insert_resource(IconAssets { star_fill, star });
}

/// Build a white RGBA texture for `kind`; sprites tint it at draw time.
pub fn icon_image(kind: IconKind, size: u32) -> Image {
    let pixels = rasterize_icon(kind, size);
    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        bytemuck::cast_slice(&pixels).to_vec(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

/// Row-major pixels, top row first
pub fn rasterize_icon(kind: IconKind, size: u32) -> Vec<[u8; 4]> {
    let half = size as f32 * 0.5;
    let outer = half * 0.95;
    let stroke = (size as f32 * 0.06).max(1.0);
    let star = star_vertices(Vec2::splat(half), outer, outer * 0.382);

    let mut pixels = Vec::with_capacity((size * size) as usize);
    for y in 0..size {
        for x in 0..size {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let edge = distance_to_outline(p, &star);
            let coverage = match kind {
                IconKind::StarFill => {
                    if point_in_polygon(p, &star) {
                        1.0
                    } else {
                        (0.5 - edge).clamp(0.0, 1.0)
                    }
                }
                IconKind::Star => (stroke * 0.5 + 0.5 - edge).clamp(0.0, 1.0),
            };
            pixels.push([255, 255, 255, (coverage * 255.0).round() as u8]);
        }
    }
    pixels
}

/// Ten alternating outer/inner points, first tip pointing up in image space (y down)
fn star_vertices(center: Vec2, outer: f32, inner: f32) -> [Vec2; 10] {
    let mut points = [Vec2::ZERO; 10];
    for (i, point) in points.iter_mut().enumerate() {
        let angle = -std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / 5.0;
        let radius = if i % 2 == 0 { outer } else { inner };
        *point = center + Vec2::new(angle.cos(), angle.sin()) * radius;
    }
    points
}

/// Even-odd ray cast
fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn distance_to_outline(p: Vec2, polygon: &[Vec2]) -> f32 {
    let mut best = f32::MAX;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        best = best.min(distance_to_segment(p, a, b));
    }
    best
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let t = ((p - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
