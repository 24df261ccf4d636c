// View layer - icon sprites, tap input and particle sprites driven by SceneController
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::collections::{HashMap, HashSet};

use crate::animation::{dispersal_progress, icon_fade_alpha, particle_pose};
use crate::constants::*;
use crate::explosion::ExplosionId;
use crate::hud::{spawn_hud, update_hud};
use crate::icons::{setup_icon_assets, IconAssets};
use crate::scene::{SceneController, SceneRng, SceneSet};

pub struct BurstViewPlugin;

impl Plugin for BurstViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, ((setup_icon_assets, setup_view).chain(), spawn_hud))
            .add_systems(
                Update,
                (record_icon_centers_system, tap_input_system)
                    .chain()
                    .before(SceneSet::Advance),
            )
            .add_systems(
                Update,
                (
                    despawn_finished_explosions_system,
                    spawn_explosion_visuals_system,
                    animate_explosion_visuals_system,
                    icon_visibility_system,
                    update_hud,
                )
                    .chain()
                    .after(SceneSet::Advance),
            );
    }
}

/// One tappable icon; `slot` indexes `SceneController::slots()`
#[derive(Component)]
pub struct IconSlotSprite {
    pub slot: usize,
    fade: Timer,
    shown: bool,
}

impl IconSlotSprite {
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            fade: Timer::from_seconds(ICON_FADE_DURATION, TimerMode::Once),
            shown: true,
        }
    }
}

/// Root entity of one burst's particle sprites
#[derive(Component)]
pub struct ExplosionVisual {
    pub id: ExplosionId,
    dispersal: Option<Timer>, // Started the first frame the explosion reports is_exploding
}

#[derive(Component)]
pub struct ParticleSprite {
    pub explosion: ExplosionId,
    pub index: usize,
}

/// Vertical center of each slot in a column centered on the origin
pub fn slot_layout(count: usize) -> Vec<Vec2> {
    let step = ICON_SIZE + ICON_SPACING;
    let top = (count.saturating_sub(1)) as f32 * step * 0.5;
    (0..count).map(|i| Vec2::new(0.0, top - i as f32 * step)).collect()
}

/// Index of the slot whose ICON_SIZE square contains `point`
pub fn hit_slot(point: Vec2, centers: impl IntoIterator<Item = (usize, Vec2)>) -> Option<usize> {
    let half = ICON_SIZE * 0.5;
    centers
        .into_iter()
        .find(|(_, center)| (point.x - center.x).abs() <= half && (point.y - center.y).abs() <= half)
        .map(|(slot, _)| slot)
}

fn setup_view(mut commands: Commands, icon_assets: Res<IconAssets>, scene: Res<SceneController>) {
    commands.spawn(Camera2d);

    for (slot, position) in slot_layout(scene.slots().len()).into_iter().enumerate() {
        let Some(icon_slot) = scene.slot(slot) else { continue };
        commands.spawn((
            Sprite {
                image: icon_assets.get(icon_slot.icon),
                color: ICON_COLOR,
                custom_size: Some(Vec2::splat(ICON_SIZE)),
                ..default()
            },
            Transform::from_translation(position.extend(ICON_Z)),
            IconSlotSprite::new(slot),
        ));
    }
    info!("Spawned {} icon slots", scene.slots().len());
}

/// Keep the controller's slot centers in sync with layout
fn record_icon_centers_system(
    icons: Query<(&IconSlotSprite, &GlobalTransform), Changed<GlobalTransform>>,
    mut scene: ResMut<SceneController>,
) {
    for (icon, transform) in icons.iter() {
        scene.record_icon_center(icon.slot, transform.translation().truncate());
    }
}

/// Mouse clicks and new touches both count as taps. Hidden icons stay tappable.
fn tap_input_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    icons: Query<(&IconSlotSprite, &GlobalTransform)>,
    mut scene: ResMut<SceneController>,
    mut rng: ResMut<SceneRng>,
    time: Res<Time>,
) {
    let Ok(window) = window_query.single() else { return };
    let Ok((camera, camera_transform)) = camera_query.single() else { return };

    let mut taps: Vec<Vec2> = touches.iter_just_pressed().map(|touch| touch.position()).collect();
    if mouse_button.just_pressed(MouseButton::Left) {
        if let Some(cursor_pos) = window.cursor_position() {
            taps.push(cursor_pos);
        }
    }

    for screen_pos in taps {
        let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, screen_pos) else {
            continue;
        };
        let centers = icons
            .iter()
            .map(|(icon, transform)| (icon.slot, transform.translation().truncate()));
        let Some(slot) = hit_slot(world_pos, centers) else { continue };

        if let Some((_, transform)) = icons.iter().find(|(icon, _)| icon.slot == slot) {
            scene.record_icon_center(slot, transform.translation().truncate());
        }
        scene.handle_tap(slot, time.elapsed(), &mut rng.0);
    }
}

fn despawn_finished_explosions_system(
    mut commands: Commands,
    visuals: Query<(Entity, &ExplosionVisual)>,
    scene: Res<SceneController>,
) {
    for (entity, visual) in visuals.iter() {
        if scene.explosion(visual.id).is_none() {
            commands.entity(entity).despawn();
        }
    }
}

fn spawn_explosion_visuals_system(
    mut commands: Commands,
    visuals: Query<&ExplosionVisual>,
    scene: Res<SceneController>,
    icon_assets: Res<IconAssets>,
) {
    let existing: HashSet<ExplosionId> = visuals.iter().map(|visual| visual.id).collect();

    for explosion in scene.explosions().filter(|e| !existing.contains(&e.id())) {
        let image = icon_assets.get(explosion.icon());
        // Root sits at the world origin so particle transforms are world positions
        commands
            .spawn((
                Transform::from_xyz(0.0, 0.0, PARTICLE_Z),
                Visibility::default(),
                ExplosionVisual {
                    id: explosion.id(),
                    dispersal: None,
                },
            ))
            .with_children(|parent| {
                for (index, particle) in explosion.particles().iter().enumerate() {
                    parent.spawn((
                        Sprite {
                            image: image.clone(),
                            color: ICON_COLOR,
                            custom_size: Some(Vec2::splat(particle.size)),
                            ..default()
                        },
                        Transform::from_translation(particle.position.extend(0.0)),
                        ParticleSprite {
                            explosion: explosion.id(),
                            index,
                        },
                    ));
                }
            });
        debug!("Spawned visual for explosion {:?}", explosion.id());
    }
}

fn animate_explosion_visuals_system(
    mut visuals: Query<&mut ExplosionVisual>,
    mut particles: Query<(&ParticleSprite, &mut Transform, &mut Sprite)>,
    scene: Res<SceneController>,
    time: Res<Time>,
) {
    let mut progress: HashMap<ExplosionId, f32> = HashMap::new();
    for mut visual in visuals.iter_mut() {
        let Some(explosion) = scene.explosion(visual.id) else { continue };
        let value = if explosion.is_exploding() {
            let timer = visual
                .dispersal
                .get_or_insert_with(|| Timer::from_seconds(DISPERSAL_DURATION, TimerMode::Once));
            timer.tick(time.delta());
            dispersal_progress(timer.elapsed_secs())
        } else {
            0.0
        };
        progress.insert(visual.id, value);
    }

    for (marker, mut transform, mut sprite) in particles.iter_mut() {
        let Some(&value) = progress.get(&marker.explosion) else { continue };
        let Some(particle) = scene
            .explosion(marker.explosion)
            .and_then(|explosion| explosion.particles().get(marker.index))
        else {
            continue;
        };
        let pose = particle_pose(particle, value);
        transform.translation = pose.translation.extend(0.0);
        transform.rotation = pose.rotation();
        sprite.color = ICON_COLOR.with_alpha(pose.opacity);
    }
}

/// Hiding fades out; restoring is immediate
fn icon_visibility_system(
    mut icons: Query<(&mut IconSlotSprite, &mut Sprite)>,
    scene: Res<SceneController>,
    time: Res<Time>,
) {
    for (mut icon, mut sprite) in icons.iter_mut() {
        let Some(slot) = scene.slot(icon.slot) else { continue };
        let alpha = if slot.visible {
            icon.shown = true;
            1.0
        } else {
            if icon.shown {
                icon.shown = false;
                icon.fade.reset();
            }
            icon.fade.tick(time.delta());
            icon_fade_alpha(icon.fade.elapsed_secs())
        };
        sprite.color = ICON_COLOR.with_alpha(alpha);
    }
}
