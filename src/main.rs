use bevy::prelude::*;

mod animation;
mod constants;
mod explosion;
mod hud;
mod icons;
mod render;
mod scene;
mod scheduler;

use constants::BACKGROUND_COLOR;
use render::BurstViewPlugin;
use scene::ScenePlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Particle Burst".into(),
                resolution: (480.0, 640.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .add_plugins((ScenePlugin, BurstViewPlugin))
        .run();
}
