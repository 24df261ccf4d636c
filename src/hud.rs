// HUD overlay - usage hint and live burst count
use bevy::prelude::*;

use crate::scene::SceneController;

/// Marker for the active burst counter text
#[derive(Component)]
pub struct ActiveBurstsText;

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Tap a star"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.8, 0.85)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));

    commands.spawn((
        Text::new(bursts_label(0)),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.8, 0.2)), // Gold, matches the icons
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(36.0),
            left: Val::Px(10.0),
            ..default()
        },
        ActiveBurstsText,
    ));
}

pub fn update_hud(scene: Res<SceneController>, mut query: Query<&mut Text, With<ActiveBurstsText>>) {
    if !scene.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        *text = Text::new(bursts_label(scene.active_count()));
    }
}

fn bursts_label(active: usize) -> String {
    format!("Bursts: {}", active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    #[test]
    fn test_counter_tracks_active_bursts() {
        let mut app = App::new();
        app.init_resource::<SceneController>().add_systems(Update, update_hud);
        let text = app.world_mut().spawn((Text::new(bursts_label(0)), ActiveBurstsText)).id();

        {
            let mut scene = app.world_mut().resource_mut::<SceneController>();
            let mut rng = StdRng::seed_from_u64(4);
            scene.handle_tap(0, Duration::ZERO, &mut rng);
            scene.handle_tap(2, Duration::ZERO, &mut rng);
        }
        app.update();

        assert_eq!(app.world().get::<Text>(text).map(|t| t.0.clone()), Some("Bursts: 2".to_string()));
    }
}
