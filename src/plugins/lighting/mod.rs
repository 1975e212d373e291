//! Lighting plugin (Firefly) (render-only).
//!
//! A point light rides with the player and widens as the player speeds up.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::Player;
use crate::plugins::ui::{HudReadout, PresentationSet};

const BASE_RANGE: f32 = 6.0;
const RANGE_PER_SPEED: f32 = 0.4;
const MAX_RANGE: f32 = 16.0;

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(
            PostUpdate,
            follow_player_light
                .after(PresentationSet)
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

#[inline]
fn light_range(speed: f32) -> f32 {
    (BASE_RANGE + speed.max(0.0) * RANGE_PER_SPEED).min(MAX_RANGE)
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: BASE_RANGE,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player_light(
    hud: Res<HudReadout>,
    q_player: Query<&Transform, (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<(&mut Transform, &mut PointLight2d), (With<PlayerLight>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_light, mut light)) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
    light.radius = light_range(hud.speed);
}
