//! Player death detection.
//!
//! The player dies on touching a hazard, on touching terrain while not attached to a
//! pivot, or on leaving the play area. Death is reported once per life: the player is
//! flagged `Killed` and ignored afterwards.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::SurfaceKind;
use crate::common::tunables::Tunables;
use crate::plugins::events::Death;

use super::swing::SwingController;
use super::Player;

/// How far outside the walls/floor counts as having left the play area.
const OUT_OF_BOUNDS_MARGIN: f32 = 1.0;

#[derive(Component, Debug, Clone, Copy)]
pub struct Killed;

pub fn detect_player_collisions(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut q_player: Query<
        (&Transform, &mut LinearVelocity, &SwingController),
        (With<Player>, Without<Killed>),
    >,
    q_layers: Query<&CollisionLayers>,
    mut deaths: MessageWriter<Death>,
) {
    for ev in started.read() {
        let (player_e, other) = if q_player.contains(ev.collider1) {
            (ev.collider1, ev.collider2)
        } else if q_player.contains(ev.collider2) {
            (ev.collider2, ev.collider1)
        } else {
            continue;
        };

        let Some(surface) = q_layers.get(other).ok().and_then(SurfaceKind::classify) else {
            continue;
        };
        let Ok((tf, mut vel, swing)) = q_player.get_mut(player_e) else {
            continue;
        };
        if surface == SurfaceKind::Terrain && swing.is_swinging() {
            continue;
        }

        let at = tf.translation.truncate();
        vel.0 = Vec2::ZERO;
        commands.entity(player_e).insert(Killed);
        info!("Player hit {surface:?} at {at}");
        deaths.write(Death { at });
        // One death per player per batch; the entity is `Killed` from the next run on.
        break;
    }
}

#[inline]
pub fn is_out_of_bounds(position: Vec2, tunables: &Tunables) -> bool {
    position.x.abs() > tunables.play_area_half_width + OUT_OF_BOUNDS_MARGIN
        || position.y < tunables.floor_y - OUT_OF_BOUNDS_MARGIN
}

pub fn detect_out_of_bounds(
    mut commands: Commands,
    tunables: Res<Tunables>,
    q_player: Query<(Entity, &Transform), (With<Player>, Without<Killed>)>,
    mut deaths: MessageWriter<Death>,
) {
    for (e, tf) in &q_player {
        let at = tf.translation.truncate();
        if is_out_of_bounds(at, &tunables) {
            commands.entity(e).insert(Killed);
            info!("Player left the play area at {at}");
            deaths.write(Death { at });
        }
    }
}
