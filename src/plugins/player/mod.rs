//! Player plugin.
//!
//! Pipeline:
//! - OnEnter(InGame): spawn the player with a `SwingController` and a `Weapon`.
//! - FixedUpdate: face the aim point while flying; swing entry/exit/advance run in their
//!   `GrappleSet` slots; out-of-bounds check.
//! - FixedPostUpdate: surface contact -> `Death`.

pub mod death;
pub mod swing;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::events::GrappleSet;
use crate::plugins::grapple::Weapon;
use crate::plugins::input::Aim;

pub use death::Killed;
pub use swing::{SwingController, SwingDirection, SwingParams, SwingPhase};

#[derive(Component)]
pub struct Player;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            FixedUpdate,
            face_aim
                .before(GrappleSet::Dispatch)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            swing::begin_swing_on_land.in_set(GrappleSet::SwingEntry),
        )
        .add_systems(
            FixedUpdate,
            swing::end_swing_on_release.in_set(GrappleSet::SwingExit),
        )
        .add_systems(FixedUpdate, swing::advance_swing.in_set(GrappleSet::Swing))
        .add_systems(
            FixedUpdate,
            death::detect_out_of_bounds
                .after(GrappleSet::Swing)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            death::detect_player_collisions
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
}

#[inline]
fn player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::Terrain, Layer::Hazard])
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let r = tunables.player_radius;

    commands.spawn((
        Name::new("Player"),
        Player,
        SwingController::default(),
        Weapon::new(tunables.max_grapple_range, tunables.fire_point_offset),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(r * 2.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        RigidBody::Dynamic,
        Collider::circle(r),
        Sensor,
        player_layers(),
        LockedAxes::ROTATION_LOCKED,
        GravityScale(1.0),
        LinearVelocity(Vec2::Y * tunables.launch_speed),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

/// Rotation that points local +Y from `from` towards `to`.
#[inline]
pub fn aim_rotation(from: Vec2, to: Vec2) -> Option<Quat> {
    let d = to - from;
    if d.length_squared() < 1e-6 {
        return None;
    }
    Some(Quat::from_rotation_z(-d.x.atan2(d.y)))
}

/// While flying, the player faces the aim point.
fn face_aim(aim: Res<Aim>, mut q_player: Query<(&mut Transform, &SwingController), With<Player>>) {
    let Some(cursor) = aim.world_cursor else {
        return;
    };
    for (mut tf, swing) in &mut q_player {
        if swing.is_swinging() {
            continue;
        }
        if let Some(rotation) = aim_rotation(tf.translation.truncate(), cursor) {
            tf.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests;
