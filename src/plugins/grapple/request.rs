//! Shoot subscriber: turn a `Shoot` into a launched hook.
//!
//! The weapon decides whether a shot is allowed (one hook at a time); the hook decides its
//! own velocity. Firing while a hook is out is a silent no-op.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::events::Shoot;

use super::components::{facing, Hook, Weapon};

#[inline]
pub fn hook_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Hook, [Layer::Terrain, Layer::Hazard])
}

pub fn fire_on_shoot(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut shots: MessageReader<Shoot>,
    mut q_weapon: Query<(&Transform, &mut Weapon)>,
) {
    for shot in shots.read() {
        for (tf, mut weapon) in &mut q_weapon {
            let fire_point = weapon.fire_point(tf);
            let Some(direction) = weapon.fire(fire_point, shot.cursor, facing(tf)) else {
                debug!("Shot {} ignored: hook already out", shot.generation);
                continue;
            };

            let mut hook = Hook::new();
            let Some(velocity) = hook.launch(direction, tunables.hook_speed) else {
                continue;
            };

            let e = spawn_hook(&mut commands, hook, fire_point, velocity, tunables.hook_radius);
            weapon.arm(e);
            debug!("Shot {} launched hook {e:?}", shot.generation);
        }
    }
}

fn spawn_hook(
    commands: &mut Commands,
    hook: Hook,
    at: Vec2,
    velocity: Vec2,
    radius: f32,
) -> Entity {
    commands
        .spawn((
            Name::new("Hook"),
            hook,
            Sprite {
                color: Color::srgb(0.95, 0.8, 0.35),
                custom_size: Some(Vec2::splat(radius * 2.0)),
                ..default()
            },
            Transform::from_translation(at.extend(2.0)),
            RigidBody::Dynamic,
            GravityScale(0.0),
            Collider::circle(radius),
            Sensor,
            hook_layers(),
            LinearVelocity(velocity),
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}
