//! Hook collision resolve.
//!
//! Runs after avian emits `CollisionStart`. Only in-flight hooks react:
//! - Terrain: attach, freeze in place, publish `HookLanded`.
//! - Hazard: destroy, publish `HookLandedOnHazard` + `HookDestroyed`.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::SurfaceKind;
use crate::plugins::events::{HookDestroyCause, HookDestroyed, HookLanded, HookLandedOnHazard};

use super::components::{Hook, PendingDespawn};

/// Split a collision into (hook collider, other collider), if exactly one side is a hook.
#[inline]
fn hook_and_other(ev: &CollisionStart, is_hook: impl Fn(Entity) -> bool) -> Option<(Entity, Entity)> {
    let h1 = is_hook(ev.collider1);
    let h2 = is_hook(ev.collider2);
    match (h1, h2) {
        (true, false) => Some((ev.collider1, ev.collider2)),
        (false, true) => Some((ev.collider2, ev.collider1)),
        _ => None,
    }
}

pub fn process_hook_collisions(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut q_hooks: Query<(&mut Hook, &Transform, &mut LinearVelocity)>,
    q_layers: Query<&CollisionLayers>,
    mut landed: MessageWriter<HookLanded>,
    mut on_hazard: MessageWriter<HookLandedOnHazard>,
    mut destroyed: MessageWriter<HookDestroyed>,
) {
    for ev in started.read() {
        let Some((hook_e, other)) = hook_and_other(ev, |e| q_hooks.contains(e)) else {
            continue;
        };
        let Ok(other_layers) = q_layers.get(other) else {
            continue;
        };
        let Some(surface) = SurfaceKind::classify(other_layers) else {
            continue;
        };
        let Ok((mut hook, tf, mut vel)) = q_hooks.get_mut(hook_e) else {
            continue;
        };

        match surface {
            SurfaceKind::Terrain => {
                if !hook.attach() {
                    continue;
                }
                vel.0 = Vec2::ZERO;
                // Kinematic with zero velocity: fixed to the (static) terrain.
                commands.entity(hook_e).insert(RigidBody::Kinematic);

                let pivot = tf.translation.truncate();
                info!("Hook {hook_e:?} landed at {pivot}");
                landed.write(HookLanded { hook: hook_e, pivot });
            }
            SurfaceKind::Hazard => {
                if !hook.hit_hazard() {
                    continue;
                }
                vel.0 = Vec2::ZERO;
                commands.entity(hook_e).insert(PendingDespawn);

                debug!("Hook {hook_e:?} hit a hazard");
                on_hazard.write(HookLandedOnHazard { hook: hook_e });
                destroyed.write(HookDestroyed {
                    hook: hook_e,
                    cause: HookDestroyCause::Hazard,
                });
            }
        }
    }
}
