//! Weapon-side hook bookkeeping and teardown.
//!
//! This module is the single place a hook is destroyed on purpose (range, release).
//! Destruction flags the hook `Destroyed` + `PendingDespawn` and writes one
//! `HookDestroyed`; the entity itself is swept in PostUpdate.

use bevy::prelude::*;

use crate::plugins::events::{
    HookDestroyCause, HookDestroyed, HookLanded, HookLandedOnHazard, Release,
};

use super::components::{Hook, PendingDespawn, Weapon};

/// Destroy the weapon's hook, if it has one. Idempotent: a second call finds no hook
/// and writes nothing.
pub fn destroy_hook(
    commands: &mut Commands,
    weapon: &mut Weapon,
    q_hooks: &mut Query<&mut Hook>,
    destroyed: &mut MessageWriter<HookDestroyed>,
    cause: HookDestroyCause,
) -> bool {
    let Some(e) = weapon.take_hook() else {
        return false;
    };
    let Ok(mut hook) = q_hooks.get_mut(e) else {
        return false;
    };
    if !hook.destroy() {
        return false;
    }

    commands.entity(e).insert(PendingDespawn);
    debug!("Hook {e:?} destroyed: {cause:?}");
    destroyed.write(HookDestroyed { hook: e, cause });
    true
}

/// Destroy an in-flight hook that has gone past the weapon's range.
pub fn enforce_grapple_range(
    mut commands: Commands,
    mut q_weapon: Query<(&Transform, &mut Weapon)>,
    q_hook_tf: Query<&Transform, With<Hook>>,
    mut q_hooks: Query<&mut Hook>,
    mut destroyed: MessageWriter<HookDestroyed>,
) {
    for (tf, mut weapon) in &mut q_weapon {
        if !weapon.is_shooting() {
            continue;
        }
        let Some(hook_e) = weapon.hook() else {
            continue;
        };
        // An attached hook is the pivot now, not a shot.
        if !q_hooks.get(hook_e).is_ok_and(|hook| hook.is_in_flight()) {
            continue;
        }
        let hook_position = q_hook_tf.get(hook_e).ok().map(|htf| htf.translation.truncate());

        if weapon.check_range_exceeded(weapon.fire_point(tf), hook_position) {
            info!("Hook {hook_e:?} out of range");
            destroy_hook(
                &mut commands,
                &mut weapon,
                &mut q_hooks,
                &mut destroyed,
                HookDestroyCause::RangeExceeded,
            );
        }
    }
}

/// Landing subscriber: the owning weapon stops shooting (and forgets a lost hook).
pub fn on_hook_outcome(
    mut landed: MessageReader<HookLanded>,
    mut on_hazard: MessageReader<HookLandedOnHazard>,
    mut q_weapon: Query<&mut Weapon>,
) {
    for ev in landed.read() {
        for mut weapon in &mut q_weapon {
            if weapon.owns(ev.hook) {
                weapon.hook_landed();
            }
        }
    }
    for ev in on_hazard.read() {
        for mut weapon in &mut q_weapon {
            if weapon.owns(ev.hook) {
                weapon.hook_lost();
            }
        }
    }
}

/// Release subscriber: the hook goes away with the swing.
pub fn destroy_hook_on_release(
    mut commands: Commands,
    mut releases: MessageReader<Release>,
    mut q_weapon: Query<&mut Weapon>,
    mut q_hooks: Query<&mut Hook>,
    mut destroyed: MessageWriter<HookDestroyed>,
) {
    for _ in releases.read() {
        for mut weapon in &mut q_weapon {
            destroy_hook(
                &mut commands,
                &mut weapon,
                &mut q_hooks,
                &mut destroyed,
                HookDestroyCause::Released,
            );
        }
    }
}

/// PostUpdate sweep for flagged entities.
pub fn despawn_pending(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
