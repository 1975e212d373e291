//! Grapple plugin: the weapon and its hook.
//!
//! # Lifecycle
//! ```text
//!            Shoot                 Terrain                Release
//!   (none) ───────► InFlight ────────────────► Attached ──────────► Destroyed
//!                      │  Hazard / out of range                         ▲
//!                      └────────────────────────────────────────────────┘
//! ```
//!
//! # Ownership
//! The `Weapon` lives on the player and owns zero or one hook entity. It is the only
//! writer of `Weapon::hook`; every hook-scoped subscriber checks `Weapon::owns` before
//! acting, so messages about a hook the weapon has already let go of are ignored.
//!
//! # Schedules
//! - FixedUpdate (in [`GrappleSet`] order): fire, range check, landing bookkeeping,
//!   teardown on release.
//! - FixedPostUpdate: hook collisions, after avian's collision events.
//! - PostUpdate: despawn hooks flagged `PendingDespawn`.

pub mod collision;
pub mod commit;
pub mod components;
pub mod request;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::events::GrappleSet;

pub use components::{Hook, HookState, PendingDespawn, Weapon};

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, request::fire_on_shoot.in_set(GrappleSet::Fire))
        .add_systems(
            FixedUpdate,
            commit::enforce_grapple_range.in_set(GrappleSet::RangeCheck),
        )
        .add_systems(FixedUpdate, commit::on_hook_outcome.in_set(GrappleSet::Landing))
        .add_systems(
            FixedUpdate,
            commit::destroy_hook_on_release.in_set(GrappleSet::HookTeardown),
        );

    app.add_systems(
        FixedPostUpdate,
        collision::process_hook_collisions
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(PostUpdate, commit::despawn_pending);
}
