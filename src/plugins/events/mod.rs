//! Game event bus.
//!
//! # Channels
//! The bus is the set of message types in [`messages`]. It is passed to every component
//! as system parameters; there is no global manager object.
//!
//! # Subscriber order
//! Grapple subscribers run in FixedUpdate inside [`GrappleSet`], and the sets are chained.
//! The order below is the invocation order for every tick:
//!
//! ```text
//! Dispatch     ShootPressed/ReleasePressed -> Shoot, ReleaseGate
//! Fire         Shoot -> Weapon spawns Hook
//! RangeCheck   Weapon destroys an out-of-range Hook
//! Landing      HookLanded -> SwingPivot + ReleaseGate settle, Weapon stops shooting
//!              HookLandedOnHazard -> Weapon forgets its Hook
//! SwingEntry   HookLanded -> SwingController enters Swinging
//! ReleaseFlush ReleaseGate + SwingPivot -> Release
//! SwingExit    Release -> SwingController leaves Swinging
//! HookTeardown Release -> Weapon destroys its Hook
//! Swing        SwingController advances the orbit
//! ```
//!
//! Collision-driven events (`HookLanded`, `HookLandedOnHazard`, `Death`) are produced in
//! FixedPostUpdate after avian emits `CollisionStart`, and consumed on the next tick.
//!
//! # Liveness
//! Subscribers that concern a hook match on the hook `Entity` carried by the message.
//! A destroyed hook is flagged `Destroyed` + `PendingDespawn` immediately and despawned in
//! PostUpdate, so no subscriber scheduled after the destruction acts on it.

pub mod messages;
pub mod release;

use bevy::prelude::*;

use crate::common::state::GameState;

pub use messages::*;
pub use messages::Release;
pub use release::{ReleaseGate, SwingPivot};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrappleSet {
    Dispatch,
    Fire,
    RangeCheck,
    Landing,
    SwingEntry,
    ReleaseFlush,
    SwingExit,
    HookTeardown,
    Swing,
}

pub fn plugin(app: &mut App) {
    app.add_message::<ShootPressed>()
        .add_message::<ReleasePressed>()
        .add_message::<Shoot>()
        .add_message::<HookLanded>()
        .add_message::<HookLandedOnHazard>()
        .add_message::<HookDestroyed>()
        .add_message::<Release>()
        .add_message::<Death>()
        .add_message::<PlayAgain>()
        .add_message::<ToggleDirectionArrow>();

    app.init_resource::<ReleaseGate>()
        .init_resource::<SwingPivot>();

    app.configure_sets(
        FixedUpdate,
        (
            GrappleSet::Dispatch,
            GrappleSet::Fire,
            GrappleSet::RangeCheck,
            GrappleSet::Landing,
            GrappleSet::SwingEntry,
            GrappleSet::ReleaseFlush,
            GrappleSet::SwingExit,
            GrappleSet::HookTeardown,
            GrappleSet::Swing,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(OnEnter(GameState::InGame), release::reset_bus_state)
        .add_systems(FixedUpdate, release::dispatch_input.in_set(GrappleSet::Dispatch))
        .add_systems(FixedUpdate, release::record_pivot.in_set(GrappleSet::Landing))
        .add_systems(
            FixedUpdate,
            release::flush_pending_release.in_set(GrappleSet::ReleaseFlush),
        );
}
