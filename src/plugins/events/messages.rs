//! Named event channels.
//!
//! Each type here is one channel of the game event bus. Producers write through a
//! `MessageWriter`, subscribers are systems holding a `MessageReader`; nothing is looked
//! up through global state.
//!
//! Two layers:
//! - intents from the input collaborator (`ShootPressed`, `ReleasePressed`),
//! - bus events the gameplay systems react to (everything else).

use bevy::prelude::*;

/// Edge-triggered "shoot" from input. `cursor` is the aim point in world space, if known.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ShootPressed {
    pub cursor: Option<Vec2>,
}

/// Edge-triggered "release" from input.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleasePressed;

/// A new shot. `generation` identifies it; any release armed for an older shot is dead.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct Shoot {
    pub generation: u64,
    pub cursor: Option<Vec2>,
}

/// A hook attached to terrain at `pivot`.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct HookLanded {
    pub hook: Entity,
    pub pivot: Vec2,
}

/// A hook touched a hazard and was lost.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HookLandedOnHazard {
    pub hook: Entity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookDestroyCause {
    RangeExceeded,
    Hazard,
    Released,
}

/// A hook left the game. Written exactly once per hook.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HookDestroyed {
    pub hook: Entity,
    pub cause: HookDestroyCause,
}

/// Let go of the current pivot.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release;

/// The player died at `at`.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct Death {
    pub at: Vec2,
}

/// Restart the session from the death menu.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayAgain;

/// Flip the persisted "show direction arrow" preference.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleDirectionArrow;
