//! Pivot state and the deferred release.
//!
//! Letting go of the shoot button while the hook is still flying must not be lost: the
//! release is armed and fires once a pivot exists. It is keyed by the shot generation,
//! so a new shot disarms it and a stale release can never apply to a fresh hookshot.
//!
//! A freshly recorded pivot settles for one tick before an armed release may fire, so a
//! player who let go early is still seen swinging for one tick. A release pressed against
//! an older pivot fires on the same tick.
//!
//! ```text
//! ShootPressed   -> gate.begin_shot()       (generation += 1, pending cleared) -> Shoot
//! ReleasePressed -> gate.request_release()  (pending = current generation)
//! HookLanded     -> pivot = Pivot(p), gate.pivot_recorded()
//! each tick      -> gate.take_ready(pivot)  -> Release, pivot = NoPivot
//! ```

use bevy::prelude::*;

use super::messages::{HookLanded, Release, ReleasePressed, Shoot, ShootPressed};

/// The bus's view of the current pivot.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub enum SwingPivot {
    #[default]
    NoPivot,
    Pivot(Vec2),
}

impl SwingPivot {
    #[inline]
    pub fn point(self) -> Option<Vec2> {
        match self {
            SwingPivot::NoPivot => None,
            SwingPivot::Pivot(p) => Some(p),
        }
    }

    #[inline]
    pub fn is_set(self) -> bool {
        matches!(self, SwingPivot::Pivot(_))
    }
}

/// Cancellable one-shot release keyed by shot generation.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseGate {
    generation: u64,
    pending: Option<u64>,
    /// A pivot was recorded this tick.
    settling: bool,
}

impl ReleaseGate {
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a new shot: bump the generation and disarm any pending release.
    pub fn begin_shot(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.generation
    }

    /// Arm a release for the current shot.
    pub fn request_release(&mut self) {
        self.pending = Some(self.generation);
    }

    /// A pivot was just recorded: hold armed releases until the next tick.
    pub fn pivot_recorded(&mut self) {
        self.settling = true;
    }

    /// Consume the pending release if it belongs to the current shot and a pivot exists
    /// that was recorded before this tick. Called once per tick.
    pub fn take_ready(&mut self, pivot: SwingPivot) -> bool {
        if std::mem::take(&mut self.settling) {
            return false;
        }
        match self.pending {
            Some(armed) if armed == self.generation && pivot.is_set() => {
                self.pending = None;
                true
            }
            Some(armed) if armed != self.generation => {
                self.pending = None;
                false
            }
            _ => false,
        }
    }
}

/// Turn input intents into bus events. Shots are handled before releases so a
/// press+release inside one tick arms the release for the new shot.
pub fn dispatch_input(
    mut gate: ResMut<ReleaseGate>,
    mut shoot_pressed: MessageReader<ShootPressed>,
    mut release_pressed: MessageReader<ReleasePressed>,
    mut shoot: MessageWriter<Shoot>,
) {
    for pressed in shoot_pressed.read() {
        let generation = gate.begin_shot();
        debug!("Shot {generation} requested");
        shoot.write(Shoot {
            generation,
            cursor: pressed.cursor,
        });
    }

    for _ in release_pressed.read() {
        gate.request_release();
    }
}

/// Subscriber: remember where the hook landed.
pub fn record_pivot(
    mut gate: ResMut<ReleaseGate>,
    mut pivot: ResMut<SwingPivot>,
    mut landed: MessageReader<HookLanded>,
) {
    for ev in landed.read() {
        *pivot = SwingPivot::Pivot(ev.pivot);
        gate.pivot_recorded();
    }
}

/// Fire the armed release once a pivot exists, then forget the pivot.
pub fn flush_pending_release(
    mut gate: ResMut<ReleaseGate>,
    mut pivot: ResMut<SwingPivot>,
    mut release: MessageWriter<Release>,
) {
    if !gate.take_ready(*pivot) {
        return;
    }
    if let Some(point) = pivot.point() {
        debug!("Releasing from pivot {point}");
    }
    release.write(Release);
    *pivot = SwingPivot::NoPivot;
}

/// Fresh session: no pivot, nothing armed.
pub fn reset_bus_state(mut gate: ResMut<ReleaseGate>, mut pivot: ResMut<SwingPivot>) {
    *gate = ReleaseGate::default();
    *pivot = SwingPivot::NoPivot;
}
