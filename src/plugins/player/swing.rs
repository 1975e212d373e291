//! Swing controller: the player's Flying/Swinging state machine.
//!
//! While swinging, physics no longer drives the player. The controller orbits the player
//! around the pivot at `speed` (linear units/s), so angular speed is `speed / |r|` and a
//! shorter tether spins faster at the same speed.
//!
//! ```text
//!            HookLanded(pivot)
//!   Flying ────────────────────► Swinging { pivot, direction }
//!      ▲                              │
//!      └──────────── Release ─────────┘   (exit velocity handed back to physics)
//! ```
//!
//! Direction sign convention: `Clockwise` is `+1`, the sign of the rotation angle fed to
//! [`rotate_around`]. It is chosen when the pre-swing velocity points away from the
//! `r × forward` tangent.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::math::{
    angle_between_degrees, cross_with_forward, forward_cross, rotate_around, sign_or_zero,
};
use crate::common::tunables::Tunables;
use crate::plugins::events::{HookLanded, Release};
use crate::plugins::grapple::Weapon;

use super::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingDirection {
    Clockwise,
    AntiClockwise,
}

impl SwingDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            SwingDirection::Clockwise => 1.0,
            SwingDirection::AntiClockwise => -1.0,
        }
    }

    /// The rotational sense that keeps the player's momentum when the tether goes taut.
    pub fn from_momentum(radius: Vec2, velocity: Vec2) -> Self {
        let tangent = cross_with_forward(radius);
        if angle_between_degrees(tangent, velocity) > 90.0 {
            SwingDirection::Clockwise
        } else {
            SwingDirection::AntiClockwise
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SwingPhase {
    #[default]
    Flying,
    Swinging {
        pivot: Vec2,
        direction: SwingDirection,
    },
}

/// Swing constants, lifted out of [`Tunables`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingParams {
    pub swing_speed_boost: f32,
    pub minimum_swing_speed: f32,
    pub swing_deceleration: f32,
    pub boost_radius_floor: f32,
    pub near_pivot_radius: f32,
    pub near_pivot_nudge: f32,
}

impl From<&Tunables> for SwingParams {
    fn from(t: &Tunables) -> Self {
        Self {
            swing_speed_boost: t.swing_speed_boost,
            minimum_swing_speed: t.minimum_swing_speed,
            swing_deceleration: t.swing_deceleration,
            boost_radius_floor: t.boost_radius_floor,
            near_pivot_radius: t.near_pivot_radius,
            near_pivot_nudge: t.near_pivot_nudge,
        }
    }
}

/// Result of one swing tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingStep {
    pub position: Vec2,
    /// Signed rotation applied this tick, radians.
    pub angle: f32,
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct SwingController {
    phase: SwingPhase,
    speed: f32,
}

impl SwingController {
    #[inline]
    pub fn phase(&self) -> SwingPhase {
        self.phase
    }

    #[inline]
    pub fn is_swinging(&self) -> bool {
        matches!(self.phase, SwingPhase::Swinging { .. })
    }

    #[inline]
    pub fn pivot(&self) -> Option<Vec2> {
        match self.phase {
            SwingPhase::Swinging { pivot, .. } => Some(pivot),
            SwingPhase::Flying => None,
        }
    }

    #[inline]
    pub fn direction(&self) -> Option<SwingDirection> {
        match self.phase {
            SwingPhase::Swinging { direction, .. } => Some(direction),
            SwingPhase::Flying => None,
        }
    }

    /// Orbit speed. Only meaningful while swinging.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Speed shown to the player: orbit speed while swinging, physics speed otherwise.
    pub fn current_speed(&self, velocity: Vec2) -> f32 {
        if self.is_swinging() {
            self.speed
        } else {
            velocity.length()
        }
    }

    /// `max(|v| + boost / max(|r|, floor), minimum)`.
    pub fn entry_speed(velocity: Vec2, radius: f32, params: &SwingParams) -> f32 {
        let boost = params.swing_speed_boost / radius.max(params.boost_radius_floor);
        (velocity.length() + boost).max(params.minimum_swing_speed)
    }

    /// Flying -> Swinging around `pivot`. Returns `false` (and changes nothing) if already
    /// swinging: there is only ever one pivot.
    pub fn begin(&mut self, position: Vec2, velocity: Vec2, pivot: Vec2, params: &SwingParams) -> bool {
        if self.is_swinging() {
            return false;
        }
        let radius = position - pivot;
        let direction = SwingDirection::from_momentum(radius, velocity);

        self.speed = Self::entry_speed(velocity, radius.length(), params);
        self.phase = SwingPhase::Swinging { pivot, direction };
        true
    }

    /// Angular speed in radians per second at `position`, while swinging.
    pub fn angular_speed(&self, position: Vec2) -> Option<f32> {
        let pivot = self.pivot()?;
        let radius = (position - pivot).length().max(f32::EPSILON);
        Some(self.speed / radius)
    }

    /// Advance the orbit by `dt` seconds. `None` while flying.
    ///
    /// Inside `near_pivot_radius` the player is first pushed outward by `near_pivot_nudge`
    /// so the angular speed stays bounded. Speed then decays by one tick's deceleration,
    /// never past zero.
    pub fn step(&mut self, position: Vec2, dt: f32, params: &SwingParams) -> Option<SwingStep> {
        let SwingPhase::Swinging { pivot, direction } = self.phase else {
            return None;
        };

        let mut position = position;
        let radius = position - pivot;
        if radius.length() < params.near_pivot_radius {
            let outward = radius.try_normalize().unwrap_or(Vec2::Y);
            position += outward * params.near_pivot_nudge;
        }

        let angular_speed = self.angular_speed(position).unwrap_or(0.0);
        let angle = direction.sign() * angular_speed * dt;
        let position = rotate_around(position, pivot, angle);

        self.speed = sign_or_zero(self.speed) * (self.speed.abs() - params.swing_deceleration).max(0.0);

        Some(SwingStep { position, angle })
    }

    /// Swinging -> Flying. Returns the tangential exit velocity, or `None` if not swinging.
    pub fn release(&mut self, position: Vec2) -> Option<Vec2> {
        let SwingPhase::Swinging { pivot, direction } = self.phase else {
            return None;
        };
        let radius = (position - pivot).normalize_or_zero();
        let exit = forward_cross(radius) * self.speed * direction.sign();

        self.phase = SwingPhase::Flying;
        Some(exit)
    }
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

/// HookLanded subscriber: take over from physics.
pub fn begin_swing_on_land(
    tunables: Res<Tunables>,
    mut landed: MessageReader<HookLanded>,
    mut q_player: Query<
        (
            &Transform,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut SwingController,
            &Weapon,
        ),
        With<Player>,
    >,
) {
    let params = SwingParams::from(&*tunables);

    for ev in landed.read() {
        for (tf, mut vel, mut gravity, mut swing, weapon) in &mut q_player {
            if !weapon.owns(ev.hook) {
                continue;
            }
            if !swing.begin(tf.translation.truncate(), vel.0, ev.pivot, &params) {
                debug!("Already swinging; ignoring landing at {}", ev.pivot);
                continue;
            }
            vel.0 = Vec2::ZERO;
            gravity.0 = 0.0;
            info!(
                "Swinging around {} ({:?}, speed {:.2})",
                ev.pivot,
                swing.direction(),
                swing.speed()
            );
        }
    }
}

/// Release subscriber: hand the tangential velocity back to physics.
pub fn end_swing_on_release(
    mut releases: MessageReader<Release>,
    mut q_player: Query<
        (
            &Transform,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut SwingController,
        ),
        With<Player>,
    >,
) {
    for _ in releases.read() {
        for (tf, mut vel, mut gravity, mut swing) in &mut q_player {
            let Some(exit) = swing.release(tf.translation.truncate()) else {
                continue;
            };
            vel.0 = exit;
            gravity.0 = 1.0;
            info!("Released with velocity {exit}");
        }
    }
}

/// Per fixed tick: move swinging players along their orbit.
pub fn advance_swing(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q_player: Query<(&mut Transform, &mut LinearVelocity, &mut SwingController), With<Player>>,
) {
    let params = SwingParams::from(&*tunables);
    let dt = time.delta_secs();

    for (mut tf, mut vel, mut swing) in &mut q_player {
        let Some(step) = swing.step(tf.translation.truncate(), dt, &params) else {
            continue;
        };
        tf.translation = step.position.extend(tf.translation.z);
        tf.rotate_z(step.angle);
        vel.0 = Vec2::ZERO;
    }
}
