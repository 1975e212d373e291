//! Swing direction hint.
//!
//! Predicts which way the player would swing if a hook landed under the cursor right now:
//! the tether tangent `r × forward`, flipped to whichever side agrees with the current
//! velocity. Opt-in through [`Preferences::show_direction_arrow`].

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::math::{angle_between_degrees, cross_with_forward};
use crate::plugins::input::Aim;
use crate::plugins::player::{Player, SwingController};
use crate::plugins::prefs::Preferences;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectionArrow {
    pub visible: bool,
    pub origin: Vec2,
    /// Unit vector, or zero when there is nothing to predict.
    pub direction: Vec2,
}

/// Unit tangent the player would start along around a pivot at `cursor`.
pub fn predicted_direction(player: Vec2, velocity: Vec2, cursor: Vec2) -> Vec2 {
    let tangent = cross_with_forward(player - cursor);
    let multiplier = if angle_between_degrees(tangent, velocity) < 90.0 {
        1.0
    } else {
        -1.0
    };
    (tangent * multiplier).normalize_or_zero()
}

pub fn update_direction_arrow(
    prefs: Res<Preferences>,
    aim: Res<Aim>,
    q_player: Query<(&Transform, &LinearVelocity, &SwingController), With<Player>>,
    mut arrow: ResMut<DirectionArrow>,
) {
    let Ok((tf, vel, swing)) = q_player.single() else {
        arrow.visible = false;
        return;
    };
    let origin = tf.translation.truncate();
    let direction = aim
        .world_cursor
        .map(|cursor| predicted_direction(origin, vel.0, cursor))
        .unwrap_or(Vec2::ZERO);

    *arrow = DirectionArrow {
        visible: prefs.show_direction_arrow && !swing.is_swinging() && direction != Vec2::ZERO,
        origin,
        direction,
    };
}
