//! Speed and height readout.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::plugins::player::{Player, SwingController};

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct HudReadout {
    /// Never negative.
    pub speed: f32,
    /// Whole units climbed above the origin, floored at 0.
    pub height: i32,
}

impl HudReadout {
    pub fn from_player(position: Vec2, velocity: Vec2, swing: &SwingController) -> Self {
        Self {
            speed: swing.current_speed(velocity).max(0.0),
            height: position.y.max(0.0) as i32,
        }
    }
}

pub fn update_hud_readout(
    q_player: Query<(&Transform, &LinearVelocity, &SwingController), With<Player>>,
    mut hud: ResMut<HudReadout>,
) {
    let Ok((tf, vel, swing)) = q_player.single() else {
        return;
    };
    let next = HudReadout::from_player(tf.translation.truncate(), vel.0, swing);
    if *hud != next {
        *hud = next;
    }
}
