//! Rope between the player and its hook.

use bevy::prelude::*;

use crate::plugins::grapple::{Hook, HookState, Weapon};
use crate::plugins::player::Player;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct TetherLine {
    pub visible: bool,
    pub from: Vec2,
    pub to: Vec2,
}

/// Visible while the weapon holds a live hook (in flight or attached).
pub fn update_tether_line(
    q_player: Query<(&Transform, &Weapon), With<Player>>,
    q_hook: Query<(&Transform, &Hook), Without<Player>>,
    mut tether: ResMut<TetherLine>,
) {
    let line = q_player.iter().find_map(|(tf, weapon)| {
        let (hook_tf, hook) = q_hook.get(weapon.hook()?).ok()?;
        if hook.state() == HookState::Destroyed {
            return None;
        }
        Some((tf.translation.truncate(), hook_tf.translation.truncate()))
    });

    *tether = match line {
        Some((from, to)) => TetherLine { visible: true, from, to },
        None => TetherLine { visible: false, ..*tether },
    };
}
