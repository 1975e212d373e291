//! Input plugin.
//!
//! Turns raw device state into bus intents. Bindings are fixed:
//! - left mouse press -> `ShootPressed`, left mouse release -> `ReleasePressed` (in play),
//! - `R` or left click -> `PlayAgain`, `A` -> `ToggleDirectionArrow` (death menu, once the
//!   input lock has run out).
//!
//! Everything runs in Update; the FixedUpdate subscribers pick the intents up on the next
//! fixed tick.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::camera::MainCamera;
use crate::plugins::events::{PlayAgain, ReleasePressed, ShootPressed, ToggleDirectionArrow};
use crate::plugins::session::InputLock;

/// Aim point in world space. `None` when the cursor is outside the window or there is no
/// camera to project through.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    pub world_cursor: Option<Vec2>,
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputSet;

pub fn plugin(app: &mut App) {
    app.init_resource::<Aim>()
        .add_systems(
            Update,
            (update_aim_from_cursor, gather_grapple_input)
                .chain()
                .in_set(InputSet)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            gather_menu_input
                .in_set(InputSet)
                .run_if(in_state(GameState::Dead)),
        );
}

/// Project the window cursor through the main camera into [`Aim`].
pub fn update_aim_from_cursor(
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut aim: ResMut<Aim>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        aim.world_cursor = None;
        return;
    };
    let (camera, camera_tf) = match q_camera.single() {
        Ok(v) => v,
        Err(e) => {
            debug!("No single MainCamera: {e:?}");
            return;
        }
    };

    aim.world_cursor = match camera.viewport_to_world_2d(camera_tf, cursor) {
        Ok(p) => Some(p),
        Err(e) => {
            debug!("viewport_to_world_2d failed: {e:?}");
            None
        }
    };
}

/// Edge-triggered grapple intents.
pub fn gather_grapple_input(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    aim: Res<Aim>,
    mut shoot: MessageWriter<ShootPressed>,
    mut release: MessageWriter<ReleasePressed>,
) {
    let Some(buttons) = buttons else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        shoot.write(ShootPressed { cursor: aim.world_cursor });
    }
    if buttons.just_released(MouseButton::Left) {
        release.write(ReleasePressed);
    }
}

/// Death menu choices, ignored until the input lock runs out.
pub fn gather_menu_input(
    lock: Res<InputLock>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut play_again: MessageWriter<PlayAgain>,
    mut toggle: MessageWriter<ToggleDirectionArrow>,
) {
    if lock.is_locked() {
        return;
    }

    let clicked = buttons.is_some_and(|b| b.just_pressed(MouseButton::Left));
    let (restart_key, toggle_key) = match keys {
        Some(keys) => (keys.just_pressed(KeyCode::KeyR), keys.just_pressed(KeyCode::KeyA)),
        None => (false, false),
    };

    if toggle_key {
        toggle.write(ToggleDirectionArrow);
    }
    if restart_key || clicked {
        play_again.write(PlayAgain);
    }
}
