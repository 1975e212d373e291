//! Session plugin: the play / death-menu loop.
//!
//! ```text
//! InGame --Death--> Dead (InputLock armed)
//! Dead --PlayAgain (lock expired)--> InGame
//! ```
//!
//! Every gameplay entity is `DespawnOnExit(InGame)`, so leaving play tears the level down and
//! re-entering spawns a fresh one.

use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::events::{Death, PlayAgain};
use crate::plugins::input::InputSet;

/// Death-menu input cooldown. Unlocked when no timer is running.
#[derive(Resource, Debug, Default, Clone)]
pub struct InputLock(Option<Timer>);

impl InputLock {
    pub fn locked_for(secs: f32) -> Self {
        Self(Some(Timer::from_seconds(secs.max(0.0), TimerMode::Once)))
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.0.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        if let Some(timer) = self.0.as_mut() {
            timer.tick(delta);
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<InputLock>()
        .add_systems(Update, on_death.run_if(in_state(GameState::InGame)))
        .add_systems(
            Update,
            tick_input_lock
                .before(InputSet)
                .run_if(in_state(GameState::Dead)),
        )
        .add_systems(
            Update,
            on_play_again
                .after(InputSet)
                .run_if(in_state(GameState::Dead)),
        );
}

pub fn on_death(
    tunables: Res<Tunables>,
    mut deaths: MessageReader<Death>,
    mut lock: ResMut<InputLock>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(death) = deaths.read().last() else {
        return;
    };
    info!("Player died at {}", death.at);
    *lock = InputLock::locked_for(tunables.death_input_lock_secs);
    next.set(GameState::Dead);
}

pub fn tick_input_lock(time: Res<Time>, mut lock: ResMut<InputLock>) {
    lock.tick(time.delta());
}

pub fn on_play_again(
    lock: Res<InputLock>,
    mut requests: MessageReader<PlayAgain>,
    mut next: ResMut<NextState<GameState>>,
) {
    if requests.read().count() == 0 || lock.is_locked() {
        return;
    }
    info!("Playing again");
    next.set(GameState::InGame);
}
