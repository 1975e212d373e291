//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `grapple_swing::game::configure_headless` to install gameplay plugins.
//!
//! Tunables and the preference file are pinned before the plugins load: no pillars, a
//! fixed seed, and prefs in a temp dir that lives as long as the returned guard.

use bevy::asset::AssetPlugin;
use bevy::ecs::message::{Message, MessageReader};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use tempfile::TempDir;

use grapple_swing::common::tunables::Tunables;
use grapple_swing::plugins::player::Player;
use grapple_swing::plugins::prefs::PrefsFile;

pub struct Harness {
    pub app: App,
    _prefs_dir: TempDir,
}

pub fn app_headless() -> Harness {
    let prefs_dir = tempfile::tempdir().expect("temp dir");
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(Tunables {
        pillar_count: 0,
        terrain_seed: Some(1),
        ..Tunables::default()
    });
    app.insert_resource(PrefsFile(prefs_dir.path().join("prefs.toml")));

    grapple_swing::game::configure_headless(&mut app);
    Harness { app, _prefs_dir: prefs_dir }
}

pub fn player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .expect("exactly one player")
}

/// Run a system once against the app world and flush its commands.
pub fn run_once<T, Out, Marker>(app: &mut App, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = app.world_mut().run_system_once(system).expect("system run failed");
    app.world_mut().flush();
    out
}

/// Every `M` still buffered.
pub fn read_all<M: Message + Clone>(app: &mut App) -> Vec<M> {
    run_once(app, |mut reader: MessageReader<M>| reader.read().cloned().collect::<Vec<_>>())
}
