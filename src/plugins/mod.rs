//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod events;
pub mod grapple;
pub mod input;
pub mod physics;
pub mod player;
pub mod prefs;
pub mod session;
pub mod ui;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    events::plugin(app);
    input::plugin(app);
    grapple::plugin(app);
    player::plugin(app);
    session::plugin(app);
    prefs::plugin(app);
    world::plugin(app);
    ui::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    ui::render::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
