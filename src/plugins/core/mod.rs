//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::tunables::{Tunables, TUNABLES_PATH};

pub fn plugin(app: &mut App) {
    // Tests may pre-insert their own tunables.
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::load_or_default(TUNABLES_PATH));
    }
    let hz = app.world().resource::<Tunables>().fixed_hz;

    app.insert_resource(Time::<Fixed>::from_hz(hz));
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}
