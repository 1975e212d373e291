//! Presentation state.
//!
//! Gameplay fills three plain resources every frame; the render-only half in [`render`]
//! turns them into gizmos and text. Headless apps get the resources but never draw.
//!
//! ```text
//! PostUpdate (InGame): Player/Weapon/Hook -> TetherLine, HudReadout, DirectionArrow
//! render (full app):   gizmos + HUD text, death menu on OnEnter(Dead)
//! ```

pub mod arrow;
pub mod hud;
pub mod render;
pub mod tether;

use bevy::prelude::*;

use crate::common::state::GameState;

pub use arrow::DirectionArrow;
pub use hud::HudReadout;
pub use tether::TetherLine;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresentationSet;

pub fn plugin(app: &mut App) {
    app.init_resource::<TetherLine>()
        .init_resource::<HudReadout>()
        .init_resource::<DirectionArrow>()
        .add_systems(
            PostUpdate,
            (
                tether::update_tether_line,
                hud::update_hud_readout,
                arrow::update_direction_arrow,
            )
                .in_set(PresentationSet)
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(OnExit(GameState::InGame), hide_world_overlays);
}

fn hide_world_overlays(mut tether: ResMut<TetherLine>, mut arrow: ResMut<DirectionArrow>) {
    tether.visible = false;
    arrow.visible = false;
}
