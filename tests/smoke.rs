mod common;

use bevy::prelude::*;
use grapple_swing::common::state::GameState;
use grapple_swing::plugins::grapple::Weapon;
use grapple_swing::plugins::player::SwingController;

#[test]
fn boots_and_ticks() {
    let mut h = common::app_headless();

    for _ in 0..3 {
        h.app.update();
    }
}

#[test]
fn starts_in_game_with_an_armed_player() {
    let mut h = common::app_headless();
    h.app.update();

    assert_eq!(*h.app.world().resource::<State<GameState>>().get(), GameState::InGame);

    let player = common::player(&mut h.app);
    let swing = h.app.world().get::<SwingController>(player).unwrap();
    let weapon = h.app.world().get::<Weapon>(player).unwrap();
    assert!(!swing.is_swinging());
    assert!(weapon.hook().is_none());
    assert!(!weapon.is_shooting());
}
