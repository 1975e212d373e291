use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{hazard_layers, terrain_layers};
use crate::common::test_utils::{
    drain_messages, ensure_messages, run_system_once, time_with_delta,
};
use crate::common::tunables::Tunables;
use crate::plugins::events::{Death, HookLanded, Release};
use crate::plugins::grapple::Weapon;
use crate::plugins::input::Aim;

use super::death::{self, Killed};
use super::swing::{self, SwingController, SwingDirection, SwingParams, SwingPhase};
use super::Player;

fn params() -> SwingParams {
    SwingParams {
        swing_speed_boost: 4.0,
        minimum_swing_speed: 3.0,
        swing_deceleration: 0.1,
        boost_radius_floor: 2.0,
        near_pivot_radius: 1.6,
        near_pivot_nudge: 0.05,
    }
}

fn tunables() -> Tunables {
    Tunables {
        swing_speed_boost: 4.0,
        minimum_swing_speed: 3.0,
        swing_deceleration: 0.1,
        ..Tunables::default()
    }
}

fn swinging(position: Vec2, velocity: Vec2, pivot: Vec2) -> SwingController {
    let mut c = SwingController::default();
    assert!(c.begin(position, velocity, pivot, &params()));
    c
}

// -----------------------------------------------------------------------------
// Swing controller
// -----------------------------------------------------------------------------

#[test]
fn entry_speed_adds_radius_scaled_boost() {
    // |v| = 5 at distance 2: max(5 + 4 / 2, 3) = 7.
    let c = swinging(Vec2::new(0.0, -2.0), Vec2::new(3.0, 4.0), Vec2::ZERO);
    assert!((c.speed() - 7.0).abs() < 1e-5);
}

#[test]
fn entry_speed_boost_floors_radius_and_speed() {
    // Radius below the floor uses the floor: 1 + 4 / 2.
    let c = swinging(Vec2::new(0.0, -0.5), Vec2::new(1.0, 0.0), Vec2::ZERO);
    assert!((c.speed() - 3.0).abs() < 1e-5);

    // Long tether, slow player: minimum speed wins.
    let c = swinging(Vec2::new(0.0, -8.0), Vec2::ZERO, Vec2::ZERO);
    assert!((c.speed() - 3.0).abs() < 1e-5);
}

#[test]
fn direction_follows_pre_swing_momentum() {
    // Below the pivot, r × forward points -X.
    let below = Vec2::new(0.0, -2.0);
    assert_eq!(SwingDirection::from_momentum(below, Vec2::X), SwingDirection::Clockwise);
    assert_eq!(SwingDirection::from_momentum(below, -Vec2::X), SwingDirection::AntiClockwise);
    // No momentum: angle is 0.
    assert_eq!(SwingDirection::from_momentum(below, Vec2::ZERO), SwingDirection::AntiClockwise);
}

#[test]
fn angular_speed_is_speed_over_radius() {
    let pivot = Vec2::new(1.0, 1.0);
    let velocity = Vec2::new(6.0, 0.0);

    let far = swinging(pivot + Vec2::new(0.0, -4.0), velocity, pivot);
    let w = far.angular_speed(pivot + Vec2::new(0.0, -4.0)).unwrap();
    assert!((w - far.speed() / 4.0).abs() < 1e-5);

    // Same speed, half the radius: twice the angular speed.
    let w_half = far.angular_speed(pivot + Vec2::new(0.0, -2.0)).unwrap();
    assert!((w_half - 2.0 * w).abs() < 1e-5);

    assert_eq!(SwingController::default().angular_speed(Vec2::ZERO), None);
}

#[test]
fn speed_decays_linearly_per_tick() {
    let mut c = swinging(Vec2::new(0.0, -2.0), Vec2::new(5.0, 0.0), Vec2::ZERO);
    assert!((c.speed() - 7.0).abs() < 1e-5);

    let mut pos = Vec2::new(0.0, -2.0);
    for _ in 0..20 {
        pos = c.step(pos, 0.02, &params()).unwrap().position;
    }
    assert!((c.speed() - 5.0).abs() < 1e-4, "speed was {}", c.speed());
}

#[test]
fn speed_decay_stops_at_zero() {
    let mut c = swinging(Vec2::new(0.0, -2.0), Vec2::ZERO, Vec2::ZERO);
    let mut pos = Vec2::new(0.0, -2.0);
    for _ in 0..1_000 {
        pos = c.step(pos, 0.02, &params()).unwrap().position;
    }
    assert_eq!(c.speed(), 0.0);
    assert_eq!(c.direction(), Some(SwingDirection::AntiClockwise));
}

#[test]
fn step_preserves_radius() {
    let pivot = Vec2::new(2.0, 3.0);
    let start = pivot + Vec2::new(3.0, -4.0);
    let mut c = swinging(start, Vec2::new(2.0, 1.0), pivot);

    let mut pos = start;
    for _ in 0..500 {
        pos = c.step(pos, 0.02, &params()).unwrap().position;
        assert!(((pos - pivot).length() - 5.0).abs() < 1e-3);
    }
}

#[test]
fn step_rotates_by_signed_angular_speed() {
    let mut c = swinging(Vec2::new(0.0, -2.0), Vec2::new(5.0, 0.0), Vec2::ZERO);
    let step = c.step(Vec2::new(0.0, -2.0), 0.1, &params()).unwrap();

    // Clockwise is +1: 7 / 2 rad/s for 0.1 s.
    assert!((step.angle - 0.35).abs() < 1e-5);
    // Moving in the direction of the old velocity.
    assert!(step.position.x > 0.0);
}

#[test]
fn near_pivot_nudges_outward() {
    let mut c = swinging(Vec2::new(0.0, -1.0), Vec2::ZERO, Vec2::ZERO);
    let step = c.step(Vec2::new(0.0, -1.0), 0.0, &params()).unwrap();
    assert!((step.position - Vec2::new(0.0, -1.05)).length() < 1e-5);

    // Exactly on the pivot still moves off it.
    let mut c = swinging(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO);
    let step = c.step(Vec2::ZERO, 0.02, &params()).unwrap();
    assert!(step.position.length() > 0.04);
    assert!(step.position.is_finite());
}

#[test]
fn release_hands_back_tangential_velocity() {
    // No boost and a minimum of 5 pins the orbit speed to 5.
    let p = SwingParams { minimum_swing_speed: 5.0, swing_speed_boost: 0.0, ..params() };
    let mut c = SwingController::default();
    c.begin(Vec2::new(0.0, -2.0), Vec2::X, Vec2::ZERO, &p);
    assert_eq!(c.direction(), Some(SwingDirection::Clockwise));
    assert!((c.speed() - 5.0).abs() < 1e-6);

    let exit = c.release(Vec2::new(0.0, -2.0)).unwrap();
    assert!((exit - Vec2::new(5.0, 0.0)).length() < 1e-5);
    assert_eq!(c.phase(), SwingPhase::Flying);
}

#[test]
fn anticlockwise_release_reverses_exit() {
    let p = SwingParams { minimum_swing_speed: 5.0, swing_speed_boost: 0.0, ..params() };
    let mut c = SwingController::default();
    c.begin(Vec2::new(0.0, -2.0), -Vec2::X, Vec2::ZERO, &p);
    assert_eq!(c.direction(), Some(SwingDirection::AntiClockwise));

    let exit = c.release(Vec2::new(0.0, -2.0)).unwrap();
    assert!((exit - Vec2::new(-5.0, 0.0)).length() < 1e-5);
}

#[test]
fn release_while_flying_is_a_noop() {
    let mut c = SwingController::default();
    assert_eq!(c.release(Vec2::ONE), None);
    assert_eq!(c.phase(), SwingPhase::Flying);
}

#[test]
fn only_one_pivot_at_a_time() {
    let mut c = swinging(Vec2::new(0.0, -2.0), Vec2::X, Vec2::ZERO);
    assert!(!c.begin(Vec2::new(0.0, -2.0), Vec2::X, Vec2::new(5.0, 5.0), &params()));
    assert_eq!(c.pivot(), Some(Vec2::ZERO));
}

#[test]
fn swing_release_swing_reproduces_angular_speed() {
    let pivot = Vec2::new(0.0, 4.0);
    let pos = Vec2::new(3.0, 0.0);
    let velocity = Vec2::new(-2.0, 5.0);

    let mut c = SwingController::default();
    c.begin(pos, velocity, pivot, &params());
    let first = c.angular_speed(pos).unwrap();

    c.release(pos).unwrap();
    // Same pre-swing speed, different heading.
    let same_magnitude = Vec2::from_angle(1.0) * velocity.length();
    c.begin(pos, same_magnitude, pivot, &params());
    let second = c.angular_speed(pos).unwrap();

    assert!((first - second).abs() < 1e-5);
}

#[test]
fn current_speed_switches_source() {
    let c = SwingController::default();
    assert_eq!(c.current_speed(Vec2::new(3.0, 4.0)), 5.0);

    let c = swinging(Vec2::new(0.0, -2.0), Vec2::new(3.0, 4.0), Vec2::ZERO);
    assert!((c.current_speed(Vec2::new(100.0, 0.0)) - 7.0).abs() < 1e-5);
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

fn player_world() -> World {
    let mut world = World::new();
    world.insert_resource(tunables());
    world.insert_resource(time_with_delta(0.02));
    ensure_messages::<HookLanded>(&mut world);
    ensure_messages::<Release>(&mut world);
    ensure_messages::<Death>(&mut world);
    ensure_messages::<CollisionStart>(&mut world);
    world
}

/// A player at `at` moving at `velocity` whose weapon owns `hook`.
fn spawn_player(world: &mut World, at: Vec2, velocity: Vec2, hook: Entity) -> Entity {
    let mut weapon = Weapon::new(10.0, 0.0);
    weapon.fire(at, Some(at + Vec2::Y), Vec2::Y);
    weapon.arm(hook);
    world
        .spawn((
            Player,
            SwingController::default(),
            weapon,
            Transform::from_translation(at.extend(1.0)),
            LinearVelocity(velocity),
            GravityScale(1.0),
        ))
        .id()
}

#[test]
fn spawn_creates_player() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, super::spawn);

    let (swing, weapon) = world
        .query_filtered::<(&SwingController, &Weapon), With<Player>>()
        .single(&world)
        .expect("one player");
    assert!(!swing.is_swinging());
    assert!(weapon.hook().is_none());
}

#[test]
fn landing_own_hook_starts_swing() {
    let mut world = player_world();
    let hook = world.spawn_empty().id();
    let player = spawn_player(&mut world, Vec2::new(0.0, -2.0), Vec2::new(5.0, 0.0), hook);

    world.write_message(HookLanded { hook, pivot: Vec2::ZERO });
    run_system_once(&mut world, swing::begin_swing_on_land);

    let swing = world.get::<SwingController>(player).unwrap();
    assert_eq!(swing.pivot(), Some(Vec2::ZERO));
    assert!((swing.speed() - 7.0).abs() < 1e-5);
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::ZERO);
    assert_eq!(world.get::<GravityScale>(player).unwrap().0, 0.0);
}

#[test]
fn landing_foreign_hook_is_ignored() {
    let mut world = player_world();
    let own = world.spawn_empty().id();
    let stranger = world.spawn_empty().id();
    let player = spawn_player(&mut world, Vec2::new(0.0, -2.0), Vec2::X, own);

    world.write_message(HookLanded { hook: stranger, pivot: Vec2::ZERO });
    run_system_once(&mut world, swing::begin_swing_on_land);

    assert!(!world.get::<SwingController>(player).unwrap().is_swinging());
}

#[test]
fn release_restores_physics_with_exit_velocity() {
    let mut world = player_world();
    let hook = world.spawn_empty().id();
    let player = spawn_player(&mut world, Vec2::new(0.0, -2.0), Vec2::new(5.0, 0.0), hook);

    world.write_message(HookLanded { hook, pivot: Vec2::ZERO });
    run_system_once(&mut world, swing::begin_swing_on_land);

    world.write_message(Release);
    run_system_once(&mut world, swing::end_swing_on_release);

    assert!(!world.get::<SwingController>(player).unwrap().is_swinging());
    let v = world.get::<LinearVelocity>(player).unwrap().0;
    assert!((v - Vec2::new(7.0, 0.0)).length() < 1e-4);
    assert_eq!(world.get::<GravityScale>(player).unwrap().0, 1.0);
}

#[test]
fn advance_swing_moves_player_on_orbit() {
    let mut world = player_world();
    let hook = world.spawn_empty().id();
    let player = spawn_player(&mut world, Vec2::new(0.0, -3.0), Vec2::new(5.0, 0.0), hook);

    world.write_message(HookLanded { hook, pivot: Vec2::ZERO });
    run_system_once(&mut world, swing::begin_swing_on_land);
    for _ in 0..10 {
        run_system_once(&mut world, swing::advance_swing);
    }

    let pos = world.get::<Transform>(player).unwrap().translation;
    assert!(pos.x > 0.0);
    assert!((pos.truncate().length() - 3.0).abs() < 1e-3);
    assert_eq!(pos.z, 1.0);
}

#[test]
fn advance_swing_leaves_flying_player_alone() {
    let mut world = player_world();
    let hook = world.spawn_empty().id();
    let player = spawn_player(&mut world, Vec2::new(1.0, 1.0), Vec2::X, hook);

    run_system_once(&mut world, swing::advance_swing);

    assert_eq!(world.get::<Transform>(player).unwrap().translation, Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::X);
}

#[test]
fn face_aim_points_at_cursor_while_flying() {
    let mut world = player_world();
    world.insert_resource(Aim { world_cursor: Some(Vec2::new(5.0, 0.0)) });
    let hook = world.spawn_empty().id();
    let player = spawn_player(&mut world, Vec2::ZERO, Vec2::ZERO, hook);

    run_system_once(&mut world, super::face_aim);

    let facing = world.get::<Transform>(player).unwrap().rotation * Vec3::Y;
    assert!((facing.truncate() - Vec2::X).length() < 1e-5);
}

#[test]
fn touching_hazard_kills_once() {
    let mut world = player_world();
    let hook = world.spawn_empty().id();
    let player = spawn_player(&mut world, Vec2::new(2.0, 3.0), Vec2::X, hook);
    let wall = world.spawn(hazard_layers()).id();

    world.write_message(CollisionStart { collider1: wall, collider2: player, body1: None, body2: None });
    world.write_message(CollisionStart { collider1: player, collider2: wall, body1: None, body2: None });
    run_system_once(&mut world, death::detect_player_collisions);

    assert_eq!(
        drain_messages::<Death>(&mut world),
        vec![Death { at: Vec2::new(2.0, 3.0) }]
    );
    assert!(world.get::<Killed>(player).is_some());
}

#[test]
fn terrain_kills_only_when_not_swinging() {
    let mut world = player_world();
    let hook = world.spawn_empty().id();
    let player = spawn_player(&mut world, Vec2::new(0.0, -2.0), Vec2::X, hook);
    let pillar = world.spawn(terrain_layers()).id();

    world.write_message(HookLanded { hook, pivot: Vec2::ZERO });
    run_system_once(&mut world, swing::begin_swing_on_land);

    world.write_message(CollisionStart { collider1: player, collider2: pillar, body1: None, body2: None });
    run_system_once(&mut world, death::detect_player_collisions);
    assert!(drain_messages::<Death>(&mut world).is_empty());

    world.write_message(Release);
    run_system_once(&mut world, swing::end_swing_on_release);
    run_system_once(&mut world, death::detect_player_collisions);
    assert_eq!(drain_messages::<Death>(&mut world).len(), 1);
}

#[test]
fn leaving_play_area_kills() {
    let mut world = player_world();
    let hook = world.spawn_empty().id();
    let t = tunables();
    let player = spawn_player(&mut world, Vec2::new(0.0, t.floor_y - 5.0), Vec2::ZERO, hook);

    run_system_once(&mut world, death::detect_out_of_bounds);
    run_system_once(&mut world, death::detect_out_of_bounds);

    assert_eq!(drain_messages::<Death>(&mut world).len(), 1);
    assert!(world.get::<Killed>(player).is_some());

    assert!(!death::is_out_of_bounds(Vec2::new(t.play_area_half_width, 50.0), &t));
    assert!(death::is_out_of_bounds(Vec2::new(-t.play_area_half_width - 2.0, 50.0), &t));
}
