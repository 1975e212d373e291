//! World plugin: hazard walls/floor and the terrain pillar field.
//!
//! Pillars climb upwards from the origin: each one sits `U(1.5, 4)` above the previous at a
//! random `x` in `[-8, 8)`. The field is seeded so a run can be replayed by pinning
//! `terrain_seed` in the tunables.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::common::layers::{hazard_layers, terrain_layers};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

const PILLAR_SIZE: Vec2 = Vec2::new(0.4, 1.2);
const PILLAR_STEP_Y: (f32, f32) = (1.5, 4.0);
const PILLAR_HALF_SPREAD_X: f32 = 8.0;
const WALL_THICKNESS: f32 = 1.0;
/// Walls extend this far past the last pillar.
const HEADROOM: f32 = 20.0;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_world);
}

/// Pillar centres for a field of `count`, drawn from `rng`.
pub fn pillar_positions(rng: &mut impl Rng, count: u32) -> Vec<Vec2> {
    let mut y = 0.0;
    (0..count)
        .map(|_| {
            y += rng.gen_range(PILLAR_STEP_Y.0..PILLAR_STEP_Y.1);
            let x = rng.gen_range(-PILLAR_HALF_SPREAD_X..PILLAR_HALF_SPREAD_X);
            Vec2::new(x, y)
        })
        .collect()
}

fn spawn_world(mut commands: Commands, tunables: Res<Tunables>) {
    let seed = tunables.terrain_seed.unwrap_or_else(rand::random);
    info!("Terrain seed {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pillars = pillar_positions(&mut rng, tunables.pillar_count);

    let top = pillars.last().map_or(0.0, |p| p.y) + HEADROOM;
    spawn_hazards(&mut commands, &tunables, top);

    let pillar_color = Color::srgb(0.55, 0.6, 0.7);
    for (i, pos) in pillars.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Pillar{i}")),
            Sprite {
                color: pillar_color,
                custom_size: Some(PILLAR_SIZE),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(PILLAR_SIZE.x, PILLAR_SIZE.y),
            Sensor,
            terrain_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn spawn_hazards(commands: &mut Commands, tunables: &Tunables, top: f32) {
    let hazard_color = Color::srgb(0.7, 0.18, 0.2);
    let half_w = tunables.play_area_half_width;
    let bottom = tunables.floor_y;

    let mut spawn_hazard = |name: &str, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(name.to_owned()),
            Sprite {
                color: hazard_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            Sensor,
            hazard_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    };

    let wall_h = top - bottom;
    let wall_y = bottom + wall_h * 0.5;
    spawn_hazard(
        "WallLeft",
        Vec2::new(-half_w - WALL_THICKNESS * 0.5, wall_y),
        Vec2::new(WALL_THICKNESS, wall_h),
    );
    spawn_hazard(
        "WallRight",
        Vec2::new(half_w + WALL_THICKNESS * 0.5, wall_y),
        Vec2::new(WALL_THICKNESS, wall_h),
    );
    spawn_hazard(
        "Floor",
        Vec2::new(0.0, bottom - WALL_THICKNESS * 0.5),
        Vec2::new(half_w * 2.0 + WALL_THICKNESS * 2.0, WALL_THICKNESS),
    );
}
