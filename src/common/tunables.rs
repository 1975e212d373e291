//! Tunable gameplay constants.
//!
//! Defaults are compiled in. `assets/tunables.toml` may override any subset of fields;
//! missing keys keep their defaults. World units are metres-ish: the swing constants
//! (near-pivot radius, nudge, boost radius floor) are expressed in them.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::common::error::{require_non_negative, require_positive, GrappleError, GrappleResult};

pub const TUNABLES_PATH: &str = "assets/tunables.toml";

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tunables {
    // ── World ────────────────────────────────────────────────────────────────
    pub pixels_per_unit: f32,
    pub fixed_hz: f64,
    pub gravity: f32,
    pub play_area_half_width: f32,
    pub floor_y: f32,
    pub pillar_count: u32,
    pub terrain_seed: Option<u64>,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_radius: f32,
    pub launch_speed: f32,
    pub death_input_lock_secs: f32,

    // ── Weapon / hook ────────────────────────────────────────────────────────
    pub hook_speed: f32,
    pub hook_radius: f32,
    pub max_grapple_range: f32,
    pub fire_point_offset: f32,

    // ── Swing ────────────────────────────────────────────────────────────────
    pub swing_speed_boost: f32,
    pub minimum_swing_speed: f32,
    /// Speed lost per fixed tick while swinging.
    pub swing_deceleration: f32,
    pub boost_radius_floor: f32,
    pub near_pivot_radius: f32,
    pub near_pivot_nudge: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_unit: 32.0,
            fixed_hz: 50.0,
            gravity: 9.81,
            play_area_half_width: 9.5,
            floor_y: -4.0,
            pillar_count: 100,
            terrain_seed: None,

            player_radius: 0.25,
            launch_speed: 9.0,
            death_input_lock_secs: 1.0,

            hook_speed: 30.0,
            hook_radius: 0.08,
            max_grapple_range: 10.0,
            fire_point_offset: 0.35,

            swing_speed_boost: 4.0,
            minimum_swing_speed: 3.0,
            swing_deceleration: 0.01,
            boost_radius_floor: 2.0,
            near_pivot_radius: 1.6,
            near_pivot_nudge: 0.05,
        }
    }
}

impl Tunables {
    /// Reject values that break the simulation (zero speeds, negative ranges, ...).
    pub fn validate(&self) -> GrappleResult<()> {
        require_positive("pixels_per_unit", self.pixels_per_unit)?;
        require_positive("fixed_hz", self.fixed_hz as f32)?;
        require_non_negative("gravity", self.gravity)?;
        require_positive("play_area_half_width", self.play_area_half_width)?;
        require_positive("player_radius", self.player_radius)?;
        require_non_negative("launch_speed", self.launch_speed)?;
        require_non_negative("death_input_lock_secs", self.death_input_lock_secs)?;
        require_positive("hook_speed", self.hook_speed)?;
        require_positive("hook_radius", self.hook_radius)?;
        require_positive("max_grapple_range", self.max_grapple_range)?;
        require_non_negative("fire_point_offset", self.fire_point_offset)?;
        require_non_negative("swing_speed_boost", self.swing_speed_boost)?;
        require_non_negative("minimum_swing_speed", self.minimum_swing_speed)?;
        require_non_negative("swing_deceleration", self.swing_deceleration)?;
        require_positive("boost_radius_floor", self.boost_radius_floor)?;
        require_non_negative("near_pivot_radius", self.near_pivot_radius)?;
        require_non_negative("near_pivot_nudge", self.near_pivot_nudge)?;
        Ok(())
    }

    /// Decode and validate tunables from TOML text.
    pub fn from_toml_str(path: &Path, contents: &str) -> GrappleResult<Self> {
        let loaded: Tunables = toml::from_str(contents).map_err(|err| GrappleError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Read `path`, falling back to defaults when it is missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                info!("No {} found; using compiled tunables", path.display());
                return Self::default();
            }
        };

        match Self::from_toml_str(path, &contents) {
            Ok(loaded) => {
                info!("Loaded tunables from {}", path.display());
                loaded
            }
            Err(err) => {
                warn!("{err}; using compiled tunables");
                Self::default()
            }
        }
    }
}
