//! Persisted player preferences.
//!
//! Stored as TOML in the per-user config directory:
//!
//! ```toml
//! show_direction_arrow = 1
//! ```
//!
//! The flag is an integer on disk (0 = off, 1 = on); anything else is rejected. A missing
//! file means "all defaults".

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::error::{GrappleError, GrappleResult};
use crate::plugins::events::ToggleDirectionArrow;

const SHOW_DIRECTION_ARROW: &str = "show_direction_arrow";

/// Where preferences live. Insert before the plugin to redirect (tests use a temp dir).
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct PrefsFile(pub PathBuf);

impl Default for PrefsFile {
    fn default() -> Self {
        Self(
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("grapple-swing")
                .join("prefs.toml"),
        )
    }
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub show_direction_arrow: bool,
}

/// On-disk shape.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
struct PrefsRecord {
    show_direction_arrow: i64,
}

fn flag_from_int(key: &'static str, value: i64) -> GrappleResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(GrappleError::InvalidFlag { key, value }),
    }
}

impl Preferences {
    pub fn from_toml_str(path: &Path, contents: &str) -> GrappleResult<Self> {
        let record: PrefsRecord = toml::from_str(contents).map_err(|err| GrappleError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(Self {
            show_direction_arrow: flag_from_int(SHOW_DIRECTION_ARROW, record.show_direction_arrow)?,
        })
    }

    pub fn to_toml_string(&self) -> GrappleResult<String> {
        let record = PrefsRecord {
            show_direction_arrow: i64::from(self.show_direction_arrow),
        };
        toml::to_string_pretty(&record).map_err(|err| GrappleError::Serialize {
            message: err.to_string(),
        })
    }

    /// Missing file -> defaults. Unreadable or malformed file -> error.
    pub fn load(path: &Path) -> GrappleResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(path, &contents),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(GrappleError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn save(&self, path: &Path) -> GrappleResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| GrappleError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let serialized = self.to_toml_string()?;
        fs::write(path, serialized).map_err(|source| GrappleError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!("{err}; using default preferences");
                Self::default()
            }
        }
    }
}

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<PrefsFile>() {
        app.init_resource::<PrefsFile>();
    }
    let prefs = Preferences::load_or_default(&app.world().resource::<PrefsFile>().0);
    app.insert_resource(prefs)
        .add_systems(Update, toggle_direction_arrow);
}

/// Flip the arrow flag and write it back straight away.
pub fn toggle_direction_arrow(
    mut toggles: MessageReader<ToggleDirectionArrow>,
    file: Res<PrefsFile>,
    mut prefs: ResMut<Preferences>,
) {
    let flips = toggles.read().count();
    if flips % 2 == 0 {
        return;
    }

    prefs.show_direction_arrow = !prefs.show_direction_arrow;
    debug!("show_direction_arrow = {}", prefs.show_direction_arrow);
    if let Err(err) = prefs.save(&file.0) {
        warn!("Could not save preferences: {err}");
    }
}
