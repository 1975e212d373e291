//! Crate error type.
//!
//! Gameplay never fails through this type: invalid grapple requests are guarded no-ops.
//! `GrappleError` covers the edges that touch the outside world (config and preference
//! files) and tunable validation.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GrappleError {
    /// Reading or writing a file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A TOML file could not be decoded.
    Parse {
        path: PathBuf,
        message: String,
    },

    /// A value could not be encoded to TOML.
    Serialize { message: String },

    /// A persisted 0/1 flag held some other integer.
    InvalidFlag { key: &'static str, value: i64 },

    /// A tunable is outside its safe operating range.
    UnsafeTunable {
        name: &'static str,
        value: f32,
        safe_range: &'static str,
    },
}

impl fmt::Display for GrappleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrappleError::Io { path, source } => {
                write!(f, "i/o error on {}: {}", path.display(), source)
            }
            GrappleError::Parse { path, message } => {
                write!(f, "failed to parse {}: {}", path.display(), message)
            }
            GrappleError::Serialize { message } => write!(f, "failed to encode TOML: {}", message),
            GrappleError::InvalidFlag { key, value } => {
                write!(f, "flag '{}' must be 0 or 1, got {}", key, value)
            }
            GrappleError::UnsafeTunable {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "tunable '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GrappleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GrappleError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GrappleError` as the error type.
pub type GrappleResult<T> = Result<T, GrappleError>;

/// Returns an error unless `value` is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f32) -> GrappleResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GrappleError::UnsafeTunable {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn require_non_negative(name: &'static str, value: f32) -> GrappleResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GrappleError::UnsafeTunable {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}
