//! Arcade-specific error types.
//!
//! Nothing in the simulation is fatal: every error here is reported and then
//! the caller falls back to a safe default (usually the compiled constants).
//!
//! ## Usage
//!
//! ```rust
//! use tank_arcade::error::{validate_positive, ArcadeResult};
//!
//! fn check(radius: f32) -> ArcadeResult<()> {
//!     validate_positive("collision_radius", radius)?;
//!     Ok(())
//! }
//! # assert!(check(4.0).is_ok());
//! ```

use std::fmt;

/// Top-level error enum for the tank arcade.
#[derive(Debug)]
pub enum ArcadeError {
    /// The config file exists but could not be read.
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::ArcadeConfig`].
    ConfigParse {
        /// Path (or `"<inline>"`) of the offending document.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A tuning constant is outside the range the simulation can handle.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for ArcadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArcadeError::ConfigRead { path, source } => {
                write!(f, "failed to read config '{}': {}", path, source)
            }
            ArcadeError::ConfigParse { path, message } => {
                write!(f, "failed to parse config '{}': {}", path, message)
            }
            ArcadeError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for ArcadeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArcadeError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `ArcadeError` as the error type.
pub type ArcadeResult<T> = Result<T, ArcadeError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive and finite.
pub fn validate_positive(name: &'static str, value: f32) -> ArcadeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ArcadeError::UnsafeConstant {
            name,
            value: value as f64,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(name: &'static str, value: f32) -> ArcadeResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ArcadeError::UnsafeConstant {
            name,
            value: value as f64,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is a fraction in `[0.0, 1.0)`.
///
/// Used for per-frame decay factors where 1.0 would stop motion instantly.
pub fn validate_fraction(name: &'static str, value: f32) -> ArcadeResult<()> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(ArcadeError::UnsafeConstant {
            name,
            value: value as f64,
            safe_range: "[0.0, 1.0)",
        })
    }
}

/// Returns an error unless `value` is a probability in `[0.0, 1.0]`.
pub fn validate_probability(name: &'static str, value: f64) -> ArcadeResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ArcadeError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, 1.0]",
        })
    }
}
