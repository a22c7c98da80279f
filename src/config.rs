//! Runtime gameplay configuration loaded from `assets/arcade.toml`.
//!
//! [`ArcadeConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_arcade_config`] reads
//! `assets/arcade.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the constants you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<ArcadeConfig>` to any system parameter list and read values
//! with `config.max_speed`, `config.collision_radius`, etc.  The session keeps
//! its own copy, taken when it starts.
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/arcade.toml`.
//! 2. Restart the game; no recompilation required.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `ArcadeConfig::default()`.

use crate::camera::ChaseCamera;
use crate::constants::*;
use crate::error::{
    validate_fraction, validate_non_negative, validate_positive, validate_probability,
    ArcadeError, ArcadeResult,
};
use crate::placement::{PlacementBounds, PlacementSettings};
use crate::vehicle::{ArenaBounds, VehicleTuning};
use crate::world_object::DriftSettings;
use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Location of the optional override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/arcade.toml";

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/arcade.toml`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    // ── Vehicle: Motion ───────────────────────────────────────────────────────
    pub max_speed: f32,
    pub acceleration: f32,
    pub reverse_brake_factor: f32,
    pub friction: f32,
    pub stop_threshold: f32,
    pub rotation_speed: f32,
    pub vehicle_height: f32,

    // ── World Bounds ──────────────────────────────────────────────────────────
    pub arena_half_extent: f32,

    // ── Object Placement ──────────────────────────────────────────────────────
    pub spawn_half_extent: f32,
    pub spawn_height: f32,
    pub min_separation: f32,
    pub max_placement_attempts: u32,
    pub bonus_count: usize,
    pub obstacle_count: usize,

    // ── Object Drift ──────────────────────────────────────────────────────────
    pub drift_max: f32,
    pub drift_change_probability: f64,

    // ── Collision & Scoring ───────────────────────────────────────────────────
    pub collision_radius: f32,
    pub bonus_points: i32,
    pub obstacle_penalty: i32,

    // ── Camera ────────────────────────────────────────────────────────────────
    pub camera_radius: f32,
    pub camera_height_offset: f32,
    pub camera_acceleration: f32,
    pub camera_max_speed: f32,

    // ── Randomness ────────────────────────────────────────────────────────────
    /// Fixed RNG seed for reproducible sessions; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            // Vehicle
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            reverse_brake_factor: REVERSE_BRAKE_FACTOR,
            friction: FRICTION,
            stop_threshold: STOP_THRESHOLD,
            rotation_speed: ROTATION_SPEED,
            vehicle_height: VEHICLE_HEIGHT,
            // World Bounds
            arena_half_extent: ARENA_HALF_EXTENT,
            // Placement
            spawn_half_extent: SPAWN_HALF_EXTENT,
            spawn_height: SPAWN_HEIGHT,
            min_separation: MIN_SEPARATION,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            bonus_count: BONUS_COUNT,
            obstacle_count: OBSTACLE_COUNT,
            // Drift
            drift_max: DRIFT_MAX,
            drift_change_probability: DRIFT_CHANGE_PROBABILITY,
            // Collision & Scoring
            collision_radius: COLLISION_RADIUS,
            bonus_points: BONUS_POINTS,
            obstacle_penalty: OBSTACLE_PENALTY,
            // Camera
            camera_radius: CAMERA_RADIUS,
            camera_height_offset: CAMERA_HEIGHT_OFFSET,
            camera_acceleration: CAMERA_ACCELERATION,
            camera_max_speed: CAMERA_MAX_SPEED,
            // Randomness
            seed: None,
        }
    }
}

impl ArcadeConfig {
    /// Parse a TOML document and validate the result.
    ///
    /// `origin` only labels error messages.
    pub fn from_toml_str(contents: &str, origin: &str) -> ArcadeResult<Self> {
        let config: ArcadeConfig =
            toml::from_str(contents).map_err(|e| ArcadeError::ConfigParse {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse `path`.  Returns `Ok(None)` when the file does not exist.
    pub fn load_from_path(path: impl AsRef<Path>) -> ArcadeResult<Option<Self>> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ArcadeError::ConfigRead {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Self::from_toml_str(&contents, &path.display().to_string()).map(Some)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> ArcadeResult<()> {
        validate_positive("max_speed", self.max_speed)?;
        validate_positive("acceleration", self.acceleration)?;
        validate_positive("reverse_brake_factor", self.reverse_brake_factor)?;
        validate_fraction("friction", self.friction)?;
        validate_non_negative("stop_threshold", self.stop_threshold)?;
        validate_non_negative("rotation_speed", self.rotation_speed)?;
        validate_positive("arena_half_extent", self.arena_half_extent)?;
        validate_positive("spawn_half_extent", self.spawn_half_extent)?;
        validate_non_negative("min_separation", self.min_separation)?;
        if self.max_placement_attempts == 0 {
            return Err(ArcadeError::UnsafeConstant {
                name: "max_placement_attempts",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        validate_non_negative("drift_max", self.drift_max)?;
        validate_probability("drift_change_probability", self.drift_change_probability)?;
        validate_positive("collision_radius", self.collision_radius)?;
        validate_non_negative("camera_radius", self.camera_radius)?;
        validate_positive("camera_acceleration", self.camera_acceleration)?;
        validate_positive("camera_max_speed", self.camera_max_speed)?;
        Ok(())
    }

    pub fn vehicle_tuning(&self) -> VehicleTuning {
        VehicleTuning {
            max_speed: self.max_speed,
            acceleration: self.acceleration,
            reverse_brake_factor: self.reverse_brake_factor,
            friction: self.friction,
            stop_threshold: self.stop_threshold,
            rotation_speed: self.rotation_speed,
        }
    }

    pub fn arena_bounds(&self) -> ArenaBounds {
        ArenaBounds {
            half_extent: self.arena_half_extent,
        }
    }

    pub fn placement_settings(&self) -> PlacementSettings {
        PlacementSettings {
            bounds: PlacementBounds {
                half_extent: self.spawn_half_extent,
                height: self.spawn_height,
            },
            min_separation: self.min_separation,
            max_attempts: self.max_placement_attempts,
        }
    }

    pub fn drift_settings(&self) -> DriftSettings {
        DriftSettings {
            max_component: self.drift_max,
            change_probability: self.drift_change_probability,
        }
    }

    pub fn chase_camera(&self) -> ChaseCamera {
        ChaseCamera {
            radius: self.camera_radius,
            height_offset: self.camera_height_offset,
            acceleration: self.camera_acceleration,
            max_speed: self.camera_max_speed,
        }
    }
}

/// Startup system: attempt to load `assets/arcade.toml` and overwrite the
/// `ArcadeConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse or validation errors are
/// logged but do not abort the game.  A missing file is not an error.
pub fn load_arcade_config(mut config: ResMut<ArcadeConfig>) {
    match ArcadeConfig::load_from_path(CONFIG_PATH) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!("Loaded arcade config from {CONFIG_PATH}");
        }
        Ok(None) => info!("No {CONFIG_PATH} found; using compiled defaults"),
        Err(e) => warn!("{e}; using defaults"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ArcadeConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let cfg = ArcadeConfig::from_toml_str("max_speed = 3.5\nbonus_count = 4\n", "<inline>")
            .expect("valid partial config");
        assert_eq!(cfg.max_speed, 3.5);
        assert_eq!(cfg.bonus_count, 4);
        assert_eq!(cfg.collision_radius, COLLISION_RADIUS);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn seed_can_be_set_from_toml() {
        let cfg = ArcadeConfig::from_toml_str("seed = 42", "<inline>").unwrap();
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn empty_document_equals_defaults() {
        let cfg = ArcadeConfig::from_toml_str("", "<inline>").unwrap();
        assert_eq!(cfg, ArcadeConfig::default());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ArcadeConfig::from_toml_str("max_speed = \"fast\"", "test.toml").unwrap_err();
        assert!(matches!(err, ArcadeError::ConfigParse { .. }));
        assert!(err.to_string().contains("test.toml"));
    }

    #[test]
    fn unsafe_values_are_rejected() {
        let err = ArcadeConfig::from_toml_str("friction = 1.5", "<inline>").unwrap_err();
        assert!(matches!(
            err,
            ArcadeError::UnsafeConstant {
                name: "friction",
                ..
            }
        ));

        let err = ArcadeConfig::from_toml_str("max_placement_attempts = 0", "<inline>").unwrap_err();
        assert!(matches!(
            err,
            ArcadeError::UnsafeConstant {
                name: "max_placement_attempts",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let loaded = ArcadeConfig::load_from_path("definitely/not/here/arcade.toml").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn derived_settings_mirror_fields() {
        let cfg = ArcadeConfig::default();
        let placement = cfg.placement_settings();
        assert_eq!(placement.bounds.half_extent, cfg.spawn_half_extent);
        assert_eq!(placement.min_separation, cfg.min_separation);
        assert_eq!(placement.max_attempts, cfg.max_placement_attempts);
        assert_eq!(cfg.vehicle_tuning().max_speed, cfg.max_speed);
        assert_eq!(cfg.drift_settings().max_component, cfg.drift_max);
        assert_eq!(cfg.chase_camera().radius, cfg.camera_radius);
    }
}
