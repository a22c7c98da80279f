//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//!
//! Every value is per-frame: the simulation advances exactly once per rendered
//! frame, so speeds are in world units per frame and probabilities are per
//! frame.  The defaults are calibrated for roughly 60 fps.
//!
//! [`crate::config::ArcadeConfig`] mirrors every constant here and can override
//! them from `assets/arcade.toml` without recompiling.

// ── Vehicle: Motion ───────────────────────────────────────────────────────────

/// Top forward speed (units / frame).  Reverse is capped at half of this.
pub const MAX_SPEED: f32 = 2.0;

/// Speed gained per frame while the throttle is held.
///
/// At 0.02 the tank reaches top speed in 100 frames (~1.7 s).
pub const ACCELERATION: f32 = 0.02;

/// Multiplier on [`ACCELERATION`] while braking against the current direction
/// of travel (e.g. pressing forward while still rolling backwards).
pub const REVERSE_BRAKE_FACTOR: f32 = 3.0;

/// Fraction of speed lost per frame when neither throttle key is held.
pub const FRICTION: f32 = 0.01;

/// Speeds with a magnitude below this snap to exactly zero.
pub const STOP_THRESHOLD: f32 = 0.01;

/// Base turn rate (radians / frame).  The effective rate is twice this,
/// scaled by `|speed| / MAX_SPEED`.
pub const ROTATION_SPEED: f32 = 0.02;

/// Height of the tank body's centre above the ground.
pub const VEHICLE_HEIGHT: f32 = 2.0;

// ── World Bounds ──────────────────────────────────────────────────────────────

/// Half the side length of the ground plane.  The tank cannot leave it.
pub const ARENA_HALF_EXTENT: f32 = 500.0;

// ── Object Placement ──────────────────────────────────────────────────────────

/// Objects spawn within ±SPAWN_HALF_EXTENT of the origin on both x and z.
pub const SPAWN_HALF_EXTENT: f32 = 75.0;

/// Fixed height of every world object.
pub const SPAWN_HEIGHT: f32 = 2.0;

/// Minimum distance between any two spawn positions.
///
/// 30 objects in a 150 × 150 square at 15 u separation fit comfortably; raising
/// this past ~22 starts to trigger the degraded-placement fallback.
pub const MIN_SEPARATION: f32 = 15.0;

/// Samples tried per object before accepting an overlapping position.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Number of Bonus pickups spawned at session start.
pub const BONUS_COUNT: usize = 15;

/// Number of Obstacle hazards spawned at session start.
pub const OBSTACLE_COUNT: usize = 15;

// ── Object Drift ──────────────────────────────────────────────────────────────

/// Each horizontal drift component is drawn from `[-DRIFT_MAX, DRIFT_MAX]`.
pub const DRIFT_MAX: f32 = 0.1;

/// Per-object, per-frame probability of picking a new drift vector.
pub const DRIFT_CHANGE_PROBABILITY: f64 = 0.01;

// ── Collision & Scoring ───────────────────────────────────────────────────────

/// Centre-to-centre distance below which the tank hits an object.
pub const COLLISION_RADIUS: f32 = 4.0;

/// Points gained for a Bonus.
pub const BONUS_POINTS: i32 = 10;

/// Points lost for an Obstacle.
pub const OBSTACLE_PENALTY: i32 = 10;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Horizontal distance the chase camera keeps behind the tank.
pub const CAMERA_RADIUS: f32 = 50.0;

/// Height of the chase camera above the tank.
pub const CAMERA_HEIGHT_OFFSET: f32 = 15.0;

/// Fraction of the remaining distance the camera covers per frame.
pub const CAMERA_ACCELERATION: f32 = 0.1;

/// Per-axis cap on camera movement (units / frame).
pub const CAMERA_MAX_SPEED: f32 = 5.0;
