//! Tank motion model.
//!
//! ## Per-tick pipeline
//!
//! 1. [`Vehicle::advance`]: updates speed from the throttle flags, computes the
//!    displacement along the current facing, then turns (only while moving).
//! 2. [`Vehicle::apply_displacement`]: hands the displacement to a
//!    [`MotionResolver`], which may clip it, and stores the result.
//!
//! Heading is an angle about +Y.  The facing vector is always
//! `(sin(heading), 0, cos(heading))`, so heading 0 faces +Z and
//! `Quat::from_rotation_y(heading)` orients a model built facing +Z.

use crate::constants::{
    ACCELERATION, FRICTION, MAX_SPEED, REVERSE_BRAKE_FACTOR, ROTATION_SPEED, STOP_THRESHOLD,
};
use crate::input::InputState;
use bevy::prelude::*;

/// Motion parameters for one vehicle.  See [`crate::constants`] for meanings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleTuning {
    pub max_speed: f32,
    pub acceleration: f32,
    pub reverse_brake_factor: f32,
    pub friction: f32,
    pub stop_threshold: f32,
    pub rotation_speed: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            reverse_brake_factor: REVERSE_BRAKE_FACTOR,
            friction: FRICTION,
            stop_threshold: STOP_THRESHOLD,
            rotation_speed: ROTATION_SPEED,
        }
    }
}

impl VehicleTuning {
    /// Slowest permitted speed (full reverse).
    #[inline]
    pub fn min_speed(&self) -> f32 {
        -self.max_speed / 2.0
    }
}

/// Turns a requested displacement into the position the vehicle ends up at.
///
/// Implementations may clip the move against world geometry; the returned
/// position is always taken as-is.
pub trait MotionResolver {
    fn resolve(&self, from: Vec3, displacement: Vec3) -> Vec3;
}

/// Unobstructed translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeMotion;

impl MotionResolver for FreeMotion {
    fn resolve(&self, from: Vec3, displacement: Vec3) -> Vec3 {
        from + displacement
    }
}

/// Keeps the vehicle on a square ground plane centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub half_extent: f32,
}

impl MotionResolver for ArenaBounds {
    fn resolve(&self, from: Vec3, displacement: Vec3) -> Vec3 {
        let target = from + displacement;
        let h = self.half_extent;
        Vec3::new(target.x.clamp(-h, h), target.y, target.z.clamp(-h, h))
    }
}

/// The player's tank.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub position: Vec3,
    heading: f32,
    speed: f32,
    facing: Vec3,
}

impl Vehicle {
    /// A stationary vehicle at `position`, facing +Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            heading: 0.0,
            speed: 0.0,
            facing: Vec3::Z,
        }
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    /// Unit forward vector for `heading`.
    #[inline]
    pub fn facing_for(heading: f32) -> Vec3 {
        Vec3::new(heading.sin(), 0.0, heading.cos())
    }

    /// Orientation of the vehicle model.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.heading)
    }

    /// Force the heading (and facing) to `heading`.
    pub fn set_heading(&mut self, heading: f32) {
        self.heading = heading;
        self.facing = Self::facing_for(heading);
    }

    /// Force the speed, clamped to the tuning's range.
    pub fn set_speed(&mut self, speed: f32, tuning: &VehicleTuning) {
        self.speed = speed.clamp(tuning.min_speed(), tuning.max_speed);
    }

    /// Advance speed and heading by one tick and return the displacement to apply.
    ///
    /// The displacement uses the facing from *before* this tick's turn.
    pub fn advance(&mut self, input: &InputState, tuning: &VehicleTuning) -> Vec3 {
        self.speed = next_speed(self.speed, input, tuning);

        let displacement = self.facing * self.speed;

        if self.speed != 0.0 {
            let turn = turn_rate(self.speed, tuning);
            if input.left {
                self.heading += turn;
            }
            if input.right {
                self.heading -= turn;
            }
            self.facing = Self::facing_for(self.heading);
        }

        displacement
    }

    /// Move by `displacement` through `resolver` and keep whatever it returns.
    pub fn apply_displacement<R: MotionResolver + ?Sized>(
        &mut self,
        displacement: Vec3,
        resolver: &R,
    ) -> Vec3 {
        self.position = resolver.resolve(self.position, displacement);
        self.position
    }
}

/// Longitudinal speed update for one tick.
fn next_speed(speed: f32, input: &InputState, tuning: &VehicleTuning) -> f32 {
    let brake = tuning.acceleration * tuning.reverse_brake_factor;
    let mut speed = if input.up {
        if speed < 0.0 {
            speed + brake
        } else {
            (speed + tuning.acceleration).min(tuning.max_speed)
        }
    } else if input.down {
        if speed > 0.0 {
            speed - brake
        } else {
            (speed - tuning.acceleration).max(tuning.min_speed())
        }
    } else {
        speed * (1.0 - tuning.friction)
    };

    if speed.abs() < tuning.stop_threshold {
        speed = 0.0;
    }
    speed.clamp(tuning.min_speed(), tuning.max_speed)
}

/// Signed heading change per tick for a held turn key.
///
/// Scales with `|speed| / max_speed` and flips sign in reverse.
fn turn_rate(speed: f32, tuning: &VehicleTuning) -> f32 {
    let factor = speed.abs() / tuning.max_speed;
    tuning.rotation_speed * 2.0 * factor * speed.signum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn tuning() -> VehicleTuning {
        VehicleTuning::default()
    }

    fn assert_facing_matches_heading(v: &Vehicle) {
        let expected = Vehicle::facing_for(v.heading());
        assert!(
            (v.facing() - expected).length() < EPS,
            "facing {:?} does not match heading {}",
            v.facing(),
            v.heading()
        );
    }

    #[test]
    fn throttle_accelerates_to_max_and_stops_there() {
        let t = tuning();
        let mut v = Vehicle::new(Vec3::ZERO);
        for _ in 0..500 {
            v.advance(&InputState::FORWARD, &t);
            assert!(v.speed() <= t.max_speed);
        }
        assert!((v.speed() - t.max_speed).abs() < EPS);
    }

    #[test]
    fn reverse_is_capped_at_half_max_speed() {
        let t = tuning();
        let mut v = Vehicle::new(Vec3::ZERO);
        for _ in 0..500 {
            v.advance(&InputState::REVERSE, &t);
            assert!(v.speed() >= t.min_speed());
        }
        assert!((v.speed() + t.max_speed / 2.0).abs() < EPS);
    }

    #[test]
    fn forward_while_reversing_brakes_three_times_harder() {
        let t = tuning();
        let mut v = Vehicle::new(Vec3::ZERO);
        v.set_speed(-0.5, &t);
        v.advance(&InputState::FORWARD, &t);
        assert!((v.speed() - (-0.5 + 3.0 * t.acceleration)).abs() < EPS);
    }

    #[test]
    fn reverse_while_moving_forward_brakes_three_times_harder() {
        let t = tuning();
        let mut v = Vehicle::new(Vec3::ZERO);
        v.set_speed(1.0, &t);
        v.advance(&InputState::REVERSE, &t);
        assert!((v.speed() - (1.0 - 3.0 * t.acceleration)).abs() < EPS);
    }

    #[test]
    fn up_wins_over_down() {
        let t = tuning();
        let mut v = Vehicle::new(Vec3::ZERO);
        let both = InputState {
            up: true,
            down: true,
            ..InputState::IDLE
        };
        v.advance(&both, &t);
        assert!(v.speed() > 0.0);
    }

    #[test]
    fn friction_decays_monotonically_to_exact_zero() {
        let t = tuning();
        let mut v = Vehicle::new(Vec3::ZERO);
        v.set_speed(t.max_speed, &t);
        let mut previous = v.speed();
        for _ in 0..2000 {
            v.advance(&InputState::IDLE, &t);
            assert!(v.speed() <= previous);
            previous = v.speed();
        }
        assert_eq!(v.speed(), 0.0);
    }

    #[test]
    fn tiny_speed_snaps_to_zero() {
        let t = tuning();
        let mut v = Vehicle::new(Vec3::ZERO);
        v.set_speed(0.0100, &t);
        v.advance(&InputState::IDLE, &t);
        assert_eq!(v.speed(), 0.0);
    }

    #[test]
    fn stationary_vehicle_cannot_turn() {
        let t = tuning();
        let mut v = Vehicle::new(Vec3::ZERO);
        let left = InputState {
            left: true,
            ..InputState::IDLE
        };
        let displacement = v.advance(&left, &t);
        assert_eq!(v.heading(), 0.0);
        assert_eq!(displacement, Vec3::ZERO);
    }

    #[test]
    fn turn_rate_scales_with_speed() {
        let t = tuning();
        let left = InputState {
            left: true,
            up: true,
            ..InputState::IDLE
        };

        let mut slow = Vehicle::new(Vec3::ZERO);
        slow.set_speed(0.5, &t);
        slow.advance(&left, &t);

        let mut fast = Vehicle::new(Vec3::ZERO);
        fast.set_speed(1.5, &t);
        fast.advance(&left, &t);

        assert!(fast.heading().abs() > slow.heading().abs());
    }

    #[test]
    fn reverse_steering_is_inverted() {
        let t = tuning();
        let left = InputState {
            left: true,
            ..InputState::IDLE
        };

        // Friction runs before the turn and shrinks both speeds equally.
        let mut forward = Vehicle::new(Vec3::ZERO);
        forward.set_speed(1.0, &t);
        forward.advance(&left, &t);

        let mut backward = Vehicle::new(Vec3::ZERO);
        backward.set_speed(-1.0, &t);
        backward.advance(&left, &t);

        assert!(forward.heading() > 0.0);
        assert!(backward.heading() < 0.0);
        assert!((forward.heading() + backward.heading()).abs() < EPS);
    }

    #[test]
    fn displacement_uses_facing_from_before_the_turn() {
        let t = tuning();
        let mut v = Vehicle::new(Vec3::ZERO);
        v.set_speed(1.0, &t);
        let input = InputState {
            up: true,
            right: true,
            ..InputState::IDLE
        };
        let displacement = v.advance(&input, &t);
        assert_eq!(displacement.x, 0.0);
        assert!((displacement.z - v.speed()).abs() < EPS);
        assert!(v.heading() < 0.0);
    }

    #[test]
    fn facing_tracks_heading_through_a_drive() {
        let t = tuning();
        let mut v = Vehicle::new(Vec3::ZERO);
        let script = [
            InputState::FORWARD,
            InputState {
                up: true,
                left: true,
                ..InputState::IDLE
            },
            InputState {
                down: true,
                right: true,
                ..InputState::IDLE
            },
            InputState::IDLE,
        ];
        for input in script.iter().cycle().take(800) {
            let d = v.advance(input, &t);
            v.apply_displacement(d, &FreeMotion);
            assert_facing_matches_heading(&v);
            assert!((v.facing().length() - 1.0).abs() < EPS);
            assert_eq!(v.facing().y, 0.0);
        }
    }

    #[test]
    fn rotation_quat_points_model_along_facing() {
        let mut v = Vehicle::new(Vec3::ZERO);
        v.set_heading(0.7);
        let forward = v.rotation() * Vec3::Z;
        assert!((forward - v.facing()).length() < EPS);
    }

    #[test]
    fn arena_bounds_clip_horizontal_motion_only() {
        let arena = ArenaBounds { half_extent: 10.0 };
        let p = arena.resolve(Vec3::new(9.0, 2.0, -9.5), Vec3::new(5.0, 0.0, -5.0));
        assert_eq!(p, Vec3::new(10.0, 2.0, -10.0));

        let inside = arena.resolve(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(inside, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn resolved_position_is_authoritative() {
        struct Wall;
        impl MotionResolver for Wall {
            fn resolve(&self, from: Vec3, _displacement: Vec3) -> Vec3 {
                from
            }
        }
        let mut v = Vehicle::new(Vec3::new(1.0, 2.0, 3.0));
        let p = v.apply_displacement(Vec3::new(5.0, 0.0, 0.0), &Wall);
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v.position, p);
    }
}
