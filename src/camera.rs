//! Chase camera that trails the tank from behind and above.

use crate::constants::{
    CAMERA_ACCELERATION, CAMERA_HEIGHT_OFFSET, CAMERA_MAX_SPEED, CAMERA_RADIUS,
};
use crate::simulation::TankVisual;
use bevy::prelude::*;

/// Follow parameters, attached to the camera entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ChaseCamera {
    /// Horizontal distance behind the tank.
    pub radius: f32,
    /// Height above the tank.
    pub height_offset: f32,
    /// Fraction of the remaining gap closed per frame.
    pub acceleration: f32,
    /// Per-axis cap on movement per frame.
    pub max_speed: f32,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            radius: CAMERA_RADIUS,
            height_offset: CAMERA_HEIGHT_OFFSET,
            acceleration: CAMERA_ACCELERATION,
            max_speed: CAMERA_MAX_SPEED,
        }
    }
}

impl ChaseCamera {
    /// Where the camera wants to be for a target at `target` facing along `forward`.
    pub fn goal(&self, target: Vec3, forward: Vec3) -> Vec3 {
        let flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or(Vec3::Z);
        target - flat * self.radius + Vec3::Y * self.height_offset
    }

    /// One frame of easing from `current` toward `goal`.
    pub fn step(&self, current: Vec3, goal: Vec3) -> Vec3 {
        let limit = Vec3::splat(self.max_speed);
        current + ((goal - current) * self.acceleration).clamp(-limit, limit)
    }
}

/// Ease every chase camera toward its spot behind the tank and aim it at the tank.
pub fn chase_camera_system(
    q_tank: Query<&Transform, (With<TankVisual>, Without<ChaseCamera>)>,
    mut q_camera: Query<(&mut Transform, &ChaseCamera)>,
) {
    let Ok(tank) = q_tank.single() else {
        return;
    };
    for (mut transform, chase) in q_camera.iter_mut() {
        // Models are built facing local +Z, which is Bevy's `back()`.
        let goal = chase.goal(tank.translation, *tank.back());
        transform.translation = chase.step(transform.translation, goal);
        transform.look_at(tank.translation, Vec3::Y);
    }
}
