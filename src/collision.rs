//! Proximity hits between the tank and world objects, and the score they produce.

use crate::constants::{BONUS_POINTS, COLLISION_RADIUS, OBSTACLE_PENALTY};
use crate::world_object::{ObjectId, ObjectKind, ObjectRegistry};
use bevy::prelude::*;

/// Points awarded per object kind, plus the hit distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringRules {
    pub collision_radius: f32,
    pub bonus_points: i32,
    pub obstacle_penalty: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            collision_radius: COLLISION_RADIUS,
            bonus_points: BONUS_POINTS,
            obstacle_penalty: OBSTACLE_PENALTY,
        }
    }
}

impl ScoringRules {
    pub fn delta_for(&self, kind: ObjectKind) -> i32 {
        match kind {
            ObjectKind::Bonus => self.bonus_points,
            ObjectKind::Obstacle => -self.obstacle_penalty,
        }
    }
}

/// The session score.  Can go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreCounter(i32);

impl ScoreCounter {
    #[inline]
    pub fn value(self) -> i32 {
        self.0
    }

    fn add(&mut self, delta: i32) {
        self.0 = self.0.saturating_add(delta);
    }
}

/// One resolved hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub object: ObjectId,
    pub kind: ObjectKind,
    pub position: Vec3,
    pub distance: f32,
    /// Score right after this hit was applied.
    pub score_after: i32,
}

/// Resolve every object within `rules.collision_radius` of `vehicle_position`.
///
/// Hits are applied in registry order and each object is removed as soon as it
/// scores, so an object can never count twice.
pub fn resolve_collisions(
    vehicle_position: Vec3,
    registry: &mut ObjectRegistry,
    score: &mut ScoreCounter,
    rules: &ScoringRules,
) -> Vec<Collision> {
    let hits: Vec<(ObjectId, f32)> = registry
        .live_objects()
        .iter()
        .filter_map(|o| {
            let distance = vehicle_position.distance(o.position);
            (distance < rules.collision_radius).then_some((o.id, distance))
        })
        .collect();

    let mut collisions = Vec::with_capacity(hits.len());
    for (id, distance) in hits {
        let Some(object) = registry.remove(id) else {
            continue;
        };
        score.add(rules.delta_for(object.kind));
        match object.kind {
            ObjectKind::Bonus => info!("Bonus collected! Score: {}", score.value()),
            ObjectKind::Obstacle => info!("Obstacle hit! Score: {}", score.value()),
        }
        collisions.push(Collision {
            object: object.id,
            kind: object.kind,
            position: object.position,
            distance,
            score_after: score.value(),
        });
    }
    collisions
}
