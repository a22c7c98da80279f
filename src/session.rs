//! One play session: the tank, the objects, the score and the RNG that drives them.
//!
//! [`Session`] is the whole simulation.  It has no dependency on rendering: the
//! Bevy layer in [`crate::simulation`] calls [`Session::tick`] once per frame
//! and mirrors the result onto entities, and tests call it directly.
//!
//! ## Tick order
//!
//! 1. Vehicle motion (input → speed/heading → clipped move)
//! 2. Object drift
//! 3. Collision & scoring
//!
//! Motion comes before collisions, so an object is scored on the same frame the
//! tank reaches it.

use crate::collision::{resolve_collisions, Collision, ScoreCounter, ScoringRules};
use crate::config::ArcadeConfig;
use crate::input::InputState;
use crate::placement::PlacementHistory;
use crate::vehicle::Vehicle;
use crate::world_object::{ObjectKind, ObjectRegistry};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// What one tick changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Frame index of this tick, starting at 1.
    pub frame: u64,
    /// Where the move actually took the tank.
    pub displacement: Vec3,
    pub collisions: Vec<Collision>,
    pub score: i32,
}

#[derive(Resource, Debug, Clone)]
pub struct Session {
    config: ArcadeConfig,
    scoring: ScoringRules,
    vehicle: Vehicle,
    registry: ObjectRegistry,
    history: PlacementHistory,
    score: ScoreCounter,
    rng: StdRng,
    frame: u64,
}

impl Session {
    /// An empty session: tank at the origin, no objects, score 0.
    pub fn new(config: ArcadeConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            scoring: ScoringRules {
                collision_radius: config.collision_radius,
                bonus_points: config.bonus_points,
                obstacle_penalty: config.obstacle_penalty,
            },
            vehicle: Vehicle::new(Vec3::new(0.0, config.vehicle_height, 0.0)),
            registry: ObjectRegistry::new(config.drift_settings()),
            history: PlacementHistory::default(),
            score: ScoreCounter::default(),
            rng,
            frame: 0,
            config,
        }
    }

    /// A session with the configured number of Bonus and Obstacle objects.
    pub fn start(config: ArcadeConfig) -> Self {
        let mut session = Self::new(config);
        let bonuses = session.config.bonus_count;
        let obstacles = session.config.obstacle_count;
        session.spawn_batch(ObjectKind::Bonus, bonuses);
        session.spawn_batch(ObjectKind::Obstacle, obstacles);
        info!(
            "Session started: {} bonuses, {} obstacles ({} degraded placements)",
            session.registry.count_of(ObjectKind::Bonus),
            session.registry.count_of(ObjectKind::Obstacle),
            session.history.degraded_count()
        );
        session
    }

    /// Spawn `count` objects of `kind` at separated random positions.
    pub fn spawn_batch(&mut self, kind: ObjectKind, count: usize) {
        let placement = self.config.placement_settings();
        self.registry
            .spawn_batch(kind, count, &mut self.history, &placement, &mut self.rng);
    }

    /// Run one frame of simulation.
    pub fn tick(&mut self, input: &InputState) -> TickReport {
        self.frame += 1;

        let before = self.vehicle.position;
        let requested = self.vehicle.advance(input, &self.config.vehicle_tuning());
        let after = self
            .vehicle
            .apply_displacement(requested, &self.config.arena_bounds());

        self.registry.tick(&mut self.rng);

        let collisions = resolve_collisions(
            self.vehicle.position,
            &mut self.registry,
            &mut self.score,
            &self.scoring,
        );

        TickReport {
            frame: self.frame,
            displacement: after - before,
            collisions,
            score: self.score.value(),
        }
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    pub fn history(&self) -> &PlacementHistory {
        &self.history
    }

    pub fn score(&self) -> i32 {
        self.score.value()
    }

    /// Ticks run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> ArcadeConfig {
        ArcadeConfig {
            seed: Some(seed),
            ..ArcadeConfig::default()
        }
    }

    #[test]
    fn new_session_is_empty_and_centred() {
        let session = Session::new(seeded(1));
        assert!(session.registry().is_empty());
        assert!(session.history().is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.frame(), 0);
        assert_eq!(session.vehicle().position, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn start_spawns_configured_counts() {
        let session = Session::start(ArcadeConfig {
            bonus_count: 3,
            obstacle_count: 4,
            ..seeded(2)
        });
        assert_eq!(session.registry().count_of(ObjectKind::Bonus), 3);
        assert_eq!(session.registry().count_of(ObjectKind::Obstacle), 4);
        assert_eq!(session.history().len(), 7);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let a = Session::start(seeded(99));
        let b = Session::start(seeded(99));
        assert_eq!(a.history().positions(), b.history().positions());
    }

    #[test]
    fn tick_counts_frames() {
        let mut session = Session::new(seeded(3));
        session.tick(&InputState::IDLE);
        let report = session.tick(&InputState::IDLE);
        assert_eq!(report.frame, 2);
        assert_eq!(session.frame(), 2);
    }

    #[test]
    fn arena_edge_clips_the_reported_displacement() {
        let mut session = Session::new(ArcadeConfig {
            arena_half_extent: 1.0,
            ..seeded(4)
        });
        session.vehicle_mut().position = Vec3::new(0.0, 2.0, 0.99);
        let report = session.tick(&InputState::FORWARD);
        assert!((report.displacement.z - 0.01).abs() < 1e-5);
        assert_eq!(session.vehicle().position.z, 1.0);
    }
}
