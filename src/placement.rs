//! Randomised spawn positions with a minimum pairwise separation.
//!
//! [`PlacementHistory`] records every position ever handed out during a
//! session.  It only grows: a position stays reserved after its object is
//! collected, since objects are only spawned once, at session start.

use crate::constants::{MAX_PLACEMENT_ATTEMPTS, MIN_SEPARATION, SPAWN_HALF_EXTENT, SPAWN_HEIGHT};
use bevy::prelude::*;
use rand::Rng;

/// Square sampling region on the plane `y = height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementBounds {
    /// Samples fall in `[-half_extent, half_extent]` on x and z.
    pub half_extent: f32,
    pub height: f32,
}

impl Default for PlacementBounds {
    fn default() -> Self {
        Self {
            half_extent: SPAWN_HALF_EXTENT,
            height: SPAWN_HEIGHT,
        }
    }
}

impl PlacementBounds {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let h = self.half_extent;
        Vec3::new(rng.gen_range(-h..=h), self.height, rng.gen_range(-h..=h))
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x.abs() <= self.half_extent
            && point.z.abs() <= self.half_extent
            && point.y == self.height
    }
}

/// Everything [`pick_position`] needs besides the history and RNG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSettings {
    pub bounds: PlacementBounds,
    pub min_separation: f32,
    pub max_attempts: u32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            bounds: PlacementBounds::default(),
            min_separation: MIN_SEPARATION,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

/// Append-only record of accepted spawn positions.
#[derive(Debug, Clone, Default)]
pub struct PlacementHistory {
    positions: Vec<Vec3>,
    degraded: usize,
}

impl PlacementHistory {
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// How many positions were accepted without meeting the separation.
    pub fn degraded_count(&self) -> usize {
        self.degraded
    }

    /// True if `candidate` is at least `min_separation` from every recorded position.
    pub fn is_clear(&self, candidate: Vec3, min_separation: f32) -> bool {
        self.positions
            .iter()
            .all(|p| p.distance(candidate) >= min_separation)
    }

    fn record(&mut self, position: Vec3) {
        self.positions.push(position);
    }
}

/// Pick a spawn position and record it in `history`.
///
/// Samples uniformly until one is `min_separation` clear of every earlier
/// position.  If `max_attempts` samples all fail, the last one is accepted
/// anyway and a warning is logged, so startup never blocks.
pub fn pick_position<R: Rng + ?Sized>(
    history: &mut PlacementHistory,
    settings: &PlacementSettings,
    rng: &mut R,
) -> Vec3 {
    let attempts = settings.max_attempts.max(1);
    let mut candidate = settings.bounds.sample(rng);
    let mut clear = history.is_clear(candidate, settings.min_separation);

    for _ in 1..attempts {
        if clear {
            break;
        }
        candidate = settings.bounds.sample(rng);
        clear = history.is_clear(candidate, settings.min_separation);
    }

    if !clear {
        history.degraded += 1;
        warn!(
            "Could not place object {} u from all {} others after {} attempts; accepting overlap at {:?}",
            settings.min_separation,
            history.len(),
            attempts,
            candidate
        );
    }

    history.record(candidate);
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn first_pick_is_always_accepted_and_recorded() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut history = PlacementHistory::default();
        let settings = PlacementSettings::default();
        let p = pick_position(&mut history, &settings, &mut rng);
        assert_eq!(history.positions(), &[p]);
        assert!(settings.bounds.contains(p));
        assert_eq!(history.degraded_count(), 0);
    }

    #[test]
    fn thirty_default_picks_stay_separated_and_in_bounds() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut history = PlacementHistory::default();
            let settings = PlacementSettings::default();
            for _ in 0..30 {
                pick_position(&mut history, &settings, &mut rng);
            }
            let positions = history.positions();
            assert_eq!(positions.len(), 30);
            for p in positions {
                assert!(settings.bounds.contains(*p), "{p:?} out of bounds");
            }
            if history.degraded_count() == 0 {
                for (i, a) in positions.iter().enumerate() {
                    for b in &positions[i + 1..] {
                        assert!(a.distance(*b) >= settings.min_separation);
                    }
                }
            }
        }
    }

    #[test]
    fn exhaustion_accepts_overlap_instead_of_blocking() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut history = PlacementHistory::default();
        // A 2 × 2 square cannot hold two points 100 u apart.
        let settings = PlacementSettings {
            bounds: PlacementBounds {
                half_extent: 1.0,
                height: 2.0,
            },
            min_separation: 100.0,
            max_attempts: 5,
        };
        pick_position(&mut history, &settings, &mut rng);
        let second = pick_position(&mut history, &settings, &mut rng);
        assert_eq!(history.len(), 2);
        assert_eq!(history.degraded_count(), 1);
        assert!(settings.bounds.contains(second));
    }

    #[test]
    fn history_keeps_growing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut history = PlacementHistory::default();
        let settings = PlacementSettings::default();
        for n in 1..=10 {
            pick_position(&mut history, &settings, &mut rng);
            assert_eq!(history.len(), n);
        }
    }

    #[test]
    fn is_clear_uses_inclusive_threshold() {
        let mut history = PlacementHistory::default();
        history.record(Vec3::ZERO);
        assert!(history.is_clear(Vec3::new(15.0, 0.0, 0.0), 15.0));
        assert!(!history.is_clear(Vec3::new(14.9, 0.0, 0.0), 15.0));
    }
}
