//! Collectible and hazard objects, and the registry that owns the live set.
//!
//! Objects drift slowly on the horizontal plane.  Each frame every object moves
//! by its drift vector and, with a small probability, picks a new one, which
//! gives a gentle random walk without per-object timers.

use crate::constants::{DRIFT_CHANGE_PROBABILITY, DRIFT_MAX};
use crate::placement::{pick_position, PlacementHistory, PlacementSettings};
use bevy::prelude::*;
use rand::Rng;

/// Stable identifier for a world object within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// What happens when the tank touches an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Green sphere, worth points.
    Bonus,
    /// Red cube, costs points.
    Obstacle,
}

impl ObjectKind {
    pub fn color(self) -> Color {
        match self {
            ObjectKind::Bonus => Color::srgb(0.0, 1.0, 0.0),
            ObjectKind::Obstacle => Color::srgb(1.0, 0.0, 0.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Bonus => "bonus",
            ObjectKind::Obstacle => "obstacle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftSettings {
    /// Each horizontal component is drawn from `[-max_component, max_component]`.
    pub max_component: f32,
    /// Per-object, per-tick chance of a new drift vector.
    pub change_probability: f64,
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self {
            max_component: DRIFT_MAX,
            change_probability: DRIFT_CHANGE_PROBABILITY,
        }
    }
}

impl DriftSettings {
    /// A random horizontal drift vector (`y` is always 0).
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let m = self.max_component;
        if m <= 0.0 {
            return Vec3::ZERO;
        }
        Vec3::new(rng.gen_range(-m..=m), 0.0, rng.gen_range(-m..=m))
    }
}

/// A live Bonus or Obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub position: Vec3,
    pub drift: Vec3,
}

/// The live object set, in spawn order.
#[derive(Debug, Clone)]
pub struct ObjectRegistry {
    objects: Vec<WorldObject>,
    next_id: u32,
    drift: DriftSettings,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new(DriftSettings::default())
    }
}

impl ObjectRegistry {
    pub fn new(drift: DriftSettings) -> Self {
        Self {
            objects: Vec::new(),
            next_id: 0,
            drift,
        }
    }

    pub fn drift_settings(&self) -> &DriftSettings {
        &self.drift
    }

    /// Spawn `count` objects of `kind` at separated random positions.
    ///
    /// Returns the new ids in spawn order.
    pub fn spawn_batch<R: Rng + ?Sized>(
        &mut self,
        kind: ObjectKind,
        count: usize,
        history: &mut PlacementHistory,
        placement: &PlacementSettings,
        rng: &mut R,
    ) -> Vec<ObjectId> {
        let ids: Vec<ObjectId> = (0..count)
            .map(|_| {
                let position = pick_position(history, placement, rng);
                let drift = self.drift.sample(rng);
                self.spawn_at(kind, position, drift)
            })
            .collect();
        debug!("Spawned {} {} objects", ids.len(), kind.label());
        ids
    }

    /// Add one object at an exact position with an exact drift.
    ///
    /// The drift's `y` component is discarded.
    pub fn spawn_at(&mut self, kind: ObjectKind, position: Vec3, drift: Vec3) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(WorldObject {
            id,
            kind,
            position,
            drift: Vec3::new(drift.x, 0.0, drift.z),
        });
        id
    }

    /// Advance every object's drift by one tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for object in &mut self.objects {
            object.position += object.drift;
            if rng.gen_bool(self.drift.change_probability) {
                object.drift = self.drift.sample(rng);
            }
        }
    }

    /// Remove `id` from the live set.  Removing an absent id is a no-op.
    pub fn remove(&mut self, id: ObjectId) -> Option<WorldObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn live_objects(&self) -> &[WorldObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn count_of(&self, kind: ObjectKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }
}
