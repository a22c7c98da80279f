//! Simulation plugin: drives the [`Session`] once per frame and mirrors it onto entities.
//!
//! ## System Responsibilities
//!
//! | System                         | Schedule | Set             | Purpose                                  |
//! |--------------------------------|----------|-----------------|------------------------------------------|
//! | `start_session`                | Startup  | `SessionStart`  | Build the session from `ArcadeConfig`    |
//! | `keyboard_input_system`        | Update   | `Input`         | Keys → `InputState`                      |
//! | `simulation_tick_system`       | Update   | `Simulate`      | `Session::tick`                          |
//! | `sync_vehicle_transform_system`| Update   | `Sync`          | Tank pose → `TankVisual` transform       |
//! | `sync_object_visuals_system`   | Update   | `Sync`          | Object positions; despawn collected ones |
//!
//! Visual entities are spawned elsewhere (see [`crate::scene`]); this plugin only
//! needs them to carry [`TankVisual`] or [`ObjectVisual`], so it runs headless.

use crate::config::ArcadeConfig;
use crate::input::{keyboard_input_system, InputState};
use crate::session::Session;
use crate::world_object::{ObjectId, ObjectKind};
use bevy::prelude::*;

/// Ordering for everything that happens in a frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArcadeSet {
    Input,
    Simulate,
    Sync,
    Camera,
}

/// Startup ordering: the session must exist before anything spawns visuals for it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionStartSet;

/// Marker for the root entity of the tank model.
#[derive(Component, Debug, Default)]
pub struct TankVisual;

/// Links a visual entity to the world object it shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectVisual(pub ObjectId);

/// Running tally of hits, refreshed on frames where something was hit.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: i32,
    pub bonuses_collected: u32,
    pub obstacles_hit: u32,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>()
            .init_resource::<ScoreBoard>()
            .configure_sets(
                Update,
                (
                    ArcadeSet::Input,
                    ArcadeSet::Simulate,
                    ArcadeSet::Sync,
                    ArcadeSet::Camera,
                )
                    .chain(),
            )
            .add_systems(Startup, start_session.in_set(SessionStartSet))
            .add_systems(
                Update,
                (
                    keyboard_input_system
                        .in_set(ArcadeSet::Input)
                        .run_if(resource_exists::<ButtonInput<KeyCode>>),
                    simulation_tick_system.in_set(ArcadeSet::Simulate),
                    (sync_vehicle_transform_system, sync_object_visuals_system)
                        .in_set(ArcadeSet::Sync),
                ),
            );
    }
}

/// Startup system: start a session from the current [`ArcadeConfig`].
pub fn start_session(mut commands: Commands, config: Res<ArcadeConfig>) {
    commands.insert_resource(Session::start(config.clone()));
}

/// Advance the session by one tick with this frame's input.
pub fn simulation_tick_system(
    mut session: ResMut<Session>,
    input: Res<InputState>,
    mut board: ResMut<ScoreBoard>,
) {
    let report = session.tick(&input);
    if report.collisions.is_empty() {
        return;
    }
    for hit in &report.collisions {
        match hit.kind {
            ObjectKind::Bonus => board.bonuses_collected += 1,
            ObjectKind::Obstacle => board.obstacles_hit += 1,
        }
    }
    board.score = report.score;
    debug!(
        "Frame {}: {} hit(s), {} objects left",
        report.frame,
        report.collisions.len(),
        session.registry().len()
    );
}

/// Copy the tank's position and heading onto its model.
pub fn sync_vehicle_transform_system(
    session: Res<Session>,
    mut q: Query<&mut Transform, With<TankVisual>>,
) {
    let vehicle = session.vehicle();
    for mut transform in q.iter_mut() {
        transform.translation = vehicle.position;
        transform.rotation = vehicle.rotation();
    }
}

/// Move object visuals to their object's position, and despawn visuals whose
/// object is no longer live.
pub fn sync_object_visuals_system(
    mut commands: Commands,
    session: Res<Session>,
    mut q: Query<(Entity, &ObjectVisual, &mut Transform)>,
) {
    let registry = session.registry();
    for (entity, visual, mut transform) in q.iter_mut() {
        match registry.get(visual.0) {
            Some(object) => transform.translation = object.position,
            None => {
                commands.entity(entity).despawn();
            }
        }
    }
}
