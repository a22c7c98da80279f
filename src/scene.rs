//! Scene setup: ground, sky, lights, the tank model, object meshes and the camera.
//!
//! Everything here is declarative.  The only link back to the simulation is the
//! [`TankVisual`] / [`ObjectVisual`] markers, which
//! [`crate::simulation::SimulationPlugin`] uses to move and despawn entities.

use crate::camera::chase_camera_system;
use crate::config::ArcadeConfig;
use crate::session::Session;
use crate::simulation::{ArcadeSet, ObjectVisual, SessionStartSet, TankVisual};
use crate::world_object::ObjectKind;
use bevy::prelude::*;

/// Visual size of each object (sphere diameter / cube side).
const OBJECT_SIZE: f32 = 3.0;

/// Sky colour behind everything.
const SKY_COLOR: Color = Color::srgb(0.53, 0.75, 0.95);

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SKY_COLOR))
            .add_systems(
                Startup,
                (
                    spawn_environment,
                    spawn_tank,
                    spawn_object_visuals,
                    spawn_chase_camera,
                )
                    .after(SessionStartSet),
            )
            .add_systems(Update, chase_camera_system.in_set(ArcadeSet::Camera));
    }
}

/// Ground plane and sun.
fn spawn_environment(
    mut commands: Commands,
    config: Res<ArcadeConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let side = config.arena_half_extent * 2.0;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(side, side))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.28, 0.55, 0.22),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
    ));

    // Sun shining down and across from +X.
    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::default().looking_to(Vec3::new(-1.0, -1.0, 0.0), Vec3::Y),
    ));
}

/// Tank: hull, turret with cannon, and two tracks, all children of the [`TankVisual`] root.
fn spawn_tank(
    mut commands: Commands,
    session: Res<Session>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let hull_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.36, 0.42, 0.27),
        metallic: 0.6,
        perceptual_roughness: 0.5,
        ..default()
    });
    let track_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.12, 0.12, 0.12),
        metallic: 0.5,
        perceptual_roughness: 1.0,
        ..default()
    });

    let hull = meshes.add(Cuboid::new(5.0, 1.5, 8.0));
    let turret = meshes.add(Cuboid::new(3.0, 1.0, 4.0));
    let cannon = meshes.add(Cylinder::new(0.3, 6.0));
    let track = meshes.add(Cuboid::new(1.0, 1.0, 7.0));

    let vehicle = session.vehicle();
    commands
        .spawn((
            TankVisual,
            Mesh3d(hull),
            MeshMaterial3d(hull_material.clone()),
            Transform::from_translation(vehicle.position).with_rotation(vehicle.rotation()),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Mesh3d(turret),
                    MeshMaterial3d(hull_material.clone()),
                    Transform::from_xyz(0.0, 1.5, 0.0),
                ))
                .with_children(|turret| {
                    // Cylinder axis is +Y; tip it forward and slightly up.
                    turret.spawn((
                        Mesh3d(cannon),
                        MeshMaterial3d(hull_material),
                        Transform::from_xyz(0.0, 0.6, 3.0)
                            .with_rotation(Quat::from_rotation_x(1.4)),
                    ));
                });

            for x in [-2.0, 2.0] {
                parent.spawn((
                    Mesh3d(track.clone()),
                    MeshMaterial3d(track_material.clone()),
                    Transform::from_xyz(x, -1.0, 0.0),
                ));
            }
        });

    info!("Tank spawned! Arrow keys or WASD to drive.");
}

/// One mesh per live object: green spheres for bonuses, red cubes for obstacles.
fn spawn_object_visuals(
    mut commands: Commands,
    session: Res<Session>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let bonus_mesh = meshes.add(Sphere::new(OBJECT_SIZE / 2.0));
    let obstacle_mesh = meshes.add(Cuboid::from_length(OBJECT_SIZE));
    let bonus_material = materials.add(ObjectKind::Bonus.color());
    let obstacle_material = materials.add(ObjectKind::Obstacle.color());

    for object in session.registry().live_objects() {
        let (mesh, material) = match object.kind {
            ObjectKind::Bonus => (bonus_mesh.clone(), bonus_material.clone()),
            ObjectKind::Obstacle => (obstacle_mesh.clone(), obstacle_material.clone()),
        };
        commands.spawn((
            ObjectVisual(object.id),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(object.position),
        ));
    }
}

/// 3D camera (carrying the ambient light) placed at its chase position so the
/// first frames do not swoop in.
fn spawn_chase_camera(mut commands: Commands, session: Res<Session>, config: Res<ArcadeConfig>) {
    let chase = config.chase_camera();
    let vehicle = session.vehicle();
    let start = chase.goal(vehicle.position, vehicle.facing());
    commands.spawn((
        Camera3d::default(),
        chase,
        AmbientLight {
            color: Color::WHITE,
            brightness: 300.0,
            ..default()
        },
        Transform::from_translation(start).looking_at(vehicle.position, Vec3::Y),
    ));
}
