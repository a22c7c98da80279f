use bevy::prelude::*;
use bevy::window::WindowResolution;

use tank_arcade::config::{self, ArcadeConfig};
use tank_arcade::scene::ScenePlugin;
use tank_arcade::simulation::{SessionStartSet, SimulationPlugin};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tank Arcade".into(),
                resolution: WindowResolution::new(1280, 720),
                ..Default::default()
            }),
            ..Default::default()
        }))
        // Insert ArcadeConfig with compiled defaults; load_arcade_config will
        // overwrite it from assets/arcade.toml (if present) before the session starts.
        .insert_resource(ArcadeConfig::default())
        .add_systems(Startup, config::load_arcade_config.before(SessionStartSet))
        .add_plugins((SimulationPlugin, ScenePlugin))
        .run();
}
