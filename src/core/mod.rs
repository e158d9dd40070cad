//! Core domain: camera setup and world-level flags shared across domains.

use bevy::prelude::*;

/// Flags owned by the room and camera layers that movement reads each tick.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldFlags {
    /// The camera is scrolling to a neighbouring room.
    pub room_transition: bool,
    /// A room transition is holding the scene still.
    pub room_transition_paused: bool,
    /// The camera is rotating to a new gravity orientation.
    pub camera_rotating: bool,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldFlags>()
            .add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
