//! Content domain: data-driven tuning loaded from `assets/data`.

mod loader;


pub use loader::{load_movement_tuning, load_single_file, parse_tuning, ContentLoadError};

use bevy::prelude::*;
use std::path::Path;

use crate::movement::MovementTuning;

pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_content);
    }
}

fn load_content(mut commands: Commands) {
    match load_movement_tuning(Path::new(CONTENT_DIR)) {
        Ok(tuning) => {
            info!(
                "Loaded movement tuning: world_unit={}, gravity={}",
                tuning.world_unit, tuning.gravity
            );
            commands.insert_resource(tuning);
        }
        Err(e) => {
            warn!("{}; using default movement tuning", e);
            commands.insert_resource(MovementTuning::default());
        }
    }
}
