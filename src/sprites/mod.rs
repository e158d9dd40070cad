//! Sprites module: animation playback driven by the movement pose key.

pub mod animation;

use bevy::prelude::*;

pub use animation::*;

use crate::movement::{MovementSystems, Player};

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PoseChanged>().add_systems(
            Update,
            (
                attach_pose_animator,
                sync_pose_from_engine,
                update_animation_frames,
            )
                .chain()
                .after(MovementSystems),
        );
    }
}

/// Give the player a pose animator once it exists.
fn attach_pose_animator(
    mut commands: Commands,
    players: Query<Entity, (With<Player>, Without<PoseAnimator>)>,
) {
    for entity in &players {
        commands.entity(entity).insert(PoseAnimator::default());
    }
}
