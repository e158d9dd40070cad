//! Movement domain: behavior engine, pose resolution and the systems hosting them.

pub mod behaviors;
pub mod body;
mod bootstrap;
mod components;
mod context;
pub mod coordinator;
#[cfg(feature = "dev-tools")]
mod dev;
mod effects;
mod engine;
mod input;
pub mod pose;
mod resources;
mod sensors;
mod systems;
mod timer;

#[cfg(test)]
mod tests;

pub use behaviors::{BehaviorKind, Frame, MovementBehavior};
pub use body::AvatarBody;
pub use components::*;
pub use context::{
    Abilities, ActionHint, AmmoGauge, Avatar, ChargeLevel, ContextFlags, Loadout,
};
pub use effects::{MotionEffect, SideEffects, SoundCue, SpawnKind, SpawnRequest};
pub use engine::BehaviorEngine;
pub use input::{Button, ButtonStatus, InputSnapshot};
pub use pose::{PoseBase, PoseKey, PoseModifier};
pub use resources::MovementTuning;
pub use sensors::{retarget_action_hint, BodySense, LadderContact, SensorSnapshot};
pub use timer::BehaviorTimer;

use bevy::prelude::*;

use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{
    apply_horizontal_movement, apply_motion_effects, apply_physics, carry_mounted_cart,
    detect_contacts, expire_dust_puffs, read_input, resolve_behaviors, update_facing,
};

/// Ordering handle for systems that read the resolved pose.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovementSystems;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<InputSnapshot>()
            .add_message::<MotionEffect>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (
                    read_input,
                    update_facing,
                    detect_contacts,
                    resolve_behaviors,
                    apply_horizontal_movement,
                    apply_physics,
                    carry_mounted_cart,
                    apply_motion_effects,
                )
                    .chain()
                    .in_set(MovementSystems),
            )
            .add_systems(Update, expire_dust_puffs);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_room);
    }
}
