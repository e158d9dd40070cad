//! Movement domain: the per-avatar engine tying behaviors and pose resolution together.

use bevy::prelude::*;

use crate::movement::behaviors::{build_behavior, ActiveSet, BehaviorKind, Frame};
use crate::movement::coordinator::{BehaviorCoordinator, Transition};
use crate::movement::pose::{PoseKey, PoseResolver};
use crate::movement::{Avatar, MovementTuning, SideEffects};

/// Resolves the avatar's movement behaviors and pose once per tick.
#[derive(Component, Debug)]
pub struct BehaviorEngine {
    coordinator: BehaviorCoordinator,
    resolver: PoseResolver,
}

impl BehaviorEngine {
    /// Engine with every stock behavior registered.
    pub fn new(tuning: &MovementTuning) -> Self {
        let mut coordinator = BehaviorCoordinator::default();
        for kind in BehaviorKind::ALL {
            coordinator.register(kind, build_behavior(kind, tuning));
        }
        Self::from_coordinator(coordinator)
    }

    /// Engine around a hand-assembled coordinator.
    pub fn from_coordinator(coordinator: BehaviorCoordinator) -> Self {
        Self {
            coordinator,
            resolver: PoseResolver::default(),
        }
    }

    /// One tick: resolve behaviors, then derive the pose from the settled state.
    pub fn update(
        &mut self,
        dt: f32,
        avatar: &mut Avatar,
        frame: Frame,
        tuning: &MovementTuning,
        effects: &mut dyn SideEffects,
    ) {
        self.coordinator.update(dt, avatar, frame, tuning, effects);
        self.resolver
            .resolve(avatar, self.coordinator.active(), frame, tuning);
    }

    pub fn is_behavior_active(&self, kind: BehaviorKind) -> bool {
        self.coordinator.is_behavior_active(kind)
    }

    pub fn is_any_behavior_active(&self, kinds: &[BehaviorKind]) -> bool {
        self.coordinator.is_any_behavior_active(kinds)
    }

    pub fn active(&self) -> &ActiveSet {
        self.coordinator.active()
    }

    pub fn transitions(&self) -> &[Transition] {
        self.coordinator.transitions()
    }

    pub fn pose_key(&self) -> &str {
        self.resolver.pose_key()
    }

    pub fn raw_pose_key(&self) -> PoseKey {
        self.resolver.raw_pose_key()
    }

    pub fn is_pose_frozen(&self) -> bool {
        self.resolver.is_frozen()
    }
}
