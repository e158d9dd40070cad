//! Movement domain: per-tick resolution of behaviors in priority order.

use bevy::prelude::*;

use crate::movement::behaviors::{
    ActionContext, ActiveSet, AnyBehavior, BehaviorKind, EvalContext, Frame, MovementBehavior,
};
use crate::movement::{Avatar, MovementTuning, SideEffects};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Enter,
    Active,
    Exit,
}

/// One lifecycle call made during the last pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub kind: BehaviorKind,
    pub phase: TransitionPhase,
}

/// Owns one behavior per kind and resolves them in [`BehaviorKind::ALL`] order.
pub struct BehaviorCoordinator {
    slots: [Option<AnyBehavior>; BehaviorKind::COUNT],
    active: ActiveSet,
    transitions: Vec<Transition>,
}

impl Default for BehaviorCoordinator {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            active: ActiveSet::default(),
            transitions: Vec::new(),
        }
    }
}

impl std::fmt::Debug for BehaviorCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorCoordinator")
            .field("active", &self.active.iter().collect::<Vec<_>>())
            .field("transitions", &self.transitions)
            .finish()
    }
}

impl BehaviorCoordinator {
    /// Install `behavior` in the slot for `kind`.
    ///
    /// Panics if the behavior is of a different kind or the slot is taken.
    pub fn register(&mut self, kind: BehaviorKind, behavior: AnyBehavior) {
        assert_eq!(
            behavior.kind(),
            kind,
            "behavior registered under the wrong kind"
        );
        let slot = &mut self.slots[kind.index()];
        assert!(slot.is_none(), "{:?} registered twice", kind);
        *slot = Some(behavior);
    }

    pub fn is_registered(&self, kind: BehaviorKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// Run one resolution pass. Each behavior sees the state already settled
    /// for behaviors ahead of it in this pass.
    pub fn update(
        &mut self,
        dt: f32,
        avatar: &mut Avatar,
        frame: Frame,
        tuning: &MovementTuning,
        effects: &mut dyn SideEffects,
    ) {
        self.transitions.clear();

        for kind in BehaviorKind::ALL {
            let Some(behavior) = self.slots[kind.index()].as_mut() else {
                continue;
            };

            let was_active = self.active.contains(kind);
            let now_active = behavior.evaluate(
                dt,
                &EvalContext {
                    avatar: &*avatar,
                    frame,
                    active: &self.active,
                    tuning,
                },
            );

            let phase = match (was_active, now_active) {
                (false, true) => TransitionPhase::Enter,
                (true, true) => TransitionPhase::Active,
                (true, false) => TransitionPhase::Exit,
                (false, false) => continue,
            };

            let mut ctx = ActionContext {
                avatar: &mut *avatar,
                frame,
                active: &self.active,
                tuning,
                effects: &mut *effects,
            };
            match phase {
                TransitionPhase::Enter => {
                    debug!("Behavior enter: {:?}", kind);
                    behavior.on_enter(&mut ctx);
                }
                TransitionPhase::Active => behavior.on_active(dt, &mut ctx),
                TransitionPhase::Exit => {
                    debug!("Behavior exit: {:?}", kind);
                    behavior.on_exit(&mut ctx);
                }
            }

            self.active.set(kind, now_active);
            self.transitions.push(Transition { kind, phase });
        }
    }

    pub fn is_behavior_active(&self, kind: BehaviorKind) -> bool {
        self.active.contains(kind)
    }

    pub fn is_any_behavior_active(&self, kinds: &[BehaviorKind]) -> bool {
        self.active.contains_any(kinds)
    }

    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    /// Lifecycle calls made during the last pass, in order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}
