//! Movement domain: contact sensor snapshot and contact-driven hint updates.

use bevy::prelude::*;

use crate::movement::ActionHint;

/// One boolean contact fact about the avatar's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySense {
    FeetOnGround,
    FeetOnIce,
    FeetOnSand,
    HeadTouchingBlock,
    SideTouchingBlockLeft,
    SideTouchingBlockRight,
    HeadTouchingLadder,
    FeetTouchingLadder,
    InWater,
    TouchingCart,
}

impl BodySense {
    pub const COUNT: usize = 10;

    fn index(self) -> usize {
        self as usize
    }
}

/// The ladder currently overlapped, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderContact {
    pub bounds: Rect,
}

/// Contact state sampled by the physics layer before each resolution pass.
#[derive(Component, Debug, Clone, Default)]
pub struct SensorSnapshot {
    senses: [bool; BodySense::COUNT],
    pub ladder: Option<LadderContact>,
    pub cart: Option<Entity>,
}

impl SensorSnapshot {
    pub fn is(&self, sense: BodySense) -> bool {
        self.senses[sense.index()]
    }

    pub fn set(&mut self, sense: BodySense, value: bool) {
        self.senses[sense.index()] = value;
    }

    pub fn with(mut self, sense: BodySense) -> Self {
        self.set(sense, true);
        self
    }

    pub fn grounded(&self) -> bool {
        self.is(BodySense::FeetOnGround)
    }
}

/// Retarget the action hint when ground or water contact starts or ends.
pub fn retarget_action_hint(
    prev: &SensorSnapshot,
    next: &SensorSnapshot,
    hint: &mut ActionHint,
    wall_sliding: bool,
) {
    let was_grounded = prev.grounded();
    let grounded = next.grounded();
    let was_in_water = prev.is(BodySense::InWater);
    let in_water = next.is(BodySense::InWater);

    if grounded && !was_grounded {
        *hint = ActionHint::Jump;
    } else if !grounded && was_grounded {
        *hint = if in_water {
            ActionHint::Swim
        } else {
            ActionHint::AirDash
        };
    }

    if in_water && !was_in_water && !grounded && !wall_sliding {
        *hint = ActionHint::Swim;
    } else if !in_water && was_in_water {
        *hint = ActionHint::AirDash;
    }
}
