//! Movement domain: avatar context flags, loadout and the behavior-facing avatar component.

use bevy::prelude::*;

use crate::movement::{AvatarBody, Facing, Orientation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargeLevel {
    #[default]
    None,
    Half,
    Full,
}

/// Currently equipped weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Loadout {
    #[default]
    Blaster,
    Jetpack,
}

impl Loadout {
    pub fn name(self) -> &'static str {
        match self {
            Loadout::Blaster => "Blaster",
            Loadout::Jetpack => "Jetpack",
        }
    }
}

/// What a fresh Action press should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionHint {
    #[default]
    Jump,
    Swim,
    AirDash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abilities {
    pub air_dash: bool,
    pub ground_slide: bool,
}

impl Default for Abilities {
    fn default() -> Self {
        Self {
            air_dash: true,
            ground_slide: true,
        }
    }
}

/// Game-state flags the engine reads each pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextFlags {
    pub dead: bool,
    pub ready: bool,
    pub can_move: bool,
    pub damaged: bool,
    pub stunned: bool,
    pub teleporting: bool,
    pub facing: Facing,
    pub orientation: Orientation,
    pub loadout: Loadout,
    pub charge: ChargeLevel,
    pub shooting: bool,
    pub running: bool,
    /// Multiplier applied to behavior speeds (slowdowns, power-ups).
    pub movement_scalar: f32,
    pub abilities: Abilities,
}

impl Default for ContextFlags {
    fn default() -> Self {
        Self {
            dead: false,
            ready: true,
            can_move: true,
            damaged: false,
            stunned: false,
            teleporting: false,
            facing: Facing::Right,
            orientation: Orientation::Up,
            loadout: Loadout::Blaster,
            charge: ChargeLevel::None,
            shooting: false,
            running: false,
            movement_scalar: 1.0,
            abilities: Abilities::default(),
        }
    }
}

/// Ammo reserve for a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmmoGauge {
    pub current: u32,
    pub max: u32,
}

impl Default for AmmoGauge {
    fn default() -> Self {
        Self::full(30)
    }
}

impl AmmoGauge {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Shift the gauge by `delta`, clamped to `0..=max`.
    pub fn translate(&mut self, delta: i32) {
        let next = self.current as i64 + delta as i64;
        self.current = next.clamp(0, self.max as i64) as u32;
    }
}

/// Everything the behavior engine reads and writes on the avatar.
#[derive(Component, Debug, Clone, Default)]
pub struct Avatar {
    pub flags: ContextFlags,
    pub body: AvatarBody,
    pub jetpack_ammo: AmmoGauge,
    pub action_hint: ActionHint,
}
