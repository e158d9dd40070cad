//! Movement domain: pose key resolution from the settled behavior state.
//!
//! The resolver runs once per tick after every behavior has been resolved and
//! turns the avatar's state into a single animation key such as
//! `JumpShoot_Left_Blaster`.

use std::fmt;

use crate::movement::behaviors::{ActiveSet, BehaviorKind, Frame};
use crate::movement::{Avatar, BodySense, ChargeLevel, Facing, Loadout, MovementTuning};

/// Key shown while a room transition is paused.
pub const FROZEN_POSE_KEY: &str = "Invalid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PoseBase {
    Jetpack,
    Cart,
    CartJump,
    CartDamaged,
    Damaged,
    Climb,
    StillClimb,
    FinishClimb,
    AirDash,
    GroundSlide,
    WallSlide,
    Swim,
    Run,
    Jump,
    SlipSlide,
    #[default]
    Stand,
}

impl PoseBase {
    pub fn name(self) -> &'static str {
        match self {
            PoseBase::Jetpack => "Jetpack",
            PoseBase::Cart => "Cart",
            PoseBase::CartJump => "CartJump",
            PoseBase::CartDamaged => "CartDamaged",
            PoseBase::Damaged => "Damaged",
            PoseBase::Climb => "Climb",
            PoseBase::StillClimb => "StillClimb",
            PoseBase::FinishClimb => "FinishClimb",
            PoseBase::AirDash => "AirDash",
            PoseBase::GroundSlide => "GroundSlide",
            PoseBase::WallSlide => "WallSlide",
            PoseBase::Swim => "Swim",
            PoseBase::Run => "Run",
            PoseBase::Jump => "Jump",
            PoseBase::SlipSlide => "SlipSlide",
            PoseBase::Stand => "Stand",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PoseModifier {
    #[default]
    None,
    Shoot,
    HalfCharged,
    Charged,
}

impl PoseModifier {
    pub fn suffix(self) -> &'static str {
        match self {
            PoseModifier::None => "",
            PoseModifier::Shoot => "Shoot",
            PoseModifier::HalfCharged => "HalfCharged",
            PoseModifier::Charged => "Charged",
        }
    }

    /// Shooting wins over a full charge, which wins over a half charge.
    pub fn from_flags(shooting: bool, charge: ChargeLevel) -> Self {
        if shooting {
            PoseModifier::Shoot
        } else {
            match charge {
                ChargeLevel::Full => PoseModifier::Charged,
                ChargeLevel::Half => PoseModifier::HalfCharged,
                ChargeLevel::None => PoseModifier::None,
            }
        }
    }

    fn shoot_only(self) -> Self {
        if self == PoseModifier::Shoot {
            self
        } else {
            PoseModifier::None
        }
    }

    fn charge_only(self) -> Self {
        if self == PoseModifier::Shoot {
            PoseModifier::None
        } else {
            self
        }
    }
}

/// Pose without the facing and loadout suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PoseKey {
    pub base: PoseBase,
    pub modifier: PoseModifier,
}

impl PoseKey {
    pub fn new(base: PoseBase, modifier: PoseModifier) -> Self {
        Self { base, modifier }
    }

    pub fn plain(base: PoseBase) -> Self {
        Self::new(base, PoseModifier::None)
    }
}

impl fmt::Display for PoseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base.name(), self.modifier.suffix())
    }
}

/// Keeps the last raw key so room transitions can hold the current pose.
#[derive(Debug, Clone)]
pub struct PoseResolver {
    raw: PoseKey,
    frozen: bool,
    key: String,
}

impl Default for PoseResolver {
    fn default() -> Self {
        let raw = PoseKey::default();
        Self {
            raw,
            frozen: false,
            key: format!("{}_{}", raw, Loadout::default().name()),
        }
    }
}

impl PoseResolver {
    pub fn resolve(
        &mut self,
        avatar: &Avatar,
        active: &ActiveSet,
        frame: Frame,
        tuning: &MovementTuning,
    ) {
        if frame.world.room_transition_paused {
            self.frozen = true;
            self.key = FROZEN_POSE_KEY.to_string();
            return;
        }
        self.frozen = false;

        self.raw = if frame.world.room_transition {
            // Hold the pose while the room scrolls; a standing pose is shown running.
            match self.raw.base {
                PoseBase::Stand => PoseKey::new(PoseBase::Run, self.raw.modifier),
                _ => self.raw,
            }
        } else {
            raw_pose(avatar, active, frame, tuning)
        };

        let flags = &avatar.flags;
        let side = match flags.facing {
            Facing::Left => "_Left",
            Facing::Right => "",
        };
        self.key = format!("{}{}_{}", self.raw, side, flags.loadout.name());
    }

    /// Render key: raw key, facing suffix and loadout suffix, or the frozen key.
    pub fn pose_key(&self) -> &str {
        &self.key
    }

    /// Last resolved raw key. Retained while frozen.
    pub fn raw_pose_key(&self) -> PoseKey {
        self.raw
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

/// Grounded and moving sideways fast enough to read as slipping.
pub fn is_slip_sliding(avatar: &Avatar, frame: Frame, tuning: &MovementTuning) -> bool {
    let lateral = avatar.flags.orientation.lateral();
    frame.grounded()
        && avatar.body.velocity_along(lateral).abs() > tuning.units(tuning.slip_threshold)
}

fn raw_pose(avatar: &Avatar, active: &ActiveSet, frame: Frame, tuning: &MovementTuning) -> PoseKey {
    let flags = &avatar.flags;
    let modifier = PoseModifier::from_flags(flags.shooting, flags.charge);

    if !flags.ready {
        return PoseKey::plain(PoseBase::Stand);
    }
    if frame.world.camera_rotating {
        return PoseKey::new(PoseBase::Jump, modifier);
    }

    let grounded = frame.grounded();
    if active.contains(BehaviorKind::Jetpack) {
        return PoseKey::new(PoseBase::Jetpack, modifier.shoot_only());
    }
    if active.contains(BehaviorKind::RideCart) {
        if flags.damaged {
            return PoseKey::plain(PoseBase::CartDamaged);
        }
        let base = if active.contains(BehaviorKind::Jump) || !grounded {
            PoseBase::CartJump
        } else {
            PoseBase::Cart
        };
        return PoseKey::new(base, modifier);
    }
    if flags.damaged || flags.stunned {
        return PoseKey::plain(PoseBase::Damaged);
    }
    if active.contains(BehaviorKind::Climb) {
        let up = flags.orientation.up();
        let base = if !frame.sensing(BodySense::HeadTouchingLadder) {
            PoseBase::FinishClimb
        } else if avatar.body.velocity_along(up) != 0.0 {
            PoseBase::Climb
        } else {
            PoseBase::StillClimb
        };
        // Every climb pose shares the one shooting frame.
        if modifier == PoseModifier::Shoot {
            return PoseKey::new(PoseBase::Climb, PoseModifier::Shoot);
        }
        return PoseKey::new(base, modifier);
    }
    if active.contains(BehaviorKind::AirDash) {
        return PoseKey::new(PoseBase::AirDash, modifier.charge_only());
    }
    if active.contains(BehaviorKind::GroundSlide) {
        return PoseKey::new(PoseBase::GroundSlide, modifier);
    }
    if active.contains(BehaviorKind::WallSlide) {
        return PoseKey::new(PoseBase::WallSlide, modifier);
    }
    if active.contains(BehaviorKind::Swim) {
        return PoseKey::new(PoseBase::Swim, modifier);
    }
    if grounded && flags.running {
        return PoseKey::new(PoseBase::Run, modifier);
    }
    if active.contains(BehaviorKind::Jump) || !grounded {
        return PoseKey::new(PoseBase::Jump, modifier);
    }
    if is_slip_sliding(avatar, frame, tuning) {
        return PoseKey::new(PoseBase::SlipSlide, modifier);
    }
    PoseKey::new(PoseBase::Stand, modifier)
}
