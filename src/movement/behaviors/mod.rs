//! Movement domain: the eight movement behaviors and the contract they share.
//!
//! A behavior decides each pass whether it should be active (`evaluate`) and
//! reacts to edges of that decision: `on_enter` on false to true, `on_active`
//! while it stays true, `on_exit` on true to false. Evaluation reads the
//! already-resolved state of every behavior earlier in [`BehaviorKind::ALL`].
//! The kind set is closed; [`AnyBehavior`] dispatches over it statically.

mod air_dash;
mod climb;
mod ground_slide;
mod jetpack;
mod jump;
mod ride_cart;
mod swim;
mod wall_slide;

pub use air_dash::AirDash;
pub use climb::Climb;
pub use ground_slide::GroundSlide;
pub use jetpack::Jetpack;
pub use jump::Jump;
pub use ride_cart::RideCart;
pub use swim::Swim;
pub use wall_slide::WallSlide;

use crate::core::WorldFlags;
use crate::movement::{
    ActionHint, Avatar, BodySense, Button, Facing, InputSnapshot, MovementTuning, SensorSnapshot,
    SideEffects,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    WallSlide,
    Swim,
    Jump,
    AirDash,
    GroundSlide,
    Climb,
    RideCart,
    Jetpack,
}

impl BehaviorKind {
    pub const COUNT: usize = 8;

    /// Resolution order. Earlier kinds win ties.
    pub const ALL: [BehaviorKind; BehaviorKind::COUNT] = [
        BehaviorKind::WallSlide,
        BehaviorKind::Swim,
        BehaviorKind::Jump,
        BehaviorKind::AirDash,
        BehaviorKind::GroundSlide,
        BehaviorKind::Climb,
        BehaviorKind::RideCart,
        BehaviorKind::Jetpack,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Which behaviors are currently active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveSet([bool; BehaviorKind::COUNT]);

impl ActiveSet {
    pub fn contains(&self, kind: BehaviorKind) -> bool {
        self.0[kind.index()]
    }

    pub fn set(&mut self, kind: BehaviorKind, active: bool) {
        self.0[kind.index()] = active;
    }

    pub fn contains_any(&self, kinds: &[BehaviorKind]) -> bool {
        kinds.iter().any(|k| self.contains(*k))
    }

    pub fn iter(&self) -> impl Iterator<Item = BehaviorKind> + '_ {
        BehaviorKind::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

/// Read-only inputs frozen for one pass.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pub input: &'a InputSnapshot,
    pub sensors: &'a SensorSnapshot,
    pub world: &'a WorldFlags,
}

impl Frame<'_> {
    pub fn sensing(&self, sense: BodySense) -> bool {
        self.sensors.is(sense)
    }

    pub fn grounded(&self) -> bool {
        self.sensors.grounded()
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.input.is_pressed(button)
    }

    pub fn just_pressed(&self, button: Button) -> bool {
        self.input.is_just_pressed(button)
    }

    /// A block sits on the side the avatar is facing.
    pub fn blocked_toward(&self, facing: Facing) -> bool {
        match facing {
            Facing::Left => self.sensing(BodySense::SideTouchingBlockLeft),
            Facing::Right => self.sensing(BodySense::SideTouchingBlockRight),
        }
    }
}

/// What `evaluate` may look at.
pub struct EvalContext<'a> {
    pub avatar: &'a Avatar,
    pub frame: Frame<'a>,
    pub active: &'a ActiveSet,
    pub tuning: &'a MovementTuning,
}

impl EvalContext<'_> {
    /// Not dead, ready, and allowed to move. Every behavior checks this first.
    pub fn base_guard(&self) -> bool {
        let flags = &self.avatar.flags;
        !flags.dead && flags.ready && flags.can_move
    }

    pub fn is_active(&self, kind: BehaviorKind) -> bool {
        self.active.contains(kind)
    }

    pub fn is_any_active(&self, kinds: &[BehaviorKind]) -> bool {
        self.active.contains_any(kinds)
    }

    pub fn blocked_ahead(&self) -> bool {
        self.frame.blocked_toward(self.avatar.flags.facing)
    }
}

/// What the transition hooks may touch.
pub struct ActionContext<'a> {
    pub avatar: &'a mut Avatar,
    pub frame: Frame<'a>,
    pub active: &'a ActiveSet,
    pub tuning: &'a MovementTuning,
    pub effects: &'a mut dyn SideEffects,
}

impl ActionContext<'_> {
    pub fn is_active(&self, kind: BehaviorKind) -> bool {
        self.active.contains(kind)
    }

    pub fn blocked_ahead(&self) -> bool {
        self.frame.blocked_toward(self.avatar.flags.facing)
    }

    /// World units to pixels, scaled by the avatar's movement scalar.
    pub fn scaled_units(&self, value: f32) -> f32 {
        self.tuning.units(value) * self.avatar.flags.movement_scalar
    }
}

pub trait MovementBehavior {
    fn kind(&self) -> BehaviorKind;

    /// Whether the behavior should be active this pass. Must not touch the body.
    fn evaluate(&mut self, dt: f32, ctx: &EvalContext) -> bool;

    fn on_enter(&mut self, ctx: &mut ActionContext);

    fn on_active(&mut self, dt: f32, ctx: &mut ActionContext);

    fn on_exit(&mut self, ctx: &mut ActionContext);
}

/// One behavior of any kind. The coordinator keeps one per priority slot.
#[derive(Debug, Clone)]
pub enum AnyBehavior {
    WallSlide(WallSlide),
    Swim(Swim),
    Jump(Jump),
    AirDash(AirDash),
    GroundSlide(GroundSlide),
    Climb(Climb),
    RideCart(RideCart),
    Jetpack(Jetpack),
}

macro_rules! dispatch {
    ($any:expr, $b:ident => $call:expr) => {
        match $any {
            AnyBehavior::WallSlide($b) => $call,
            AnyBehavior::Swim($b) => $call,
            AnyBehavior::Jump($b) => $call,
            AnyBehavior::AirDash($b) => $call,
            AnyBehavior::GroundSlide($b) => $call,
            AnyBehavior::Climb($b) => $call,
            AnyBehavior::RideCart($b) => $call,
            AnyBehavior::Jetpack($b) => $call,
        }
    };
}

impl MovementBehavior for AnyBehavior {
    fn kind(&self) -> BehaviorKind {
        dispatch!(self, b => b.kind())
    }

    fn evaluate(&mut self, dt: f32, ctx: &EvalContext) -> bool {
        dispatch!(self, b => b.evaluate(dt, ctx))
    }

    fn on_enter(&mut self, ctx: &mut ActionContext) {
        dispatch!(self, b => b.on_enter(ctx))
    }

    fn on_active(&mut self, dt: f32, ctx: &mut ActionContext) {
        dispatch!(self, b => b.on_active(dt, ctx))
    }

    fn on_exit(&mut self, ctx: &mut ActionContext) {
        dispatch!(self, b => b.on_exit(ctx))
    }
}

/// Build the stock behavior for `kind`.
pub fn build_behavior(kind: BehaviorKind, tuning: &MovementTuning) -> AnyBehavior {
    match kind {
        BehaviorKind::WallSlide => AnyBehavior::WallSlide(WallSlide::new(tuning)),
        BehaviorKind::Swim => AnyBehavior::Swim(Swim),
        BehaviorKind::Jump => AnyBehavior::Jump(Jump),
        BehaviorKind::AirDash => AnyBehavior::AirDash(AirDash::new(tuning)),
        BehaviorKind::GroundSlide => AnyBehavior::GroundSlide(GroundSlide::new(tuning)),
        BehaviorKind::Climb => AnyBehavior::Climb(Climb::default()),
        BehaviorKind::RideCart => AnyBehavior::RideCart(RideCart::default()),
        BehaviorKind::Jetpack => AnyBehavior::Jetpack(Jetpack::new(tuning)),
    }
}

/// Hint for after leaving a ladder or wall: swim if wet, otherwise dash.
fn airborne_hint(frame: &Frame) -> ActionHint {
    if frame.sensing(BodySense::InWater) {
        ActionHint::Swim
    } else {
        ActionHint::AirDash
    }
}
