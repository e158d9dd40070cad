use bevy::prelude::*;

use super::{ActionContext, BehaviorKind, EvalContext, MovementBehavior};
use crate::movement::{ActionHint, BehaviorTimer, BodySense, Button, Facing, MovementTuning};

/// Sliding down a wall while pushing into it.
#[derive(Debug, Clone)]
pub struct WallSlide {
    /// Blocks re-attaching right after a wall jump.
    lockout: BehaviorTimer,
}

impl WallSlide {
    pub fn new(tuning: &MovementTuning) -> Self {
        Self {
            lockout: BehaviorTimer::finished(tuning.wall_jump_lockout),
        }
    }

    /// Face away from whichever wall is being touched.
    fn face_off_wall(ctx: &mut ActionContext) {
        if ctx.frame.sensing(BodySense::SideTouchingBlockLeft) {
            ctx.avatar.flags.facing = Facing::Right;
        } else if ctx.frame.sensing(BodySense::SideTouchingBlockRight) {
            ctx.avatar.flags.facing = Facing::Left;
        }
    }
}

impl MovementBehavior for WallSlide {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::WallSlide
    }

    fn evaluate(&mut self, dt: f32, ctx: &EvalContext) -> bool {
        self.lockout.update(dt);

        if !ctx.base_guard()
            || ctx.frame.sensing(BodySense::FeetOnSand)
            || ctx.is_active(BehaviorKind::Jetpack)
            || !self.lockout.is_finished()
        {
            return false;
        }

        let against_wall = (ctx.frame.sensing(BodySense::SideTouchingBlockLeft)
            && ctx.frame.pressed(Button::Left))
            || (ctx.frame.sensing(BodySense::SideTouchingBlockRight)
                && ctx.frame.pressed(Button::Right));
        if !against_wall || ctx.avatar.flags.damaged {
            return false;
        }

        !ctx.is_any_active(&[
            BehaviorKind::Jump,
            BehaviorKind::Climb,
            BehaviorKind::RideCart,
            BehaviorKind::Jetpack,
        ]) && !ctx.frame.grounded()
    }

    fn on_enter(&mut self, ctx: &mut ActionContext) {
        debug!("WallSlide: attached to wall");
        ctx.avatar.action_hint = ActionHint::Jump;
        Self::face_off_wall(ctx);
    }

    fn on_active(&mut self, _dt: f32, ctx: &mut ActionContext) {
        ctx.avatar.action_hint = ActionHint::Jump;
        Self::face_off_wall(ctx);
        let vertical = ctx.avatar.flags.orientation.is_vertical();
        ctx.avatar
            .body
            .add_friction(vertical, ctx.tuning.wall_slide_friction);
    }

    fn on_exit(&mut self, ctx: &mut ActionContext) {
        if ctx.is_active(BehaviorKind::Jump) {
            self.lockout.reset();
        }
        if !ctx.frame.sensing(BodySense::InWater) {
            ctx.avatar.action_hint = ActionHint::AirDash;
        }
    }
}
