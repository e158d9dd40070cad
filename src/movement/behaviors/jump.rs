use bevy::prelude::*;

use super::{ActionContext, BehaviorKind, EvalContext, MovementBehavior};
use crate::movement::{ActionHint, BodySense, Button, SoundCue};

/// A launch off the ground, a wall or a cart. Lasts while still rising and
/// Action is held.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jump;

impl MovementBehavior for Jump {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Jump
    }

    fn evaluate(&mut self, _dt: f32, ctx: &EvalContext) -> bool {
        let flags = &ctx.avatar.flags;
        if !ctx.base_guard()
            || flags.damaged
            || flags.teleporting
            || ctx.is_any_active(&[
                BehaviorKind::Swim,
                BehaviorKind::Climb,
                BehaviorKind::Jetpack,
            ])
            || ctx.frame.sensing(BodySense::HeadTouchingBlock)
            || !ctx.frame.pressed(Button::Action)
            || ctx.frame.pressed(Button::Down)
        {
            return false;
        }

        if ctx.is_active(BehaviorKind::Jump) {
            let up = flags.orientation.up();
            return ctx.avatar.body.velocity_along(up) > 0.0;
        }

        ctx.avatar.action_hint == ActionHint::Jump
            && ctx.frame.just_pressed(Button::Action)
            && (ctx.frame.grounded() || ctx.is_active(BehaviorKind::WallSlide))
    }

    fn on_enter(&mut self, ctx: &mut ActionContext) {
        let orientation = ctx.avatar.flags.orientation;
        let up = orientation.up();
        let lateral = orientation.lateral();
        let from_wall = ctx.is_active(BehaviorKind::WallSlide);

        let launch = if from_wall {
            ctx.tuning.wall_jump_vel
        } else if ctx.is_active(BehaviorKind::RideCart) {
            ctx.tuning.cart_jump_vel
        } else {
            ctx.tuning.jump_vel
        };
        let lateral_speed = if from_wall {
            ctx.tuning.units(ctx.tuning.wall_jump_horizontal) * ctx.avatar.flags.facing.value()
        } else {
            ctx.avatar.body.velocity_along(lateral)
        };

        ctx.avatar.body.velocity = up * ctx.tuning.units(launch) + lateral * lateral_speed;
        ctx.effects.play_sound(SoundCue::Jump, false);
        debug!("Jump: launch={} from_wall={}", launch, from_wall);
    }

    fn on_active(&mut self, _dt: f32, _ctx: &mut ActionContext) {}

    fn on_exit(&mut self, ctx: &mut ActionContext) {
        let up = ctx.avatar.flags.orientation.up();
        ctx.avatar.body.set_velocity_along(up, 0.0);
    }
}
