use super::{ActionContext, BehaviorKind, EvalContext, MovementBehavior};
use crate::movement::{ActionHint, BodySense, Button, SoundCue};

/// A stroke upward while submerged. Lasts while the stroke is still rising.
#[derive(Debug, Clone, Copy, Default)]
pub struct Swim;

impl MovementBehavior for Swim {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Swim
    }

    fn evaluate(&mut self, _dt: f32, ctx: &EvalContext) -> bool {
        if !ctx.base_guard()
            || ctx.avatar.flags.damaged
            || !ctx.frame.sensing(BodySense::InWater)
            || ctx.frame.sensing(BodySense::HeadTouchingBlock)
            || ctx.is_active(BehaviorKind::RideCart)
        {
            return false;
        }

        if ctx.is_active(BehaviorKind::Swim) {
            let up = ctx.avatar.flags.orientation.up();
            return ctx.avatar.body.velocity_along(up) > 0.0;
        }

        ctx.frame.just_pressed(Button::Action) && ctx.avatar.action_hint == ActionHint::Swim
    }

    fn on_enter(&mut self, ctx: &mut ActionContext) {
        let up = ctx.avatar.flags.orientation.up();
        let impulse = ctx.tuning.units(ctx.tuning.swim_vel);
        ctx.avatar.body.add_velocity_along(up, impulse);
        ctx.effects.play_sound(SoundCue::Swim, false);
    }

    fn on_active(&mut self, _dt: f32, _ctx: &mut ActionContext) {}

    fn on_exit(&mut self, _ctx: &mut ActionContext) {}
}
