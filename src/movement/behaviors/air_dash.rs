use bevy::prelude::*;

use super::{ActionContext, BehaviorKind, EvalContext, MovementBehavior};
use crate::movement::{
    ActionHint, BehaviorTimer, BodySense, Button, Facing, Loadout, MovementTuning, SoundCue,
};

/// A short gravity-free burst along the facing direction while airborne.
#[derive(Debug, Clone)]
pub struct AirDash {
    max_timer: BehaviorTimer,
    cooldown: BehaviorTimer,
    impulse: Vec2,
    last_facing: Facing,
}

impl AirDash {
    pub fn new(tuning: &MovementTuning) -> Self {
        Self {
            max_timer: BehaviorTimer::new(tuning.air_dash_max_time),
            cooldown: BehaviorTimer::finished(tuning.air_dash_cooldown),
            impulse: Vec2::ZERO,
            last_facing: Facing::Right,
        }
    }
}

impl MovementBehavior for AirDash {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::AirDash
    }

    fn evaluate(&mut self, dt: f32, ctx: &EvalContext) -> bool {
        self.cooldown.update(dt);

        let flags = &ctx.avatar.flags;
        if !ctx.base_guard()
            || !flags.abilities.air_dash
            || flags.damaged
            || flags.teleporting
            || self.max_timer.is_finished()
            || ctx.frame.grounded()
            || ctx.is_any_active(&[
                BehaviorKind::WallSlide,
                BehaviorKind::Climb,
                BehaviorKind::RideCart,
                BehaviorKind::Jetpack,
            ])
        {
            return false;
        }

        if ctx.is_active(BehaviorKind::AirDash) {
            return ctx.frame.pressed(Button::Action);
        }

        self.cooldown.is_finished()
            && ctx.avatar.action_hint == ActionHint::AirDash
            && ctx.frame.just_pressed(Button::Action)
            && !ctx.frame.pressed(Button::Down)
            && (flags.loadout != Loadout::Jetpack || !ctx.frame.pressed(Button::Up))
    }

    fn on_enter(&mut self, ctx: &mut ActionContext) {
        self.max_timer.reset();
        ctx.avatar.body.gravity_on = false;
        ctx.avatar.action_hint = ActionHint::Jump;

        let speed = if ctx.frame.sensing(BodySense::InWater) {
            ctx.tuning.water_air_dash_vel
        } else {
            ctx.tuning.air_dash_vel
        };
        let facing = ctx.avatar.flags.facing;
        let lateral = ctx.avatar.flags.orientation.lateral();
        self.impulse = lateral * ctx.scaled_units(speed) * facing.value();
        self.last_facing = facing;

        ctx.effects.play_sound(SoundCue::AirDash, true);
        debug!("AirDash: impulse={:?}", self.impulse);
    }

    fn on_active(&mut self, dt: f32, ctx: &mut ActionContext) {
        self.max_timer.update(dt);
        if ctx.blocked_ahead() {
            return;
        }

        let facing = ctx.avatar.flags.facing;
        if facing != self.last_facing {
            self.impulse = -self.impulse;
            self.last_facing = facing;
        }
        ctx.avatar.body.velocity = self.impulse;
    }

    fn on_exit(&mut self, ctx: &mut ActionContext) {
        self.max_timer.reset();
        self.cooldown.reset();
        ctx.effects.stop_sound(SoundCue::AirDash);
        if ctx.frame.world.camera_rotating {
            return;
        }

        ctx.avatar.body.gravity_on = true;
        if ctx.avatar.flags.teleporting {
            return;
        }
        let bump = if ctx.frame.sensing(BodySense::InWater) {
            ctx.tuning.water_air_dash_end_bump
        } else {
            ctx.tuning.air_dash_end_bump
        };
        let lateral = ctx.avatar.flags.orientation.lateral();
        let facing = ctx.avatar.flags.facing.value();
        ctx.avatar
            .body
            .add_velocity_along(lateral, ctx.tuning.units(bump) * facing);
    }
}
