use bevy::prelude::*;

use super::{ActionContext, BehaviorKind, EvalContext, MovementBehavior};
use crate::movement::{BehaviorTimer, BodySense, Button, Loadout, MovementTuning, SoundCue};

/// Thrust upward with Up + Action while the jetpack loadout has ammo.
#[derive(Debug, Clone)]
pub struct Jetpack {
    /// One ammo unit burns each time this elapses.
    drain: BehaviorTimer,
}

impl Jetpack {
    pub fn new(tuning: &MovementTuning) -> Self {
        Self {
            drain: BehaviorTimer::new(tuning.jetpack_time_per_unit),
        }
    }
}

impl MovementBehavior for Jetpack {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Jetpack
    }

    fn evaluate(&mut self, _dt: f32, ctx: &EvalContext) -> bool {
        let flags = &ctx.avatar.flags;
        if !ctx.base_guard()
            || flags.damaged
            || flags.teleporting
            || flags.loadout != Loadout::Jetpack
            || ctx.frame.sensing(BodySense::HeadTouchingBlock)
            || ctx.frame.grounded()
            || ctx.avatar.jetpack_ammo.is_depleted()
            || ctx.is_any_active(&[
                BehaviorKind::WallSlide,
                BehaviorKind::AirDash,
                BehaviorKind::GroundSlide,
                BehaviorKind::Climb,
                BehaviorKind::RideCart,
            ])
            || !ctx.frame.input.are_all_pressed(&[Button::Action, Button::Up])
        {
            return false;
        }

        ctx.is_active(BehaviorKind::Jetpack) || ctx.frame.just_pressed(Button::Action)
    }

    fn on_enter(&mut self, ctx: &mut ActionContext) {
        ctx.effects.play_sound(SoundCue::Jetpack, true);
        ctx.avatar.body.gravity_on = false;
        self.drain.reset();
        debug!("Jetpack: ignition, ammo={}", ctx.avatar.jetpack_ammo.current);
    }

    fn on_active(&mut self, dt: f32, ctx: &mut ActionContext) {
        ctx.avatar.body.gravity_on = false;
        let up = ctx.avatar.flags.orientation.up();
        let thrust = ctx.scaled_units(ctx.tuning.jetpack_vel);
        ctx.avatar.body.set_velocity_along(up, thrust);

        self.drain.update(dt);
        if self.drain.is_finished() {
            ctx.avatar.jetpack_ammo.translate(-1);
            self.drain.reset();
        }
    }

    fn on_exit(&mut self, ctx: &mut ActionContext) {
        ctx.avatar.body.gravity_on = true;
        ctx.effects.stop_sound(SoundCue::Jetpack);
    }
}
