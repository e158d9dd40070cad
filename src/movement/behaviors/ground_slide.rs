use bevy::prelude::*;

use super::{ActionContext, BehaviorKind, EvalContext, MovementBehavior};
use crate::movement::{
    BehaviorTimer, BodySense, Button, MovementTuning, Orientation, SpawnKind, SpawnRequest,
};

/// Low slide along the ground, started with Down + Action.
#[derive(Debug, Clone)]
pub struct GroundSlide {
    max_timer: BehaviorTimer,
    cooldown: BehaviorTimer,
    /// Orientation when the slide began; the exit boost follows it.
    entry_orientation: Option<Orientation>,
}

impl GroundSlide {
    pub fn new(tuning: &MovementTuning) -> Self {
        Self {
            max_timer: BehaviorTimer::new(tuning.ground_slide_max_time),
            cooldown: BehaviorTimer::finished(tuning.ground_slide_cooldown),
            entry_orientation: None,
        }
    }
}

impl MovementBehavior for GroundSlide {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::GroundSlide
    }

    fn evaluate(&mut self, dt: f32, ctx: &EvalContext) -> bool {
        self.cooldown.update(dt);

        let flags = &ctx.avatar.flags;
        if !ctx.base_guard()
            || !flags.abilities.ground_slide
            || ctx.frame.world.camera_rotating
            || ctx.frame.sensing(BodySense::FeetOnSand)
            || ctx.is_any_active(&[BehaviorKind::RideCart, BehaviorKind::Jetpack])
            || !ctx.frame.grounded()
            || !self.cooldown.is_finished()
        {
            return false;
        }

        let active = ctx.is_active(BehaviorKind::GroundSlide);

        // Can't stand up under a ceiling.
        if active && ctx.frame.sensing(BodySense::HeadTouchingBlock) {
            return true;
        }

        if flags.damaged || self.max_timer.is_finished() || !ctx.frame.pressed(Button::Down) {
            return false;
        }

        if active {
            ctx.frame.pressed(Button::Action) && self.entry_orientation == Some(flags.orientation)
        } else {
            ctx.frame.just_pressed(Button::Action)
        }
    }

    fn on_enter(&mut self, ctx: &mut ActionContext) {
        self.max_timer.reset();
        let flags = &ctx.avatar.flags;
        self.entry_orientation = Some(flags.orientation);

        let body = &ctx.avatar.body;
        let up = flags.orientation.up();
        let feet = body.center - up * (up * body.size).length() / 2.0;
        ctx.effects.spawn(SpawnRequest {
            kind: SpawnKind::DustPuff,
            position: feet,
            facing: flags.facing,
        });
    }

    fn on_active(&mut self, dt: f32, ctx: &mut ActionContext) {
        self.max_timer.update(dt);
        if ctx.avatar.flags.damaged || ctx.blocked_ahead() {
            return;
        }

        let speed = if ctx.frame.sensing(BodySense::InWater) {
            ctx.tuning.water_ground_slide_vel
        } else {
            ctx.tuning.ground_slide_vel
        };
        let lateral = ctx.avatar.flags.orientation.lateral();
        let velocity = ctx.scaled_units(speed) * ctx.avatar.flags.facing.value();
        ctx.avatar.body.set_velocity_along(lateral, velocity);
    }

    fn on_exit(&mut self, ctx: &mut ActionContext) {
        let Some(entry) = self.entry_orientation.take() else {
            panic!("GroundSlide exited without an entry orientation");
        };
        self.max_timer.reset();
        self.cooldown.reset();

        if entry != ctx.avatar.flags.orientation {
            debug!(
                "GroundSlide: orientation changed {:?} -> {:?}, dropping velocity",
                entry, ctx.avatar.flags.orientation
            );
            ctx.avatar.body.velocity = Vec2::ZERO;
        }

        let boost = if ctx.frame.sensing(BodySense::InWater) {
            ctx.tuning.water_ground_slide_end_boost
        } else {
            ctx.tuning.ground_slide_end_boost
        };
        let facing = ctx.avatar.flags.facing.value();
        ctx.avatar
            .body
            .add_velocity_along(entry.lateral(), ctx.tuning.units(boost) * facing);
    }
}
