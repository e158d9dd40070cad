use bevy::prelude::*;

use super::{ActionContext, BehaviorKind, EvalContext, MovementBehavior};
use crate::movement::{BodySense, Button};

/// Riding a cart. Left/Right accelerate it; Action + Up hops off.
#[derive(Debug, Clone, Default)]
pub struct RideCart {
    candidate: Option<Entity>,
    mounted: Option<Entity>,
}

impl MovementBehavior for RideCart {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::RideCart
    }

    fn evaluate(&mut self, _dt: f32, ctx: &EvalContext) -> bool {
        if !ctx.base_guard() || !ctx.frame.sensing(BodySense::TouchingCart) {
            return false;
        }
        let cart = if ctx.is_active(BehaviorKind::RideCart) {
            self.mounted
        } else {
            ctx.frame.sensors.cart
        };
        let Some(cart) = cart else {
            return false;
        };
        self.candidate = Some(cart);

        !ctx.frame
            .input
            .are_all_pressed(&[Button::Action, Button::Up])
            && !ctx.is_any_active(&[
                BehaviorKind::WallSlide,
                BehaviorKind::AirDash,
                BehaviorKind::Climb,
                BehaviorKind::Jetpack,
            ])
    }

    fn on_enter(&mut self, ctx: &mut ActionContext) {
        let Some(cart) = self.candidate else {
            panic!("RideCart entered without a cart");
        };
        self.mounted = Some(cart);
        ctx.avatar.body.velocity = Vec2::ZERO;
        ctx.avatar.body.hazard_contacts_on = false;
        ctx.effects.mount_cart(cart);
        debug!("RideCart: mounted {:?}", cart);
    }

    fn on_active(&mut self, dt: f32, ctx: &mut ActionContext) {
        let lateral = ctx.avatar.flags.orientation.lateral();
        let accel = if ctx.frame.grounded() {
            ctx.tuning.cart_ground_accel
        } else {
            ctx.tuning.cart_air_accel
        };
        let step = ctx.tuning.units(accel) * dt;

        let mut speed = ctx.avatar.body.velocity_along(lateral);
        if ctx.frame.pressed(Button::Left) {
            speed -= step;
        } else if ctx.frame.pressed(Button::Right) {
            speed += step;
        }

        if (speed < 0.0 && ctx.frame.sensing(BodySense::SideTouchingBlockLeft))
            || (speed > 0.0 && ctx.frame.sensing(BodySense::SideTouchingBlockRight))
        {
            speed = 0.0;
        }

        let max = ctx.tuning.units(ctx.tuning.cart_max_speed);
        ctx.avatar
            .body
            .set_velocity_along(lateral, speed.clamp(-max, max));
    }

    fn on_exit(&mut self, ctx: &mut ActionContext) {
        let Some(cart) = self.mounted.take() else {
            panic!("RideCart exited without a mounted cart");
        };
        let lateral = ctx.avatar.flags.orientation.lateral();
        let body = &ctx.avatar.body;
        let carried = lateral * body.velocity_along(lateral);
        ctx.effects.dismount_cart(cart, body.center, carried);

        if !ctx.avatar.flags.dead {
            let up = ctx.avatar.flags.orientation.up();
            let launch = ctx.tuning.units(ctx.tuning.cart_jump_vel);
            ctx.avatar.body.set_velocity_along(up, launch);
        }
        ctx.avatar.body.hazard_contacts_on = true;
        debug!("RideCart: dismounted {:?}", cart);
    }
}
