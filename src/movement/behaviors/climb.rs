use bevy::prelude::*;

use super::{airborne_hint, ActionContext, BehaviorKind, EvalContext, MovementBehavior};
use crate::movement::body::rects_overlap;
use crate::movement::{BodySense, Button, LadderContact, Orientation};

/// Holding on to a ladder and moving along it with Up/Down.
#[derive(Debug, Clone, Default)]
pub struct Climb {
    ladder: Option<LadderContact>,
}

impl Climb {
    /// Whether the avatar has drifted past an end of the ladder it no longer senses.
    ///
    /// The checks are lopsided: a Down or Left orientation adds a second end
    /// to each check, and horizontal feet checks mirror the vertical ones.
    fn past_ladder_end(ctx: &EvalContext, ladder: &LadderContact) -> bool {
        let off = ctx.tuning.units(ctx.tuning.ladder_move_offset);
        let orientation = ctx.avatar.flags.orientation;
        let center = ctx.avatar.body.center;
        let bounds = ladder.bounds;
        let vertical = orientation.is_vertical();

        let (c, min, max) = if vertical {
            (center.y, bounds.min.y, bounds.max.y)
        } else {
            (center.x, bounds.min.x, bounds.max.x)
        };
        let flipped = matches!(orientation, Orientation::Down | Orientation::Left);

        let head_gone = (flipped && c + off < min) || c - off > max;
        let feet_gone = if vertical {
            (flipped && c - off > max) || c + off < min
        } else {
            (flipped && c + off > max) || c - off < min
        };

        (!ctx.frame.sensing(BodySense::HeadTouchingLadder) && head_gone)
            || (!ctx.frame.sensing(BodySense::FeetTouchingLadder) && feet_gone)
    }

    fn wants_to_grab(ctx: &EvalContext, ladder: &LadderContact) -> bool {
        let flags = &ctx.avatar.flags;
        let grip = ctx.tuning.units(ctx.tuning.ladder_grip_size);
        let body = &ctx.avatar.body;

        let down_onto = ctx.frame.sensing(BodySense::FeetTouchingLadder)
            && rects_overlap(
                body.feet_grip_box(flags.orientation, flags.facing, grip),
                ladder.bounds,
            )
            && ctx.frame.pressed(Button::Down);
        let up_onto = ctx.frame.sensing(BodySense::HeadTouchingLadder)
            && rects_overlap(
                body.head_grip_box(flags.orientation, flags.facing, grip),
                ladder.bounds,
            )
            && ctx.frame.pressed(Button::Up);

        down_onto || up_onto
    }

    fn snap_to_centerline(ctx: &mut ActionContext, ladder: &LadderContact) {
        let center = ladder.bounds.center();
        if ctx.avatar.flags.orientation.is_vertical() {
            ctx.avatar.body.set_center_x(center.x);
        } else {
            ctx.avatar.body.set_center_y(center.y);
        }
    }
}

impl MovementBehavior for Climb {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Climb
    }

    fn evaluate(&mut self, _dt: f32, ctx: &EvalContext) -> bool {
        if !ctx.base_guard() || ctx.avatar.flags.damaged {
            return false;
        }
        let Some(ladder) = ctx.frame.sensors.ladder else {
            return false;
        };
        if ctx.is_any_active(&[
            BehaviorKind::Jump,
            BehaviorKind::Swim,
            BehaviorKind::Jetpack,
            BehaviorKind::AirDash,
            BehaviorKind::GroundSlide,
            BehaviorKind::RideCart,
            BehaviorKind::WallSlide,
        ]) {
            return false;
        }
        self.ladder = Some(ladder);

        if ctx.is_active(BehaviorKind::Climb) {
            if Self::past_ladder_end(ctx, &ladder) {
                return false;
            }
            return !ctx.frame.just_pressed(Button::Action);
        }

        Self::wants_to_grab(ctx, &ladder)
    }

    fn on_enter(&mut self, ctx: &mut ActionContext) {
        let Some(ladder) = self.ladder else {
            panic!("Climb entered without a ladder");
        };
        ctx.avatar.action_hint = airborne_hint(&ctx.frame);
        ctx.avatar.body.gravity_on = false;

        Self::snap_to_centerline(ctx, &ladder);
        let bounds = ladder.bounds;
        let body = &mut ctx.avatar.body;
        // Only a body entirely past an end is pulled back onto the ladder.
        if ctx.avatar.flags.orientation.is_vertical() {
            if body.max_y() <= bounds.min.y {
                body.set_min_y(bounds.min.y);
            } else if body.min_y() >= bounds.max.y {
                body.set_max_y(bounds.max.y);
            }
        } else if body.max_x() <= bounds.min.x {
            body.set_min_x(bounds.min.x);
        } else if body.min_x() >= bounds.max.x {
            body.set_max_x(bounds.max.x);
        }
        body.velocity = Vec2::ZERO;
        debug!("Climb: grabbed ladder at {:?}", bounds.center());
    }

    fn on_active(&mut self, _dt: f32, ctx: &mut ActionContext) {
        if let Some(ladder) = self.ladder {
            Self::snap_to_centerline(ctx, &ladder);
        }

        if ctx.avatar.flags.shooting || ctx.frame.world.room_transition {
            ctx.avatar.body.velocity = Vec2::ZERO;
            return;
        }

        let orientation = ctx.avatar.flags.orientation;
        let up = ctx.frame.pressed(Button::Up);
        let down = ctx.frame.pressed(Button::Down);
        let direction = match (up, down) {
            (true, true) if orientation == Orientation::Down => -1.0,
            (true, _) => 1.0,
            (false, true) => -1.0,
            (false, false) => 0.0,
        };
        let speed = ctx.scaled_units(ctx.tuning.climb_vel) * direction;
        ctx.avatar.body.velocity = orientation.up() * speed;
    }

    fn on_exit(&mut self, ctx: &mut ActionContext) {
        ctx.avatar.body.gravity_on = true;
        ctx.avatar.body.velocity = Vec2::ZERO;
        ctx.avatar.action_hint = airborne_hint(&ctx.frame);
    }
}
