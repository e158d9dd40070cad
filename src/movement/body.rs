//! Movement domain: the avatar's physics state as seen by behaviors.

use bevy::prelude::*;

use crate::movement::{Facing, Orientation};

/// Physics state behaviors mutate during a resolution pass. The host copies it
/// from and back to the rigid body around each pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarBody {
    pub center: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub gravity_on: bool,
    /// Per-axis friction divisor accumulated this tick; 1.0 is neutral.
    pub friction_on_self: Vec2,
    pub hazard_contacts_on: bool,
}

impl Default for AvatarBody {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            size: Vec2::new(24.0, 32.0),
            velocity: Vec2::ZERO,
            gravity_on: true,
            friction_on_self: Vec2::ONE,
            hazard_contacts_on: true,
        }
    }
}

impl AvatarBody {
    pub fn min_x(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    pub fn max_x(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    pub fn min_y(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    pub fn max_y(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    pub fn set_min_y(&mut self, y: f32) {
        self.center.y = y + self.size.y / 2.0;
    }

    pub fn set_max_y(&mut self, y: f32) {
        self.center.y = y - self.size.y / 2.0;
    }

    pub fn set_min_x(&mut self, x: f32) {
        self.center.x = x + self.size.x / 2.0;
    }

    pub fn set_max_x(&mut self, x: f32) {
        self.center.x = x - self.size.x / 2.0;
    }

    pub fn set_center_x(&mut self, x: f32) {
        self.center.x = x;
    }

    pub fn set_center_y(&mut self, y: f32) {
        self.center.y = y;
    }

    /// Signed speed along a unit axis.
    pub fn velocity_along(&self, axis: Vec2) -> f32 {
        self.velocity.dot(axis)
    }

    /// Replace the velocity component along a unit axis, keeping the rest.
    pub fn set_velocity_along(&mut self, axis: Vec2, speed: f32) {
        let current = self.velocity_along(axis);
        self.velocity += axis * (speed - current);
    }

    pub fn add_velocity_along(&mut self, axis: Vec2, speed: f32) {
        self.velocity += axis * speed;
    }

    pub fn add_friction(&mut self, vertical_axis: bool, amount: f32) {
        if vertical_axis {
            self.friction_on_self.y += amount;
        } else {
            self.friction_on_self.x += amount;
        }
    }

    /// Small square grip box at the top edge, nudged toward the facing side.
    pub fn head_grip_box(&self, orientation: Orientation, facing: Facing, grip: f32) -> Rect {
        self.edge_grip_box(orientation.up(), orientation, facing, grip)
    }

    /// Small square grip box at the bottom edge, nudged toward the facing side.
    pub fn feet_grip_box(&self, orientation: Orientation, facing: Facing, grip: f32) -> Rect {
        self.edge_grip_box(-orientation.up(), orientation, facing, grip)
    }

    fn edge_grip_box(
        &self,
        toward: Vec2,
        orientation: Orientation,
        facing: Facing,
        grip: f32,
    ) -> Rect {
        let half = self.size / 2.0;
        let lateral = orientation.lateral();
        let lateral_half = (lateral * half).length();
        let edge = self.center + toward * (toward * half).length();
        let nudged = edge + lateral * facing.value() * lateral_half * 0.8;
        Rect::from_center_size(nudged, Vec2::splat(grip))
    }
}

/// Open-interval overlap; touching edges do not count.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}
