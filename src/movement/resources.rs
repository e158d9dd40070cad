//! Movement domain: tuning values for behaviors and locomotion.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Every velocity here is in world units per second and gets multiplied by
/// `world_unit` (pixels per unit) before it touches the body.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub world_unit: f32,
    pub gravity: f32,

    // Walking
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,

    // Jumping and walls
    pub jump_vel: f32,
    pub wall_jump_vel: f32,
    pub cart_jump_vel: f32,
    pub wall_jump_horizontal: f32,
    pub wall_jump_lockout: f32,
    pub wall_slide_friction: f32,
    pub swim_vel: f32,

    // Air dash
    pub air_dash_vel: f32,
    pub water_air_dash_vel: f32,
    pub air_dash_end_bump: f32,
    pub water_air_dash_end_bump: f32,
    pub air_dash_max_time: f32,
    pub air_dash_cooldown: f32,

    // Ground slide
    pub ground_slide_vel: f32,
    pub water_ground_slide_vel: f32,
    pub ground_slide_end_boost: f32,
    pub water_ground_slide_end_boost: f32,
    pub ground_slide_max_time: f32,
    pub ground_slide_cooldown: f32,

    // Ladders
    pub climb_vel: f32,
    /// Tolerance, in world units, past a ladder's end before the climb lets go.
    pub ladder_move_offset: f32,
    /// Side of the head/feet grip boxes, in world units.
    pub ladder_grip_size: f32,

    // Carts
    pub cart_ground_accel: f32,
    pub cart_air_accel: f32,
    pub cart_max_speed: f32,

    // Jetpack
    pub jetpack_vel: f32,
    /// Seconds of thrust per unit of ammo.
    pub jetpack_time_per_unit: f32,

    /// Lateral speed, in world units, above which grounded motion reads as slipping.
    pub slip_threshold: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            world_unit: 32.0,
            gravity: 60.0,
            max_speed: 5.0,
            accel: 60.0,
            decel: 50.0,
            jump_vel: 18.0,
            wall_jump_vel: 20.0,
            cart_jump_vel: 22.0,
            wall_jump_horizontal: 10.0,
            wall_jump_lockout: 0.1,
            wall_slide_friction: 0.25,
            swim_vel: 10.0,
            air_dash_vel: 12.0,
            water_air_dash_vel: 6.0,
            air_dash_end_bump: 3.0,
            water_air_dash_end_bump: 1.5,
            air_dash_max_time: 0.25,
            air_dash_cooldown: 0.1,
            ground_slide_vel: 12.0,
            water_ground_slide_vel: 6.0,
            ground_slide_end_boost: 5.0,
            water_ground_slide_end_boost: 2.0,
            ground_slide_max_time: 0.35,
            ground_slide_cooldown: 0.1,
            climb_vel: 5.0,
            ladder_move_offset: 0.5,
            ladder_grip_size: 0.25,
            cart_ground_accel: 15.0,
            cart_air_accel: 5.0,
            cart_max_speed: 12.0,
            jetpack_vel: 8.0,
            jetpack_time_per_unit: 0.25,
            slip_threshold: 0.0625,
        }
    }
}

impl MovementTuning {
    /// Convert world units to pixels.
    pub fn units(&self, value: f32) -> f32 {
        value * self.world_unit
    }
}
