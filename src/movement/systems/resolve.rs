//! Movement domain: running the behavior engine against the live rigid body.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::WorldFlags;
use crate::movement::{
    Avatar, BehaviorEngine, Frame, InputSnapshot, MotionEffect, MovementTuning, Player,
    SensorSnapshot,
};

#[allow(clippy::type_complexity)]
pub(crate) fn resolve_behaviors(
    time: Res<Time>,
    input: Res<InputSnapshot>,
    world: Res<WorldFlags>,
    tuning: Res<MovementTuning>,
    mut effects: MessageWriter<MotionEffect>,
    mut query: Query<
        (
            &mut Transform,
            &mut LinearVelocity,
            &mut Avatar,
            &mut BehaviorEngine,
            &SensorSnapshot,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (mut transform, mut velocity, mut avatar, mut engine, sensors) in &mut query {
        avatar.body.center = transform.translation.truncate();
        avatar.body.velocity = velocity.0;

        let frame = Frame {
            input: &*input,
            sensors,
            world: &*world,
        };
        engine.update(dt, &mut *avatar, frame, &*tuning, &mut effects);

        // Behaviors may snap the body (ladders); write position back before physics runs.
        transform.translation.x = avatar.body.center.x;
        transform.translation.y = avatar.body.center.y;
        velocity.0 = avatar.body.velocity;
    }
}
