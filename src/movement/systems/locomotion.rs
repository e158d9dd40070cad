//! Movement domain: walking, gravity, friction and the world side of motion effects.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    Avatar, BehaviorEngine, BehaviorKind, BodySense, Button, Cart, CartMounted, DustPuff, Facing,
    GameLayer, InputSnapshot, MotionEffect, MovementTuning, Player, SensorSnapshot, SpawnKind,
};

/// Behaviors that own lateral velocity while active.
const LATERAL_OWNERS: [BehaviorKind; 4] = [
    BehaviorKind::AirDash,
    BehaviorKind::GroundSlide,
    BehaviorKind::Climb,
    BehaviorKind::RideCart,
];

/// Fraction of normal deceleration on ice.
const ICE_GRIP: f32 = 0.25;

#[allow(clippy::type_complexity)]
pub(crate) fn apply_horizontal_movement(
    time: Res<Time>,
    input: Res<InputSnapshot>,
    tuning: Res<MovementTuning>,
    mut query: Query<
        (&mut Avatar, &BehaviorEngine, &SensorSnapshot, &mut LinearVelocity),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (mut avatar, engine, sensors, mut velocity) in &mut query {
        if avatar.flags.dead
            || !avatar.flags.can_move
            || engine.is_any_behavior_active(&LATERAL_OWNERS)
        {
            avatar.flags.running = false;
            continue;
        }

        let lateral = avatar.flags.orientation.lateral();
        let mut axis = 0.0;
        if input.is_pressed(Button::Left) {
            axis -= 1.0;
        }
        if input.is_pressed(Button::Right) {
            axis += 1.0;
        }

        let speed = velocity.0.dot(lateral);
        let target = axis * tuning.units(tuning.max_speed) * avatar.flags.movement_scalar;

        let next = if axis != 0.0 {
            // Accelerate toward target
            let accel = tuning.units(tuning.accel) * dt;
            if speed < target {
                (speed + accel).min(target)
            } else {
                (speed - accel).max(target)
            }
        } else {
            // Decelerate to zero; ice keeps some slide
            let grip = if sensors.is(BodySense::FeetOnIce) {
                ICE_GRIP
            } else {
                1.0
            };
            let decel = tuning.units(tuning.decel) * grip * dt;
            if speed > 0.0 {
                (speed - decel).max(0.0)
            } else {
                (speed + decel).min(0.0)
            }
        };

        velocity.0 += lateral * (next - speed);
        avatar.flags.running = axis != 0.0 && sensors.grounded();
    }
}

pub(crate) fn apply_physics(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut Avatar, &mut LinearVelocity, &mut CollisionLayers), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut avatar, mut velocity, mut layers) in &mut query {
        if avatar.body.gravity_on {
            let up = avatar.flags.orientation.up();
            velocity.0 -= up * tuning.units(tuning.gravity) * dt;
        }

        let friction = avatar.body.friction_on_self;
        velocity.x /= friction.x;
        velocity.y /= friction.y;
        avatar.body.friction_on_self = Vec2::ONE;

        if avatar.body.hazard_contacts_on {
            layers.filters.add(GameLayer::Hazard);
        } else {
            layers.filters.remove(GameLayer::Hazard);
        }
    }
}

/// Keep a mounted cart glued to its rider.
pub(crate) fn carry_mounted_cart(
    players: Query<&Transform, With<Player>>,
    mut carts: Query<(&mut Transform, &mut LinearVelocity), (With<CartMounted>, Without<Player>)>,
) {
    let Ok(rider) = players.single() else {
        return;
    };
    for (mut transform, mut velocity) in &mut carts {
        transform.translation.x = rider.translation.x;
        transform.translation.y = rider.translation.y;
        velocity.0 = Vec2::ZERO;
    }
}

pub(crate) fn apply_motion_effects(
    mut commands: Commands,
    mut effects: MessageReader<MotionEffect>,
    mut carts: Query<
        (
            &mut Transform,
            &mut LinearVelocity,
            &mut Visibility,
            &CollisionLayers,
            Option<&CartMounted>,
        ),
        With<Cart>,
    >,
) {
    for effect in effects.read() {
        match *effect {
            MotionEffect::PlaySound { cue, looping } => {
                debug!("Sound: play {:?} (looping={})", cue, looping);
            }
            MotionEffect::StopSound { cue } => {
                debug!("Sound: stop {:?}", cue);
            }
            MotionEffect::Spawn(request) => match request.kind {
                SpawnKind::DustPuff => {
                    commands.spawn((
                        DustPuff::new(0.3),
                        Sprite {
                            color: Color::srgba(0.8, 0.75, 0.6, 0.8),
                            custom_size: Some(Vec2::new(12.0, 8.0)),
                            flip_x: request.facing == Facing::Left,
                            ..default()
                        },
                        Transform::from_translation(request.position.extend(1.0)),
                    ));
                }
            },
            MotionEffect::MountCart { cart } => {
                let Ok((_, _, mut visibility, layers, mounted)) = carts.get_mut(cart) else {
                    warn!("Mount requested for missing cart {:?}", cart);
                    continue;
                };
                if mounted.is_some() {
                    continue;
                }
                *visibility = Visibility::Hidden;
                commands
                    .entity(cart)
                    .insert((CartMounted { layers: *layers }, CollisionLayers::NONE));
                info!("Cart {:?} mounted", cart);
            }
            MotionEffect::DismountCart {
                cart,
                position,
                velocity,
            } => {
                let Ok((mut transform, mut cart_velocity, mut visibility, _, mounted)) =
                    carts.get_mut(cart)
                else {
                    warn!("Dismount requested for missing cart {:?}", cart);
                    continue;
                };
                transform.translation.x = position.x;
                transform.translation.y = position.y;
                cart_velocity.0 = velocity;
                *visibility = Visibility::Inherited;
                if let Some(mounted) = mounted {
                    commands
                        .entity(cart)
                        .remove::<CartMounted>()
                        .insert(mounted.layers);
                }
                info!("Cart {:?} dismounted at {:?}", cart, position);
            }
        }
    }
}

pub(crate) fn expire_dust_puffs(
    mut commands: Commands,
    time: Res<Time>,
    mut puffs: Query<(Entity, &mut DustPuff)>,
) {
    for (entity, mut puff) in &mut puffs {
        puff.timer.tick(time.delta());
        if puff.timer.just_finished() {
            commands.entity(entity).despawn();
        }
    }
}
