//! Movement domain: player bootstrap.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    AmmoGauge, Avatar, AvatarBody, BehaviorEngine, GameLayer, MovementTuning, Player,
    SensorSnapshot,
};

const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 32.0);

pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let spawn_at = Vec2::new(0.0, -120.0);
    let avatar = Avatar {
        body: AvatarBody {
            center: spawn_at,
            size: PLAYER_SIZE,
            ..default()
        },
        jetpack_ammo: AmmoGauge::full(30),
        ..default()
    };

    info!(
        "Spawning player: world_unit={}, jump_vel={}, air_dash={}, ground_slide={}",
        tuning.world_unit,
        tuning.jump_vel,
        avatar.flags.abilities.air_dash,
        avatar.flags.abilities.ground_slide
    );

    commands.spawn((
        // Identity & Movement
        (
            Player,
            avatar,
            BehaviorEngine::new(&tuning),
            SensorSnapshot::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.3, 0.55, 0.95),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_translation(spawn_at.extend(0.0)),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Gravity is applied by apply_physics
            Friction::new(0.0),
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Hazard],
            ),
        ),
    ));
}
