//! Movement domain: debug-only test room with every surface the behaviors react to.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{Cart, GameLayer, Ground, Ice, Ladder, Sand, Wall, Water};

fn block(
    commands: &mut Commands,
    color: Color,
    center: Vec2,
    size: Vec2,
    layers: CollisionLayers,
) -> Entity {
    commands
        .spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            layers,
        ))
        .id()
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let ice_color = Color::srgb(0.7, 0.85, 0.95);
    let sand_color = Color::srgb(0.85, 0.75, 0.5);

    let ground_layers =
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Sensor]);
    let wall_layers =
        CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Sensor]);

    // Floor, split into plain, ice and sand strips
    let floor = block(
        &mut commands,
        ground_color,
        Vec2::new(-200.0, -200.0),
        Vec2::new(400.0, 40.0),
        ground_layers,
    );
    commands.entity(floor).insert(Ground);
    let ice = block(
        &mut commands,
        ice_color,
        Vec2::new(100.0, -200.0),
        Vec2::new(200.0, 40.0),
        ground_layers,
    );
    commands.entity(ice).insert((Ground, Ice));
    let sand = block(
        &mut commands,
        sand_color,
        Vec2::new(300.0, -200.0),
        Vec2::new(200.0, 40.0),
        ground_layers,
    );
    commands.entity(sand).insert((Ground, Sand));

    // Left and right walls for wall sliding
    for x in [-420.0, 420.0] {
        let wall = block(
            &mut commands,
            wall_color,
            Vec2::new(x, 50.0),
            Vec2::new(40.0, 500.0),
            wall_layers,
        );
        commands.entity(wall).insert(Wall);
    }

    // Ledge reached by the ladder
    let ledge = block(
        &mut commands,
        ground_color,
        Vec2::new(-300.0, 60.0),
        Vec2::new(200.0, 20.0),
        ground_layers,
    );
    commands.entity(ledge).insert(Ground);

    // Ladder from the floor up to the ledge
    let ladder_size = Vec2::new(24.0, 260.0);
    commands.spawn((
        Ladder { size: ladder_size },
        Sprite {
            color: Color::srgb(0.6, 0.45, 0.25),
            custom_size: Some(ladder_size),
            ..default()
        },
        Transform::from_xyz(-200.0, -50.0, -1.0),
    ));

    // Pool over the right half
    let pool_size = Vec2::new(240.0, 160.0);
    commands.spawn((
        Water { size: pool_size },
        Sprite {
            color: Color::srgba(0.2, 0.4, 0.9, 0.35),
            custom_size: Some(pool_size),
            ..default()
        },
        Transform::from_xyz(260.0, -100.0, 2.0),
    ));

    // Cart parked on the plain floor
    let cart_size = Vec2::new(32.0, 20.0);
    commands.spawn((
        Cart { size: cart_size },
        Sprite {
            color: Color::srgb(0.55, 0.3, 0.3),
            custom_size: Some(cart_size),
            ..default()
        },
        Transform::from_xyz(-80.0, -170.0, 0.0),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::rectangle(cart_size.x, cart_size.y),
        LockedAxes::ROTATION_LOCKED,
        LinearVelocity::default(),
        GravityScale(0.0),
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Ground, GameLayer::Wall]),
    ));
}
