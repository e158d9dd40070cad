//! Movement domain: contact sampling for the sensor snapshot.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::body::rects_overlap;
use crate::movement::{
    retarget_action_hint, Avatar, BehaviorEngine, BehaviorKind, BodySense, Cart, GameLayer, Ice,
    Ladder, LadderContact, Player, Sand, SensorSnapshot, Water,
};

/// How far past the body edge a ray still counts as touching.
const CONTACT_REACH: f32 = 4.0;
/// Side of the head and feet boxes used for volume contacts.
const EDGE_BOX: f32 = 6.0;

#[allow(clippy::type_complexity)]
pub(crate) fn detect_contacts(
    spatial_query: SpatialQuery,
    ice: Query<(), With<Ice>>,
    sand: Query<(), With<Sand>>,
    ladders: Query<(&Transform, &Ladder)>,
    water: Query<(&Transform, &Water)>,
    carts: Query<(Entity, &Transform, &Cart)>,
    mut players: Query<
        (&Transform, &mut Avatar, &mut SensorSnapshot, &BehaviorEngine),
        With<Player>,
    >,
) {
    // Filter to solid level geometry only
    let solid_filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (transform, mut avatar, mut sensors, engine) in &mut players {
        let center = transform.translation.truncate();
        let orientation = avatar.flags.orientation;
        let half = avatar.body.size / 2.0;
        let up = orientation.up();
        let lateral = orientation.lateral();
        let half_up = (up * half).length();
        let half_side = (lateral * half).length();

        let cast = |dir: Dir2, reach: f32| {
            spatial_query.cast_ray(center, dir, reach + CONTACT_REACH, true, &solid_filter)
        };

        let mut next = SensorSnapshot::default();

        if let Some(hit) = cast(-orientation.up_dir(), half_up) {
            next.set(BodySense::FeetOnGround, true);
            next.set(BodySense::FeetOnIce, ice.contains(hit.entity));
            next.set(BodySense::FeetOnSand, sand.contains(hit.entity));
        }
        next.set(
            BodySense::HeadTouchingBlock,
            cast(orientation.up_dir(), half_up).is_some(),
        );
        next.set(
            BodySense::SideTouchingBlockLeft,
            cast(-orientation.lateral_dir(), half_side).is_some(),
        );
        next.set(
            BodySense::SideTouchingBlockRight,
            cast(orientation.lateral_dir(), half_side).is_some(),
        );

        let bounds = Rect::from_center_size(center, avatar.body.size);
        let head_box = Rect::from_center_size(center + up * half_up, Vec2::splat(EDGE_BOX));
        let feet_box = Rect::from_center_size(center - up * half_up, Vec2::splat(EDGE_BOX));

        for (ladder_transform, ladder) in &ladders {
            let ladder_rect =
                Rect::from_center_size(ladder_transform.translation.truncate(), ladder.size);
            if !rects_overlap(bounds, ladder_rect) {
                continue;
            }
            next.ladder = Some(LadderContact {
                bounds: ladder_rect,
            });
            next.set(
                BodySense::HeadTouchingLadder,
                rects_overlap(head_box, ladder_rect),
            );
            next.set(
                BodySense::FeetTouchingLadder,
                rects_overlap(feet_box, ladder_rect),
            );
            break;
        }

        let in_water = water.iter().any(|(water_transform, water)| {
            rects_overlap(
                bounds,
                Rect::from_center_size(water_transform.translation.truncate(), water.size),
            )
        });
        next.set(BodySense::InWater, in_water);

        next.cart = carts.iter().find_map(|(entity, cart_transform, cart)| {
            let cart_rect = Rect::from_center_size(cart_transform.translation.truncate(), cart.size);
            rects_overlap(bounds, cart_rect).then_some(entity)
        });
        next.set(BodySense::TouchingCart, next.cart.is_some());

        let wall_sliding = engine.is_behavior_active(BehaviorKind::WallSlide);
        retarget_action_hint(&sensors, &next, &mut avatar.action_hint, wall_sliding);

        if next.grounded() != sensors.grounded() {
            debug!(
                "Ground contact changed: grounded={} hint={:?}",
                next.grounded(),
                avatar.action_hint
            );
        }
        *sensors = next;
    }
}
