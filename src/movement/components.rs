//! Movement domain: components and physics layers for the avatar and its world.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Volumes the avatar can overlap without being blocked (ladders, water, carts)
    Sensor,
    /// Damaging surfaces, ignored while riding a cart
    Hazard,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Slippery ground. Lets the avatar slip-slide.
#[derive(Component, Debug)]
pub struct Ice;

/// Soft ground. Blocks wall sliding and ground sliding.
#[derive(Component, Debug)]
pub struct Sand;

/// Climbable volume centered on the entity's transform.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ladder {
    pub size: Vec2,
}

/// Swimmable volume centered on the entity's transform.
#[derive(Component, Debug, Clone, Copy)]
pub struct Water {
    pub size: Vec2,
}

/// Rideable cart. While mounted it is parked and follows the avatar.
#[derive(Component, Debug, Clone, Copy)]
pub struct Cart {
    pub size: Vec2,
}

/// Present on a cart while the avatar rides it; keeps the layers to restore.
#[derive(Component, Debug, Clone, Copy)]
pub struct CartMounted {
    pub layers: CollisionLayers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1 when facing right, -1 when facing left.
    pub fn value(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Which world direction counts as "up" for the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Up | Orientation::Down)
    }

    /// Unit vector pointing along logical up.
    pub fn up(self) -> Vec2 {
        match self {
            Orientation::Up => Vec2::Y,
            Orientation::Down => Vec2::NEG_Y,
            Orientation::Left => Vec2::NEG_X,
            Orientation::Right => Vec2::X,
        }
    }

    /// Unit vector pointing along logical right. Facing right moves along it.
    pub fn lateral(self) -> Vec2 {
        let up = self.up();
        Vec2::new(up.y, -up.x)
    }

    pub fn up_dir(self) -> Dir2 {
        match self {
            Orientation::Up => Dir2::Y,
            Orientation::Down => Dir2::NEG_Y,
            Orientation::Left => Dir2::NEG_X,
            Orientation::Right => Dir2::X,
        }
    }

    pub fn lateral_dir(self) -> Dir2 {
        match self {
            Orientation::Up => Dir2::X,
            Orientation::Down => Dir2::NEG_X,
            Orientation::Left => Dir2::Y,
            Orientation::Right => Dir2::NEG_Y,
        }
    }
}

/// Short-lived dust sprite left behind by a ground slide.
#[derive(Component, Debug)]
pub struct DustPuff {
    pub timer: Timer,
}

impl DustPuff {
    pub fn new(lifetime_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(lifetime_secs, TimerMode::Once),
        }
    }
}
