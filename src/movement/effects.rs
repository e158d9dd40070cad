//! Movement domain: side effects requested by behaviors (sound, spawns, cart handoff).

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::Facing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    Swim,
    AirDash,
    Jetpack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    DustPuff,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub kind: SpawnKind,
    pub position: Vec2,
    pub facing: Facing,
}

/// Sink for everything a behavior asks the outside world to do. Requests are
/// forwarded immediately, in the order behaviors make them.
pub trait SideEffects {
    fn play_sound(&mut self, cue: SoundCue, looping: bool);
    fn stop_sound(&mut self, cue: SoundCue);
    fn spawn(&mut self, request: SpawnRequest);
    /// Park the cart; the avatar now rides it.
    fn mount_cart(&mut self, cart: Entity);
    /// Return the cart to the world at `position`, moving at `velocity`.
    fn dismount_cart(&mut self, cart: Entity, position: Vec2, velocity: Vec2);
}

/// Message form of a side effect, consumed by `apply_motion_effects`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionEffect {
    PlaySound { cue: SoundCue, looping: bool },
    StopSound { cue: SoundCue },
    Spawn(SpawnRequest),
    MountCart { cart: Entity },
    DismountCart {
        cart: Entity,
        position: Vec2,
        velocity: Vec2,
    },
}

impl Message for MotionEffect {}

impl SideEffects for MessageWriter<'_, MotionEffect> {
    fn play_sound(&mut self, cue: SoundCue, looping: bool) {
        self.write(MotionEffect::PlaySound { cue, looping });
    }

    fn stop_sound(&mut self, cue: SoundCue) {
        self.write(MotionEffect::StopSound { cue });
    }

    fn spawn(&mut self, request: SpawnRequest) {
        self.write(MotionEffect::Spawn(request));
    }

    fn mount_cart(&mut self, cart: Entity) {
        self.write(MotionEffect::MountCart { cart });
    }

    fn dismount_cart(&mut self, cart: Entity, position: Vec2, velocity: Vec2) {
        self.write(MotionEffect::DismountCart {
            cart,
            position,
            velocity,
        });
    }
}

/// Recording sink, handy for driving the engine outside an app.
impl SideEffects for Vec<MotionEffect> {
    fn play_sound(&mut self, cue: SoundCue, looping: bool) {
        self.push(MotionEffect::PlaySound { cue, looping });
    }

    fn stop_sound(&mut self, cue: SoundCue) {
        self.push(MotionEffect::StopSound { cue });
    }

    fn spawn(&mut self, request: SpawnRequest) {
        self.push(MotionEffect::Spawn(request));
    }

    fn mount_cart(&mut self, cart: Entity) {
        self.push(MotionEffect::MountCart { cart });
    }

    fn dismount_cart(&mut self, cart: Entity, position: Vec2, velocity: Vec2) {
        self.push(MotionEffect::DismountCart {
            cart,
            position,
            velocity,
        });
    }
}
