//! Pose-driven animation playback.
//!
//! The behavior engine produces one pose key per tick; this module restarts
//! playback when the key changes and advances frames while it holds.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::{BehaviorEngine, PoseBase, PoseKey};

/// Component for animation playback driven by the avatar's pose key.
#[derive(Component, Debug)]
pub struct PoseAnimator {
    /// Full render key currently playing (e.g. "Jump_Left_Blaster").
    pub key: String,
    /// Current frame index (0-based).
    pub current_frame: u32,
    /// Total frames in current animation.
    pub total_frames: u32,
    /// Time accumulator for frame timing.
    pub frame_timer: f32,
    /// Seconds per frame.
    pub frame_duration: f32,
    pub looping: bool,
    /// Whether the animation has finished (for non-looping).
    pub finished: bool,
    /// Playback holds while the pose is frozen.
    pub frozen: bool,
}

impl Default for PoseAnimator {
    fn default() -> Self {
        Self {
            key: String::new(),
            current_frame: 0,
            total_frames: 1,
            frame_timer: 0.0,
            frame_duration: 0.1,
            looping: true,
            finished: false,
            frozen: false,
        }
    }
}

/// Frame count, seconds per frame and looping for a pose.
fn clip_shape(base: PoseBase) -> (u32, f32, bool) {
    match base {
        PoseBase::Run | PoseBase::Cart => (4, 0.1, true),
        PoseBase::Climb => (2, 0.125, true),
        PoseBase::Stand => (2, 0.5, true),
        PoseBase::Jetpack | PoseBase::Swim => (2, 0.08, true),
        PoseBase::Damaged | PoseBase::CartDamaged => (3, 0.05, false),
        PoseBase::AirDash | PoseBase::GroundSlide => (2, 0.06, false),
        PoseBase::FinishClimb => (1, 0.1, false),
        PoseBase::StillClimb
        | PoseBase::WallSlide
        | PoseBase::Jump
        | PoseBase::CartJump
        | PoseBase::SlipSlide => (1, 0.1, true),
    }
}

impl PoseAnimator {
    /// Switch to `key`, restarting playback if it differs. Returns whether it changed.
    pub fn set_pose(&mut self, key: &str, raw: PoseKey) -> bool {
        if self.key == key {
            return false;
        }
        self.key = key.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;

        let (frames, duration, looping) = clip_shape(raw.base);
        self.total_frames = frames;
        self.frame_duration = duration;
        self.looping = looping;
        true
    }

    /// Advance playback by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if self.finished || self.frozen {
            return;
        }

        self.frame_timer += dt;
        while self.frame_timer >= self.frame_duration {
            self.frame_timer -= self.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= self.total_frames {
                if self.looping {
                    self.current_frame = 0;
                } else {
                    self.current_frame = self.total_frames - 1;
                    self.finished = true;
                    return;
                }
            }
        }
    }

    /// Sprite key for the current frame, 1-indexed for file naming.
    pub fn current_sprite_key(&self) -> String {
        format!("{}_{}", self.key, self.current_frame + 1)
    }
}

/// Message fired when the pose key changes.
#[derive(Debug)]
pub struct PoseChanged {
    pub entity: Entity,
    pub from: String,
    pub to: String,
}

impl Message for PoseChanged {}

/// Pick up the engine's pose key each tick.
pub fn sync_pose_from_engine(
    mut query: Query<(Entity, &BehaviorEngine, &mut PoseAnimator)>,
    mut changed: MessageWriter<PoseChanged>,
) {
    for (entity, engine, mut animator) in &mut query {
        animator.frozen = engine.is_pose_frozen();
        if animator.frozen {
            continue;
        }

        let from = animator.key.clone();
        if animator.set_pose(engine.pose_key(), engine.raw_pose_key()) {
            debug!("Pose changed: {} -> {}", from, animator.key);
            changed.write(PoseChanged {
                entity,
                from,
                to: animator.key.clone(),
            });
        }
    }
}

/// System that updates animation frames based on time.
pub fn update_animation_frames(time: Res<Time>, mut query: Query<&mut PoseAnimator>) {
    for mut animator in &mut query {
        animator.advance(time.delta_secs());
    }
}
