//! Movement domain: one-shot timers owned by behaviors.

use bevy::prelude::*;
use std::time::Duration;

/// A one-shot countdown. Starts finished unless built with [`BehaviorTimer::new`].
#[derive(Debug, Clone)]
pub struct BehaviorTimer {
    timer: Timer,
}

impl BehaviorTimer {
    /// Fresh timer that has not elapsed yet.
    pub fn new(duration_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(duration_secs, TimerMode::Once),
        }
    }

    /// Timer that reports finished until it is reset.
    pub fn finished(duration_secs: f32) -> Self {
        let mut timer = Self::new(duration_secs);
        timer.set_to_end();
        timer
    }

    pub fn reset(&mut self) {
        self.timer.reset();
    }

    pub fn update(&mut self, dt: f32) {
        self.timer.tick(Duration::from_secs_f32(dt.max(0.0)));
    }

    pub fn is_finished(&self) -> bool {
        self.timer.remaining_secs() == 0.0
    }

    /// Finished on the most recent update and not before.
    pub fn is_just_finished(&self) -> bool {
        self.timer.just_finished()
    }

    pub fn set_to_end(&mut self) {
        let remaining = self.timer.remaining();
        self.timer.tick(remaining);
    }
}
