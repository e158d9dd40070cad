//! Avatar motion: a per-tick movement behavior engine for a 2D platformer
//! avatar, with the Bevy systems that host it.

pub mod content;
pub mod core;
pub mod movement;
pub mod sprites;
