//! Movement domain: system modules hosting the behavior engine.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod locomotion;
pub(crate) mod resolve;

pub(crate) use collisions::detect_contacts;
pub(crate) use input::{read_input, update_facing};
pub(crate) use locomotion::{
    apply_horizontal_movement, apply_motion_effects, apply_physics, carry_mounted_cart,
    expire_dust_puffs,
};
pub(crate) use resolve::resolve_behaviors;
