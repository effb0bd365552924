//! # Gameplay Systems
//!
//! Per-entity behavior run by the session each tick:
//! - Stepping players, the camera and creatures through the resolver
//! - The creature random walk

pub mod creature;
pub mod step;

pub use creature::wander;
pub use step::{attempt_move, step_when_idle, Step};
