//! # Entities
//!
//! Everything placed in the dungeon is an entity: floor tiles, walls,
//! stairs, the camera, players and creatures.
//!
//! ## Design Philosophy
//!
//! - Entities live in one flat, append-only table
//! - Identity is the table index, wrapped in [`EntityId`]
//! - Index 0 is the null entity and is never handed out
//! - Per-kind behavior comes from one exhaustive capability table

mod animation;
mod id;
mod kind;
mod table;

pub use animation::{Animation, Direction};
pub use id::EntityId;
pub use kind::{EntityFlags, EntityKind, KindCapabilities, RenderLayer};
pub use table::{Entity, EntityTable};
