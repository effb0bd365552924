//! # Dunsim Core
//!
//! Simulation core of a tile-based, multi-floor dungeon:
//! - A sparse chunk index over an unbounded `(x, y, floor)` grid
//! - An append-only entity table with stable ids
//! - Per-chunk membership kept in step with every position change
//! - Tile-step movement with box collision, wall sliding and stairs
//!
//! ## Architecture Rules
//!
//! 1. **Fixed capacities** - tables and arenas are sized once from [`WorldConfig`]
//! 2. **Single writer** - only [`World`] changes positions and membership
//! 3. **Fatal means fatal** - capacity and corruption errors end the session
//!
//! ## Example
//!
//! ```rust,ignore
//! use dunsim_core::{EntityFlags, EntityKind, World, WorldConfig, WorldPos};
//!
//! let mut world = World::new(&WorldConfig::default());
//! let hero = world.create_entity(
//!     EntityKind::Player,
//!     2,
//!     2,
//!     WorldPos::new(8, 8, 0),
//!     EntityFlags::ACTIVE | EntityFlags::VISIBLE | EntityFlags::COLLIDES,
//! )?;
//! world.move_entity(hero, 1, 0)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod entity;
pub mod error;
pub mod map;
pub mod memory;
pub mod movement;
pub mod random;
pub mod world;

pub use config::WorldConfig;
pub use entity::{
    Animation, Direction, Entity, EntityFlags, EntityId, EntityKind, EntityTable,
    KindCapabilities, RenderLayer,
};
pub use error::{WorldError, WorldResult};
pub use map::{ChunkCoord, ChunkHandle, ChunkMap, WorldPos, BUCKET_CAPACITY, CHUNK_DIM};
pub use movement::{MoveCheck, Rect};
pub use random::{Entropy, SessionRng};
pub use world::World;
