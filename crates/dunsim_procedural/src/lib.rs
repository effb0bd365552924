//! # Dunsim Procedural Generation
//!
//! Builds the dungeon a session starts in.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: the same entropy stream always produces the same dungeon
//! 2. **Chunk aligned**: each room fills exactly one 16x16 chunk
//! 3. **Data driven**: rooms come from a tile legend, not from code
//!
//! ## Core Components
//!
//! - [`RoomTemplate`]: a 16x16 grid of [`Tile`]s
//! - [`DungeonLayout`]: a random walk of rooms across chunks and floors
//! - [`populate`]: turns a layout into world entities
//!
//! ## Example
//!
//! ```rust,ignore
//! use dunsim_core::{SessionRng, World, WorldConfig};
//! use dunsim_procedural::{populate, DungeonLayout, RoomTemplate};
//!
//! let mut world = World::new(&WorldConfig::default());
//! let mut rng = SessionRng::new(0x13);
//! let layout = DungeonLayout::generate(&mut rng, 10);
//! let stats = populate(&mut world, &RoomTemplate::standard(), &layout)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod layout;
pub mod populate;
pub mod room;

pub use layout::DungeonLayout;
pub use populate::{populate, GenerationStats};
pub use room::{RoomTemplate, TemplateError, Tile, ROOM_DIM};
