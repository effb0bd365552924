//! # Dungeon Map
//!
//! A sparse spatial index over an effectively unbounded `(x, y, floor)`
//! tile grid.
//!
//! ## Layout
//!
//! ```text
//!   world tile (x, y, floor)
//!         │  floor-divide x, y by CHUNK_DIM
//!         ▼
//!   chunk (cx, cy, floor) ──hash──> slot in a fixed open-addressed table
//!                                     │
//!                                     ▼
//!                            bucket ─> bucket ─> bucket   (arena nodes,
//!                            [32 ids]  [32 ids]  [32 ids]  newest first)
//! ```
//!
//! A chunk that was never inserted has no slot and counts as solid rock:
//! nothing can move into it.

mod coord;
mod hash;
mod spatial;

pub use coord::{ChunkCoord, WorldPos, CHUNK_DIM};
pub use hash::hash_chunk;
pub use spatial::{BucketNode, ChunkHandle, ChunkMap, Members, BUCKET_CAPACITY};
