//! # Memory Management
//!
//! Fixed-budget storage reserved at startup.
//!
//! Chunk membership grows in small fixed blocks taken from a bump arena.
//! Blocks are never freed one by one; the whole arena is reset when the
//! world is thrown away.

mod arena;

pub use arena::{Arena, ArenaHandle};
