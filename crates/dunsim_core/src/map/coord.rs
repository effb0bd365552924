//! # World and Chunk Coordinates
//!
//! The world is an unbounded integer tile grid stacked into floors.
//! Chunks group 16x16 tiles of a single floor and are the unit of
//! spatial indexing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Chunk width/height in tiles.
pub const CHUNK_DIM: i32 = 16;

/// A tile position in the world.
///
/// `x` and `y` are unbounded tile coordinates; `floor` is the dungeon level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPos {
    /// Horizontal tile coordinate.
    pub x: i32,
    /// Vertical tile coordinate (grows downward on screen).
    pub y: i32,
    /// Dungeon floor.
    pub floor: i32,
}

impl WorldPos {
    /// Creates a new world position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, floor: i32) -> Self {
        Self { x, y, floor }
    }

    /// Returns this position shifted by a tile delta on the same floor.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            floor: self.floor,
        }
    }

    /// Returns this position moved to another floor.
    #[inline]
    #[must_use]
    pub const fn on_floor(self, floor: i32) -> Self {
        Self {
            x: self.x,
            y: self.y,
            floor,
        }
    }

    /// Returns the chunk containing this position.
    #[inline]
    #[must_use]
    pub const fn chunk(self) -> ChunkCoord {
        ChunkCoord::from_world_pos(self)
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, floor {})", self.x, self.y, self.floor)
    }
}

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not tiles).
    pub x: i32,
    /// Y coordinate (in chunks, not tiles).
    pub y: i32,
    /// Floor, passed through unchanged from the world position.
    pub floor: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, floor: i32) -> Self {
        Self { x, y, floor }
    }

    /// Converts a world position to the chunk containing it.
    ///
    /// Uses floor division so that negative tiles land in negative chunks
    /// (tile -1 is in chunk -1, not chunk 0).
    #[inline]
    #[must_use]
    pub const fn from_world_pos(pos: WorldPos) -> Self {
        Self {
            x: pos.x.div_euclid(CHUNK_DIM),
            y: pos.y.div_euclid(CHUNK_DIM),
            floor: pos.floor,
        }
    }

    /// Returns the world position of the chunk's origin (top-left tile).
    #[inline]
    #[must_use]
    pub const fn origin(self) -> WorldPos {
        WorldPos {
            x: self.x * CHUNK_DIM,
            y: self.y * CHUNK_DIM,
            floor: self.floor,
        }
    }

    /// Returns the neighboring chunk on the same floor.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            floor: self.floor,
        }
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, floor {}]", self.x, self.y, self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_floor_division() {
        assert_eq!(WorldPos::new(0, 0, 0).chunk(), ChunkCoord::new(0, 0, 0));
        assert_eq!(WorldPos::new(15, 15, 1).chunk(), ChunkCoord::new(0, 0, 1));
        assert_eq!(WorldPos::new(16, 31, 0).chunk(), ChunkCoord::new(1, 1, 0));
        assert_eq!(WorldPos::new(-1, -16, 0).chunk(), ChunkCoord::new(-1, -1, 0));
        assert_eq!(WorldPos::new(-17, 0, 0).chunk(), ChunkCoord::new(-2, 0, 0));
    }

    #[test]
    fn test_chunk_origin_contains_itself() {
        let chunk = ChunkCoord::new(-3, 7, 1);
        assert_eq!(chunk.origin().chunk(), chunk);
        assert_eq!(chunk.origin().offset(15, 15).chunk(), chunk);
        assert_ne!(chunk.origin().offset(16, 0).chunk(), chunk);
    }
}
