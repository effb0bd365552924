//! # World Error Types
//!
//! Every error here is fatal for the session: it means a capacity chosen at
//! startup was too small, or the chunk membership lists no longer agree with
//! entity positions. Rejected moves and absent chunks are not errors.

use thiserror::Error;

use crate::entity::EntityId;
use crate::map::ChunkCoord;

/// Errors that can occur in the simulation core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The chunk hash probe bound was exhausted while inserting.
    #[error("chunk table full: no slot for chunk {chunk} after {attempts} probes")]
    ChunkTableFull {
        /// The chunk that could not be placed.
        chunk: ChunkCoord,
        /// Number of probes attempted.
        attempts: u32,
    },

    /// The entity table reached its fixed capacity.
    #[error("entity table full: capacity {capacity}")]
    EntityTableFull {
        /// Configured capacity.
        capacity: usize,
    },

    /// The membership bucket arena has no node left.
    #[error("bucket arena exhausted: capacity {capacity} nodes")]
    ArenaExhausted {
        /// Configured node capacity.
        capacity: usize,
    },

    /// An entity was expected in a chunk's membership list but is not there.
    #[error("membership corrupted: entity {entity} missing from chunk {chunk}")]
    MembershipCorrupted {
        /// The entity being removed.
        entity: EntityId,
        /// The chunk it was expected in.
        chunk: ChunkCoord,
    },

    /// An entity's current chunk does not exist in the map.
    #[error("chunk {chunk} holding a live entity is missing from the map")]
    MissingChunk {
        /// The chunk that should exist.
        chunk: ChunkCoord,
    },

    /// Invalid world configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
