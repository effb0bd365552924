//! # World Configuration
//!
//! Static capacities for the spatial hash, bucket arena and entity table.
//! All of them are fixed for the session; nothing is resized mid-game.

use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};

/// Largest supported chunk slot exponent (16M slots).
pub const MAX_CHUNK_SLOTS_LOG2: u32 = 24;

/// Capacities of the simulation core.
///
/// Loaded once at startup, usually as the `[world]` table of a session file:
///
/// ```toml
/// [world]
/// chunk_slots_log2 = 12
/// max_probe_attempts = 100
/// entity_capacity = 65536
/// bucket_arena_nodes = 16384
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunk hash slot count as a power of two.
    pub chunk_slots_log2: u32,
    /// Probe bound before a chunk insert is declared a capacity failure.
    pub max_probe_attempts: u32,
    /// Maximum number of entities, including the reserved null entity.
    pub entity_capacity: usize,
    /// Number of membership bucket nodes in the arena.
    pub bucket_arena_nodes: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_slots_log2: 12,      // 4096 chunks
            max_probe_attempts: 100,
            entity_capacity: 65_536,
            bucket_arena_nodes: 16_384, // 512K membership entries
        }
    }
}

impl WorldConfig {
    /// Parses a world configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] if the text does not parse or
    /// the values fail [`WorldConfig::validate`].
    pub fn from_toml_str(text: &str) -> WorldResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| WorldError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Number of chunk slots.
    #[inline]
    #[must_use]
    pub const fn chunk_slots(&self) -> usize {
        1 << self.chunk_slots_log2
    }

    /// Checks that every capacity is usable.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> WorldResult<()> {
        if self.chunk_slots_log2 == 0 || self.chunk_slots_log2 > MAX_CHUNK_SLOTS_LOG2 {
            return Err(WorldError::InvalidConfig(format!(
                "chunk_slots_log2 must be in 1..={MAX_CHUNK_SLOTS_LOG2}, got {}",
                self.chunk_slots_log2
            )));
        }
        if self.max_probe_attempts == 0 {
            return Err(WorldError::InvalidConfig(
                "max_probe_attempts must be greater than zero".into(),
            ));
        }
        // Slot 0 of the entity table is the null entity.
        if self.entity_capacity < 2 || self.entity_capacity > u32::MAX as usize {
            return Err(WorldError::InvalidConfig(format!(
                "entity_capacity must be in 2..={}, got {}",
                u32::MAX,
                self.entity_capacity
            )));
        }
        if self.bucket_arena_nodes == 0 || self.bucket_arena_nodes > u32::MAX as usize {
            return Err(WorldError::InvalidConfig(format!(
                "bucket_arena_nodes must be in 1..={}, got {}",
                u32::MAX,
                self.bucket_arena_nodes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_slots(), 4096);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = WorldConfig::from_toml_str("entity_capacity = 1024\n").unwrap();
        assert_eq!(config.entity_capacity, 1024);
        assert_eq!(config.max_probe_attempts, 100);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = WorldConfig::from_toml_str("chunk_slots_log2 = 40\n").unwrap_err();
        assert!(matches!(err, WorldError::InvalidConfig(_)));

        let config = WorldConfig {
            max_probe_attempts: 0,
            ..WorldConfig::default()
        };
        assert!(config.validate().is_err());

        let config = WorldConfig {
            entity_capacity: 1,
            ..WorldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(WorldConfig::from_toml_str("entity_capacity = \"lots\"").is_err());
    }
}
