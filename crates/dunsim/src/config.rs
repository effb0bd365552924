//! # Session Configuration
//!
//! Everything a session needs at startup, loaded once from TOML.
//!
//! ```toml
//! seed = 19
//! room_count = 10
//!
//! [origin]
//! x = 8
//! y = 8
//! floor = 0
//!
//! [world]
//! entity_capacity = 65536
//! ```

use std::path::Path;

use dunsim_core::{WorldConfig, WorldPos};
use dunsim_procedural::RoomTemplate;
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};
use crate::input::CONTROLLER_COUNT;

/// Session settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Capacities of the simulation core.
    pub world: WorldConfig,
    /// Seed of the session RNG.
    pub seed: u64,
    /// Players created, one per controller slot.
    pub player_count: usize,
    /// Spawn point of players and the camera.
    pub origin: WorldPos,
    /// Spawn point of the wandering creature.
    pub creature_spawn: WorldPos,
    /// Rooms in the generated dungeon.
    pub room_count: usize,
    /// Player slide decay, tiles per second.
    pub player_slide_speed: f32,
    /// Creature slide decay, tiles per second.
    pub creature_slide_speed: f32,
    /// Camera tiles per pan press.
    pub camera_pan_step: i32,
    /// Player tiles per step while sprinting.
    pub sprint_step: i32,
    /// Simulation events buffered before new ones are dropped.
    pub event_capacity: usize,
    /// Room legend rows; empty for the stock room.
    pub room_legend: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            seed: 0x13,
            player_count: CONTROLLER_COUNT,
            origin: WorldPos::new(8, 8, 0),
            creature_spawn: WorldPos::new(6, -8, 0),
            room_count: 10,
            player_slide_speed: 10.0,
            creature_slide_speed: 5.0,
            camera_pan_step: 4,
            sprint_step: 2,
            event_capacity: 1024,
            room_legend: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Parses a session configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] for malformed TOML and
    /// [`SessionError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> SessionResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a session file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file cannot be read, otherwise as
    /// [`SessionConfig::from_toml_str`].
    pub fn from_path(path: &Path) -> SessionResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Returns the room template to lay out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Template`] if `room_legend` does not parse.
    pub fn room_template(&self) -> SessionResult<RoomTemplate> {
        if self.room_legend.is_empty() {
            return Ok(RoomTemplate::standard());
        }
        Ok(RoomTemplate::from_rows(&self.room_legend)?)
    }

    /// Checks every value.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> SessionResult<()> {
        self.world
            .validate()
            .map_err(|e| SessionError::InvalidConfig(e.to_string()))?;

        if self.player_count == 0 || self.player_count > CONTROLLER_COUNT {
            return Err(SessionError::InvalidConfig(format!(
                "player_count must be in 1..={CONTROLLER_COUNT}, got {}",
                self.player_count
            )));
        }
        for (name, speed) in [
            ("player_slide_speed", self.player_slide_speed),
            ("creature_slide_speed", self.creature_slide_speed),
        ] {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(SessionError::InvalidConfig(format!(
                    "{name} must be a positive number, got {speed}"
                )));
            }
        }
        if self.camera_pan_step < 1 || self.sprint_step < 1 {
            return Err(SessionError::InvalidConfig(
                "camera_pan_step and sprint_step must be at least 1".into(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(SessionError::InvalidConfig(
                "event_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.origin, WorldPos::new(8, 8, 0));
        assert_eq!(config.player_count, CONTROLLER_COUNT);
    }

    #[test]
    fn test_nested_tables() {
        let config = SessionConfig::from_toml_str(
            r"
            seed = 7
            room_count = 3

            [creature_spawn]
            x = 1
            y = 2
            floor = 1

            [world]
            entity_capacity = 2048
            ",
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.room_count, 3);
        assert_eq!(config.creature_spawn, WorldPos::new(1, 2, 1));
        assert_eq!(config.world.entity_capacity, 2048);
        assert_eq!(config.world.max_probe_attempts, 100);
        assert_eq!(config.origin, WorldPos::new(8, 8, 0));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SessionConfig::from_toml_str("player_count = 0"),
            Err(SessionError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("player_slide_speed = -1.0"),
            Err(SessionError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("[world]\nchunk_slots_log2 = 0"),
            Err(SessionError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("seed = \"x\""),
            Err(SessionError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SessionConfig::from_path(Path::new("/nonexistent/dunsim.toml")).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }

    #[test]
    fn test_room_legend_override() {
        let config = SessionConfig {
            room_legend: vec!["#".repeat(16); 16],
            ..SessionConfig::default()
        };
        let template = config.room_template().unwrap();
        assert_eq!(template.count(dunsim_procedural::Tile::Wall), 256);

        let broken = SessionConfig {
            room_legend: vec!["#".into()],
            ..SessionConfig::default()
        };
        assert!(matches!(
            broken.room_template(),
            Err(SessionError::Template(_))
        ));
    }
}
