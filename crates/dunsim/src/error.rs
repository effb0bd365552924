//! # Session Error Types

use std::path::PathBuf;

use dunsim_core::WorldError;
use dunsim_procedural::TemplateError;
use thiserror::Error;

/// Errors that stop a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The world hit a capacity limit or lost membership consistency.
    #[error("world error: {0}")]
    World(#[from] WorldError),

    /// The session file is not valid TOML for [`crate::SessionConfig`].
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configured room legend does not parse.
    #[error("room template error: {0}")]
    Template(#[from] TemplateError),

    /// The session file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
