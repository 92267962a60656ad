//! Core error types for timebox-core.
//!
//! The resolvers never fail: degenerate data resolves to defined fallback
//! values. These errors cover the surfaces around them (configuration,
//! snapshot files and edit-time validation of the item graph).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timebox-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Item snapshot errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Item graph validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Item snapshot errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Snapshot file could not be read
    #[error("Failed to read snapshot {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot content is not a valid item document
    #[error("Failed to parse snapshot {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// Requested root item is absent
    #[error("Root item not found: {0}")]
    RootNotFound(String),
}

/// Item graph validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Two items share an id
    #[error("Duplicate item id: {0}")]
    DuplicateId(String),

    /// Child references form a cycle
    #[error("Cycle in item graph: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
