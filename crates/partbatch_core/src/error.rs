//! # Error Types
//!
//! All errors that can occur in part tables and their configuration.

use thiserror::Error;

/// Errors raised by [`crate::PartTable`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A part id outside the current capacity was looked up.
    #[error("part id {id} out of range: capacity {capacity}")]
    OutOfRange {
        /// The requested part id.
        id: usize,
        /// Table capacity at the time of the lookup.
        capacity: usize,
    },

    /// The destination cannot hold every serialized entry.
    #[error("destination too small: need {required} bytes, have {available}")]
    CapacityExceeded {
        /// Bytes the serialization needs.
        required: usize,
        /// Bytes the destination reported as remaining.
        available: usize,
    },
}

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while loading a [`crate::PartBatchConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parsed but are unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
