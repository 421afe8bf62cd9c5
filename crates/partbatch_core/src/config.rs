//! # Configuration
//!
//! Sizing knobs, loaded once at startup from TOML.
//!
//! ```toml
//! initial_capacity = 32
//! staging_entries = 4096
//! max_entries_per_frame = 262144
//! ```
//!
//! Every field is optional and falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::ENTRY_BYTE_SIZE;
use crate::error::{ConfigError, ConfigResult};
use crate::table::DEFAULT_CAPACITY;

/// Sizing for part tables and the per-frame staging buffers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartBatchConfig {
    /// Slots allocated by each new part table.
    pub initial_capacity: usize,
    /// Entries each staging buffer holds before it has to grow.
    pub staging_entries: usize,
    /// Hard ceiling on entries packed into one frame.
    pub max_entries_per_frame: usize,
}

impl Default for PartBatchConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            staging_entries: 1024,
            max_entries_per_frame: 1 << 20,
        }
    }
}

impl PartBatchConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for values rejected by [`Self::validate`].
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`Self::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks that the sizes are usable together.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::Invalid("initial_capacity must be > 0".into()));
        }
        if self.max_entries_per_frame == 0 {
            return Err(ConfigError::Invalid("max_entries_per_frame must be > 0".into()));
        }
        if self.staging_entries > self.max_entries_per_frame {
            return Err(ConfigError::Invalid(format!(
                "staging_entries ({}) exceeds max_entries_per_frame ({})",
                self.staging_entries, self.max_entries_per_frame
            )));
        }
        if self.max_entries_per_frame.checked_mul(ENTRY_BYTE_SIZE).is_none() {
            return Err(ConfigError::Invalid("max_entries_per_frame overflows byte size".into()));
        }
        Ok(())
    }

    /// Initial staging buffer size in bytes.
    #[must_use]
    pub const fn staging_bytes(&self) -> usize {
        self.staging_entries * ENTRY_BYTE_SIZE
    }

    /// Frame ceiling in bytes.
    #[must_use]
    pub const fn max_frame_bytes(&self) -> usize {
        self.max_entries_per_frame * ENTRY_BYTE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PartBatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_capacity, 16);
        assert_eq!(config.staging_bytes(), 1024 * 112);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PartBatchConfig::from_toml_str("initial_capacity = 64").unwrap();
        assert_eq!(config.initial_capacity, 64);
        assert_eq!(config.staging_entries, 1024);
        assert_eq!(config.max_entries_per_frame, 1 << 20);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = PartBatchConfig::from_toml_str("initial_capacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_staging_above_ceiling_rejected() {
        let err = PartBatchConfig::from_toml_str(
            "staging_entries = 100\nmax_entries_per_frame = 10",
        )
        .unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = PartBatchConfig::from_toml_str("initial_capacity = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PartBatchConfig::load("/nonexistent/partbatch.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
