//! Configuration for the validator.
//!
//! Validation is pure and stateless; the only resource policy this layer
//! needs is a cap on table nesting depth and on encoded content size, so
//! pathological inputs cannot cause unbounded stack growth or CPU use.
//!
//! # Example
//! ```rust,ignore
//! use formvalue::{Registry, ValidatorConfig};
//!
//! let config = ValidatorConfig::default()
//!     .with_max_table_depth(8)
//!     .with_max_content_bytes(256 * 1024);
//! let registry = Registry::with_config(config);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum table nesting depth.
pub const DEFAULT_MAX_TABLE_DEPTH: usize = 32;

/// Default maximum size of a JSON-encoded content string, in bytes (1 MiB).
pub const DEFAULT_MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// Error type for configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigValidationError {
    /// max_table_depth must be greater than 0.
    #[error("max_table_depth must be greater than 0")]
    InvalidMaxTableDepth,
    /// max_content_bytes must be greater than 0.
    #[error("max_content_bytes must be greater than 0")]
    InvalidMaxContentBytes,
}

/// Resource caps applied during validation.
///
/// All fields have defaults that allow the validator to function correctly
/// out of the box.
///
/// # Fields
///
/// * `max_table_depth` - Maximum table nesting depth. The top-level table is
///   depth 0; a table nested at this depth fails with `DEPTH_EXCEEDED`.
///   Default: 32.
///
/// * `max_content_bytes` - Maximum size in bytes of a content-bearing
///   field's JSON-encoded wire string. Longer strings fail with
///   `CONTENT_TOO_LARGE` before any decoding. Default: 1 MiB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Maximum table nesting depth.
    pub max_table_depth: usize,
    /// Maximum encoded content size in bytes.
    pub max_content_bytes: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_table_depth: DEFAULT_MAX_TABLE_DEPTH,
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
        }
    }
}

impl ValidatorConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum table nesting depth.
    pub fn with_max_table_depth(mut self, depth: usize) -> Self {
        self.max_table_depth = depth;
        self
    }

    /// Set the maximum encoded content size in bytes.
    pub fn with_max_content_bytes(mut self, bytes: usize) -> Self {
        self.max_content_bytes = bytes;
        self
    }

    /// Check the configuration for invalid values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] if any cap is zero.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_table_depth == 0 {
            return Err(ConfigValidationError::InvalidMaxTableDepth);
        }
        if self.max_content_bytes == 0 {
            return Err(ConfigValidationError::InvalidMaxContentBytes);
        }
        Ok(())
    }
}
