//! Structured error types for lightbnb-core.
//!
//! Validation failures are raised before any SQL text is built, so a caller
//! can tell malformed input apart from a backing-store failure.

use std::path::PathBuf;
use thiserror::Error;

/// Input rejected before reaching the database
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Property key is not a column of the `properties` table
    #[error("unknown property column '{0}'")]
    UnknownColumn(String),

    /// Value cannot be stored in the named column
    #[error("invalid value for column '{column}': expected {expected}")]
    InvalidValue {
        column: &'static str,
        expected: &'static str,
    },

    /// Same column supplied twice in one insert
    #[error("column '{0}' supplied more than once")]
    DuplicateColumn(&'static str),

    /// Insert with no columns at all
    #[error("property record has no fields")]
    EmptyRecord,

    /// Property payload was not a JSON object
    #[error("property record must be a JSON object")]
    NotAnObject,

    /// Result limits must be at least 1
    #[error("limit must be positive, got {0}")]
    InvalidLimit(i64),
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ValidationError {
    /// Create an invalid value error
    pub fn invalid_value(column: &'static str, expected: &'static str) -> Self {
        Self::InvalidValue { column, expected }
    }
}
