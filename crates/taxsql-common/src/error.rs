//! Error types for taxsql

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for taxsql operations
pub type Result<T> = std::result::Result<T, TaxsqlError>;

/// Main error type for taxsql
///
/// Every variant is fatal: a conversion either completes or aborts.
#[derive(Error, Debug)]
pub enum TaxsqlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name} line {line}: expected at least {expected} fields, got {found}")]
    MissingFields {
        source_name: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{source_name} line {line}: invalid {field}: '{value}'")]
    InvalidInteger {
        source_name: String,
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Root taxon {0} is not present in the node dump")]
    RootNotFound(i32),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TaxsqlError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a read error for `path`
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a write error for `path`
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a missing-fields error
    pub fn missing_fields(
        source_name: impl Into<String>,
        line: usize,
        expected: usize,
        found: usize,
    ) -> Self {
        Self::MissingFields {
            source_name: source_name.into(),
            line,
            expected,
            found,
        }
    }

    /// Create an invalid-integer error
    pub fn invalid_integer(
        source_name: impl Into<String>,
        line: usize,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidInteger {
            source_name: source_name.into(),
            line,
            field,
            value: value.into(),
        }
    }
}
