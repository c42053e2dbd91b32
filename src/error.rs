use thiserror::Error;

use crate::core::domain::{DomainError, RunId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Store failures, structured so callers can act on the kind.
///
/// `NotFound`, `Conflict`, and `Invalid` are recoverable by the caller
/// (create, re-fetch-and-retry, or correct the input); `RowCount`,
/// `Connection`, and `Database` are storage faults that propagate unchanged
/// to the boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no run with id {id}")]
    NotFound { id: RunId },

    #[error("run {id} was modified concurrently: expected version {expected}, stored {stored}")]
    Conflict {
        id: RunId,
        expected: i32,
        stored: i32,
    },

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("write affected {affected} rows, expected exactly one")]
    RowCount { affected: usize },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid {what}: {reason}")]
    InvalidArgument { what: &'static str, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
