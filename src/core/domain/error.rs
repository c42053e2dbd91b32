//! Domain validation errors for core domain types.
//!
//! These errors are returned by validating constructors and by the store's
//! pre-write validation pass.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that occur when a run violates a domain invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Titles must contain at least one non-whitespace character.
    #[error("title must not be empty")]
    EmptyTitle,

    /// Distance must be a positive number of miles.
    #[error("miles must be positive, got {miles}")]
    NonPositiveMiles {
        /// The invalid distance that was provided.
        miles: i32,
    },

    /// A run must start strictly before it completes.
    #[error("run must start before it completes ({started_on} >= {completed_on})")]
    StartNotBeforeCompletion {
        started_on: DateTime<Utc>,
        completed_on: DateTime<Utc>,
    },

    /// Location must be one of the recognized values.
    #[error("unknown location '{value}', expected INDOOR or OUTDOOR")]
    UnknownLocation {
        /// The unrecognized value that was provided.
        value: String,
    },
}
