//! Core domain types for run tracking.

mod error;
mod id;
mod run;

pub use error::DomainError;
pub use id::RunId;
pub use run::{Location, Run};
