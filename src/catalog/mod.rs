//! Client for the remote user catalog.
//!
//! A third-party directory of users looked up over HTTP; unrelated to run
//! persistence and kept behind its own module boundary.

mod client;
mod types;

pub use client::CatalogClient;
pub use types::{Address, Company, Geo, User};
