//! Paceline - run tracking with SQLite-backed persistence.
//!
//! The heart of the crate is the persistence and query layer for runs
//! (exercise sessions): the entity's invariants, the optimistic-concurrency
//! update protocol, and the lookup/search operations. Everything else is a
//! thin boundary around it.
//!
//! # Modules
//!
//! - [`core::domain`] - The [`Run`](core::domain::Run) entity, its
//!   validation rules, and the [`Location`](core::domain::Location) enum
//! - [`core::store`] - The [`RunStore`](core::store::RunStore) repository
//!   trait with SQLite and in-memory implementations
//! - [`core::db`] - Connection pooling, embedded migrations, and the Diesel
//!   schema
//! - [`cli`] - The command-line boundary adapter
//! - [`catalog`] - Client for the remote user catalog
//! - [`config`] - Configuration loading from TOML files
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use paceline::core::db::{create_pool, run_migrations};
//! use paceline::core::store::{RunStore, SqliteRunStore};
//!
//! # async fn demo() -> Result<(), paceline::error::Error> {
//! let pool = create_pool("runs.db")?;
//! run_migrations(&pool)?;
//! let store = SqliteRunStore::new(pool);
//! let all = store.find_all().await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
