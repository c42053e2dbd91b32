//! Database layer for persistence using Diesel ORM.
//!
//! Provides connection pooling, embedded migration support, and
//! per-connection pragma configuration for SQLite databases.

pub mod model;
pub mod schema;

use diesel::define_sql_function;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_types::Integer;
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::StoreError;

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

define_sql_function! {
    /// Rowid of the most recent successful insert on this connection.
    fn last_insert_rowid() -> Integer;
}

/// Session pragmas applied to every pooled connection: a bounded busy
/// timeout, and case-sensitive LIKE so substring/pattern search does not
/// depend on SQLite's case-insensitive default.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        configure_connection(conn).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Apply the session pragmas to a single connection.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_connection(conn: &mut SqliteConnection) -> QueryResult<()> {
    diesel::sql_query("PRAGMA busy_timeout=5000").execute(conn)?;
    diesel::sql_query("PRAGMA case_sensitive_like=ON").execute(conn)?;
    Ok(())
}

/// Create a connection pool for the given database URL.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool, StoreError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(5)
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .map_err(|e| StoreError::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<(), StoreError> {
    let mut conn = pool
        .get()
        .map_err(|e| StoreError::Connection(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Database(e.to_string()))?;
    Ok(())
}
