//! SQLite store implementation using Diesel.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;

use super::RunStore;
use crate::core::db::model::{NewRunRow, RunRow};
use crate::core::db::schema::runs;
use crate::core::db::{last_insert_rowid, DbPool};
use crate::core::domain::{Location, Run, RunId};
use crate::error::StoreError;

type PooledConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// SQLite-backed run store.
///
/// Holds the process-wide connection pool by value; construct once at
/// startup and share by reference. Every operation acquires a connection
/// for its own scope, so release happens on all exit paths.
pub struct SqliteRunStore {
    pool: DbPool,
}

impl SqliteRunStore {
    /// Create a new SQLite run store over an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConn, StoreError> {
        self.pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))
    }

    fn to_row(run: &Run, version: i32) -> NewRunRow {
        NewRunRow {
            title: run.title.clone(),
            started_on: run.started_on.to_rfc3339(),
            completed_on: run.completed_on.to_rfc3339(),
            miles: run.miles,
            location: run.location.as_str().to_string(),
            version,
        }
    }

    fn from_row(row: RunRow) -> Result<Run, StoreError> {
        let started_on = parse_timestamp(&row.started_on)?;
        let completed_on = parse_timestamp(&row.completed_on)?;
        let location: Location = row
            .location
            .parse()
            .map_err(|e| StoreError::Database(format!("corrupt location column: {e}")))?;

        Ok(Run::from_stored(
            RunId::new(row.id),
            row.title,
            started_on,
            completed_on,
            row.miles,
            location,
            row.version,
        ))
    }

    fn fetch(conn: &mut PooledConn, id: RunId) -> Result<Run, StoreError> {
        let row: Option<RunRow> = runs::table
            .find(id.value())
            .first(conn)
            .optional()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        match row {
            Some(row) => Self::from_row(row),
            None => Err(StoreError::NotFound { id }),
        }
    }

    fn load_rows(rows: Vec<RunRow>) -> Result<Vec<Run>, StoreError> {
        rows.into_iter().map(Self::from_row).collect()
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Database(format!("corrupt timestamp column: {e}")))
}

/// Escape LIKE metacharacters so `input` only matches literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Escape `%` and `\` but keep `_` as the single-character wildcard.
fn pattern_to_like(pattern: &str) -> String {
    pattern.replace('\\', "\\\\").replace('%', "\\%")
}

impl RunStore for SqliteRunStore {
    async fn find_all(&self) -> Result<Vec<Run>, StoreError> {
        let mut conn = self.conn()?;

        let rows: Vec<RunRow> = runs::table
            .order(runs::id.asc())
            .load(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Self::load_rows(rows)
    }

    async fn find_by_id(&self, id: RunId) -> Result<Run, StoreError> {
        let mut conn = self.conn()?;
        Self::fetch(&mut conn, id)
    }

    async fn create(&self, run: &Run) -> Result<Run, StoreError> {
        run.validate()?;
        let row = Self::to_row(run, 0);
        let mut conn = self.conn()?;

        let affected = diesel::insert_into(runs::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        if affected != 1 {
            return Err(StoreError::RowCount { affected });
        }

        // Generated key for the row we just wrote, on the same connection.
        let id: i32 = diesel::select(last_insert_rowid())
            .get_result(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Self::fetch(&mut conn, RunId::new(id))
    }

    async fn update(&self, id: RunId, run: &Run) -> Result<Run, StoreError> {
        run.validate()?;
        let expected = run.version;
        let mut conn = self.conn()?;

        // Atomic compare-and-set: the WHERE clause pins the observed
        // version, and the affected-row count tells us whether we won.
        let affected = diesel::update(
            runs::table
                .find(id.value())
                .filter(runs::version.eq(expected)),
        )
        .set((
            runs::title.eq(&run.title),
            runs::started_on.eq(run.started_on.to_rfc3339()),
            runs::completed_on.eq(run.completed_on.to_rfc3339()),
            runs::miles.eq(run.miles),
            runs::location.eq(run.location.as_str()),
            runs::version.eq(expected + 1),
        ))
        .execute(&mut conn)
        .map_err(|e| StoreError::Database(e.to_string()))?;

        match affected {
            1 => Self::fetch(&mut conn, id),
            0 => {
                // Zero rows: missing id reports NotFound, a live row with a
                // different version reports the conflict it lost to.
                let stored = Self::fetch(&mut conn, id)?;
                Err(StoreError::Conflict {
                    id,
                    expected,
                    stored: stored.version,
                })
            }
            n => Err(StoreError::RowCount { affected: n }),
        }
    }

    async fn delete(&self, id: RunId) -> Result<(), StoreError> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(runs::table.find(id.value()))
            .execute(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        match affected {
            1 => Ok(()),
            0 => Err(StoreError::NotFound { id }),
            n => Err(StoreError::RowCount { affected: n }),
        }
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let mut conn = self.conn()?;

        runs::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    async fn create_all(&self, runs: &[Run]) -> Result<Vec<Run>, StoreError> {
        let mut created = Vec::with_capacity(runs.len());
        for run in runs {
            created.push(self.create(run).await?);
        }
        Ok(created)
    }

    async fn find_by_location(&self, location: Location) -> Result<Vec<Run>, StoreError> {
        let mut conn = self.conn()?;

        let rows: Vec<RunRow> = runs::table
            .filter(runs::location.eq(location.as_str()))
            .order(runs::id.asc())
            .load(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Self::load_rows(rows)
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Run>, StoreError> {
        let mut conn = self.conn()?;

        let rows: Vec<RunRow> = runs::table
            .filter(runs::title.eq(title))
            .order(runs::id.asc())
            .load(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Self::load_rows(rows)
    }

    async fn find_by_miles(&self, miles: i32) -> Result<Vec<Run>, StoreError> {
        let mut conn = self.conn()?;

        let rows: Vec<RunRow> = runs::table
            .filter(runs::miles.eq(miles))
            .order(runs::id.asc())
            .load(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Self::load_rows(rows)
    }

    async fn find_by_title_containing(&self, substring: &str) -> Result<Vec<Run>, StoreError> {
        let needle = format!("%{}%", escape_like(substring));
        let mut conn = self.conn()?;

        let rows: Vec<RunRow> = runs::table
            .filter(runs::title.like(needle).escape('\\'))
            .order(runs::id.asc())
            .load(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Self::load_rows(rows)
    }

    async fn find_by_pattern(&self, pattern: &str) -> Result<Vec<Run>, StoreError> {
        let glob = pattern_to_like(pattern);
        let mut conn = self.conn()?;

        let rows: Vec<RunRow> = runs::table
            .filter(runs::title.like(glob).escape('\\'))
            .order(runs::id.asc())
            .load(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Self::load_rows(rows)
    }
}
