//! Database model types for Diesel ORM.
//!
//! Timestamps are persisted as RFC 3339 TEXT and converted through chrono at
//! the store boundary; `location` is persisted as its canonical name string.

use diesel::prelude::*;

use super::schema::runs;

/// Database row for a run (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = runs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RunRow {
    pub id: i32,
    pub title: String,
    pub started_on: String,
    pub completed_on: String,
    pub miles: i32,
    pub location: String,
    pub version: i32,
}

/// Database row for a run (insertable, id assigned by SQLite).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = runs)]
pub struct NewRunRow {
    pub title: String,
    pub started_on: String,
    pub completed_on: String,
    pub miles: i32,
    pub location: String,
    pub version: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_run_row_is_insertable() {
        // Type check - if this compiles, the Insertable derive works
        let _row = NewRunRow {
            title: "Morning loop".to_string(),
            started_on: "2026-08-01T06:00:00+00:00".to_string(),
            completed_on: "2026-08-01T07:00:00+00:00".to_string(),
            miles: 4,
            location: "OUTDOOR".to_string(),
            version: 0,
        };
    }
}
