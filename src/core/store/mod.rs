//! Persistence layer with pluggable storage backends.
//!
//! The store exclusively owns persisted run state: callers pass values in
//! and receive values out, and every consistency decision (id assignment,
//! version compare-and-set, cardinality checks) happens here. Criteria
//! queries return an empty `Vec` when nothing matches; only by-id operations
//! report [`StoreError::NotFound`]. Translating "empty" into a protocol-level
//! not-found is the boundary's job, not the store's.

mod memory;
mod sqlite;

pub use memory::MemoryRunStore;
pub use sqlite::SqliteRunStore;

use std::future::Future;

use crate::core::domain::{Location, Run, RunId};
use crate::error::StoreError;

/// Storage operations for runs.
///
/// Safe to invoke concurrently; each operation is a single bounded
/// interaction with the backing store. Racing updates for the same id are
/// serialized by the version compare-and-set: exactly one racer with a given
/// observed version wins, the loser gets [`StoreError::Conflict`] and must
/// re-read to retry (retry policy belongs to the caller).
pub trait RunStore: Send + Sync {
    /// List every run in insertion order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Run>, StoreError>> + Send;

    /// Fetch a run by id.
    fn find_by_id(&self, id: RunId) -> impl Future<Output = Result<Run, StoreError>> + Send;

    /// Persist a new run, assigning a fresh id and version 0.
    ///
    /// The write must affect exactly one record; any other cardinality is a
    /// storage fault.
    fn create(&self, run: &Run) -> impl Future<Output = Result<Run, StoreError>> + Send;

    /// Replace the run at `id` wholesale, compare-and-set on `run.version`.
    ///
    /// Succeeds only if `run.version` equals the stored version, then bumps
    /// the stored version by exactly one. A stale version leaves stored
    /// state untouched and reports [`StoreError::Conflict`].
    fn update(&self, id: RunId, run: &Run) -> impl Future<Output = Result<Run, StoreError>> + Send;

    /// Delete a run by id. Permanent and immediate; no soft-delete.
    fn delete(&self, id: RunId) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Count all runs.
    fn count(&self) -> impl Future<Output = Result<i64, StoreError>> + Send;

    /// Create runs one by one, in order.
    ///
    /// Not atomic across elements: a failure partway leaves prior elements
    /// persisted. Cross-record atomicity is out of scope.
    fn create_all(&self, runs: &[Run]) -> impl Future<Output = Result<Vec<Run>, StoreError>> + Send;

    /// Runs at exactly this location, in insertion order.
    fn find_by_location(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Vec<Run>, StoreError>> + Send;

    /// Runs whose title matches exactly (case-sensitive), in insertion order.
    fn find_by_title(&self, title: &str)
        -> impl Future<Output = Result<Vec<Run>, StoreError>> + Send;

    /// Runs of exactly this distance, in insertion order.
    fn find_by_miles(&self, miles: i32)
        -> impl Future<Output = Result<Vec<Run>, StoreError>> + Send;

    /// Runs whose title contains `substring` anywhere (case-sensitive).
    fn find_by_title_containing(
        &self,
        substring: &str,
    ) -> impl Future<Output = Result<Vec<Run>, StoreError>> + Send;

    /// Runs whose full title matches a single-character-wildcard glob.
    ///
    /// Each `_` in `pattern` matches exactly one character; every other
    /// character matches literally. `a_____s` matches any 7-character title
    /// starting with `a` and ending with `s`, and nothing longer or shorter.
    fn find_by_pattern(
        &self,
        pattern: &str,
    ) -> impl Future<Output = Result<Vec<Run>, StoreError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_run(title: &str, miles: i32, location: Location) -> Run {
        Run::new(
            title,
            Utc.with_ymd_and_hms(2026, 8, 1, 6, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 8, 1, 7, 0, 0).unwrap(),
            miles,
            location,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn memory_store_create_then_find_by_id() {
        let store = MemoryRunStore::new();
        let run = sample_run("Morning loop", 4, Location::Outdoor);

        let created = store.create(&run).await.unwrap();
        let id = created.id.expect("created run has an id");
        assert_eq!(created.version, 0);

        let loaded = store.find_by_id(id).await.unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.title, "Morning loop");
    }

    #[tokio::test]
    async fn memory_store_update_bumps_version_once() {
        let store = MemoryRunStore::new();
        let created = store
            .create(&sample_run("Tempo", 5, Location::Outdoor))
            .await
            .unwrap();
        let id = created.id.unwrap();

        let mut changed = created.clone();
        changed.miles = 6;
        let updated = store.update(id, &changed).await.unwrap();
        assert_eq!(updated.version, 1);
        assert_eq!(updated.miles, 6);
    }

    #[tokio::test]
    async fn memory_store_stale_update_conflicts_and_leaves_state() {
        let store = MemoryRunStore::new();
        let created = store
            .create(&sample_run("Tempo", 5, Location::Outdoor))
            .await
            .unwrap();
        let id = created.id.unwrap();

        let mut first = created.clone();
        first.miles = 6;
        store.update(id, &first).await.unwrap();

        // Second writer still holds version 0.
        let mut stale = created.clone();
        stale.miles = 7;
        let result = store.update(id, &stale).await;
        assert!(matches!(
            result,
            Err(StoreError::Conflict {
                expected: 0,
                stored: 1,
                ..
            })
        ));

        let current = store.find_by_id(id).await.unwrap();
        assert_eq!(current.miles, 6, "losing update must not apply");
    }

    #[tokio::test]
    async fn memory_store_delete_is_permanent() {
        let store = MemoryRunStore::new();
        let created = store
            .create(&sample_run("Recovery", 2, Location::Indoor))
            .await
            .unwrap();
        let id = created.id.unwrap();

        store.delete(id).await.unwrap();
        assert!(matches!(
            store.find_by_id(id).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete(id).await,
            Err(StoreError::NotFound { .. })
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn memory_store_criteria_queries_preserve_insertion_order() {
        let store = MemoryRunStore::new();
        store
            .create(&sample_run("First", 3, Location::Outdoor))
            .await
            .unwrap();
        store
            .create(&sample_run("Second", 5, Location::Indoor))
            .await
            .unwrap();
        store
            .create(&sample_run("Third", 3, Location::Outdoor))
            .await
            .unwrap();

        let by_miles = store.find_by_miles(3).await.unwrap();
        assert_eq!(by_miles.len(), 2);
        assert_eq!(by_miles[0].title, "First");
        assert_eq!(by_miles[1].title, "Third");

        let indoor = store.find_by_location(Location::Indoor).await.unwrap();
        assert_eq!(indoor.len(), 1);
        assert_eq!(indoor[0].title, "Second");

        assert!(store.find_by_title("first").await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn memory_store_pattern_matches_exact_length_only() {
        let store = MemoryRunStore::new();
        store
            .create(&sample_run("afffffs", 1, Location::Outdoor))
            .await
            .unwrap();
        store
            .create(&sample_run("afffffss", 1, Location::Outdoor))
            .await
            .unwrap();

        let matched = store.find_by_pattern("a_____s").await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "afffffs");
    }

    #[tokio::test]
    async fn memory_store_create_all_is_not_atomic() {
        let store = MemoryRunStore::new();
        let valid = sample_run("Long run", 10, Location::Outdoor);
        let mut invalid = sample_run("Broken", 1, Location::Outdoor);
        invalid.miles = 0;

        let result = store.create_all(&[valid, invalid]).await;
        assert!(matches!(result, Err(StoreError::Invalid(_))));
        assert_eq!(
            store.count().await.unwrap(),
            1,
            "elements before the failure stay persisted"
        );
    }
}
