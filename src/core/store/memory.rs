//! In-memory store implementation for testing.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::RunStore;
use crate::core::domain::{Location, Run, RunId};
use crate::error::StoreError;

/// In-memory run store for testing purposes.
///
/// Mirrors the SQLite store's semantics, including the version
/// compare-and-set and monotonically increasing ids (so iteration order over
/// the id-keyed map is insertion order).
#[derive(Debug, Default)]
pub struct MemoryRunStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    runs: BTreeMap<RunId, Run>,
    next_id: i32,
}

impl MemoryRunStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_where(&self, predicate: impl Fn(&Run) -> bool) -> Vec<Run> {
        self.inner
            .read()
            .runs
            .values()
            .filter(|run| predicate(run))
            .cloned()
            .collect()
    }
}

impl RunStore for MemoryRunStore {
    async fn find_all(&self) -> Result<Vec<Run>, StoreError> {
        Ok(self.inner.read().runs.values().cloned().collect())
    }

    async fn find_by_id(&self, id: RunId) -> Result<Run, StoreError> {
        self.inner
            .read()
            .runs
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn create(&self, run: &Run) -> Result<Run, StoreError> {
        run.validate()?;

        let mut inner = self.inner.write();
        inner.next_id += 1;
        let id = RunId::new(inner.next_id);
        let persisted = Run::from_stored(
            id,
            run.title.clone(),
            run.started_on,
            run.completed_on,
            run.miles,
            run.location,
            0,
        );
        inner.runs.insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn update(&self, id: RunId, run: &Run) -> Result<Run, StoreError> {
        run.validate()?;

        let mut inner = self.inner.write();
        let stored = inner
            .runs
            .get_mut(&id)
            .ok_or(StoreError::NotFound { id })?;
        if stored.version != run.version {
            return Err(StoreError::Conflict {
                id,
                expected: run.version,
                stored: stored.version,
            });
        }

        let persisted = Run::from_stored(
            id,
            run.title.clone(),
            run.started_on,
            run.completed_on,
            run.miles,
            run.location,
            stored.version + 1,
        );
        *stored = persisted.clone();
        Ok(persisted)
    }

    async fn delete(&self, id: RunId) -> Result<(), StoreError> {
        match self.inner.write().runs.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound { id }),
        }
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.inner.read().runs.len() as i64)
    }

    async fn create_all(&self, runs: &[Run]) -> Result<Vec<Run>, StoreError> {
        let mut created = Vec::with_capacity(runs.len());
        for run in runs {
            created.push(self.create(run).await?);
        }
        Ok(created)
    }

    async fn find_by_location(&self, location: Location) -> Result<Vec<Run>, StoreError> {
        Ok(self.collect_where(|run| run.location == location))
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Run>, StoreError> {
        Ok(self.collect_where(|run| run.title == title))
    }

    async fn find_by_miles(&self, miles: i32) -> Result<Vec<Run>, StoreError> {
        Ok(self.collect_where(|run| run.miles == miles))
    }

    async fn find_by_title_containing(&self, substring: &str) -> Result<Vec<Run>, StoreError> {
        let substring = substring.to_string();
        Ok(self.collect_where(|run| run.title.contains(&substring)))
    }

    async fn find_by_pattern(&self, pattern: &str) -> Result<Vec<Run>, StoreError> {
        let pattern = pattern.to_string();
        Ok(self.collect_where(|run| matches_pattern(&run.title, &pattern)))
    }
}

/// Single-character-wildcard glob over the full title: `_` matches exactly
/// one character, everything else matches literally.
fn matches_pattern(title: &str, pattern: &str) -> bool {
    let mut title_chars = title.chars();
    for expected in pattern.chars() {
        match title_chars.next() {
            Some(_) if expected == '_' => {}
            Some(actual) if actual == expected => {}
            _ => return false,
        }
    }
    title_chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_requires_exact_length() {
        assert!(matches_pattern("afffffs", "a_____s"));
        assert!(!matches_pattern("afffffss", "a_____s"));
        assert!(!matches_pattern("affffs", "a_____s"));
    }

    #[test]
    fn pattern_literals_match_literally() {
        assert!(matches_pattern("abc", "abc"));
        assert!(!matches_pattern("abd", "abc"));
        assert!(!matches_pattern("Abc", "abc"));
    }

    #[test]
    fn wildcard_matches_any_single_character() {
        assert!(matches_pattern("a c", "a_c"));
        assert!(matches_pattern("a_c", "a_c"));
        assert!(!matches_pattern("ac", "a_c"));
    }

    #[test]
    fn empty_pattern_matches_only_empty_title() {
        assert!(matches_pattern("", ""));
        assert!(!matches_pattern("a", ""));
    }
}
