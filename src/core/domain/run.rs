//! The run entity and its validation rules.
//!
//! A [`Run`] is one exercise session: a title, a start/completion window, a
//! distance in miles, and where it took place. Runs are value objects; the
//! store owns the mapping from id to current persisted state, and callers
//! pass runs in and receive fresh values back.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::RunId;

/// Where a run took place.
///
/// Persisted as its canonical name string (`INDOOR` / `OUTDOOR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Location {
    Indoor,
    Outdoor,
}

impl Location {
    /// Canonical name used in storage and on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indoor => "INDOOR",
            Self::Outdoor => "OUTDOOR",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INDOOR" => Ok(Self::Indoor),
            "OUTDOOR" => Ok(Self::Outdoor),
            other => Err(DomainError::UnknownLocation {
                value: other.to_string(),
            }),
        }
    }
}

/// One exercise session.
///
/// Invariants, checked by [`Run::new`] and re-checked by the store before
/// any write via [`Run::validate`]:
///
/// - `title` is not empty or blank
/// - `miles` is positive
/// - `started_on` is strictly before `completed_on`
///
/// `id` is `None` until the store assigns one on insert. `version` starts at
/// 0 and is bumped by exactly one on every successful update; it is the
/// optimistic-concurrency stamp compared at update time.
///
/// Equality is full-field (including `id` and `version`), for test
/// comparison and deduplication rather than storage identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: Option<RunId>,
    pub title: String,
    pub started_on: DateTime<Utc>,
    pub completed_on: DateTime<Utc>,
    pub miles: i32,
    pub location: Location,
    pub version: i32,
}

impl Run {
    /// Create a new unpersisted run, failing fast on invariant violation.
    ///
    /// # Errors
    /// Returns `DomainError` if any invariant is violated.
    pub fn new(
        title: impl Into<String>,
        started_on: DateTime<Utc>,
        completed_on: DateTime<Utc>,
        miles: i32,
        location: Location,
    ) -> Result<Self, DomainError> {
        let run = Self {
            id: None,
            title: title.into(),
            started_on,
            completed_on,
            miles,
            location,
            version: 0,
        };
        run.validate()?;
        Ok(run)
    }

    /// Re-check the entity invariants.
    ///
    /// Consumed by the store before every write, so a value whose fields
    /// were altered after construction still cannot reach storage invalid.
    ///
    /// # Errors
    /// Returns `DomainError` naming the violated invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        if self.miles <= 0 {
            return Err(DomainError::NonPositiveMiles { miles: self.miles });
        }
        if self.started_on >= self.completed_on {
            return Err(DomainError::StartNotBeforeCompletion {
                started_on: self.started_on,
                completed_on: self.completed_on,
            });
        }
        Ok(())
    }

    /// Reconstruct a run from trusted, already-persisted state.
    ///
    /// Only the store uses this; values coming from callers go through
    /// [`Run::new`] or [`Run::validate`] instead.
    pub(crate) fn from_stored(
        id: RunId,
        title: String,
        started_on: DateTime<Utc>,
        completed_on: DateTime<Utc>,
        miles: i32,
        location: Location,
        version: i32,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            started_on,
            completed_on,
            miles,
            location,
            version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        let started = Utc.with_ymd_and_hms(2026, 8, 1, 6, 0, 0).unwrap();
        let completed = Utc.with_ymd_and_hms(2026, 8, 1, 7, 0, 0).unwrap();
        (started, completed)
    }

    #[test]
    fn new_run_starts_at_version_zero_without_id() {
        let (started, completed) = window();
        let run = Run::new("Morning loop", started, completed, 4, Location::Outdoor).unwrap();
        assert_eq!(run.id, None);
        assert_eq!(run.version, 0);
        assert_eq!(run.title, "Morning loop");
    }

    #[test]
    fn blank_title_is_rejected() {
        let (started, completed) = window();
        let result = Run::new("   ", started, completed, 4, Location::Outdoor);
        assert!(matches!(result, Err(DomainError::EmptyTitle)));
    }

    #[test]
    fn non_positive_miles_are_rejected() {
        let (started, completed) = window();
        let result = Run::new("Treadmill", started, completed, 0, Location::Indoor);
        assert!(matches!(
            result,
            Err(DomainError::NonPositiveMiles { miles: 0 })
        ));
    }

    #[test]
    fn start_must_be_strictly_before_completion() {
        let (started, _) = window();
        // Equal timestamps violate the strict ordering too.
        let result = Run::new("Sprint", started, started, 1, Location::Outdoor);
        assert!(matches!(
            result,
            Err(DomainError::StartNotBeforeCompletion { .. })
        ));
    }

    #[test]
    fn validate_catches_post_construction_mutation() {
        let (started, completed) = window();
        let mut run = Run::new("Evening loop", started, completed, 3, Location::Outdoor).unwrap();
        run.miles = -2;
        assert!(matches!(
            run.validate(),
            Err(DomainError::NonPositiveMiles { miles: -2 })
        ));
    }

    #[test]
    fn location_round_trips_through_canonical_name() {
        assert_eq!("INDOOR".parse::<Location>().unwrap(), Location::Indoor);
        assert_eq!("OUTDOOR".parse::<Location>().unwrap(), Location::Outdoor);
        assert_eq!(Location::Indoor.as_str(), "INDOOR");

        let result = "TRACK".parse::<Location>();
        assert!(matches!(result, Err(DomainError::UnknownLocation { .. })));
    }

    #[test]
    fn equality_is_full_field() {
        let (started, completed) = window();
        let a = Run::new("Tempo", started, completed, 5, Location::Outdoor).unwrap();
        let mut b = a.clone();
        assert_eq!(a, b);

        b.version = 1;
        assert_ne!(a, b, "version participates in equality");
    }
}
