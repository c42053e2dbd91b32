//! Domain identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Run identifier - newtype for type safety.
///
/// Ids are assigned by the store on insert and immutable afterwards; the
/// inner integer is private so construction goes through the defined
/// constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(i32);

impl RunId {
    /// Create a new `RunId` from a raw integer.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for RunId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}
