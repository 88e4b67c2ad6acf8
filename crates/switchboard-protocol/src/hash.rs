//! Identifiers of files and directories.
//!
//! The backend derives these from item paths and hands them to the frontend
//! as non-negative JSON integers, so the wire form is an unsigned 64-bit
//! number. A negative or fractional id cannot name any item and fails to
//! deserialize; handlers report that as invalid content.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier the frontend uses to name files and directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hash(pub u64);

impl Hash {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Hash {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
