//! Reader identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one reader session.
///
/// Issued from a monotonic counter, so two sessions of the same run never
/// share an identity. Displayed as `Reader <n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReaderId(pub u64);

impl ReaderId {
    /// Return the inner sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reader {}", self.0)
    }
}

impl From<u64> for ReaderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
