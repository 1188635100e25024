//! Reader identity issuance.

use std::sync::atomic::{AtomicU64, Ordering};

use reading_room_core::types::ReaderId;

/// Issues reader identities from a monotonic counter, starting at 1.
#[derive(Debug)]
pub struct ReaderIdGenerator {
    next: AtomicU64,
}

impl ReaderIdGenerator {
    /// Creates a generator whose first identity is `Reader 1`.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates a generator whose first identity is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Issue the next identity. Never repeats within this generator.
    pub fn issue(&self) -> ReaderId {
        ReaderId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ReaderIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
