//! RAII handles for room admission and book locks.
//!
//! Each handle gives its resource back exactly once: either through the
//! consuming `release` method or when it is dropped on any other path.

use std::sync::Arc;

use tokio::sync::{OwnedMutexGuard, OwnedSemaphorePermit};
use tracing::{debug, trace};

use reading_room_core::types::BookId;

use crate::pool::PoolInner;

/// Proof of room admission. Releasing it frees one seat.
#[must_use = "dropping a RoomPass releases the seat immediately"]
#[derive(Debug)]
pub struct RoomPass {
    // Counters are updated in `drop` before the permit field itself drops,
    // so observed occupancy never exceeds capacity.
    _permit: OwnedSemaphorePermit,
    pool: Arc<PoolInner>,
}

impl RoomPass {
    pub(crate) fn new(permit: OwnedSemaphorePermit, pool: Arc<PoolInner>) -> Self {
        let occupancy = pool.counters.admitted();
        debug!(occupancy, capacity = pool.capacity, "Room seat taken");
        Self {
            _permit: permit,
            pool,
        }
    }

    /// Give the seat back.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for RoomPass {
    fn drop(&mut self) {
        let occupancy = self.pool.counters.departed();
        debug!(occupancy, capacity = self.pool.capacity, "Room seat released");
    }
}

/// Exclusive hold on one book's lock.
#[must_use = "dropping a BookGuard unlocks the book immediately"]
#[derive(Debug)]
pub struct BookGuard {
    book: BookId,
    _lock: OwnedMutexGuard<()>,
    pool: Arc<PoolInner>,
}

impl BookGuard {
    pub(crate) fn new(book: BookId, lock: OwnedMutexGuard<()>, pool: Arc<PoolInner>) -> Self {
        pool.counters.book_locked(book.index());
        trace!(book = %book, "Book lock acquired");
        Self {
            book,
            _lock: lock,
            pool,
        }
    }

    /// The locked book.
    pub fn book(&self) -> BookId {
        self.book
    }

    /// Unlock the book.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for BookGuard {
    fn drop(&mut self) {
        self.pool.counters.book_unlocked(self.book.index());
        trace!(book = %self.book, "Book lock released");
    }
}
