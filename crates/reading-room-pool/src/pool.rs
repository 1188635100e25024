//! Room capacity semaphore and per-book locks.

use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};
use tracing::{info, trace};

use reading_room_core::error::AppError;
use reading_room_core::result::AppResult;
use reading_room_core::types::{Book, Catalog};

use crate::guard::{BookGuard, RoomPass};
use crate::state::{PoolCounters, PoolState};

/// Shared state behind every [`ResourcePool`] handle and guard.
#[derive(Debug)]
pub(crate) struct PoolInner {
    /// Catalog the book locks were built for.
    catalog: Arc<Catalog>,
    /// Room admission limiter.
    room: Arc<Semaphore>,
    /// One lock per catalog book, indexed by [`BookId`](reading_room_core::types::BookId).
    book_locks: Vec<Arc<Mutex<()>>>,
    /// Configured room capacity.
    pub(crate) capacity: usize,
    /// Observability counters.
    pub(crate) counters: PoolCounters,
}

/// Bounded room admission plus one exclusive lock per book.
///
/// Cloning is cheap; all clones share the same semaphore and locks.
/// Waiting has no timeout: a session blocks for as long as the room stays
/// full or the book stays locked.
#[derive(Debug, Clone)]
pub struct ResourcePool {
    inner: Arc<PoolInner>,
}

impl ResourcePool {
    /// Create a pool admitting at most `max_readers_in_room` sessions, with a
    /// lock for every book in `catalog`.
    pub fn new(catalog: Arc<Catalog>, max_readers_in_room: usize) -> AppResult<Self> {
        if max_readers_in_room == 0 {
            return Err(AppError::validation("Room capacity must be at least 1"));
        }
        if max_readers_in_room > Semaphore::MAX_PERMITS {
            return Err(AppError::validation(format!(
                "Room capacity {max_readers_in_room} exceeds the supported maximum"
            )));
        }

        let book_locks = catalog.iter().map(|_| Arc::new(Mutex::new(()))).collect();
        let counters = PoolCounters::new(catalog.len());

        info!(
            capacity = max_readers_in_room,
            books = catalog.len(),
            "Resource pool initialized"
        );

        Ok(Self {
            inner: Arc::new(PoolInner {
                catalog,
                room: Arc::new(Semaphore::new(max_readers_in_room)),
                book_locks,
                capacity: max_readers_in_room,
                counters,
            }),
        })
    }

    /// The catalog this pool guards.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.inner.catalog
    }

    /// Configured room capacity.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Wait for a free seat and take it.
    pub async fn acquire_room(&self) -> AppResult<RoomPass> {
        trace!(available = self.inner.room.available_permits(), "Waiting for a room seat");
        let permit = Arc::clone(&self.inner.room).acquire_owned().await?;
        Ok(RoomPass::new(permit, Arc::clone(&self.inner)))
    }

    /// Give a seat back. Equivalent to dropping the pass.
    pub fn release_room(&self, pass: RoomPass) {
        pass.release();
    }

    /// Wait for `book`'s lock and take it exclusively.
    ///
    /// Fails with a not-found error if `book` does not belong to this pool's
    /// catalog.
    pub async fn acquire_book_lock(&self, book: &Book) -> AppResult<BookGuard> {
        if !self.inner.catalog.contains(book) {
            return Err(AppError::not_found(format!(
                "Book '{}' is not in the catalog",
                book.title()
            )));
        }
        let lock = self
            .inner
            .book_locks
            .get(book.id().index())
            .ok_or_else(|| AppError::internal(format!("No lock for book {}", book.id())))?;

        let guard = Arc::clone(lock).lock_owned().await;
        Ok(BookGuard::new(book.id(), guard, Arc::clone(&self.inner)))
    }

    /// Unlock a book. Equivalent to dropping the guard.
    pub fn release_book_lock(&self, guard: BookGuard) {
        guard.release();
    }

    /// Seats currently free.
    pub fn available_seats(&self) -> usize {
        self.inner.room.available_permits()
    }

    /// Snapshot of the pool counters.
    pub fn pool_state(&self) -> PoolState {
        self.inner.counters.snapshot(self.inner.capacity)
    }
}
