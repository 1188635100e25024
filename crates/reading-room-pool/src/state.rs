//! Pool counters and their snapshot.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

/// Point-in-time view of the resource pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    /// Maximum number of readers admitted at once.
    pub room_capacity: usize,
    /// Readers currently admitted.
    pub occupancy: usize,
    /// Highest occupancy observed so far.
    pub peak_occupancy: usize,
    /// Successful room admissions.
    pub admissions: u64,
    /// Room releases.
    pub departures: u64,
    /// Successful book lock acquisitions.
    pub book_lock_acquisitions: u64,
    /// Book lock releases.
    pub book_lock_releases: u64,
    /// Highest number of simultaneous holders seen on any one book lock.
    pub peak_book_holders: usize,
}

impl PoolState {
    /// Whether every admission and every book lock has been given back.
    pub fn is_quiescent(&self) -> bool {
        self.occupancy == 0
            && self.admissions == self.departures
            && self.book_lock_acquisitions == self.book_lock_releases
    }
}

/// Live counters shared by the pool and its guards.
#[derive(Debug)]
pub(crate) struct PoolCounters {
    occupancy: AtomicUsize,
    peak_occupancy: AtomicUsize,
    admissions: AtomicU64,
    departures: AtomicU64,
    book_lock_acquisitions: AtomicU64,
    book_lock_releases: AtomicU64,
    book_holders: Vec<AtomicUsize>,
    peak_book_holders: AtomicUsize,
}

impl PoolCounters {
    pub(crate) fn new(books: usize) -> Self {
        Self {
            occupancy: AtomicUsize::new(0),
            peak_occupancy: AtomicUsize::new(0),
            admissions: AtomicU64::new(0),
            departures: AtomicU64::new(0),
            book_lock_acquisitions: AtomicU64::new(0),
            book_lock_releases: AtomicU64::new(0),
            book_holders: (0..books).map(|_| AtomicUsize::new(0)).collect(),
            peak_book_holders: AtomicUsize::new(0),
        }
    }

    /// Returns the occupancy after admission.
    pub(crate) fn admitted(&self) -> usize {
        self.admissions.fetch_add(1, Ordering::SeqCst);
        let now = self.occupancy.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_occupancy.fetch_max(now, Ordering::SeqCst);
        now
    }

    /// Returns the occupancy after departure.
    pub(crate) fn departed(&self) -> usize {
        self.departures.fetch_add(1, Ordering::SeqCst);
        self.occupancy.fetch_sub(1, Ordering::SeqCst) - 1
    }

    pub(crate) fn book_locked(&self, index: usize) {
        self.book_lock_acquisitions.fetch_add(1, Ordering::SeqCst);
        if let Some(holders) = self.book_holders.get(index) {
            let now = holders.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_book_holders.fetch_max(now, Ordering::SeqCst);
        }
    }

    pub(crate) fn book_unlocked(&self, index: usize) {
        self.book_lock_releases.fetch_add(1, Ordering::SeqCst);
        if let Some(holders) = self.book_holders.get(index) {
            holders.fetch_sub(1, Ordering::SeqCst);
        }
    }

    pub(crate) fn snapshot(&self, room_capacity: usize) -> PoolState {
        PoolState {
            room_capacity,
            occupancy: self.occupancy.load(Ordering::SeqCst),
            peak_occupancy: self.peak_occupancy.load(Ordering::SeqCst),
            admissions: self.admissions.load(Ordering::SeqCst),
            departures: self.departures.load(Ordering::SeqCst),
            book_lock_acquisitions: self.book_lock_acquisitions.load(Ordering::SeqCst),
            book_lock_releases: self.book_lock_releases.load(Ordering::SeqCst),
            peak_book_holders: self.peak_book_holders.load(Ordering::SeqCst),
        }
    }
}
