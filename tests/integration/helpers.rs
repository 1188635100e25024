//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use reading_room_core::events::LendingEventKind;
use reading_room_core::types::{BookEntry, Catalog, ReaderId};
use reading_room_lending::{
    LendingCoordinator, LendingRunner, ReadingDelay, RecordedEvent, RecordingNarrator,
    SessionReport,
};
use reading_room_pool::ResourcePool;

/// Test library context
pub struct TestLibrary {
    /// Runner wrapping the coordinator under test
    pub runner: LendingRunner,
    /// Narrator capturing every event
    pub narrator: RecordingNarrator,
}

impl TestLibrary {
    /// Create a library over `entries` with the given room capacity
    pub fn new(entries: Vec<BookEntry>, capacity: usize) -> Self {
        Self::with_delay(entries, capacity, ReadingDelay::default())
    }

    /// Create a library with a custom reading delay
    pub fn with_delay(entries: Vec<BookEntry>, capacity: usize, delay: ReadingDelay) -> Self {
        let catalog = Catalog::new(entries).expect("Failed to build catalog");
        let pool =
            ResourcePool::new(Arc::new(catalog), capacity).expect("Failed to build resource pool");
        let narrator = RecordingNarrator::new();
        let coordinator =
            LendingCoordinator::new(pool, Arc::new(narrator.clone())).with_delay(delay);

        Self {
            runner: LendingRunner::new(coordinator),
            narrator,
        }
    }

    /// The coordinator under test
    pub fn coordinator(&self) -> &LendingCoordinator {
        self.runner.coordinator()
    }

    /// The pool under test
    pub fn pool(&self) -> &ResourcePool {
        self.coordinator().pool()
    }
}

/// Catalog used by the stock simulation
pub fn stock_catalog() -> Vec<BookEntry> {
    vec![
        BookEntry::home("Book 1"),
        BookEntry::reading_room("Book 2"),
        BookEntry::home("Book 3"),
    ]
}

/// A catalog of `n` take-home books named `Book 0..n`
pub fn numbered_catalog(n: usize) -> Vec<BookEntry> {
    (0..n).map(|i| BookEntry::home(format!("Book {i}"))).collect()
}

/// Largest number of admission windows open at the same instant
pub fn max_overlapping_windows(sessions: &[SessionReport]) -> usize {
    // Departures sort before admissions at the same instant: a seat freed at
    // `t` can be taken at `t`.
    let mut edges: Vec<_> = sessions
        .iter()
        .flat_map(|s| [(s.admitted_at, 1i64), (s.departed_at, -1i64)])
        .collect();
    edges.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut open = 0i64;
    let mut peak = 0i64;
    for (_, delta) in edges {
        open += delta;
        peak = peak.max(open);
    }
    peak as usize
}

/// Assert one reader's events follow claim, read, return for every book
pub fn assert_phase_order(events: &[RecordedEvent], reader: ReaderId) {
    let mine: Vec<_> = events.iter().filter(|e| e.event.reader == reader).collect();

    let claims: Vec<_> = mine.iter().filter(|e| e.event.is_claim()).collect();
    let reads: Vec<_> = mine
        .iter()
        .filter(|e| matches!(e.event.kind, LendingEventKind::Reading { .. }))
        .collect();
    let returns: Vec<_> = mine
        .iter()
        .filter(|e| matches!(e.event.kind, LendingEventKind::Returning { .. }))
        .collect();

    assert_eq!(claims.len(), reads.len(), "{reader}: claims vs reads");
    assert_eq!(claims.len(), returns.len(), "{reader}: claims vs returns");

    if let (Some(last_claim), Some(first_read)) = (claims.last(), reads.first()) {
        assert!(last_claim.seq < first_read.seq, "{reader}: read before claim");
    }
    if let (Some(last_read), Some(first_return)) = (reads.last(), returns.first()) {
        assert!(last_read.seq < first_return.seq, "{reader}: return before read");
    }

    for ((claim, read), ret) in claims.iter().zip(&reads).zip(&returns) {
        assert_eq!(claim.event.title(), read.event.title(), "{reader}: read order");
        assert_eq!(claim.event.title(), ret.event.title(), "{reader}: return order");
    }
}
