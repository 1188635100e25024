//! Per-session state and the report a finished session leaves behind.

use std::fmt;

use tokio::time::Instant;
use tracing::debug;

use reading_room_core::types::{Book, ReaderId};

/// Phases of a reader session, in the only order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionPhase {
    /// Waiting for, then holding, room admission.
    Admitting,
    /// Walking the catalog and claiming books.
    Claiming,
    /// Simulated reading of each borrowed book.
    Reading,
    /// Announcing the return of each borrowed book.
    Returning,
    /// Room released and holdings restored. Terminal.
    Departed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admitting => write!(f, "admitting"),
            Self::Claiming => write!(f, "claiming"),
            Self::Reading => write!(f, "reading"),
            Self::Returning => write!(f, "returning"),
            Self::Departed => write!(f, "departed"),
        }
    }
}

/// Mutable state owned by one running session.
#[derive(Debug)]
pub struct ReaderSession {
    reader: ReaderId,
    phase: SessionPhase,
    remaining: u32,
    borrowed: Vec<Book>,
    admitted_at: Instant,
}

impl ReaderSession {
    /// A session that has just been admitted.
    pub fn admitted(reader: ReaderId) -> Self {
        Self {
            reader,
            phase: SessionPhase::Admitting,
            remaining: 0,
            borrowed: Vec::new(),
            admitted_at: Instant::now(),
        }
    }

    /// The session's reader.
    pub fn reader(&self) -> ReaderId {
        self.reader
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Books this session may still claim.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Books claimed so far, in claim order.
    pub fn borrowed(&self) -> &[Book] {
        &self.borrowed
    }

    /// Move forward to `next`. Phases never go backwards.
    pub fn enter(&mut self, next: SessionPhase) {
        debug_assert!(
            next > self.phase,
            "session phase cannot move from {} to {}",
            self.phase,
            next
        );
        debug!(reader = %self.reader, from = %self.phase, to = %next, "Session phase change");
        self.phase = next;
    }

    /// Start claiming with `remaining` quota.
    pub fn start_claiming(&mut self, remaining: u32) {
        self.enter(SessionPhase::Claiming);
        self.remaining = remaining;
    }

    /// Whether another book can be claimed.
    pub fn has_quota(&self) -> bool {
        self.remaining > 0
    }

    /// Take `book` against the remaining quota.
    pub fn claim(&mut self, book: Book) {
        debug_assert!(self.has_quota(), "claim without remaining quota");
        self.remaining = self.remaining.saturating_sub(1);
        self.borrowed.push(book);
    }

    /// Close the session and produce its report.
    pub fn depart(mut self, turned_away: bool) -> SessionReport {
        self.enter(SessionPhase::Departed);
        SessionReport {
            reader: self.reader,
            borrowed: self.borrowed,
            turned_away,
            admitted_at: self.admitted_at,
            departed_at: Instant::now(),
        }
    }
}

/// Outcome of one finished session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// The session's reader.
    pub reader: ReaderId,
    /// Books claimed, in claim order.
    pub borrowed: Vec<Book>,
    /// Whether the reader was already at quota on arrival.
    pub turned_away: bool,
    /// When room admission was granted.
    pub admitted_at: Instant,
    /// When room admission was released.
    pub departed_at: Instant,
}

impl SessionReport {
    /// Whether this session's admission window overlaps `other`'s.
    pub fn overlaps(&self, other: &SessionReport) -> bool {
        self.admitted_at < other.departed_at && other.admitted_at < self.departed_at
    }
}
