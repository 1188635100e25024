//! Lending narration events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Book, ReaderId};

/// What happened in a lending event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LendingEventKind {
    /// The reader holds its full quota and can claim nothing more.
    QuotaReached,
    /// A reading-room-only book was claimed.
    TakingToReadingRoom {
        /// Book title.
        title: String,
    },
    /// A book was claimed to be taken home.
    TakingHome {
        /// Book title.
        title: String,
    },
    /// The reader started reading a borrowed book.
    Reading {
        /// Book title.
        title: String,
    },
    /// The reader returned a borrowed book.
    Returning {
        /// Book title.
        title: String,
    },
}

/// A single narration event for one reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingEvent {
    /// The reader the event is about.
    pub reader: ReaderId,
    /// The event payload.
    pub kind: LendingEventKind,
}

impl LendingEvent {
    /// The reader has no quota left.
    pub fn quota_reached(reader: ReaderId) -> Self {
        Self {
            reader,
            kind: LendingEventKind::QuotaReached,
        }
    }

    /// The reader claimed `book`; the destination follows the book's flag.
    pub fn taking(reader: ReaderId, book: &Book) -> Self {
        let title = book.title().to_string();
        let kind = if book.is_reading_room_only() {
            LendingEventKind::TakingToReadingRoom { title }
        } else {
            LendingEventKind::TakingHome { title }
        };
        Self { reader, kind }
    }

    /// The reader is reading `book`.
    pub fn reading(reader: ReaderId, book: &Book) -> Self {
        Self {
            reader,
            kind: LendingEventKind::Reading {
                title: book.title().to_string(),
            },
        }
    }

    /// The reader is returning `book`.
    pub fn returning(reader: ReaderId, book: &Book) -> Self {
        Self {
            reader,
            kind: LendingEventKind::Returning {
                title: book.title().to_string(),
            },
        }
    }

    /// The book title, if the event concerns a book.
    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            LendingEventKind::QuotaReached => None,
            LendingEventKind::TakingToReadingRoom { title }
            | LendingEventKind::TakingHome { title }
            | LendingEventKind::Reading { title }
            | LendingEventKind::Returning { title } => Some(title),
        }
    }

    /// Whether this event records a claim.
    pub fn is_claim(&self) -> bool {
        matches!(
            self.kind,
            LendingEventKind::TakingToReadingRoom { .. } | LendingEventKind::TakingHome { .. }
        )
    }
}

impl fmt::Display for LendingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reader = self.reader;
        match &self.kind {
            LendingEventKind::QuotaReached => {
                write!(f, "{reader} has already taken the maximum allowed number of books.")
            }
            LendingEventKind::TakingToReadingRoom { title } => {
                write!(f, "{reader} is taking book '{title}' to the reading room.")
            }
            LendingEventKind::TakingHome { title } => {
                write!(f, "{reader} is taking book '{title}' home.")
            }
            LendingEventKind::Reading { title } => {
                write!(f, "{reader} is reading book '{title}'.")
            }
            LendingEventKind::Returning { title } => {
                write!(f, "{reader} is returning book '{title}'.")
            }
        }
    }
}
