//! Library (room, catalog, quota) configuration.

use serde::{Deserialize, Serialize};

use crate::types::BookEntry;

/// Room capacity, reader count, quota, and the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Maximum number of readers admitted to the room at once.
    #[serde(default = "default_max_readers_in_room")]
    pub max_readers_in_room: usize,
    /// Maximum number of books one reader may hold.
    #[serde(default = "default_max_books_per_reader")]
    pub max_books_per_reader: u32,
    /// Number of reader sessions launched per run.
    #[serde(default = "default_readers")]
    pub readers: usize,
    /// Ordered catalog of books.
    #[serde(default = "default_catalog")]
    pub catalog: Vec<BookEntry>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            max_readers_in_room: default_max_readers_in_room(),
            max_books_per_reader: default_max_books_per_reader(),
            readers: default_readers(),
            catalog: default_catalog(),
        }
    }
}

fn default_max_readers_in_room() -> usize {
    3
}

fn default_max_books_per_reader() -> u32 {
    2
}

fn default_readers() -> usize {
    5
}

fn default_catalog() -> Vec<BookEntry> {
    vec![
        BookEntry::home("Book 1"),
        BookEntry::reading_room("Book 2"),
        BookEntry::home("Book 3"),
    ]
}
