//! Books and the fixed catalog they live in.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Position of a book inside its catalog.
///
/// Stable for the lifetime of the catalog; used to index the per-book locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub usize);

impl BookId {
    /// Return the catalog index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A catalog entry as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    /// Book title, unique within the catalog.
    pub title: String,
    /// Whether the book must stay in the reading room.
    #[serde(default)]
    pub reading_room_only: bool,
}

impl BookEntry {
    /// An entry for a book that may be taken home.
    pub fn home(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            reading_room_only: false,
        }
    }

    /// An entry for a book restricted to the reading room.
    pub fn reading_room(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            reading_room_only: true,
        }
    }
}

/// An immutable book, owned by a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    reading_room_only: bool,
}

impl Book {
    /// The book's position in its catalog.
    pub fn id(&self) -> BookId {
        self.id
    }

    /// The book's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the book is restricted to the reading room.
    ///
    /// Informational only; nothing enforces it against room exit.
    pub fn is_reading_room_only(&self) -> bool {
        self.reading_room_only
    }
}

/// Fixed, ordered sequence of books. Read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Build a catalog from entries, assigning ids in order.
    ///
    /// Titles must be unique and non-empty.
    pub fn new(entries: impl IntoIterator<Item = BookEntry>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        let mut books = Vec::new();

        for (index, entry) in entries.into_iter().enumerate() {
            if entry.title.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Catalog entry {index} has an empty title"
                )));
            }
            if !seen.insert(entry.title.clone()) {
                return Err(AppError::validation(format!(
                    "Duplicate book title in catalog: '{}'",
                    entry.title
                )));
            }
            books.push(Book {
                id: BookId(index),
                title: entry.title,
                reading_room_only: entry.reading_room_only,
            });
        }

        Ok(Self { books })
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog has no books.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Iterate the books in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    /// Look up a book by id.
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.get(id.index())
    }

    /// Look up a book by title.
    pub fn find(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.title == title)
    }

    /// Whether `book` is this catalog's book at its id.
    pub fn contains(&self, book: &Book) -> bool {
        self.get(book.id).is_some_and(|b| b == book)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
