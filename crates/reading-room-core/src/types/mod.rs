//! Domain value types shared across the reading room crates.

pub mod book;
pub mod reader;

pub use book::{Book, BookEntry, BookId, Catalog};
pub use reader::ReaderId;
