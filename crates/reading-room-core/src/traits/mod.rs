//! Core traits defined in `reading-room-core` and implemented by other crates.

pub mod narrator;

pub use narrator::Narrator;
