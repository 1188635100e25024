//! Reader sessions on top of the resource pool.
//!
//! This crate provides:
//! - [`LendingCoordinator`]: runs one reader session through admission,
//!   claiming, reading, returning, and departure
//! - [`ReaderQuotaTable`]: shared per-reader holding counts
//! - [`LendingRunner`]: launches many sessions and joins them
//! - Narrators for the console and for in-memory recording

pub mod coordinator;
pub mod delay;
pub mod identity;
pub mod narrator;
pub mod quota;
pub mod runner;
pub mod session;

pub use coordinator::LendingCoordinator;
pub use delay::ReadingDelay;
pub use identity::ReaderIdGenerator;
pub use narrator::{ConsoleNarrator, RecordedEvent, RecordingNarrator};
pub use quota::ReaderQuotaTable;
pub use runner::{LendingRunner, RunReport};
pub use session::{ReaderSession, SessionPhase, SessionReport};
