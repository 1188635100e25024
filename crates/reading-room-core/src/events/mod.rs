//! Events emitted while reader sessions run.
//!
//! Events are handed to a [`Narrator`](crate::traits::Narrator), which
//! turns them into the narration log.

pub mod lending;

pub use lending::{LendingEvent, LendingEventKind};
