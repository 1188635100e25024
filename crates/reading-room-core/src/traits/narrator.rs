//! Narration sink trait.

use async_trait::async_trait;

use crate::events::LendingEvent;

/// Receives lending events in the order a session produces them.
///
/// Implementations must be thread-safe; many sessions narrate concurrently.
/// Events from a single session arrive in phase order.
#[async_trait]
pub trait Narrator: Send + Sync + std::fmt::Debug + 'static {
    /// Record one event.
    async fn narrate(&self, event: LendingEvent);
}
