//! Per-reader holding counts shared by all sessions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use reading_room_core::types::ReaderId;

/// Shared map from reader to the number of books it currently holds.
///
/// Every read and write goes through [`update`](Self::update), which runs a
/// read-modify-write under one lock. Entries appear on first access and are
/// never removed; a reader that returns everything keeps a zero entry.
#[derive(Debug, Clone, Default)]
pub struct ReaderQuotaTable {
    /// Protected holding counts.
    state: Arc<Mutex<HashMap<ReaderId, u32>>>,
}

impl ReaderQuotaTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` on the reader's count, creating it at zero if absent.
    pub async fn update<R>(&self, reader: ReaderId, f: impl FnOnce(&mut u32) -> R) -> R {
        let mut state = self.state.lock().await;
        let held = state.entry(reader).or_insert(0);
        f(held)
    }

    /// Books the reader currently holds.
    pub async fn held(&self, reader: ReaderId) -> u32 {
        self.update(reader, |held| *held).await
    }

    /// Record one claimed book. Returns the new count.
    pub async fn record_claim(&self, reader: ReaderId) -> u32 {
        let held = self
            .update(reader, |held| {
                *held = held.saturating_add(1);
                *held
            })
            .await;
        debug!(reader = %reader, held, "Claim recorded");
        held
    }

    /// Record `count` returned books. Returns the new count.
    pub async fn record_return(&self, reader: ReaderId, count: u32) -> u32 {
        let (before, after) = self
            .update(reader, |held| {
                let before = *held;
                *held = held.saturating_sub(count);
                (before, *held)
            })
            .await;

        if count > before {
            warn!(
                reader = %reader,
                held = before,
                returned = count,
                "Returned more books than recorded, clamping to zero"
            );
        }
        debug!(reader = %reader, held = after, "Return recorded");
        after
    }

    /// Overwrite the reader's count.
    pub async fn set_held(&self, reader: ReaderId, held: u32) {
        self.update(reader, |current| *current = held).await;
    }

    /// Copy of every entry.
    pub async fn snapshot(&self) -> HashMap<ReaderId, u32> {
        self.state.lock().await.clone()
    }

    /// Sum of all holding counts.
    pub async fn total_held(&self) -> u64 {
        self.state
            .lock()
            .await
            .values()
            .map(|&held| u64::from(held))
            .sum()
    }
}
