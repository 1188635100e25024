//! Narrator implementations.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

use reading_room_core::events::LendingEvent;
use reading_room_core::traits::Narrator;
use reading_room_core::types::ReaderId;

/// Prints one narration line per event to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNarrator;

#[async_trait]
impl Narrator for ConsoleNarrator {
    async fn narrate(&self, event: LendingEvent) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{event}") {
            warn!(error = %e, "Failed to write narration line");
        }
    }
}

/// An event together with its position in the narration log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    /// Zero-based position in the log.
    pub seq: usize,
    /// When the event was recorded.
    pub at: Instant,
    /// The event.
    pub event: LendingEvent,
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNarrator {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl RecordingNarrator {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events.
    pub async fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().await.clone()
    }

    /// Recorded events for one reader.
    pub async fn events_for(&self, reader: ReaderId) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .await
            .iter()
            .filter(|e| e.event.reader == reader)
            .cloned()
            .collect()
    }

    /// The narration log as text lines.
    pub async fn lines(&self) -> Vec<String> {
        self.events
            .lock()
            .await
            .iter()
            .map(|e| e.event.to_string())
            .collect()
    }
}

#[async_trait]
impl Narrator for RecordingNarrator {
    async fn narrate(&self, event: LendingEvent) {
        let mut events = self.events.lock().await;
        let seq = events.len();
        events.push(RecordedEvent {
            seq,
            at: Instant::now(),
            event,
        });
    }
}
