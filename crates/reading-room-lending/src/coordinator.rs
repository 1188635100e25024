//! Reader session orchestration.

use std::sync::Arc;

use tracing::{Span, info};

use reading_room_core::config::AppConfig;
use reading_room_core::events::LendingEvent;
use reading_room_core::result::AppResult;
use reading_room_core::traits::Narrator;
use reading_room_core::types::ReaderId;
use reading_room_pool::{ResourcePool, RoomPass};

use crate::delay::ReadingDelay;
use crate::identity::ReaderIdGenerator;
use crate::quota::ReaderQuotaTable;
use crate::session::{ReaderSession, SessionPhase, SessionReport};

/// Default number of books one reader may hold.
pub const DEFAULT_MAX_BOOKS_PER_READER: u32 = 2;

/// Runs reader sessions against a shared [`ResourcePool`].
///
/// Cloning is cheap; clones share the pool, the quota table, the identity
/// counter, and the narrator.
#[derive(Debug, Clone)]
pub struct LendingCoordinator {
    pool: ResourcePool,
    quotas: ReaderQuotaTable,
    ids: Arc<ReaderIdGenerator>,
    narrator: Arc<dyn Narrator>,
    max_books_per_reader: u32,
    delay: ReadingDelay,
}

impl LendingCoordinator {
    /// Creates a coordinator with the default quota and reading delay.
    pub fn new(pool: ResourcePool, narrator: Arc<dyn Narrator>) -> Self {
        Self {
            pool,
            quotas: ReaderQuotaTable::new(),
            ids: Arc::new(ReaderIdGenerator::new()),
            narrator,
            max_books_per_reader: DEFAULT_MAX_BOOKS_PER_READER,
            delay: ReadingDelay::default(),
        }
    }

    /// Builds the pool and coordinator described by `config`.
    pub fn from_config(config: &AppConfig, narrator: Arc<dyn Narrator>) -> AppResult<Self> {
        config.validate()?;
        let catalog = Arc::new(config.catalog()?);
        let pool = ResourcePool::new(catalog, config.library.max_readers_in_room)?;

        Ok(Self::new(pool, narrator)
            .with_max_books_per_reader(config.library.max_books_per_reader)
            .with_delay(ReadingDelay::from_config(&config.reading)?))
    }

    /// Set the per-reader quota.
    pub fn with_max_books_per_reader(mut self, max: u32) -> Self {
        self.max_books_per_reader = max;
        self
    }

    /// Set the reading delay range.
    pub fn with_delay(mut self, delay: ReadingDelay) -> Self {
        self.delay = delay;
        self
    }

    /// The underlying pool.
    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// The shared quota table.
    pub fn quotas(&self) -> &ReaderQuotaTable {
        &self.quotas
    }

    /// The per-reader quota.
    pub fn max_books_per_reader(&self) -> u32 {
        self.max_books_per_reader
    }

    /// Run one session under a freshly issued identity.
    ///
    /// The identity is issued once admission has been granted.
    pub async fn run_session(&self) -> AppResult<SessionReport> {
        let pass = self.pool.acquire_room().await?;
        let reader = self.ids.issue();
        self.run_admitted(reader, pass).await
    }

    /// Run one session under an existing identity.
    pub async fn run_session_as(&self, reader: ReaderId) -> AppResult<SessionReport> {
        let pass = self.pool.acquire_room().await?;
        self.run_admitted(reader, pass).await
    }

    async fn run_admitted(&self, reader: ReaderId, pass: RoomPass) -> AppResult<SessionReport> {
        Span::current().record("reader", tracing::field::display(reader));
        let mut session = ReaderSession::admitted(reader);

        let held = self.quotas.held(reader).await;
        let remaining = self.max_books_per_reader.saturating_sub(held);
        session.start_claiming(remaining);

        if !session.has_quota() {
            self.narrator.narrate(LendingEvent::quota_reached(reader)).await;
            let report = session.depart(true);
            pass.release();
            info!(reader = %reader, held, "Reader turned away at quota");
            return Ok(report);
        }

        if let Err(e) = self.claim_books(&mut session).await {
            // The room pass drops on return; only the recorded claims need undoing.
            let claimed = session.borrowed().len() as u32;
            self.quotas.record_return(reader, claimed).await;
            return Err(e);
        }
        info!(reader = %reader, borrowed = session.borrowed().len(), "Claiming finished");

        session.enter(SessionPhase::Reading);
        for book in session.borrowed() {
            self.narrator.narrate(LendingEvent::reading(reader, book)).await;
            tokio::time::sleep(self.delay.sample()).await;
        }

        session.enter(SessionPhase::Returning);
        for book in session.borrowed() {
            self.narrator.narrate(LendingEvent::returning(reader, book)).await;
        }

        let report = session.depart(false);
        pass.release();
        self.quotas
            .record_return(reader, report.borrowed.len() as u32)
            .await;
        info!(reader = %reader, returned = report.borrowed.len(), "Reader departed");

        Ok(report)
    }

    /// Walk the catalog in order. Each book's lock is held only for the
    /// decision on that book. Stops at the first book seen with no quota left.
    async fn claim_books(&self, session: &mut ReaderSession) -> AppResult<()> {
        let reader = session.reader();

        for book in self.pool.catalog().iter() {
            let lock = self.pool.acquire_book_lock(book).await?;

            if !session.has_quota() {
                self.narrator.narrate(LendingEvent::quota_reached(reader)).await;
                self.pool.release_book_lock(lock);
                break;
            }

            self.narrator.narrate(LendingEvent::taking(reader, book)).await;
            session.claim(book.clone());
            self.quotas.record_claim(reader).await;
            self.pool.release_book_lock(lock);
        }

        Ok(())
    }
}
