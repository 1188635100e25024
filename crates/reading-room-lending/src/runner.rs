//! Run orchestration: launch many reader sessions and wait for all of them.

use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use reading_room_core::error::AppError;
use reading_room_core::result::AppResult;
use reading_room_pool::PoolState;

use crate::coordinator::LendingCoordinator;
use crate::session::SessionReport;

/// Outcome of a whole run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Identifier of the run, attached to every log record it produced.
    pub run_id: Uuid,
    /// One report per session that completed, in launch order.
    pub sessions: Vec<SessionReport>,
    /// Pool counters after every session departed.
    pub pool: PoolState,
}

impl RunReport {
    /// Total books claimed across all sessions.
    pub fn books_borrowed(&self) -> usize {
        self.sessions.iter().map(|s| s.borrowed.len()).sum()
    }

    /// Sessions turned away at the quota check.
    pub fn turned_away(&self) -> usize {
        self.sessions.iter().filter(|s| s.turned_away).count()
    }
}

/// Launches reader sessions concurrently and joins them.
#[derive(Debug, Clone)]
pub struct LendingRunner {
    /// Coordinator shared by every session.
    coordinator: LendingCoordinator,
}

impl LendingRunner {
    /// Create a new runner.
    pub fn new(coordinator: LendingCoordinator) -> Self {
        Self { coordinator }
    }

    /// The coordinator sessions run on.
    pub fn coordinator(&self) -> &LendingCoordinator {
        &self.coordinator
    }

    /// Launch `readers` sessions at once and wait until every one departs.
    ///
    /// All sessions are joined even if one fails; the first failure is
    /// returned afterwards.
    pub async fn run(&self, readers: usize) -> AppResult<RunReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", run_id = %run_id);

        async move {
            info!(
                readers,
                capacity = self.coordinator.pool().capacity(),
                books = self.coordinator.pool().catalog().len(),
                quota = self.coordinator.max_books_per_reader(),
                "Starting lending run"
            );

            let handles: Vec<_> = (0..readers)
                .map(|slot| {
                    let coordinator = self.coordinator.clone();
                    let session_span =
                        info_span!("session", slot, reader = tracing::field::Empty);
                    tokio::spawn(
                        async move { coordinator.run_session().await }.instrument(session_span),
                    )
                })
                .collect();

            let mut sessions = Vec::with_capacity(readers);
            let mut first_error: Option<AppError> = None;

            for handle in handles {
                let outcome = match handle.await {
                    Ok(result) => result,
                    Err(join_error) => Err(AppError::from(join_error)),
                };
                match outcome {
                    Ok(report) => sessions.push(report),
                    Err(e) => {
                        tracing::error!(error = %e, "Reader session failed");
                        first_error.get_or_insert(e);
                    }
                }
            }

            if let Some(e) = first_error {
                return Err(e);
            }

            let report = RunReport {
                run_id,
                sessions,
                pool: self.coordinator.pool().pool_state(),
            };

            info!(
                sessions = report.sessions.len(),
                books_borrowed = report.books_borrowed(),
                turned_away = report.turned_away(),
                peak_occupancy = report.pool.peak_occupancy,
                "Lending run finished"
            );

            Ok(report)
        }
        .instrument(span)
        .await
    }
}
