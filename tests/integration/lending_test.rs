//! Integration tests for concurrent lending runs.

mod helpers;

use std::collections::HashSet;

use reading_room_lending::ReadingDelay;

#[tokio::test(start_paused = true)]
async fn test_stock_run_completes() {
    let library = helpers::TestLibrary::new(helpers::stock_catalog(), 3);

    let report = library.runner.run(5).await.unwrap();

    assert_eq!(report.sessions.len(), 5);
    assert!(report.pool.is_quiescent());
    assert!(report.pool.peak_occupancy <= 3);
    assert_eq!(report.pool.peak_book_holders, 1);
    assert_eq!(library.pool().available_seats(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_admission_windows_respect_capacity() {
    let library = helpers::TestLibrary::new(helpers::numbered_catalog(4), 2);

    let report = library.runner.run(12).await.unwrap();

    assert!(helpers::max_overlapping_windows(&report.sessions) <= 2);
    assert!(report.pool.peak_occupancy <= 2);
}

#[tokio::test(start_paused = true)]
async fn test_borrowed_never_exceeds_quota() {
    let library = helpers::TestLibrary::new(helpers::numbered_catalog(6), 4);
    let quota = library.coordinator().max_books_per_reader() as usize;

    let report = library.runner.run(10).await.unwrap();

    for session in &report.sessions {
        assert!(session.borrowed.len() <= quota, "{} over quota", session.reader);
    }
    assert_eq!(report.books_borrowed(), 10 * quota);
}

#[tokio::test(start_paused = true)]
async fn test_per_reader_phase_order() {
    let library = helpers::TestLibrary::new(helpers::stock_catalog(), 3);

    let report = library.runner.run(6).await.unwrap();
    let events = library.narrator.events().await;

    for session in &report.sessions {
        helpers::assert_phase_order(&events, session.reader);
    }
}

#[tokio::test(start_paused = true)]
async fn test_holdings_return_to_zero() {
    let library = helpers::TestLibrary::new(helpers::stock_catalog(), 2);

    let report = library.runner.run(7).await.unwrap();
    let quotas = library.coordinator().quotas().snapshot().await;

    let readers: HashSet<_> = report.sessions.iter().map(|s| s.reader).collect();
    assert_eq!(readers.len(), 7);
    for reader in readers {
        assert_eq!(quotas.get(&reader), Some(&0), "{reader} still holds books");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_run_on_real_time() {
    let library = helpers::TestLibrary::with_delay(
        helpers::numbered_catalog(3),
        3,
        ReadingDelay::new(1, 5).unwrap(),
    );

    let report = library.runner.run(24).await.unwrap();

    assert_eq!(report.sessions.len(), 24);
    assert!(report.pool.peak_occupancy <= 3);
    assert_eq!(report.pool.peak_book_holders, 1);
    assert!(report.pool.is_quiescent());
    assert_eq!(library.coordinator().quotas().total_held().await, 0);

    let events = library.narrator.events().await;
    for session in &report.sessions {
        helpers::assert_phase_order(&events, session.reader);
    }
}
