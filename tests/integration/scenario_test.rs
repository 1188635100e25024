//! Integration tests for the documented lending scenarios.

mod helpers;

use reading_room_core::types::{BookEntry, ReaderId};

#[tokio::test(start_paused = true)]
async fn test_single_reader_claims_two_of_three() {
    let library = helpers::TestLibrary::new(
        vec![
            BookEntry::home("A"),
            BookEntry::reading_room("B"),
            BookEntry::home("C"),
        ],
        1,
    );

    let report = library.runner.run(1).await.unwrap();
    assert_eq!(report.sessions.len(), 1);

    let lines = library.narrator.lines().await;
    let without_quota_notice: Vec<_> = lines
        .iter()
        .filter(|l| !l.contains("maximum allowed"))
        .map(String::as_str)
        .collect();
    assert_eq!(
        without_quota_notice,
        vec![
            "Reader 1 is taking book 'A' home.",
            "Reader 1 is taking book 'B' to the reading room.",
            "Reader 1 is reading book 'A'.",
            "Reader 1 is reading book 'B'.",
            "Reader 1 is returning book 'A'.",
            "Reader 1 is returning book 'B'.",
        ]
    );
    assert!(!lines.iter().any(|l| l.contains("'C'")));
    assert!(report.pool.is_quiescent());
}

#[tokio::test(start_paused = true)]
async fn test_capacity_one_serializes_admission() {
    let library = helpers::TestLibrary::new(helpers::stock_catalog(), 1);

    let report = library.runner.run(2).await.unwrap();
    let [first, second] = report.sessions.as_slice() else {
        panic!("expected two sessions, got {}", report.sessions.len());
    };

    assert_ne!(first.reader, second.reader);
    assert!(!first.overlaps(second));
    assert_eq!(report.pool.peak_occupancy, 1);
}

#[tokio::test(start_paused = true)]
async fn test_reader_at_quota_turned_away() {
    let library = helpers::TestLibrary::new(helpers::stock_catalog(), 1);
    let reader = ReaderId(1000);
    library.coordinator().quotas().set_held(reader, 2).await;

    let report = library.coordinator().run_session_as(reader).await.unwrap();

    assert!(report.turned_away);
    assert!(report.borrowed.is_empty());
    assert_eq!(
        library.narrator.lines().await,
        vec!["Reader 1000 has already taken the maximum allowed number of books."]
    );

    let state = library.pool().pool_state();
    assert_eq!(state.admissions, 1);
    assert_eq!(state.departures, 1);
    assert_eq!(state.book_lock_acquisitions, 0);
    assert_eq!(library.pool().available_seats(), 1);
    assert_eq!(library.coordinator().quotas().held(reader).await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_turned_away_reader_does_not_block_next() {
    let library = helpers::TestLibrary::new(helpers::stock_catalog(), 1);
    let reader = ReaderId(500);
    library.coordinator().quotas().set_held(reader, 2).await;

    library.coordinator().run_session_as(reader).await.unwrap();
    let next = library.coordinator().run_session().await.unwrap();

    assert_eq!(next.borrowed.len(), 2);
    assert!(library.pool().pool_state().is_quiescent());
}
