//! Integration tests for room admission and book locks under contention.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reading_room_core::types::Catalog;
use reading_room_pool::ResourcePool;

fn make_pool(books: usize, capacity: usize) -> ResourcePool {
    let catalog = Catalog::new(helpers::numbered_catalog(books)).unwrap();
    ResourcePool::new(Arc::new(catalog), capacity).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_room_never_exceeds_capacity() {
    let pool = make_pool(1, 3);
    let inside = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let pool = pool.clone();
            let inside = Arc::clone(&inside);
            let peak = Arc::clone(&peak);
            tokio::spawn(async move {
                let pass = pool.acquire_room().await.unwrap();
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
                pool.release_room(pass);
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert!(peak.load(Ordering::SeqCst) <= 3);
    let state = pool.pool_state();
    assert!(state.peak_occupancy <= 3);
    assert_eq!(state.admissions, 32);
    assert!(state.is_quiescent());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_book_lock_never_shared() {
    let pool = make_pool(2, 8);
    let holders = Arc::new(AtomicUsize::new(0));
    let overlap_seen = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let pool = pool.clone();
            let holders = Arc::clone(&holders);
            let overlap_seen = Arc::clone(&overlap_seen);
            tokio::spawn(async move {
                let book = pool.catalog().find("Book 0").unwrap().clone();
                for _ in 0..10 {
                    let guard = pool.acquire_book_lock(&book).await.unwrap();
                    if holders.fetch_add(1, Ordering::SeqCst) != 0 {
                        overlap_seen.fetch_add(1, Ordering::SeqCst);
                    }
                    tokio::task::yield_now().await;
                    holders.fetch_sub(1, Ordering::SeqCst);
                    pool.release_book_lock(guard);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(overlap_seen.load(Ordering::SeqCst), 0);
    let state = pool.pool_state();
    assert_eq!(state.peak_book_holders, 1);
    assert_eq!(state.book_lock_acquisitions, 160);
    assert_eq!(state.book_lock_releases, 160);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_guards_release_resources() {
    let pool = make_pool(1, 1);
    let book = pool.catalog().find("Book 0").unwrap().clone();

    let task = {
        let pool = pool.clone();
        tokio::spawn(async move {
            let _pass = pool.acquire_room().await.unwrap();
            let _guard = pool.acquire_book_lock(&book).await.unwrap();
            panic!("session aborted while holding resources");
        })
    };
    assert!(task.await.unwrap_err().is_panic());

    assert!(pool.pool_state().is_quiescent());
    assert_eq!(pool.available_seats(), 1);
    let _pass = pool.acquire_room().await.unwrap();
}
