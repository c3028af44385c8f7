//! Cooperative cancellation: all or nothing.

use std::time::Duration;

use super::common::MemorySource;
use docpeep::{CancellationToken, SearchError, SearchOptions, Searcher};

fn corpus(n: usize) -> MemorySource {
    (0..n).fold(MemorySource::new(), |source, i| {
        source.with_document(&format!("doc{}.txt", i), i as i64, "pancake")
    })
}

#[test]
fn cancelled_before_start_reads_nothing() {
    let source = corpus(10);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = Searcher::new(&source)
        .search_with_cancel("pancake", &cancel)
        .unwrap_err();
    assert!(matches!(err, SearchError::Cancelled));
    assert_eq!(source.text_reads(), 0);
}

#[test]
fn cancelled_mid_search_returns_no_partial_results() {
    let cancel = CancellationToken::new();
    let source = corpus(50).with_cancel_after(3, cancel.clone());
    let options = SearchOptions {
        workers: Some(1),
        ..SearchOptions::default()
    };

    let outcome = Searcher::new(&source)
        .with_options(options)
        .search_with_cancel("pancake", &cancel);
    assert!(matches!(outcome, Err(SearchError::Cancelled)));
    assert!(source.text_reads() < 50);
}

#[test]
fn expired_deadline_cancels() {
    let source = corpus(5);
    let cancel = CancellationToken::with_timeout(Duration::ZERO);
    let outcome = Searcher::new(&source).search_with_cancel("pancake", &cancel);
    assert!(matches!(outcome, Err(SearchError::Cancelled)));
}

#[test]
fn generous_deadline_completes() {
    let source = corpus(5);
    let cancel = CancellationToken::with_timeout(Duration::from_secs(60));
    let results = Searcher::new(&source)
        .search_with_cancel("pancake", &cancel)
        .unwrap();
    assert_eq!(results.len(), 5);
}

#[test]
fn progress_called_once_per_document() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let source = corpus(12);
    let seen = AtomicUsize::new(0);
    Searcher::new(&source)
        .search_with_progress("pancake", &CancellationToken::new(), || {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 12);
}
