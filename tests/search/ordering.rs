//! Result ordering: newest first, stable on ties.

use super::common::{ids, MemorySource};
use docpeep::{search, SearchOptions, Searcher};

#[test]
fn newest_document_first() {
    let source = MemorySource::new()
        .with_document("t1.txt", 100, "invoice one")
        .with_document("t2.txt", 200, "invoice two")
        .with_document("t3.txt", 300, "invoice three");
    let results = search(&source, "invoice").unwrap();
    assert_eq!(ids(&results), vec!["t3.txt", "t2.txt", "t1.txt"]);
}

#[test]
fn equal_timestamps_keep_listing_order() {
    let source = MemorySource::new()
        .with_document("b.txt", 100, "invoice")
        .with_document("a.txt", 100, "invoice")
        .with_document("c.txt", 100, "invoice");
    let results = search(&source, "invoice").unwrap();
    assert_eq!(ids(&results), vec!["b.txt", "a.txt", "c.txt"]);
}

#[test]
fn match_quality_does_not_reorder() {
    let source = MemorySource::new()
        .with_document("exact-old.txt", 100, "invoice")
        .with_document("typo-new.txt", 200, "invoise");
    let results = search(&source, "invoice").unwrap();
    assert_eq!(ids(&results), vec!["typo-new.txt", "exact-old.txt"]);
}

#[test]
fn order_independent_of_worker_count() {
    let mut source = MemorySource::new();
    for i in 0..40 {
        let text = if i % 3 == 0 { "pancake" } else { "waffle" };
        source = source.with_document(&format!("doc{:02}.txt", i), (i % 5) as i64, text);
    }

    let single = Searcher::new(&source)
        .with_options(SearchOptions {
            workers: Some(1),
            ..SearchOptions::default()
        })
        .search("pancake")
        .unwrap();
    let many = Searcher::new(&source)
        .with_options(SearchOptions {
            workers: Some(8),
            ..SearchOptions::default()
        })
        .search("pancake")
        .unwrap();

    assert_eq!(ids(&single), ids(&many));
    assert_eq!(single.len(), 14);
}
