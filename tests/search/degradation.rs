//! Failure isolation: bad documents drop out, bad pages fall back to snippets.

use super::common::{ids, pancake_layout, MemorySource, StubRenderer};
use docpeep::{search, SearchError, Searcher, SourceError};

#[test]
fn unreadable_document_is_skipped() {
    let source = MemorySource::new()
        .with_document("good-1.txt", 1, "pancake")
        .with_failing_text("broken.txt", 2)
        .with_document("good-2.txt", 3, "pancake");
    let results = search(&source, "pancake").unwrap();
    assert_eq!(ids(&results), vec!["good-2.txt", "good-1.txt"]);
}

#[test]
fn every_document_failing_is_still_success() {
    let source = MemorySource::new()
        .with_failing_text("a.txt", 1)
        .with_failing_text("b.txt", 2);
    assert!(search(&source, "pancake").unwrap().is_empty());
}

#[test]
fn unreachable_corpus_is_distinct_from_no_matches() {
    let source = MemorySource::new()
        .with_document("a.txt", 1, "pancake")
        .unavailable();
    let err = search(&source, "pancake").unwrap_err();
    assert!(matches!(
        err,
        SearchError::CorpusUnavailable(SourceError::Unavailable(_))
    ));
}

#[test]
fn render_failure_degrades_to_snippet_only() {
    let source = MemorySource::new()
        .with_document("menu.txt", 1, "Pancake mix on page two")
        .with_layout("menu.txt", pancake_layout());
    let renderer = StubRenderer::failing();

    let results = Searcher::new(&source)
        .with_renderer(&renderer)
        .search("pancake")
        .unwrap();

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(result.snippet.contains("Pancake mix"));
    assert!(result.matched_pages.is_empty());
    assert_eq!(result.primary_page, 1);
    assert_eq!(result.page_count, 0);
    assert!(result.preview.is_none());
}

#[test]
fn layout_failure_degrades_to_snippet_only() {
    let source = MemorySource::new()
        .with_document("menu.txt", 1, "Pancake mix")
        .with_failing_layout("menu.txt");
    let renderer = StubRenderer::new();

    let results = Searcher::new(&source)
        .with_renderer(&renderer)
        .search("pancake")
        .unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].matched_pages.is_empty());
    assert_eq!(results[0].primary_page, 1);
    assert!(renderer.requests().is_empty());
}
