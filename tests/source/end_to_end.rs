//! Searches over real directories.

use super::common::{ids, layout_json, write_doc, write_layout, StubRenderer};
use docpeep::{search, CorpusRoot, FsSource, SearchError, Searcher};
use tempfile::tempdir;

#[test]
fn searches_across_named_roots_newest_first() {
    let invoices = tempdir().unwrap();
    let receipts = tempdir().unwrap();
    write_doc(invoices.path(), "jan.txt", "Invoice for pancake mix", 100);
    write_doc(invoices.path(), "feb.txt", "Invoice for waffles", 200);
    write_doc(receipts.path(), "mar.txt", "Receipt: Pan-Cake MIX", 300);

    let source = FsSource::new(vec![
        CorpusRoot::new("invoices", invoices.path()),
        CorpusRoot::new("receipts", receipts.path()),
    ]);
    let results = search(&source, "pancake mix").unwrap();
    assert_eq!(ids(&results), vec!["receipts/mar.txt", "invoices/jan.txt"]);
}

#[test]
fn sidecar_pages_reported() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "menu.txt", "Waffle\nPancake mix\nSyrup", 1);
    write_layout(
        dir.path(),
        "menu.txt",
        &layout_json(&["Waffle", "Pancake mix", "Syrup", "More pancakes"]),
    );

    let source = FsSource::new(vec![CorpusRoot::new("menus", dir.path())]);
    let results = Searcher::new(&source).search("pancake").unwrap();
    assert_eq!(results[0].matched_pages, vec![2, 4]);
    assert_eq!(results[0].primary_page, 2);
}

#[test]
fn broken_sidecar_keeps_the_document() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "menu.txt", "Pancake mix", 1);
    write_layout(dir.path(), "menu.txt", "[]");

    let source = FsSource::new(vec![CorpusRoot::new("menus", dir.path())]);
    let results = search(&source, "pancake").unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].matched_pages.is_empty());
}

#[test]
fn page_zero_sidecar_falls_back_to_snippet() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "menu.txt", "Pancake mix", 1);
    write_layout(
        dir.path(),
        "menu.txt",
        r#"{"pages": [{"pageNumber": 0, "viewBox": [0, 0, 612, 792],
            "items": [{"str": "Pancake", "width": 60, "transform": [12, 0, 0, 12, 72, 700]}]}]}"#,
    );

    let source = FsSource::new(vec![CorpusRoot::new("menus", dir.path())]);
    let results = search(&source, "pancake").unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].matched_pages.is_empty());
    assert_eq!(results[0].primary_page, 1);
}

#[test]
fn repeated_page_number_never_reaches_renderer() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "menu.txt", "Waffle\nPancake", 1);
    write_layout(
        dir.path(),
        "menu.txt",
        r#"{"pages": [
            {"pageNumber": 3, "viewBox": [0, 0, 100, 100],
             "items": [{"str": "Waffle", "width": 40, "transform": [12, 0, 0, 12, 10, 50]}]},
            {"pageNumber": 3, "viewBox": [0, 0, 612, 792],
             "items": [{"str": "Pancake", "width": 60, "transform": [12, 0, 0, 12, 500, 700]}]}
        ]}"#,
    );

    let source = FsSource::new(vec![CorpusRoot::new("menus", dir.path())]);
    let renderer = StubRenderer::new();
    let results = Searcher::new(&source)
        .with_renderer(&renderer)
        .search("pancake")
        .unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].matched_pages.is_empty());
    assert!(results[0].preview.is_none());
    assert!(renderer.requests().is_empty());
}

#[test]
fn missing_corpus_is_an_error() {
    let dir = tempdir().unwrap();
    let source = FsSource::new(vec![CorpusRoot::new("gone", dir.path().join("missing"))]);
    assert!(matches!(
        search(&source, "pancake"),
        Err(SearchError::CorpusUnavailable(_))
    ));
}
