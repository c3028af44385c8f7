//! `FsSource` listing, text caching and layout sidecars.

use super::common::{layout_json, set_mtime, write_doc, write_layout};
use docpeep::{CorpusRoot, DocumentSource, FsSource, SourceError};
use tempfile::tempdir;

#[test]
fn lists_text_files_with_keyed_ids() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "2024/march.txt", "pancake", 100);
    write_doc(dir.path(), "notes.txt", "waffle", 200);
    std::fs::write(dir.path().join("scan.pdf"), b"%PDF").unwrap();
    write_layout(dir.path(), "notes.txt", &layout_json(&["waffle"]));

    let source = FsSource::new(vec![CorpusRoot::new("invoices", dir.path())]);
    let mut ids: Vec<String> = source.documents().unwrap().into_iter().map(|d| d.id).collect();
    ids.sort();
    assert_eq!(ids, vec!["invoices/2024/march.txt", "invoices/notes.txt"]);
}

#[test]
fn modified_time_comes_from_file() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "a.txt", "pancake", 1_700_000_000);

    let source = FsSource::new(vec![CorpusRoot::new("k", dir.path())]);
    let docs = source.documents().unwrap();
    assert_eq!(docs[0].modified_at.timestamp(), 1_700_000_000);
}

#[test]
fn missing_root_skipped_when_another_exists() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "a.txt", "pancake", 1);

    let source = FsSource::new(vec![
        CorpusRoot::new("gone", dir.path().join("nope")),
        CorpusRoot::new("here", dir.path()),
    ]);
    let docs = source.documents().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "here/a.txt");
}

#[test]
fn all_roots_missing_is_unavailable() {
    let dir = tempdir().unwrap();
    let source = FsSource::new(vec![CorpusRoot::new("gone", dir.path().join("nope"))]);
    assert!(matches!(source.documents(), Err(SourceError::Unavailable(_))));
}

#[test]
fn empty_root_lists_nothing() {
    let dir = tempdir().unwrap();
    let source = FsSource::new(vec![CorpusRoot::new("empty", dir.path())]);
    assert!(source.documents().unwrap().is_empty());
}

#[test]
fn text_is_lossy_utf8() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    std::fs::write(&path, b"Pan\xffCake").unwrap();

    let source = FsSource::new(vec![CorpusRoot::new("k", dir.path())]);
    let doc = source.documents().unwrap().remove(0);
    assert_eq!(source.text(&doc).unwrap(), "Pan\u{FFFD}Cake");
}

#[test]
fn text_cache_invalidated_by_mtime() {
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), "a.txt", "first", 100);

    let source = FsSource::new(vec![CorpusRoot::new("k", dir.path())]);
    let doc = source.documents().unwrap().remove(0);
    assert_eq!(source.text(&doc).unwrap(), "first");
    assert_eq!(source.cached_len(), 1);

    std::fs::write(&path, "second").unwrap();
    set_mtime(&path, 200);
    assert_eq!(source.text(&doc).unwrap(), "second");
    assert_eq!(source.cached_len(), 1);
}

#[test]
fn deleted_file_is_a_document_error() {
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), "a.txt", "pancake", 1);

    let source = FsSource::new(vec![CorpusRoot::new("k", dir.path())]);
    let doc = source.documents().unwrap().remove(0);
    source.text(&doc).unwrap();
    assert_eq!(source.cached_len(), 1);

    std::fs::remove_file(path).unwrap();
    assert!(matches!(source.text(&doc), Err(SourceError::Io { .. })));
    assert_eq!(source.cached_len(), 0);
}

#[test]
fn relisting_prunes_texts_of_removed_files() {
    let dir = tempdir().unwrap();
    let gone = write_doc(dir.path(), "a.txt", "pancake", 1);
    write_doc(dir.path(), "b.txt", "waffle", 2);

    let source = FsSource::new(vec![CorpusRoot::new("k", dir.path())]);
    for doc in source.documents().unwrap() {
        source.text(&doc).unwrap();
    }
    assert_eq!(source.cached_len(), 2);

    std::fs::remove_file(gone).unwrap();
    let docs = source.documents().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(source.cached_len(), 1);
}

#[test]
fn layout_sidecar_loaded_at_configured_scale() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "menu.txt", "Pancake mix", 1);
    write_layout(dir.path(), "menu.txt", &layout_json(&["Waffle", "Pancake mix"]));

    let source = FsSource::new(vec![CorpusRoot::new("k", dir.path())]).with_viewport_scale(2.0);
    let doc = source.documents().unwrap().remove(0);
    let layout = source.layout(&doc).unwrap().unwrap();
    assert_eq!(layout.pages.len(), 2);
    assert_eq!(layout.pages[1].page_number, 2);
    assert_eq!(layout.pages[0].viewport.width, 1224.0);
}

#[test]
fn no_sidecar_means_no_layout() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "a.txt", "pancake", 1);
    let source = FsSource::new(vec![CorpusRoot::new("k", dir.path())]);
    let doc = source.documents().unwrap().remove(0);
    assert!(source.layout(&doc).unwrap().is_none());
}

#[test]
fn malformed_sidecar_is_a_layout_error() {
    let dir = tempdir().unwrap();
    write_doc(dir.path(), "a.txt", "pancake", 1);
    write_layout(dir.path(), "a.txt", "{ not json");
    let source = FsSource::new(vec![CorpusRoot::new("k", dir.path())]);
    let doc = source.documents().unwrap().remove(0);
    assert!(matches!(source.layout(&doc), Err(SourceError::Layout { .. })));
}
