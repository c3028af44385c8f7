//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use docpeep::DocumentLayout;

// Re-export canonical test utilities from docpeep::testing
pub use docpeep::testing::{make_page, make_run, timestamp, MemorySource, StubRenderer, STUB_PNG};

// ============================================================================
// LAYOUT FIXTURES
// ============================================================================

/// Six pages; "Pancake mix" appears on pages 2 and 5 only.
pub fn pancake_layout() -> DocumentLayout {
    DocumentLayout {
        pages: (1..=6)
            .map(|n| {
                let text = if n == 2 || n == 5 { "Pancake mix" } else { "Waffle iron" };
                make_page(n, vec![make_run(text, 72.0, 700.0, 12.0, 60.0)])
            })
            .collect(),
    }
}

/// Sidecar JSON with one run per page, in page order.
pub fn layout_json(pages: &[&str]) -> String {
    let pages: Vec<serde_json::Value> = pages
        .iter()
        .map(|text| {
            serde_json::json!({
                "viewBox": [0, 0, 612, 792],
                "items": [{"str": text, "width": 60.0, "transform": [12, 0, 0, 12, 72, 700]}]
            })
        })
        .collect();
    serde_json::json!({ "pages": pages }).to_string()
}

// ============================================================================
// ON-DISK CORPORA
// ============================================================================

/// Write `text` to `root/rel`, creating parents, with mtime `secs` after the
/// epoch.
pub fn write_doc(root: &Path, rel: &str, text: &str, secs: u64) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, text).unwrap();
    set_mtime(&path, secs);
    path
}

/// Write a layout sidecar next to `root/rel`.
pub fn write_layout(root: &Path, rel: &str, json: &str) -> PathBuf {
    let path = root.join(rel).with_extension("layout.json");
    fs::write(&path, json).unwrap();
    path
}

pub fn set_mtime(path: &Path, secs: u64) {
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

/// Document ids of `results`, in order.
pub fn ids(results: &[docpeep::SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.document_id.as_str()).collect()
}
