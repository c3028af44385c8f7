// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Filesystem corpus of previously-extracted text.
//!
//! Each corpus root is a named directory. Every `*.txt` file below it is a
//! document whose text is the file content; a `<stem>.layout.json` sidecar, if
//! present, carries its page layout. Document ids are `<key>/<relative path>`
//! with forward slashes on every platform.
//!
//! Extracted text is cached per path and invalidated by mtime. The cache sits
//! behind a `parking_lot::RwLock`, so one source can serve concurrent searches.
//! Each listing prunes entries for files that are no longer listed, and a file
//! that cannot be stat'ed loses its entry.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::layout_file::{load_layout, DEFAULT_VIEWPORT_SCALE};
use super::DocumentSource;
use crate::error::SourceError;
use crate::layout::DocumentLayout;
use crate::types::DocumentRef;

const TEXT_EXTENSION: &str = "txt";

/// A named directory of documents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CorpusRoot {
    /// Prefix for document ids from this root.
    pub key: String,
    pub path: PathBuf,
}

impl CorpusRoot {
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }
}

struct CachedText {
    modified: SystemTime,
    text: String,
}

/// Document source over directories of extracted `.txt` files.
pub struct FsSource {
    roots: Vec<CorpusRoot>,
    viewport_scale: f64,
    cache: RwLock<HashMap<PathBuf, CachedText>>,
}

impl FsSource {
    pub fn new(roots: Vec<CorpusRoot>) -> Self {
        Self {
            roots,
            viewport_scale: DEFAULT_VIEWPORT_SCALE,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Scale used to build page viewports from layout sidecars.
    pub fn with_viewport_scale(mut self, scale: f64) -> Self {
        self.viewport_scale = scale;
        self
    }

    pub fn roots(&self) -> &[CorpusRoot] {
        &self.roots
    }

    /// Number of cached texts.
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    /// Drop cached text for paths missing from `docs`.
    fn prune_cache(&self, docs: &[DocumentRef]) {
        let mut cache = self.cache.write();
        if cache.is_empty() {
            return;
        }
        let listed: HashSet<&Path> = docs.iter().map(|d| d.location.as_path()).collect();
        let before = cache.len();
        cache.retain(|path, _| listed.contains(path.as_path()));
        if cache.len() < before {
            debug!(evicted = before - cache.len(), "pruned text cache");
        }
    }

    fn scan_root(root: &CorpusRoot, docs: &mut Vec<DocumentRef>) {
        let walker = WalkDir::new(&root.path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(root = %root.key, error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_text_document(entry.path()) {
                continue;
            }
            let Some(modified) = entry.metadata().ok().and_then(|m| m.modified().ok()) else {
                debug!(path = %entry.path().display(), "skipping entry without mtime");
                continue;
            };

            let relative = entry.path().strip_prefix(&root.path).unwrap_or(entry.path());
            docs.push(DocumentRef::new(
                document_id(&root.key, relative),
                DateTime::<Utc>::from(modified),
                entry.path(),
            ));
        }
    }
}

fn is_text_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEXT_EXTENSION))
}

/// `<key>/<relative>` with `/` separators.
fn document_id(key: &str, relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("{}/{}", key, parts.join("/"))
}

impl DocumentSource for FsSource {
    fn documents(&self) -> Result<Vec<DocumentRef>, SourceError> {
        let mut docs = Vec::new();
        let mut reachable = 0;

        for root in &self.roots {
            if !root.path.is_dir() {
                warn!(root = %root.key, path = %root.path.display(), "corpus root not found, skipping");
                continue;
            }
            reachable += 1;
            let before = docs.len();
            Self::scan_root(root, &mut docs);
            debug!(root = %root.key, documents = docs.len() - before, "scanned corpus root");
        }

        self.prune_cache(&docs);

        if reachable == 0 {
            return Err(SourceError::Unavailable(format!(
                "none of {} corpus root(s) is a readable directory",
                self.roots.len()
            )));
        }
        Ok(docs)
    }

    fn text(&self, doc: &DocumentRef) -> Result<String, SourceError> {
        let path = &doc.location;
        let io_err = |source| SourceError::Io {
            path: path.clone(),
            source,
        };
        let modified = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                self.cache.write().remove(path);
                return Err(io_err(e));
            }
        };

        if let Some(cached) = self.cache.read().get(path) {
            if cached.modified == modified {
                return Ok(cached.text.clone());
            }
        }

        let bytes = std::fs::read(path).map_err(io_err)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        self.cache.write().insert(
            path.clone(),
            CachedText {
                modified,
                text: text.clone(),
            },
        );
        Ok(text)
    }

    fn layout(&self, doc: &DocumentRef) -> Result<Option<DocumentLayout>, SourceError> {
        load_layout(&doc.location, self.viewport_scale)
    }
}
