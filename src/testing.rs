// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides an in-memory document source, a recording renderer, and the
//! canonical layout builders so every test constructs fixtures the same way.

#![doc(hidden)]

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::error::{RenderError, SourceError};
use crate::layout::{DocumentLayout, PageLayout, RenderRequest, TextRun, Transform, Viewport};
use crate::search::CancellationToken;
use crate::source::{DocumentSource, PageRenderer};
use crate::types::{DocumentRef, Preview};

/// Bytes returned by [`StubRenderer`] on success.
pub const STUB_PNG: &[u8] = b"\x89PNG\r\n";

/// UTC timestamp `secs` seconds after the epoch.
pub fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Create an unrotated text run at `(x, y)` with font size `size`.
///
/// This is the canonical implementation used across all tests.
pub fn make_run(text: &str, x: f64, y: f64, size: f64, width: f64) -> TextRun {
    TextRun {
        text: text.to_string(),
        width,
        transform: Transform([size, 0.0, 0.0, size, x, y]),
    }
}

/// Create a US Letter page (612 x 792) at viewport scale 1.5.
pub fn make_page(page_number: u32, runs: Vec<TextRun>) -> PageLayout {
    PageLayout {
        page_number,
        viewport: Viewport::new([0.0, 0.0, 612.0, 792.0], 1.5),
        runs,
    }
}

enum TextState {
    Ok(String),
    Failing,
}

enum LayoutState {
    Missing,
    Present(DocumentLayout),
    Failing,
}

struct MemoryDoc {
    doc: DocumentRef,
    text: TextState,
    layout: LayoutState,
}

/// In-memory [`DocumentSource`] built up fixture by fixture.
#[derive(Default)]
pub struct MemorySource {
    docs: Vec<MemoryDoc>,
    unavailable: bool,
    text_reads: AtomicUsize,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document modified `secs` seconds after the epoch.
    pub fn with_document(self, id: &str, secs: i64, text: &str) -> Self {
        self.with_document_at(id, timestamp(secs), text)
    }

    pub fn with_document_at(mut self, id: &str, modified_at: DateTime<Utc>, text: &str) -> Self {
        self.docs.push(MemoryDoc {
            doc: DocumentRef::new(id, modified_at, id),
            text: TextState::Ok(text.to_string()),
            layout: LayoutState::Missing,
        });
        self
    }

    /// Add a document whose text can never be read.
    pub fn with_failing_text(mut self, id: &str, secs: i64) -> Self {
        self.docs.push(MemoryDoc {
            doc: DocumentRef::new(id, timestamp(secs), id),
            text: TextState::Failing,
            layout: LayoutState::Missing,
        });
        self
    }

    /// Attach a layout to an already-added document.
    pub fn with_layout(mut self, id: &str, layout: DocumentLayout) -> Self {
        if let Some(entry) = self.docs.iter_mut().find(|d| d.doc.id == id) {
            entry.layout = LayoutState::Present(layout);
        }
        self
    }

    /// Make layout lookup fail for an already-added document.
    pub fn with_failing_layout(mut self, id: &str) -> Self {
        if let Some(entry) = self.docs.iter_mut().find(|d| d.doc.id == id) {
            entry.layout = LayoutState::Failing;
        }
        self
    }

    /// Make `documents()` fail as if the corpus were unreachable.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Cancel `token` once `reads` texts have been handed out.
    pub fn with_cancel_after(mut self, reads: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((reads, token));
        self
    }

    /// Number of `text()` calls so far.
    pub fn text_reads(&self) -> usize {
        self.text_reads.load(Ordering::SeqCst)
    }

    fn entry(&self, doc: &DocumentRef) -> Result<&MemoryDoc, SourceError> {
        self.docs
            .iter()
            .find(|d| d.doc.id == doc.id)
            .ok_or_else(|| SourceError::Extraction(format!("unknown document {}", doc.id)))
    }
}

impl DocumentSource for MemorySource {
    fn documents(&self) -> Result<Vec<DocumentRef>, SourceError> {
        if self.unavailable {
            return Err(SourceError::Unavailable("memory corpus offline".to_string()));
        }
        Ok(self.docs.iter().map(|d| d.doc.clone()).collect())
    }

    fn text(&self, doc: &DocumentRef) -> Result<String, SourceError> {
        let reads = self.text_reads.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((after, token)) = &self.cancel_after {
            if reads >= *after {
                token.cancel();
            }
        }
        match &self.entry(doc)?.text {
            TextState::Ok(text) => Ok(text.clone()),
            TextState::Failing => Err(SourceError::Extraction(format!("{} is corrupt", doc.id))),
        }
    }

    fn layout(&self, doc: &DocumentRef) -> Result<Option<DocumentLayout>, SourceError> {
        match &self.entry(doc)?.layout {
            LayoutState::Missing => Ok(None),
            LayoutState::Present(layout) => Ok(Some(layout.clone())),
            LayoutState::Failing => Err(SourceError::Extraction(format!(
                "{} has an unreadable layout",
                doc.id
            ))),
        }
    }
}

#[derive(Clone, Copy)]
enum RenderMode {
    Succeed,
    Fail,
    Unsupported,
}

/// [`PageRenderer`] that records every request it sees.
pub struct StubRenderer {
    mode: RenderMode,
    requests: Mutex<Vec<(String, RenderRequest)>>,
}

impl StubRenderer {
    /// Renders every request as [`STUB_PNG`].
    pub fn new() -> Self {
        Self::with_mode(RenderMode::Succeed)
    }

    pub fn failing() -> Self {
        Self::with_mode(RenderMode::Fail)
    }

    pub fn unsupported() -> Self {
        Self::with_mode(RenderMode::Unsupported)
    }

    fn with_mode(mode: RenderMode) -> Self {
        Self {
            mode,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// `(document id, request)` pairs in call order.
    pub fn requests(&self) -> Vec<(String, RenderRequest)> {
        self.requests.lock().clone()
    }
}

impl Default for StubRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer for StubRenderer {
    fn render(
        &self,
        doc: &DocumentRef,
        _page: &PageLayout,
        request: &RenderRequest,
    ) -> Result<Preview, RenderError> {
        self.requests.lock().push((doc.id.clone(), request.clone()));
        match self.mode {
            RenderMode::Succeed => Ok(Preview::png(STUB_PNG.to_vec())),
            RenderMode::Fail => Err(RenderError::Failed("canvas exploded".to_string())),
            RenderMode::Unsupported => Err(RenderError::Unsupported),
        }
    }
}
