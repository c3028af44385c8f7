// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search orchestrator.
//!
//! One search is a fan-out over the corpus followed by a single sort:
//!
//! ```text
//! documents() ──▶ per document (worker pool) ──────────────────────▶ collect ──▶ sort
//!                   text() ─▶ find_match ─┬─▶ snippet               │
//!                                         └─▶ layout ─▶ pages ─▶ preview
//! ```
//!
//! Per-document failures are logged and the document is left out. Page-path
//! failures keep the document with a snippet only. Only a corpus that can't be
//! listed at all, or cancellation, fails the search.

use tracing::{debug, info, warn};

use super::cancel::CancellationToken;
use super::ranking::sort_by_recency;
use super::snippet::{extract_snippet, DEFAULT_SNIPPET_CONTEXT};
use crate::error::{RenderError, Result, SearchError, SourceError};
use crate::fuzzy::find_match;
use crate::layout::{locate_matches, preview_request, DEFAULT_PREVIEW_PADDING};
use crate::source::{DocumentSource, PageRenderer};
use crate::types::{DocumentRef, Preview, SearchResult};

/// Tunables for one [`Searcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Worker-pool size. `None` uses the global pool.
    pub workers: Option<usize>,
    /// Characters of context either side of the match in snippets.
    pub snippet_context: usize,
    /// Horizontal crop padding for previews, in viewport units.
    pub preview_padding: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            workers: None,
            snippet_context: DEFAULT_SNIPPET_CONTEXT,
            preview_padding: DEFAULT_PREVIEW_PADDING,
        }
    }
}

/// Reject empty and whitespace-only queries; returns the trimmed query.
pub fn validate_query(query: &str) -> Result<&str> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(query)
}

/// Search `source` with default options and no previews.
pub fn search(source: &dyn DocumentSource, query: &str) -> Result<Vec<SearchResult>> {
    Searcher::new(source).search(query)
}

/// Runs queries against a document source.
pub struct Searcher<'a> {
    source: &'a dyn DocumentSource,
    renderer: Option<&'a dyn PageRenderer>,
    options: SearchOptions,
}

enum Outcome {
    Matched(SearchResult),
    NoMatch,
    Failed,
    Cancelled,
}

#[derive(Default)]
struct PageSummary {
    matched_pages: Vec<u32>,
    preview: Option<Preview>,
}

#[derive(Debug, thiserror::Error)]
enum PagePathError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl<'a> Searcher<'a> {
    pub fn new(source: &'a dyn DocumentSource) -> Self {
        Self {
            source,
            renderer: None,
            options: SearchOptions::default(),
        }
    }

    /// Render previews of the first matching page with `renderer`.
    pub fn with_renderer(mut self, renderer: &'a dyn PageRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.search_with_cancel(query, &CancellationToken::new())
    }

    pub fn search_with_cancel(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>> {
        self.search_with_progress(query, cancel, || {})
    }

    /// Search, calling `on_document` once per document processed.
    ///
    /// Results are newest first. Returns [`SearchError::Cancelled`] if `cancel`
    /// trips before every document has been processed.
    pub fn search_with_progress<F>(
        &self,
        query: &str,
        cancel: &CancellationToken,
        on_document: F,
    ) -> Result<Vec<SearchResult>>
    where
        F: Fn() + Sync,
    {
        let query = validate_query(query)?;
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let docs = self
            .source
            .documents()
            .map_err(SearchError::CorpusUnavailable)?;
        debug!(query, documents = docs.len(), "searching corpus");

        let outcomes = self.run(&docs, query, cancel, &on_document)?;
        if outcomes.iter().any(|o| matches!(o, Outcome::Cancelled)) {
            info!(query, "search cancelled");
            return Err(SearchError::Cancelled);
        }

        let mut results = Vec::new();
        let mut failed = 0usize;
        for outcome in outcomes {
            match outcome {
                Outcome::Matched(result) => results.push(result),
                Outcome::Failed => failed += 1,
                Outcome::NoMatch | Outcome::Cancelled => {}
            }
        }

        sort_by_recency(&mut results);
        info!(
            query,
            documents = docs.len(),
            matched = results.len(),
            failed,
            "search complete"
        );
        Ok(results)
    }

    #[cfg(feature = "parallel")]
    fn run(
        &self,
        docs: &[DocumentRef],
        query: &str,
        cancel: &CancellationToken,
        on_document: &(dyn Fn() + Sync),
    ) -> Result<Vec<Outcome>> {
        use rayon::prelude::*;

        let work = || -> Vec<Outcome> {
            docs.par_iter()
                .map(|doc| {
                    let outcome = self.process(doc, query, cancel);
                    on_document();
                    outcome
                })
                .collect()
        };

        match self.options.workers {
            Some(workers) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()
                    .map_err(|e| SearchError::WorkerPool(e.to_string()))?;
                Ok(pool.install(work))
            }
            None => Ok(work()),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run(
        &self,
        docs: &[DocumentRef],
        query: &str,
        cancel: &CancellationToken,
        on_document: &(dyn Fn() + Sync),
    ) -> Result<Vec<Outcome>> {
        Ok(docs
            .iter()
            .map(|doc| {
                let outcome = self.process(doc, query, cancel);
                on_document();
                outcome
            })
            .collect())
    }

    fn process(&self, doc: &DocumentRef, query: &str, cancel: &CancellationToken) -> Outcome {
        if cancel.is_cancelled() {
            return Outcome::Cancelled;
        }
        let text = match self.source.text(doc) {
            Ok(text) => text,
            Err(e) => {
                warn!(document = %doc.id, error = %e, "skipping unreadable document");
                return Outcome::Failed;
            }
        };

        if cancel.is_cancelled() {
            return Outcome::Cancelled;
        }
        let Some(offset) = find_match(&text, query) else {
            return Outcome::NoMatch;
        };

        if cancel.is_cancelled() {
            return Outcome::Cancelled;
        }
        let query_len = query.chars().count();
        let (snippet, pages) = join(
            || extract_snippet(&text, offset, query_len, self.options.snippet_context),
            || self.page_summary(doc, query),
        );

        debug!(document = %doc.id, offset, pages = ?pages.matched_pages, "document matched");
        Outcome::Matched(SearchResult::new(doc, snippet, pages.matched_pages, pages.preview))
    }

    fn page_summary(&self, doc: &DocumentRef, query: &str) -> PageSummary {
        match self.try_page_summary(doc, query) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(document = %doc.id, error = %e, "page matching failed, keeping snippet only");
                PageSummary::default()
            }
        }
    }

    fn try_page_summary(
        &self,
        doc: &DocumentRef,
        query: &str,
    ) -> std::result::Result<PageSummary, PagePathError> {
        let Some(layout) = self.source.layout(doc)? else {
            return Ok(PageSummary::default());
        };

        let matches = locate_matches(&layout, query);
        let request = preview_request(&layout, &matches, self.options.preview_padding);

        let preview = match (self.renderer, request) {
            (Some(renderer), Some(request)) => match layout.page(request.page_number) {
                Some(page) => match renderer.render(doc, page, &request) {
                    Ok(preview) => Some(preview),
                    Err(RenderError::Unsupported) => {
                        debug!(document = %doc.id, "renderer does not support document");
                        None
                    }
                    Err(e) => return Err(e.into()),
                },
                None => None,
            },
            _ => None,
        };

        Ok(PageSummary {
            matched_pages: matches.iter().map(|m| m.page_number).collect(),
            preview,
        })
    }
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}
