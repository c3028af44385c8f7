// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Typo-tolerant search over previously-extracted document text.
//!
//! Type `pancake`, find `Pan-Cake MIX` on page 2 of last month's receipt, get a
//! snippet around it and a cropped preview of the page with the hit
//! highlighted.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  fuzzy/      │────▶│  layout/     │────▶│  search/     │
//! │ (normalize,  │     │ (run boxes,  │     │ (Searcher,   │
//! │  find_match, │     │  page match, │     │  snippets,   │
//! │  positions)  │     │  crop)       │     │  ranking)    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                                                  │
//!                                                  ▼
//!                      ┌─────────────────────────────────────┐
//!                      │              source/                │
//!                      │ (DocumentSource, PageRenderer,      │
//!                      │  FsSource, layout sidecars)         │
//!                      └─────────────────────────────────────┘
//! ```
//!
//! Matching is pure and stateless; the only shared state is the text cache
//! inside [`FsSource`], which is safe for concurrent reads.
//!
//! # Usage
//!
//! ```no_run
//! use docpeep::{CorpusRoot, FsSource, Searcher};
//!
//! let source = FsSource::new(vec![CorpusRoot::new("invoices", "/srv/invoices")]);
//! let results = Searcher::new(&source).search("pancake mix")?;
//! for result in &results {
//!     println!("{}  {}", result.document_id, result.snippet);
//! }
//! # Ok::<(), docpeep::SearchError>(())
//! ```

pub mod config;
pub mod error;
pub mod fuzzy;
pub mod layout;
pub mod search;
pub mod source;
pub mod testing;
pub mod types;

pub use config::{parse_root_arg, Config};
pub use error::{ConfigError, RenderError, Result, SearchError, SourceError};
pub use fuzzy::{
    edit_distance, find_match, find_match_candidate, fuzzy_threshold, levenshtein,
    levenshtein_within, map_to_original, normalize, NormalizedText,
};
pub use layout::{
    locate_matches, locate_page, preview_request, run_matches, BoundingBox, DocumentLayout,
    PageLayout, RenderRequest, TextRun, Transform, Viewport, HIGHLIGHT_RGBA,
};
pub use search::{search, CancellationToken, SearchOptions, Searcher};
pub use source::{CorpusRoot, DocumentSource, FsSource, PageRenderer};
pub use types::{
    DocumentRef, ErrorResponse, MatchCandidate, PageMatch, Preview, SearchResponse, SearchResult,
};
