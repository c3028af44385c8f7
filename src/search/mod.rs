// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus search: where matching, snippets, page boxes and previews come
//! together.
//!
//! The matching primitives in [`crate::fuzzy`] and [`crate::layout`] know
//! nothing about corpora. This module drives them across every document a
//! [`DocumentSource`](crate::source::DocumentSource) lists, on a worker pool,
//! and turns the hits into ranked [`SearchResult`](crate::types::SearchResult)s.

mod cancel;
mod ranking;
mod searcher;
mod snippet;

pub use cancel::CancellationToken;
pub use ranking::{compare_results, sort_by_recency};
pub use searcher::{search, validate_query, SearchOptions, Searcher};
pub use snippet::{extract_snippet, DEFAULT_SNIPPET_CONTEXT, ELLIPSIS};
