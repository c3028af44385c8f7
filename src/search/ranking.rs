// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: most recently modified documents first.
//!
//! Relevance is binary (a document matched or it didn't), so recency is the
//! only ordering signal. Match distance never reorders results.

use std::cmp::Ordering;

use crate::types::SearchResult;

/// Compare two results for ranking.
///
/// Sort order:
/// 1. **Modified time** - descending (newer wins)
/// 2. Nothing else. Equal timestamps compare `Equal` so a stable sort keeps
///    the order documents were listed in.
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.modified_at.cmp(&a.modified_at)
}

/// Sort results newest first, keeping listing order among equal timestamps.
pub fn sort_by_recency(results: &mut [SearchResult]) {
    results.sort_by(compare_results);
}
