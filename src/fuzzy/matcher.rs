// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Approximate substring search over normalized text.
//!
//! Two window scans live here because two callers need different acceptance
//! rules:
//!
//! - [`best_window`]: the document-level pass. Scan every window, keep the
//!   lowest distance under the threshold, leftmost on ties.
//! - [`first_window`]: the per-run pass on a page. Stop at the first window
//!   under the threshold.
//!
//! Both compare a query against every same-length window of the haystack.
//! The threshold is `floor(len(query) * 0.2)`: one typo per five characters.

use tracing::debug;

use super::levenshtein::levenshtein_within;
use super::normalize::normalize;
use super::position::map_to_original;
use crate::types::MatchCandidate;

/// Maximum tolerated edit distance for a normalized query of `query_len`
/// characters: `floor(query_len * 0.2)`.
///
/// Computed in integers so lengths like 15 don't pick up float error.
#[inline]
pub fn fuzzy_threshold(query_len: usize) -> usize {
    query_len / 5
}

/// Lowest-distance window of `needle.len()` characters within `threshold`.
///
/// Updates require strict improvement, so the first window reaching the
/// eventual minimum wins. Returns `None` when the haystack is shorter than
/// the needle or no window is close enough.
pub fn best_window(haystack: &[char], needle: &[char], threshold: usize) -> Option<MatchCandidate> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }

    let mut best: Option<MatchCandidate> = None;
    for (offset, window) in haystack.windows(needle.len()).enumerate() {
        // Only a strictly better distance is worth computing exactly
        let bound = match best {
            Some(candidate) if candidate.distance == 0 => break,
            Some(candidate) => candidate.distance - 1,
            None => threshold,
        };
        if let Some(distance) = levenshtein_within(needle, window, bound) {
            best = Some(MatchCandidate { offset, distance });
        }
    }
    best
}

/// Offset of the first window of `needle.len()` characters within `threshold`.
pub fn first_window(haystack: &[char], needle: &[char], threshold: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| levenshtein_within(needle, window, threshold).is_some())
}

/// Find the best approximate occurrence of `query` in `text`.
///
/// The returned candidate's offset indexes the *normalized* text. An exact
/// occurrence (first one) short-circuits with distance 0; otherwise the
/// typo-tolerant window scan runs. An empty normalized query never matches.
pub fn find_match_candidate(text: &str, query: &str) -> Option<MatchCandidate> {
    let query = normalize(query);
    if query.is_empty() {
        return None;
    }
    let text = normalize(text);

    // Fast path: literal substring of the normalized text
    if let Some(byte_offset) = text.normalized.find(&query.normalized) {
        let offset = text.normalized[..byte_offset].chars().count();
        debug!(offset, "exact match");
        return Some(MatchCandidate {
            offset,
            distance: 0,
        });
    }

    let needle = query.chars();
    let threshold = fuzzy_threshold(needle.len());
    let candidate = best_window(&text.chars(), &needle, threshold);
    match candidate {
        Some(c) => debug!(offset = c.offset, distance = c.distance, "fuzzy match"),
        None => debug!(threshold, "no match"),
    }
    candidate
}

/// Find the best approximate occurrence of `query` in `text`, as a character
/// offset into the original `text`.
///
/// ```
/// use docpeep::find_match;
///
/// let text = "invoice number 12345";
/// assert_eq!(find_match(text, "12345"), Some(15));
/// assert_eq!(find_match("Pan-Cake MIX", "pancakemix"), Some(0));
/// assert_eq!(find_match("anything", ""), None);
/// ```
pub fn find_match(text: &str, query: &str) -> Option<usize> {
    find_match_candidate(text, query).map(|candidate| map_to_original(text, candidate.offset))
}
