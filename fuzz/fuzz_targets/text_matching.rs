// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for document-level matching.
//!
//! Arbitrary Unicode in both text and query. Nothing may panic, and every
//! reported offset must point inside the original text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use docpeep::search::extract_snippet;
use docpeep::{find_match, find_match_candidate, fuzzy_threshold, map_to_original, normalize};

#[derive(Debug, Arbitrary)]
struct MatchInput {
    text: String,
    query: String,
    offset: u16,
}

fuzz_target!(|input: MatchInput| {
    let text: String = input.text.chars().take(400).collect();
    let query: String = input.query.chars().take(40).collect();
    let text_len = text.chars().count();

    // INVARIANT 1: mapping never overshoots
    assert!(map_to_original(&text, usize::from(input.offset)) <= text_len);

    // INVARIANT 2: candidates respect the threshold and point into the text
    if let Some(candidate) = find_match_candidate(&text, &query) {
        let normalized_query = normalize(&query);
        assert!(candidate.distance <= fuzzy_threshold(normalized_query.len()));
        assert!(candidate.offset <= normalize(&text).len());
    }

    // INVARIANT 3: snippets can be cut around any reported offset
    if let Some(offset) = find_match(&text, &query) {
        assert!(offset <= text_len);
        let _ = extract_snippet(&text, offset, query.chars().count(), 50);
    }
});
