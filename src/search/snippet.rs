// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippet extraction around a match in the original text.

/// Characters of context kept on each side of a match.
pub const DEFAULT_SNIPPET_CONTEXT: usize = 50;

/// Ellipsis marking a snippet clamped away from a document edge.
pub const ELLIPSIS: &str = "...";

/// Human-readable excerpt of `text` around `match_offset`.
///
/// Takes characters `[match_offset - context, match_offset + query_len + context]`
/// clamped to the text, collapses whitespace runs to single spaces, trims, and
/// marks a cut start or end with `...`. Offsets and lengths are in characters.
pub fn extract_snippet(text: &str, match_offset: usize, query_len: usize, context: usize) -> String {
    let total = text.chars().count();
    let start = match_offset.saturating_sub(context).min(total);
    let end = match_offset
        .saturating_add(query_len)
        .saturating_add(context)
        .min(total);

    let window: String = text.chars().skip(start).take(end.saturating_sub(start)).collect();
    let mut snippet = window.split_whitespace().collect::<Vec<_>>().join(" ");

    if start > 0 {
        snippet.insert_str(0, ELLIPSIS);
    }
    if end < total {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}
