// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance, plain and bounded.
//!
//! Standard Levenshtein: insertion, deletion and substitution each cost 1.
//! The DP table is `(len(b)+1) × (len(a)+1)` with the index itself as the base
//! case; only two rows are ever alive.
//!
//! The bounded variant is what the sliding-window scans use. Two early exits:
//! `|len(a) - len(b)|` is a lower bound on edit distance, and once every cell
//! of a row exceeds the bound no later row can come back under it. Both are
//! sound: `levenshtein_within(a, b, max) == Some(d)` exactly when
//! `levenshtein(a, b) == d && d <= max`.

/// Levenshtein distance between two character sequences.
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    // Row `i` holds distances from b[..i] to every prefix of a.
    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr = vec![0; a.len() + 1];

    for (i, bc) in b.iter().enumerate() {
        curr[0] = i + 1;
        for (j, ac) in a.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j] + cost) // substitution
                .min(curr[j] + 1) // insertion
                .min(prev[j + 1] + 1); // deletion
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[a.len()]
}

/// Levenshtein distance between two strings, counted in characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein(&a, &b)
}

/// Edit distance if it is at most `max`, otherwise `None`.
///
/// Bounded Levenshtein with two early-exit paths:
/// 1. If length difference exceeds `max`, return immediately
/// 2. If minimum row value exceeds `max`, abandon the DP early
pub fn levenshtein_within(a: &[char], b: &[char], max: usize) -> Option<usize> {
    // Early-exit: length difference is a lower bound on edit distance
    if a.len().abs_diff(b.len()) > max {
        return None;
    }

    let mut dp: Vec<usize> = (0..=a.len()).collect();
    for (i, bc) in b.iter().enumerate() {
        let mut diag = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, ac) in a.iter().enumerate() {
            let above = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (above + 1).min(dp[j] + 1).min(diag + cost);
            diag = above;
            min_row = min_row.min(dp[j + 1]);
        }

        // Early-exit: if minimum in this row exceeds max, no point continuing
        if min_row > max {
            return None;
        }
    }

    let distance = dp[a.len()];
    (distance <= max).then_some(distance)
}
