// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for bounded edit distance.
//!
//! `levenshtein_within` prunes aggressively. Every pruned answer must still
//! agree with the full two-row computation.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use docpeep::{levenshtein, levenshtein_within};

#[derive(Debug, Arbitrary)]
struct DistanceInput {
    a: String,
    b: String,
    max: u8,
}

fuzz_target!(|input: DistanceInput| {
    // Cap lengths to avoid timeouts
    let a: Vec<char> = input.a.chars().take(64).collect();
    let b: Vec<char> = input.b.chars().take(64).collect();
    let max = usize::from(input.max % 16);

    let full = levenshtein(&a, &b);

    // INVARIANT 1: bounded result is the true distance, or the true distance exceeds max
    match levenshtein_within(&a, &b, max) {
        Some(d) => assert_eq!(d, full, "bounded distance disagrees for {:?} / {:?}", a, b),
        None => assert!(full > max, "pruned a distance {} <= {}", full, max),
    }

    // INVARIANT 2: symmetric
    assert_eq!(full, levenshtein(&b, &a));

    // INVARIANT 3: length difference is a lower bound
    assert!(a.len().abs_diff(b.len()) <= full);
});
