// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text canonicalization for comparison.
//!
//! Every comparison in the crate happens on folded text: lowercase, `&` spelled
//! out as `and`, and nothing but letters and digits. Whitespace and punctuation
//! vanish, so `"Pan-Cake MIX"` and `"pancakemix"` compare equal.
//!
//! Folding is defined one source character at a time ([`fold_char`]). That is
//! what lets the position mapper walk the original text and stay in lock-step
//! with the normalizer: both consume the exact same per-character expansion.
//!
//! All offsets are character offsets (Unicode scalar values), never bytes.

/// A source text reduced to its comparable form.
///
/// The mapping from each normalized character back to its source character is
/// not stored; it is reconstructed on demand by
/// [`map_to_original`](super::map_to_original) from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// Folded text: lowercase letters and digits only.
    pub normalized: String,
    /// Length of the source text in characters.
    pub source_len: usize,
}

impl NormalizedText {
    /// Normalized characters, for windowed comparison.
    pub fn chars(&self) -> Vec<char> {
        self.normalized.chars().collect()
    }

    /// Length of the normalized text in characters.
    pub fn len(&self) -> usize {
        self.normalized.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Fold one source character, emitting zero or more normalized characters.
///
/// - `&` emits `a`, `n`, `d`
/// - anything else is lowercased, and each lowercase character that is a
///   letter or digit is emitted
///
/// Characters that emit nothing (spaces, punctuation, symbols, combining marks)
/// are dropped but still count as consumed source.
#[inline]
pub fn fold_char(c: char, mut emit: impl FnMut(char)) {
    if c == '&' {
        "and".chars().for_each(&mut emit);
        return;
    }
    for lower in c.to_lowercase() {
        if lower.is_alphanumeric() {
            emit(lower);
        }
    }
}

/// Number of normalized characters one source character folds to.
#[inline]
pub fn folded_len(c: char) -> usize {
    let mut n = 0;
    fold_char(c, |_| n += 1);
    n
}

/// Normalize a string for approximate comparison.
///
/// Pure and deterministic. Idempotent on its own output:
/// `normalize(&normalize(x).normalized).normalized == normalize(x).normalized`.
///
/// ```
/// use docpeep::normalize;
///
/// assert_eq!(normalize("A & B").normalized, normalize("A and B").normalized);
/// assert_eq!(normalize("Pan-Cake MIX").normalized, "pancakemix");
/// ```
pub fn normalize(text: &str) -> NormalizedText {
    let mut normalized = String::with_capacity(text.len());
    let mut source_len = 0;
    for c in text.chars() {
        fold_char(c, |out| normalized.push(out));
        source_len += 1;
    }
    NormalizedText {
        normalized,
        source_len,
    }
}
