// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Mapping normalized offsets back into the original text.

use super::normalize::folded_len;

/// Convert an offset into `normalize(original)` into a character offset into
/// `original`.
///
/// Walks the original text folding one character at a time, exactly as the
/// normalizer does, until the folded output covers `normalized_offset`
/// characters. Characters that fold to nothing are then skipped, so the result
/// lands on the character that produces the requested normalized character.
/// A `normalized_offset` past the end yields `original`'s length.
///
/// Round-trip guarantee: if `normalize(original)` has `m` at
/// `normalized_offset`, then `normalize(&original[o..])` starts with `m`
/// (for `o` the returned offset, in characters), unless the offset falls inside
/// a multi-character expansion such as `&` → `and`.
///
/// ```
/// use docpeep::map_to_original;
///
/// // "invoicenumber12345": "1" is normalized offset 13, original offset 15
/// assert_eq!(map_to_original("invoice number 12345", 13), 15);
/// ```
pub fn map_to_original(original: &str, normalized_offset: usize) -> usize {
    let mut normalized = 0;
    let mut consumed = 0;
    let mut chars = original.chars().peekable();

    while normalized < normalized_offset {
        let Some(c) = chars.next() else {
            return consumed;
        };
        normalized += folded_len(c);
        consumed += 1;
    }

    // Land on the next contributing character
    while chars.peek().is_some_and(|&c| folded_len(c) == 0) {
        chars.next();
        consumed += 1;
    }

    consumed
}
