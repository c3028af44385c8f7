// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching primitives: normalization, edit distance, window scans,
//! and the offset mapping that ties normalized text back to the original.
//!
//! Both the document-level matcher and the per-run page locator are built from
//! these pieces, so the threshold and folding rules can't drift apart.

mod levenshtein;
mod matcher;
mod normalize;
mod position;

pub use levenshtein::*;
pub use matcher::*;
pub use normalize::*;
pub use position::*;
