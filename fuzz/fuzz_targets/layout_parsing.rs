// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Layout sidecars under adversarial input.
//!
//! A corrupt `.layout.json` must produce an error, never a panic, and a
//! parsed layout must survive page matching and crop computation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;
use docpeep::layout::{locate_matches, preview_request, DEFAULT_PREVIEW_PADDING};
use docpeep::source::layout_file::parse_layout;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(layout) = parse_layout(json, Path::new("fuzz.layout.json"), 1.5) else {
        return;
    };

    for pair in layout.pages.windows(2) {
        assert_ne!(pair[0].page_number, pair[1].page_number);
    }
    assert!(layout.pages.iter().all(|p| p.page_number >= 1));

    let matches = locate_matches(&layout, "invoice");
    for page in &matches {
        // INVARIANT: only pages with boxes are reported
        assert!(!page.boxes.is_empty());
    }
    if let Some(request) = preview_request(&layout, &matches, DEFAULT_PREVIEW_PADDING) {
        assert!(request.crop.x >= 0.0 && request.crop.y >= 0.0);
    }
});
