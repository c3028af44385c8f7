// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page match locator: which runs on which pages match a query, and where.
//!
//! The per-run policy is cheaper than the document-level matcher, since it
//! runs once per run rather than once per document:
//!
//! 1. Exact containment of the normalized query in the normalized run.
//! 2. Run and query within `threshold` of each other in length: compare the
//!    whole run against the whole query.
//! 3. Otherwise: slide a query-sized window across the run and accept the
//!    first window within `threshold`.
//!
//! Branches 2 and 3 are exclusive. A run much longer than the query is only
//! ever window-scanned, and a run about as long as the query is only ever
//! compared whole.
//!
//! Only the first matching page gets a preview. Its crop centres on the first
//! matching run, padded twice as much horizontally as vertically and clamped
//! to the viewport.

use std::collections::BTreeMap;

use tracing::debug;

use super::{BoundingBox, DocumentLayout, PageLayout, TextRun, Viewport};
use crate::fuzzy::{first_window, fuzzy_threshold, levenshtein_within, normalize};
use crate::types::PageMatch;

/// Horizontal crop padding around the first match, in viewport units.
/// Vertical padding is half of this.
pub const DEFAULT_PREVIEW_PADDING: f64 = 100.0;

/// Highlight fill drawn over matching runs in previews: gold at 40% opacity.
pub const HIGHLIGHT_RGBA: [f64; 4] = [255.0, 215.0, 0.0, 0.4];

/// What to draw for the preview of the first matching page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub page_number: u32,
    /// Every matching box on the page.
    pub highlights: Vec<BoundingBox>,
    /// RGBA fill for the highlights.
    pub highlight_fill: [f64; 4],
    /// Region of the rendered viewport to keep.
    pub crop: BoundingBox,
}

/// Does a run match a query already folded into characters?
fn run_matches_normalized(run: &[char], query: &[char]) -> bool {
    if query.is_empty() {
        return false;
    }
    if run.windows(query.len()).any(|w| w == query) {
        return true;
    }
    if run.is_empty() {
        return false;
    }

    let threshold = fuzzy_threshold(query.len());
    if run.len().abs_diff(query.len()) <= threshold {
        // Whole-run candidate
        levenshtein_within(query, run, threshold).is_some()
    } else {
        first_window(run, query, threshold).is_some()
    }
}

/// Does a run's text match `query` under the per-run policy?
pub fn run_matches(run_text: &str, query: &str) -> bool {
    let run = normalize(run_text).chars();
    let query = normalize(query).chars();
    run_matches_normalized(&run, &query)
}

/// Viewport rectangle of a run.
///
/// The run occupies `[x, y, x + width, y + height]` in page space, where
/// `(x, y)` is its placement origin and `height` is the transform's vertical
/// scale.
pub fn run_box(run: &TextRun, viewport: &Viewport) -> BoundingBox {
    let (x, y) = run.transform.origin();
    let height = run.transform.vertical_scale();
    viewport.to_viewport_rect([x, y, x + run.width, y + height])
}

/// Boxes of every run on `page` that matches the folded `query`.
fn page_boxes(page: &PageLayout, query: &[char]) -> Vec<BoundingBox> {
    page.runs
        .iter()
        .filter(|run| run_matches_normalized(&normalize(&run.text).chars(), query))
        .inspect(|run| debug!(page = page.page_number, run = %run.text, "run matched"))
        .map(|run| run_box(run, &page.viewport))
        .collect()
}

/// Match a single page. `None` if no run on it matches.
pub fn locate_page(page: &PageLayout, query: &str) -> Option<PageMatch> {
    let query = normalize(query).chars();
    let boxes = page_boxes(page, &query);
    (!boxes.is_empty()).then_some(PageMatch {
        page_number: page.page_number,
        boxes,
    })
}

/// Match every page of a document.
///
/// Boxes are aggregated per page number; the result is in ascending page
/// order and holds only pages with at least one matching run.
pub fn locate_matches(layout: &DocumentLayout, query: &str) -> Vec<PageMatch> {
    let query = normalize(query).chars();
    if query.is_empty() {
        return Vec::new();
    }

    let mut by_page: BTreeMap<u32, Vec<BoundingBox>> = BTreeMap::new();
    for page in &layout.pages {
        let boxes = page_boxes(page, &query);
        if !boxes.is_empty() {
            by_page.entry(page.page_number).or_default().extend(boxes);
        }
    }

    by_page
        .into_iter()
        .map(|(page_number, boxes)| PageMatch { page_number, boxes })
        .collect()
}

/// Crop rectangle around `target`, clamped to the viewport.
///
/// `x = max(0, target.x - pad)`, `y = max(0, target.y - pad/2)`,
/// `width = min(viewport.width - x, target.width + 2*pad)`,
/// `height = min(viewport.height - y, target.height + pad)`.
pub fn crop_rect(target: &BoundingBox, viewport: &Viewport, padding: f64) -> BoundingBox {
    let x = (target.x - padding).max(0.0);
    let y = (target.y - padding / 2.0).max(0.0);
    BoundingBox {
        x,
        y,
        width: (viewport.width - x).min(target.width + padding * 2.0).max(0.0),
        height: (viewport.height - y).min(target.height + padding).max(0.0),
    }
}

/// Preview request for the first matching page, if any page matched.
///
/// Other matching pages never produce imagery.
pub fn preview_request(
    layout: &DocumentLayout,
    matches: &[PageMatch],
    padding: f64,
) -> Option<RenderRequest> {
    let first = matches.first()?;
    let page = layout.page(first.page_number)?;
    let target = first.boxes.first()?;
    Some(RenderRequest {
        page_number: first.page_number,
        highlights: first.boxes.clone(),
        highlight_fill: HIGHLIGHT_RGBA,
        crop: crop_rect(target, &page.viewport, padding),
    })
}
