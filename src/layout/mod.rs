// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page geometry: text runs, placement transforms, and viewports.
//!
//! A page's text comes as runs, each a string placed by a 2D affine transform
//! `[a, b, c, d, e, f]` in page space (origin bottom-left, y up). The viewport
//! maps page space to image space (origin top-left, y down) at some scale.
//! Matching runs are reported as [`BoundingBox`]es in viewport units.

pub mod locator;

use serde::{Deserialize, Serialize};

pub use locator::*;

/// A 2D affine transform `[a, b, c, d, e, f]` mapping `(x, y)` to
/// `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transform(pub [f64; 6]);

impl Transform {
    pub const IDENTITY: Transform = Transform([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }

    /// Translation component: where the transform places the origin.
    #[inline]
    pub fn origin(&self) -> (f64, f64) {
        (self.0[4], self.0[5])
    }

    /// Length of the transformed y unit vector, `sqrt(c² + d²)`.
    ///
    /// For a text run this is the rendered font size, used as the run height.
    #[inline]
    pub fn vertical_scale(&self) -> f64 {
        self.0[2].hypot(self.0[3])
    }
}

/// Axis-aligned rectangle in viewport units.
///
/// Always normalized: `width >= 0 ∧ height >= 0`, whatever the orientation of
/// the transform that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Rectangle spanning two opposite corners given in any order.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Page-to-image mapping at a fixed scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub transform: Transform,
}

impl Viewport {
    /// Unrotated viewport over a page `view_box` `[x0, y0, x1, y1]`.
    ///
    /// Transform is `[s, 0, 0, -s, -s*x0, s*y1]`: y flips so the top edge of
    /// the page lands on image row 0.
    pub fn new(view_box: [f64; 4], scale: f64) -> Self {
        let [x0, y0, x1, y1] = view_box;
        let (x0, x1) = (x0.min(x1), x0.max(x1));
        let (y0, y1) = (y0.min(y1), y0.max(y1));
        Self {
            width: scale * (x1 - x0),
            height: scale * (y1 - y0),
            scale,
            transform: Transform([scale, 0.0, 0.0, -scale, -scale * x0, scale * y1]),
        }
    }

    /// Map a page-space rectangle `[x0, y0, x1, y1]` to a normalized viewport box.
    pub fn to_viewport_rect(&self, rect: [f64; 4]) -> BoundingBox {
        let (ax, ay) = self.transform.apply(rect[0], rect[1]);
        let (bx, by) = self.transform.apply(rect[2], rect[3]);
        BoundingBox::from_corners(ax, ay, bx, by)
    }

    /// Whole-viewport rectangle.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox {
            x: 0.0,
            y: 0.0,
            width: self.width,
            height: self.height,
        }
    }
}

/// A contiguous piece of text on a page with its own placement.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Advance width in page units.
    pub width: f64,
    pub transform: Transform,
}

/// One page's text runs and viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// 1-based page number.
    pub page_number: u32,
    pub viewport: Viewport,
    pub runs: Vec<TextRun>,
}

/// Per-page layout for a whole document, pages in reading order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentLayout {
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn page(&self, page_number: u32) -> Option<&PageLayout> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }
}
