// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON page-layout sidecars.
//!
//! A document `report.txt` may ship a `report.layout.json` next to it holding
//! the text runs of each page, as produced by whatever extracted the text.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::layout::{DocumentLayout, PageLayout, TextRun, Transform, Viewport};

/// Viewport scale applied when none is configured.
pub const DEFAULT_VIEWPORT_SCALE: f64 = 1.5;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFile {
    pub pages: Vec<LayoutPage>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPage {
    /// 1-based; defaults to the page's position in `pages`
    #[serde(default)]
    pub page_number: Option<u32>,
    /// Page bounds `[x0, y0, x1, y1]` in page units
    pub view_box: [f64; 4],
    #[serde(default)]
    pub items: Vec<LayoutItem>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct LayoutItem {
    #[serde(rename = "str")]
    pub text: String,
    pub width: f64,
    pub transform: Transform,
}

impl LayoutFile {
    /// Build viewports at `scale` and number any unnumbered pages.
    pub fn into_document_layout(self, scale: f64) -> DocumentLayout {
        let pages = self
            .pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| PageLayout {
                page_number: page.page_number.unwrap_or(index as u32 + 1),
                viewport: Viewport::new(page.view_box, scale),
                runs: page
                    .items
                    .into_iter()
                    .map(|item| TextRun {
                        text: item.text,
                        width: item.width,
                        transform: item.transform,
                    })
                    .collect(),
            })
            .collect();
        DocumentLayout { pages }
    }
}

/// Sidecar path for a text document: `a/report.txt` → `a/report.layout.json`.
pub fn sidecar_path(text_path: &Path) -> PathBuf {
    text_path.with_extension("layout.json")
}

/// Parse a layout sidecar's contents.
///
/// Page numbers must be 1-based and unique across the file.
pub fn parse_layout(json: &str, path: &Path, scale: f64) -> Result<DocumentLayout, SourceError> {
    let file: LayoutFile = serde_json::from_str(json).map_err(|source| SourceError::Layout {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = file.into_document_layout(scale);
    check_page_numbers(&layout, path)?;
    Ok(layout)
}

fn check_page_numbers(layout: &DocumentLayout, path: &Path) -> Result<(), SourceError> {
    let invalid = |reason: String| SourceError::PageNumbering {
        path: path.to_path_buf(),
        reason,
    };
    let mut seen = HashSet::with_capacity(layout.pages.len());
    for page in &layout.pages {
        if page.page_number == 0 {
            return Err(invalid("page numbers start at 1".to_string()));
        }
        if !seen.insert(page.page_number) {
            return Err(invalid(format!("page {} appears twice", page.page_number)));
        }
    }
    Ok(())
}

/// Load the sidecar for `text_path`, if there is one.
pub fn load_layout(text_path: &Path, scale: f64) -> Result<Option<DocumentLayout>, SourceError> {
    let path = sidecar_path(text_path);
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(SourceError::Io { path, source }),
    };
    parse_layout(&json, &path, scale).map(Some)
}
