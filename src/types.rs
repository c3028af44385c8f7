// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The values a search produces.
//!
//! Everything here is created fresh for one search request and dropped once
//! the response is built. Nothing is cached across requests.
//!
//! # Invariants
//!
//! - **MatchCandidate**: `distance <= fuzzy_threshold(query_len)`; 0 means the
//!   exact fast path matched.
//! - **PageMatch**: `page_number >= 1 ∧ !boxes.is_empty()`.
//! - **SearchResult**: `primary_page == matched_pages[0]` when any page
//!   matched, else 1; `page_count == matched_pages.len()`.
//!
//! Build results through [`SearchResult::new`] so the page invariants can't be
//! broken by hand.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::layout::BoundingBox;

/// Best approximate occurrence of a query in normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchCandidate {
    /// Character offset into the normalized text.
    pub offset: usize,
    /// Edit distance of the matched window (0 = exact).
    pub distance: usize,
}

/// A page with at least one matching text run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMatch {
    /// 1-based page number.
    pub page_number: u32,
    /// Viewport rectangles of the matching runs, in run order.
    pub boxes: Vec<BoundingBox>,
}

/// An encoded raster preview of the first matching page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// MIME type of `data`, e.g. `image/png`.
    pub media_type: String,
    pub data: Vec<u8>,
}

impl Preview {
    pub fn png(data: Vec<u8>) -> Self {
        Self {
            media_type: "image/png".to_string(),
            data,
        }
    }

    /// `data:<media type>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, STANDARD.encode(&self.data))
    }
}

/// A document the source can hand out text (and maybe layout) for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Stable identifier, reported as the result `path`.
    pub id: String,
    pub modified_at: DateTime<Utc>,
    /// Source-specific location. For the filesystem source, the text file.
    pub location: PathBuf,
}

impl DocumentRef {
    pub fn new(id: impl Into<String>, modified_at: DateTime<Utc>, location: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            modified_at,
            location: location.into(),
        }
    }
}

/// One matched document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    #[serde(rename = "path")]
    pub document_id: String,
    #[serde(rename = "date", serialize_with = "serialize_iso8601")]
    pub modified_at: DateTime<Utc>,
    pub snippet: String,
    #[serde(rename = "preview", serialize_with = "serialize_preview")]
    pub preview: Option<Preview>,
    #[serde(rename = "matchPage")]
    pub primary_page: u32,
    #[serde(rename = "matchPages")]
    pub matched_pages: Vec<u32>,
    #[serde(rename = "pageCount")]
    pub page_count: usize,
}

impl SearchResult {
    /// Assemble a result, deriving `primary_page` and `page_count` from
    /// `matched_pages`.
    pub fn new(
        doc: &DocumentRef,
        snippet: String,
        matched_pages: Vec<u32>,
        preview: Option<Preview>,
    ) -> Self {
        Self {
            document_id: doc.id.clone(),
            modified_at: doc.modified_at,
            snippet,
            preview,
            primary_page: matched_pages.first().copied().unwrap_or(1),
            page_count: matched_pages.len(),
            matched_pages,
        }
    }
}

/// Successful search response body.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn format_iso8601(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_iso8601<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso8601(at))
}

fn serialize_preview<S: Serializer>(
    preview: &Option<Preview>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match preview {
        Some(preview) => serializer.serialize_some(&preview.to_data_uri()),
        None => serializer.serialize_none(),
    }
}
