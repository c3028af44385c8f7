// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Failures come in four sizes, and each has one home:
//!
//! | Failure                         | Type                          | Effect                    |
//! |---------------------------------|-------------------------------|---------------------------|
//! | Empty query                     | `SearchError::EmptyQuery`     | Search refused            |
//! | Corpus listing fails            | `SearchError::CorpusUnavailable` | Search fails           |
//! | One document can't be read      | `SourceError` (logged)        | Document left out         |
//! | Layout or preview fails         | `SourceError`/`RenderError` (logged) | Snippet-only result |
//!
//! "No matches" is never an error: it is an empty result list.

use std::path::PathBuf;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors surfaced to the caller of a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Empty or missing query
    #[error("Query is required")]
    EmptyQuery,

    /// The document source could not list the corpus at all
    #[error("Corpus unavailable: {0}")]
    CorpusUnavailable(#[source] SourceError),

    /// The request was cancelled or ran past its deadline
    #[error("Search cancelled")]
    Cancelled,

    /// The worker pool could not be started
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

/// Errors raised by a document source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid layout in {path}: {source}")]
    Layout {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A sidecar page number is zero or repeated
    #[error("Invalid layout in {path}: {reason}")]
    PageNumbering { path: PathBuf, reason: String },

    /// Text could not be extracted from a document
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// No part of the corpus is reachable
    #[error("{0}")]
    Unavailable(String),
}

/// Errors raised while rendering a preview.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Rendering not supported for this document")]
    Unsupported,

    #[error("Rendering failed: {0}")]
    Failed(String),
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A setting outside its allowed range
    #[error("Invalid config {path}: {field} {reason}")]
    InvalidValue {
        path: PathBuf,
        field: &'static str,
        reason: &'static str,
    },

    /// A `--root` argument that names no directory
    #[error("Invalid corpus root '{0}': expected key=path or a directory")]
    InvalidRoot(String),
}
