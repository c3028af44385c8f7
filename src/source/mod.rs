// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The boundary between the matching core and the outside world.
//!
//! A [`DocumentSource`] lists documents and hands out their text and, when it
//! has it, their page layout. A [`PageRenderer`] turns a page plus a crop
//! rectangle into an encoded image. The search core owns neither: both are
//! injected, and both must be safe to call from many workers at once.

pub mod fs;
pub mod layout_file;

use crate::error::{RenderError, SourceError};
use crate::layout::{DocumentLayout, PageLayout, RenderRequest};
use crate::types::{DocumentRef, Preview};

pub use self::fs::{CorpusRoot, FsSource};

/// Yields documents, their full text, and optional page layout.
pub trait DocumentSource: Send + Sync {
    /// Every document in the corpus, in a stable order.
    ///
    /// An error here means the corpus as a whole is unreachable.
    fn documents(&self) -> Result<Vec<DocumentRef>, SourceError>;

    /// Full extractable text of one document.
    fn text(&self, doc: &DocumentRef) -> Result<String, SourceError>;

    /// Page layout, if the source has any for this document.
    fn layout(&self, _doc: &DocumentRef) -> Result<Option<DocumentLayout>, SourceError> {
        Ok(None)
    }
}

/// Renders a cropped, highlighted preview of one page.
pub trait PageRenderer: Send + Sync {
    fn render(
        &self,
        doc: &DocumentRef,
        page: &PageLayout,
        request: &RenderRequest,
    ) -> Result<Preview, RenderError>;
}
