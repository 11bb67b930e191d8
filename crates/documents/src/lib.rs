//! Document handling for LitLens.
//!
//! Turns a list of uploaded PDFs into one tagged, budgeted text blob that
//! can be embedded in an instruction string:
//!
//! ```text
//! \n[PDF-1] <page 1 of doc 1>\n[PDF-1] <page 2 of doc 1>\n[PDF-2] <page 1 of doc 2>
//! ```
//!
//! Page extraction is pluggable through [`PageExtractor`]; the production
//! implementation is [`PdfPageExtractor`].

pub mod context;
pub mod pdf;

pub use context::{ContextExtractor, DEFAULT_MAX_CHARS, ExtractedContext, SkippedDocument};
pub use pdf::PdfPageExtractor;

use std::sync::Arc;

use litlens_core::error::ExtractionError;

/// A file uploaded for one request. Never stored beyond that request.
#[derive(Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

impl std::fmt::Debug for UploadedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedDocument")
            .field("filename", &self.filename)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Splits one document into the text of its pages, in page order.
///
/// Pages with no extractable text may be returned as empty strings.
pub trait PageExtractor: Send + Sync {
    fn pages(&self, document: &UploadedDocument) -> Result<Vec<String>, ExtractionError>;
}

impl<T: PageExtractor + ?Sized> PageExtractor for Arc<T> {
    fn pages(&self, document: &UploadedDocument) -> Result<Vec<String>, ExtractionError> {
        (**self).pages(document)
    }
}
