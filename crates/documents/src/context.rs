//! Context assembly: tag, concatenate, and budget extracted page text.

use serde::Serialize;
use tracing::{debug, warn};

use crate::{PageExtractor, UploadedDocument};

/// Default character budget for the PDF context.
pub const DEFAULT_MAX_CHARS: usize = 12_000;

/// A document that could not be parsed and was left out of the context.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDocument {
    /// 1-based upload position
    pub position: usize,
    pub filename: String,
    pub reason: String,
}

/// The budgeted text produced for one query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedContext {
    /// Tagged text, at most `max_chars` characters long
    pub text: String,

    /// Number of documents whose pages were read (including skipped ones)
    pub documents_read: usize,

    /// Whether the accumulated text was cut down to the budget
    pub truncated: bool,

    /// Unreadable documents, in upload order
    pub skipped: Vec<SkippedDocument>,
}

impl ExtractedContext {
    /// Length of `text` in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Builds an [`ExtractedContext`] from uploaded documents.
pub struct ContextExtractor<E> {
    extractor: E,
    max_chars: usize,
}

impl<E: PageExtractor> ContextExtractor<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Override the character budget.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Extract, tag, and budget the text of `documents`.
    ///
    /// Documents are read in upload order. Once the accumulated text is over
    /// budget after a document, later documents are not read at all. The
    /// result is then cut to exactly `max_chars` characters.
    pub fn extract(&self, documents: &[UploadedDocument]) -> ExtractedContext {
        let mut ctx = ExtractedContext::default();
        let mut chars = 0usize;

        for (idx, document) in documents.iter().enumerate() {
            let position = idx + 1;
            ctx.documents_read += 1;

            match self.extractor.pages(document) {
                Ok(pages) => {
                    for page in pages.iter().filter(|p| !p.is_empty()) {
                        let tagged = format!("\n[PDF-{position}] {page}");
                        chars += tagged.chars().count();
                        ctx.text.push_str(&tagged);
                    }
                }
                Err(e) => {
                    warn!(position, filename = %document.filename, error = %e, "Skipping unreadable document");
                    ctx.skipped.push(SkippedDocument {
                        position,
                        filename: document.filename.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            if chars > self.max_chars {
                debug!(
                    position,
                    remaining = documents.len() - position,
                    "Context budget exceeded, not reading further documents"
                );
                break;
            }
        }

        if chars > self.max_chars {
            truncate_chars(&mut ctx.text, self.max_chars);
            ctx.truncated = true;
        }

        ctx
    }
}

/// Cut `text` to its first `max_chars` characters.
fn truncate_chars(text: &mut String, max_chars: usize) {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
}
