//! `pdf-extract` backed page extraction.

use std::panic::{AssertUnwindSafe, catch_unwind};

use litlens_core::error::ExtractionError;
use tracing::debug;

use crate::{PageExtractor, UploadedDocument};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extracts page text from PDF bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfPageExtractor;

impl PdfPageExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PageExtractor for PdfPageExtractor {
    fn pages(&self, document: &UploadedDocument) -> Result<Vec<String>, ExtractionError> {
        if !looks_like_pdf(&document.bytes) {
            return Err(ExtractionError::NotPdf {
                filename: document.filename.clone(),
            });
        }

        // pdf-extract panics on some malformed inputs instead of returning Err.
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&document.bytes)
        }));

        match outcome {
            Ok(Ok(pages)) => {
                debug!(filename = %document.filename, pages = pages.len(), "Extracted PDF pages");
                Ok(pages)
            }
            Ok(Err(e)) => Err(ExtractionError::Unreadable {
                filename: document.filename.clone(),
                reason: e.to_string(),
            }),
            Err(_) => Err(ExtractionError::Unreadable {
                filename: document.filename.clone(),
                reason: "parser aborted on malformed document".into(),
            }),
        }
    }
}

/// PDF files start with `%PDF-`, possibly after a few junk bytes.
fn looks_like_pdf(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_bytes() {
        let doc = UploadedDocument::new("notes.txt", b"just some text".to_vec());
        let err = PdfPageExtractor.pages(&doc).unwrap_err();
        assert!(matches!(err, ExtractionError::NotPdf { ref filename } if filename == "notes.txt"));
    }

    #[test]
    fn truncated_pdf_is_unreadable_not_a_panic() {
        let doc = UploadedDocument::new("broken.pdf", b"%PDF-1.7\n1 0 obj\n<<".to_vec());
        let err = PdfPageExtractor.pages(&doc).unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable { .. }));
    }

    #[test]
    fn magic_detection_tolerates_leading_bytes() {
        assert!(looks_like_pdf(b"\xef\xbb\xbf%PDF-1.4"));
        assert!(!looks_like_pdf(b""));
        assert!(!looks_like_pdf(b"PK\x03\x04"));
    }
}
