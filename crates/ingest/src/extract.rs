//! Text extraction from uploaded files.

use docsage_core::error::ExtractionError;
use tracing::debug;

use crate::chunker::chunk_text;

/// Extracted document text plus its fixed-size chunks.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub content: String,
    pub chunks: Vec<String>,
}

/// Extract text from an uploaded file and split it into chunks.
///
/// A `.pdf` name (case-insensitive) selects per-page PDF extraction; pages
/// that yield no text are skipped, the rest are joined with `\n`. Any other
/// name is decoded as UTF-8 plain text.
pub fn parse_document(file_name: &str, bytes: &[u8]) -> Result<ParsedDocument, ExtractionError> {
    let content = if file_name.to_ascii_lowercase().ends_with(".pdf") {
        extract_pdf_text(bytes)?
    } else {
        String::from_utf8(bytes.to_vec()).map_err(|e| ExtractionError::Encoding(e.to_string()))?
    };

    let chunks = chunk_text(&content);
    debug!(
        file_name,
        content_chars = content.chars().count(),
        chunks = chunks.len(),
        "document parsed"
    );
    Ok(ParsedDocument { content, chunks })
}

/// Per-page extraction; silently skips pages with no extractable text.
fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    Ok(pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_decoded_as_utf8() {
        let doc = parse_document("notes.txt", "hello world".as_bytes()).unwrap();
        assert_eq!(doc.content, "hello world");
        assert_eq!(doc.chunks, vec!["hello world"]);
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        // Garbage bytes with a .PDF name must go down the PDF path and fail
        // there, not be decoded as text.
        let err = parse_document("REPORT.PDF", b"not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn invalid_utf8_fails_with_encoding_error() {
        let err = parse_document("data.txt", &[0xff, 0xfe, 0x80]).unwrap_err();
        assert!(matches!(err, ExtractionError::Encoding(_)));
    }

    #[test]
    fn empty_file_yields_empty_content_and_no_chunks() {
        let doc = parse_document("empty.txt", b"").unwrap();
        assert!(doc.content.is_empty());
        assert!(doc.chunks.is_empty());
    }

    #[test]
    fn long_text_is_split_into_1500_char_windows() {
        let text = "a".repeat(3000);
        let doc = parse_document("long.txt", text.as_bytes()).unwrap();
        assert_eq!(doc.chunks.len(), 2);
        assert_eq!(doc.chunks[0].len(), 1500);
        assert_eq!(doc.chunks[1].len(), 1500);
        assert_eq!(doc.chunks.concat(), doc.content);
    }

    #[test]
    fn unreadable_pdf_is_an_extraction_error() {
        let err = parse_document("broken.pdf", &[0x25, 0x50, 0x44, 0x46, 0x00]).unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }
}
