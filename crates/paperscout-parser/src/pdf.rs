//! PDF document parser using pdf-extract
//!
//! Extracts text content from PDF files and estimates the page count from
//! form feed characters in the extracted text.

use std::path::Path;

use crate::{DocumentParser, FileType, ParsedDocument, ParserError, Result};

/// PDF document parser
pub struct PdfParser;

impl PdfParser {
    /// Create a new PDF parser
    pub fn new() -> Self {
        Self
    }

    fn extract(&self, bytes: &[u8], label: &str) -> Result<ParsedDocument> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ParserError::PdfError(e.to_string()))?;

        // Rough page estimate from form feed characters.
        let breaks = text.matches('\x0C').count() as u32;
        let page_count = if breaks > 0 { Some(breaks + 1) } else { None };

        let mut doc = ParsedDocument::new(label, FileType::Pdf).with_content(text);
        doc.page_count = page_count;
        Ok(doc)
    }
}

impl Default for PdfParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for PdfParser {
    fn parse(&self, path: &Path) -> Result<ParsedDocument> {
        let bytes = std::fs::read(path).map_err(|e| ParserError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        self.extract(&bytes, &path.display().to_string())
    }

    fn parse_bytes(&self, bytes: &[u8], name: &str) -> Result<ParsedDocument> {
        self.extract(bytes, name)
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::Pdf]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_types() {
        let parser = PdfParser::new();
        assert!(parser.can_parse(FileType::Pdf));
        assert!(!parser.can_parse(FileType::PlainText));
    }

    #[test]
    fn test_invalid_pdf_bytes_error() {
        let parser = PdfParser::new();
        let err = parser.parse_bytes(b"not a pdf", "report.pdf").unwrap_err();
        assert!(matches!(err, ParserError::PdfError(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let parser = PdfParser::new();
        let err = parser.parse(Path::new("/nonexistent/report.pdf")).unwrap_err();
        assert!(matches!(err, ParserError::IoError { .. }));
    }
}
