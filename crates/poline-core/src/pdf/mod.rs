//! PDF page-text source.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the raw text of every page, in page order.
    fn extract_page_texts(&self) -> Result<Vec<String>>;
}

/// Load a PDF and return its page texts.
pub fn extract_page_texts(data: &[u8]) -> Result<Vec<String>> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    extractor.extract_page_texts()
}
