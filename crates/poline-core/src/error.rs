//! Error types for the poline-core library.

use thiserror::Error;

/// Main error type for the poline library.
#[derive(Error, Debug)]
pub enum PolineError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Line-item extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Extraction was requested before a document was loaded.
    #[error("no document loaded")]
    NotLoaded,
}

/// Precondition violations on line sequences handed to the extractor.
///
/// Lines that merely fail to match a grammar are never errors; these variants
/// only cover input the upstream text source should never have produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A line in the sequence is empty.
    #[error("line {index} is empty")]
    EmptyLine { index: usize },

    /// A line in the sequence carries leading or trailing whitespace.
    #[error("line {index} is not trimmed: {line:?}")]
    UntrimmedLine { index: usize, line: String },
}

/// Result type for the poline library.
pub type Result<T> = std::result::Result<T, PolineError>;
