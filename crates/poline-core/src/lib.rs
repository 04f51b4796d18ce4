//! Core library for purchase-order line-item extraction.
//!
//! This crate provides:
//! - Record grammar for the two-line description/detail layout
//! - Line-pair extraction with noise skipping and page-terminal markers
//! - A page driver that runs extraction over a whole document
//! - PDF page text extraction (feature `pdf`) and text-dump page sources

pub mod error;
pub mod extract;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod source;

pub use error::{ExtractionError, PdfError, PolineError, Result};
pub use extract::{ExtractionResult, LinePairExtractor, LineSequence, PageDriver, PageReport};
pub use models::config::PolineConfig;
pub use models::record::{FIELDS, LineRecord};
#[cfg(feature = "pdf")]
pub use pdf::{PdfExtractor, PdfProcessor};
