//! Line-item extraction from page text.
//!
//! A record spans two physical lines: a description line with the line
//! number, part, quantity and prices, followed by a detail line with the
//! sub-line number and part description. [`LinePairExtractor`] pairs such
//! lines on a single page; [`PageDriver`] runs it across a document.

mod driver;
pub mod grammar;
mod lines;
mod pairing;
pub mod patterns;

pub use driver::{split_pages, ExtractionResult, PageDriver, PageReport, FORM_FEED};
pub use grammar::{DescriptionGrammar, DescriptionLine, DetailGrammar, DetailLine, LineGrammar};
pub use lines::LineSequence;
pub use pairing::{LinePairExtractor, PageScan, Step, DEFAULT_TERMINAL_MARKERS};
