//! Document-level driver: runs the line-pair extractor over every page.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::lines::LineSequence;
use super::pairing::LinePairExtractor;
use crate::models::record::LineRecord;

/// Page separator used by plain-text dumps.
pub const FORM_FEED: char = '\u{0c}';

/// Per-page extraction summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    /// Page number (1-indexed).
    pub page: u32,
    /// Non-empty lines on the page.
    pub lines: usize,
    /// Records produced from the page.
    pub records: usize,
    /// Whether a terminal marker ended the scan.
    pub terminated: bool,
}

/// Result of extracting a whole document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Records in page order, then in the order they appear on the page.
    pub records: Vec<LineRecord>,
    /// One report per scanned page.
    pub pages: Vec<PageReport>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Runs a [`LinePairExtractor`] over the pages of a document.
#[derive(Debug, Clone)]
pub struct PageDriver {
    extractor: LinePairExtractor,
    /// Scan pages on the rayon pool.
    parallel: bool,
    /// Maximum pages to scan (0 = unlimited).
    max_pages: usize,
}

impl PageDriver {
    /// Create a driver around an extractor.
    pub fn new(extractor: LinePairExtractor) -> Self {
        Self {
            extractor,
            parallel: false,
            max_pages: 0,
        }
    }

    /// Enable parallel page scanning. Has no effect without the `parallel`
    /// feature.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Limit the number of pages scanned.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Extract records from raw page texts, one entry per page.
    pub fn extract_pages<S>(&self, pages: &[S]) -> ExtractionResult
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();

        let pages = if self.max_pages > 0 && pages.len() > self.max_pages {
            debug!(
                "Limiting extraction to {} of {} pages",
                self.max_pages,
                pages.len()
            );
            &pages[..self.max_pages]
        } else {
            pages
        };

        info!("Extracting line items from {} pages", pages.len());

        let scanned = self.scan_all(pages);

        let mut records = Vec::new();
        let mut reports = Vec::with_capacity(scanned.len());
        for (report, page_records) in scanned {
            records.extend(page_records);
            reports.push(report);
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;
        debug!(
            "Extracted {} records from {} pages in {}ms",
            records.len(),
            reports.len(),
            processing_time_ms
        );

        ExtractionResult {
            records,
            pages: reports,
            processing_time_ms,
        }
    }

    /// Extract records from a text dump whose pages are separated by form
    /// feeds. Text without a form feed is a single page.
    pub fn extract_text(&self, text: &str) -> ExtractionResult {
        let pages = split_pages(text);
        self.extract_pages(&pages)
    }

    #[cfg(feature = "parallel")]
    fn scan_all<S>(&self, pages: &[S]) -> Vec<(PageReport, Vec<LineRecord>)>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        if self.parallel && pages.len() > 1 {
            // Indexed collect keeps page order.
            pages
                .par_iter()
                .enumerate()
                .map(|(idx, text)| self.scan_page(idx, text.as_ref()))
                .collect()
        } else {
            self.scan_sequential(pages)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn scan_all<S>(&self, pages: &[S]) -> Vec<(PageReport, Vec<LineRecord>)>
    where
        S: AsRef<str> + Sync,
    {
        if self.parallel {
            debug!("Parallel page scan requested without the `parallel` feature");
        }
        self.scan_sequential(pages)
    }

    fn scan_sequential<S: AsRef<str>>(&self, pages: &[S]) -> Vec<(PageReport, Vec<LineRecord>)> {
        pages
            .iter()
            .enumerate()
            .map(|(idx, text)| self.scan_page(idx, text.as_ref()))
            .collect()
    }

    fn scan_page(&self, idx: usize, text: &str) -> (PageReport, Vec<LineRecord>) {
        let lines = LineSequence::from_page_text(text);
        let scan = self.extractor.scan(&lines);

        let report = PageReport {
            page: idx as u32 + 1,
            lines: lines.len(),
            records: scan.records.len(),
            terminated: scan.terminated,
        };

        debug!(
            "Page {}: {} lines, {} records{}",
            report.page,
            report.lines,
            report.records,
            if report.terminated { " (terminated)" } else { "" }
        );

        (report, scan.records)
    }
}

impl Default for PageDriver {
    fn default() -> Self {
        Self::new(LinePairExtractor::new())
    }
}

/// Split a text dump into pages on form feeds.
///
/// A trailing form feed does not produce an extra empty page.
pub fn split_pages(text: &str) -> Vec<&str> {
    let mut pages: Vec<&str> = text.split(FORM_FEED).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE_1: &str = "ACME Supply Co.\nPurchase Order 4471\n\n\
        1 ABC-100 10 EA $5.00 $50.00\n\
        1.1 Widget, red\n\
        Page 1 of 2\n";

    const PAGE_2: &str = "  2 XYZ-1 5 EA $1.00 $5.00  \n\
        2.1 Gadget\n\n\
        3 CPS-77 Bid Item 4 2 BX $1,100.00 $2,200.00\n\
        3.1 Gasket kit, assorted\n\
        Subtotal $2,255.00\n\
        4 LATE-1 1 EA $9.99 $9.99\n\
        4.1 Never reached\n";

    #[test]
    fn test_pages_concatenate_in_order() {
        let driver = PageDriver::default();
        let result = driver.extract_pages(&[PAGE_1, PAGE_2]);

        let parts: Vec<&str> = result.records.iter().map(|r| r.part_no.as_str()).collect();
        assert_eq!(parts, vec!["ABC-100", "XYZ-1", "CPS-77"]);

        assert_eq!(
            result.pages,
            vec![
                PageReport { page: 1, lines: 5, records: 1, terminated: false },
                PageReport { page: 2, lines: 7, records: 2, terminated: true },
            ]
        );
    }

    #[test]
    fn test_terminated_page_does_not_affect_next() {
        let driver = PageDriver::default();
        let result = driver.extract_pages(&[PAGE_2, PAGE_1]);

        let parts: Vec<&str> = result.records.iter().map(|r| r.part_no.as_str()).collect();
        assert_eq!(parts, vec!["XYZ-1", "CPS-77", "ABC-100"]);
    }

    #[test]
    fn test_empty_pages_contribute_nothing() {
        let driver = PageDriver::default();
        let result = driver.extract_pages(&["", "\n\n  \n", PAGE_1, "Total"]);

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.pages.len(), 4);
        assert_eq!(result.pages[0].lines, 0);
        assert_eq!(result.pages[3].records, 0);
    }

    #[test]
    fn test_no_pages() {
        let pages: [&str; 0] = [];
        let result = PageDriver::default().extract_pages(&pages);
        assert!(result.records.is_empty());
        assert!(result.pages.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let driver = PageDriver::default();
        let pages = vec![PAGE_1.to_string(), PAGE_2.to_string()];

        let first = driver.extract_pages(&pages);
        let second = driver.extract_pages(&pages);

        assert_eq!(first.records, second.records);
        assert_eq!(first.pages, second.pages);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pages: Vec<String> = (0..16)
            .map(|n| {
                format!(
                    "Header {n}\n{n} P-{n} {n} EA $1.00 ${n}.00\n{n}.1 Item {n}\nFooter\n"
                )
            })
            .collect();

        let sequential = PageDriver::default().extract_pages(&pages);
        let parallel = PageDriver::default().with_parallel(true).extract_pages(&pages);

        assert_eq!(sequential.records.len(), 16);
        assert_eq!(parallel.records, sequential.records);
        assert_eq!(parallel.pages, sequential.pages);
    }

    #[test]
    fn test_max_pages() {
        let driver = PageDriver::default().with_max_pages(1);
        let result = driver.extract_pages(&[PAGE_1, PAGE_2]);

        assert_eq!(result.pages.len(), 1);
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_extract_text_splits_on_form_feed() {
        let text = format!("{}\u{0c}{}\u{0c}", PAGE_1, PAGE_2);
        let result = PageDriver::default().extract_text(&text);

        assert_eq!(result.pages.len(), 2);
        assert_eq!(result.records.len(), 3);
    }

    #[test]
    fn test_split_pages() {
        assert_eq!(split_pages("a"), vec!["a"]);
        assert_eq!(split_pages("a\u{0c}b"), vec!["a", "b"]);
        assert_eq!(split_pages("a\u{0c}b\u{0c}\n"), vec!["a", "b"]);
        assert_eq!(split_pages(""), vec![""]);
    }
}
