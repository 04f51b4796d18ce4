//! Line-pair extraction over a single page.

use tracing::trace;

use super::grammar::{DescriptionGrammar, DetailGrammar, LineGrammar};
use super::lines::LineSequence;
use crate::error::ExtractionError;
use crate::models::record::LineRecord;

/// Default page-terminal markers.
pub const DEFAULT_TERMINAL_MARKERS: [&str; 2] = ["Subtotal", "Total"];

/// Outcome of examining the line at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The line and its successor formed a record.
    Pair(LineRecord),
    /// The line is noise; retry from the next one.
    Skip,
    /// The line is a terminal marker; the rest of the page is ignored.
    Terminate,
}

impl Step {
    /// How far the cursor moves after this step.
    pub fn advance(&self) -> usize {
        match self {
            Step::Pair(_) => 2,
            Step::Skip => 1,
            Step::Terminate => 0,
        }
    }
}

/// Records found on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScan {
    /// Records in the order their description lines appeared.
    pub records: Vec<LineRecord>,
    /// Whether a terminal marker cut the scan short.
    pub terminated: bool,
}

/// Pairs adjacent description and detail lines into records.
#[derive(Debug, Clone)]
pub struct LinePairExtractor {
    description: DescriptionGrammar,
    detail: DetailGrammar,
    terminal_markers: Vec<String>,
}

impl LinePairExtractor {
    /// Create an extractor with the default terminal markers.
    pub fn new() -> Self {
        Self {
            description: DescriptionGrammar::new(),
            detail: DetailGrammar::new(),
            terminal_markers: DEFAULT_TERMINAL_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Replace the terminal markers.
    pub fn with_terminal_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terminal_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether a line ends the page.
    pub fn is_terminal(&self, line: &str) -> bool {
        self.terminal_markers
            .iter()
            .any(|marker| line.starts_with(marker.as_str()))
    }

    /// Combine a description line and a detail line, if both match.
    pub fn pair(&self, description_line: &str, detail_line: &str) -> Option<LineRecord> {
        let head = self.description.match_line(description_line)?;
        let detail = self.detail.match_line(detail_line)?;

        Some(LineRecord {
            main_line: head.main_line,
            sub_line: detail.sub_line,
            part_no: head.part_no,
            description: detail.description,
            quantity: head.quantity,
            unit_of_measure: head.unit_of_measure,
            unit_price: head.unit_price,
            extended_amount: head.extended_amount,
        })
    }

    /// Examine `current` with `next` as its candidate detail line.
    pub fn step(&self, current: &str, next: &str) -> Step {
        if self.is_terminal(current) {
            return Step::Terminate;
        }

        match self.pair(current, next) {
            Some(record) => Step::Pair(record),
            None => Step::Skip,
        }
    }

    /// Scan a page's lines.
    pub fn scan(&self, lines: &LineSequence) -> PageScan {
        let lines = lines.as_slice();
        let mut scan = PageScan::default();
        let mut i = 0;

        while i + 1 < lines.len() {
            let step = self.step(&lines[i], &lines[i + 1]);
            let advance = step.advance();

            match step {
                Step::Terminate => {
                    trace!("Terminal marker at line {}: {:?}", i, lines[i]);
                    scan.terminated = true;
                    break;
                }
                Step::Pair(record) => scan.records.push(record),
                Step::Skip => trace!("Skipping line {}: {:?}", i, lines[i]),
            }

            i += advance;
        }

        scan
    }

    /// Extract records from caller-supplied lines.
    ///
    /// Fails if any line is empty or untrimmed.
    pub fn extract_lines<S: AsRef<str>>(
        &self,
        lines: &[S],
    ) -> Result<Vec<LineRecord>, ExtractionError> {
        let sequence = LineSequence::new(lines.iter().map(|l| l.as_ref()))?;
        Ok(self.scan(&sequence).records)
    }
}

impl Default for LinePairExtractor {
    fn default() -> Self {
        Self::new()
    }
}
