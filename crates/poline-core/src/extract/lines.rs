//! Per-page line sequences.

use crate::error::ExtractionError;

/// Ordered, trimmed, non-empty lines of one page in reading order.
///
/// Built fresh for every page and consumed once by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    /// Build a sequence from raw page text, dropping blank lines and trimming
    /// the rest.
    pub fn from_page_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        Self { lines }
    }

    /// Wrap lines that the caller claims are already trimmed and non-empty.
    ///
    /// The first offending line is reported; nothing is repaired.
    pub fn new<I, S>(lines: I) -> Result<Self, ExtractionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();

        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                return Err(ExtractionError::EmptyLine { index });
            }
            if line.trim().len() != line.len() {
                return Err(ExtractionError::UntrimmedLine {
                    index,
                    line: line.clone(),
                });
            }
        }

        Ok(Self { lines })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_page_text_drops_blank_and_trims() {
        let text = "\n  Header Text  \n\n\t1 ABC-100 10 EA $5.00 $50.00\r\n   \n1.1 Widget, red\n";
        let lines = LineSequence::from_page_text(text);

        assert_eq!(
            lines.iter().collect::<Vec<_>>(),
            vec!["Header Text", "1 ABC-100 10 EA $5.00 $50.00", "1.1 Widget, red"]
        );
    }

    #[test]
    fn test_from_page_text_empty() {
        assert!(LineSequence::from_page_text("").is_empty());
        assert!(LineSequence::from_page_text(" \n\n \t ").is_empty());
    }

    #[test]
    fn test_new_accepts_clean_lines() {
        let lines = LineSequence::new(["a", "b c"]).unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_new_rejects_empty_line() {
        let err = LineSequence::new(["1 ABC-100 10 EA $5.00 $50.00", ""]).unwrap_err();
        assert_eq!(err, ExtractionError::EmptyLine { index: 1 });
    }

    #[test]
    fn test_new_rejects_untrimmed_line() {
        let err = LineSequence::new([" 1.1 Widget"]).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::UntrimmedLine {
                index: 0,
                line: " 1.1 Widget".to_string(),
            }
        );

        assert!(LineSequence::new(["1.1 Widget\n"]).is_err());
    }
}
