//! Record grammar: independent matchers for description and detail lines.
//!
//! Each matcher inspects a single line and either decomposes it into named
//! fields or reports absence with `None`. Neither ever fails loudly; a line
//! that does not fit is simply not part of a record.

use super::patterns::{DESCRIPTION_LINE, DETAIL_LINE};

/// A single-line grammar.
pub trait LineGrammar {
    /// The fields produced by a successful match.
    type Output;

    /// Match a trimmed line, returning its fields or `None`.
    fn match_line(&self, line: &str) -> Option<Self::Output>;

    /// Check whether a line fits this grammar.
    fn is_match(&self, line: &str) -> bool {
        self.match_line(line).is_some()
    }
}

/// Fields carried by the first line of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionLine {
    pub main_line: String,
    pub part_no: String,
    pub quantity: String,
    pub unit_of_measure: String,
    pub unit_price: String,
    pub extended_amount: String,
}

impl DescriptionLine {
    /// Render the fields back into canonical line form.
    ///
    /// Currency symbols and the bid-item marker are not reproduced; matching
    /// the rendered line yields the same fields.
    pub fn render(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.main_line,
            self.part_no,
            self.quantity,
            self.unit_of_measure,
            self.unit_price,
            self.extended_amount
        )
    }
}

/// Fields carried by the second line of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub sub_line: String,
    pub description: String,
}

/// Matcher for description lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionGrammar;

impl DescriptionGrammar {
    pub fn new() -> Self {
        Self
    }
}

impl LineGrammar for DescriptionGrammar {
    type Output = DescriptionLine;

    fn match_line(&self, line: &str) -> Option<Self::Output> {
        let caps = DESCRIPTION_LINE.captures(line)?;

        Some(DescriptionLine {
            main_line: caps["main"].to_string(),
            part_no: caps["part"].to_string(),
            quantity: caps["qty"].to_string(),
            unit_of_measure: caps["uom"].to_string(),
            unit_price: caps["unit"].to_string(),
            extended_amount: caps["ext"].to_string(),
        })
    }
}

/// Matcher for detail lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailGrammar;

impl DetailGrammar {
    pub fn new() -> Self {
        Self
    }
}

impl LineGrammar for DetailGrammar {
    type Output = DetailLine;

    fn match_line(&self, line: &str) -> Option<Self::Output> {
        let caps = DETAIL_LINE.captures(line)?;

        Some(DetailLine {
            sub_line: caps["sub"].to_string(),
            description: caps["desc"].to_string(),
        })
    }
}
