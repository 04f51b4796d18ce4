//! Regex patterns for the two physical lines of a purchase-order record.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // First line: "1 ABC-100 [Bid Item ...] 10 EA $5.00 $50.00"
    pub static ref DESCRIPTION_LINE: Regex = Regex::new(
        r"(?x)
        ^\s*
        (?P<main>\d+)\s+                    # main line number
        (?P<part>[A-Z0-9\-]+)\s+            # part number
        (?:Bid\s+Item.*?\s+)?               # bid-item marker, discarded
        (?P<qty>\d+(?:\.\d+)?)\s+           # quantity
        (?P<uom>[A-Za-z]+)\s+               # unit of measure
        \$?(?P<unit>[\d,]+(?:\.\d{2})?)\s+  # unit price
        \$?(?P<ext>[\d,]+(?:\.\d{2})?)      # extended amount
        "
    ).unwrap();

    // Second line: "1.1 Widget, red"
    pub static ref DETAIL_LINE: Regex = Regex::new(
        r"(?x)
        ^\s*
        (?P<sub>\d+(?:\.\d+)?)\s+           # sub line number
        (?P<desc>.+)$                       # part description
        "
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(DESCRIPTION_LINE.is_match("1 ABC-100 10 EA $5.00 $50.00"));
        assert!(DETAIL_LINE.is_match("1.1 Widget, red"));
    }

    #[test]
    fn test_description_ignores_trailing_content() {
        let caps = DESCRIPTION_LINE
            .captures("3 P-9 2 BX 1,250.00 2,500.00 Net 30")
            .unwrap();
        assert_eq!(&caps["ext"], "2,500.00");
    }
}
