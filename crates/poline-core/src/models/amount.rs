//! Numeric interpretation of price strings.
//!
//! The extractor never calls into this module; records keep prices as text.
//! Consumers that need arithmetic (totals, reconciliation) parse here.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a US-formatted amount such as "$1,234.56" or "50".
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Sum the amounts that parse, returning the total and how many were skipped.
pub fn sum_amounts<'a, I>(amounts: I) -> (Decimal, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    amounts
        .into_iter()
        .fold((Decimal::ZERO, 0), |(total, skipped), s| match parse_amount(s) {
            Some(value) => (total + value, skipped),
            None => (total, skipped + 1),
        })
}

/// Format an amount with thousands separators and two decimals (1,234.56).
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}{}.{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("5.00"), Some(Decimal::from_str("5.00").unwrap()));
        assert_eq!(parse_amount("$1,234.56"), Some(Decimal::from_str("1234.56").unwrap()));
        assert_eq!(parse_amount("12,345,678"), Some(Decimal::from(12_345_678)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount("N/A"), None);
    }

    #[test]
    fn test_sum_amounts() {
        let (total, skipped) = sum_amounts(["50.00", "1,000.50", "bad"]);
        assert_eq!(total, Decimal::from_str("1050.50").unwrap());
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from_str("1234.56").unwrap()), "1,234.56");
        assert_eq!(format_amount(Decimal::from_str("12345678.9").unwrap()), "12,345,678.90");
        assert_eq!(format_amount(Decimal::from(5)), "5.00");
        assert_eq!(format_amount(Decimal::from_str("-1500").unwrap()), "-1,500.00");
    }
}
