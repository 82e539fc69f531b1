//! Parsing of Polish-formatted prices.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a Polish-formatted amount (e.g., "1,95", "1 234,56" or "1234.56").
///
/// Source tariff tables use a decimal comma; thousand separators are
/// plain or non-breaking spaces. Returns `None` when the cleaned string
/// is not a valid decimal.
pub fn parse_pln_amount(s: &str) -> Option<Decimal> {
    // Remove spaces and non-breaking spaces
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    // Replace comma with period for the decimal separator
    let normalized = if cleaned.contains(',') && !cleaned.contains('.') {
        cleaned.replace(',', ".")
    } else if cleaned.contains(',') && cleaned.contains('.') {
        // Both present: the later one is the decimal separator
        let comma_pos = cleaned.rfind(',');
        let dot_pos = cleaned.rfind('.');
        match (comma_pos, dot_pos) {
            (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
            (Some(_), Some(_)) => cleaned.replace(',', ""),
            _ => cleaned,
        }
    } else {
        cleaned
    };

    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_decimal_comma() {
        assert_eq!(
            parse_pln_amount("1,95"),
            Some(Decimal::from_str("1.95").unwrap())
        );
        assert_eq!(
            parse_pln_amount("1 234,56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
    }

    #[test]
    fn parses_decimal_dot() {
        assert_eq!(
            parse_pln_amount("2.69"),
            Some(Decimal::from_str("2.69").unwrap())
        );
    }

    #[test]
    fn comma_equals_dot_replacement() {
        // The comma form must parse to the same value as a naive
        // comma-to-dot replacement.
        for s in ["1,60", "1,75", "2,05", "29,99", "3,19"] {
            let direct = parse_pln_amount(s).unwrap();
            let replaced = Decimal::from_str(&s.replace(',', ".")).unwrap();
            assert_eq!(direct, replaced);
        }
    }

    #[test]
    fn strips_currency_noise() {
        assert_eq!(
            parse_pln_amount("1,95 zł"),
            Some(Decimal::from_str("1.95").unwrap())
        );
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(parse_pln_amount("zł"), None);
        assert_eq!(parse_pln_amount(""), None);
    }
}
