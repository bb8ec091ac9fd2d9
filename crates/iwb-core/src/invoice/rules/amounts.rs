//! CAD$ amount parsing and formatting.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an amount as printed on the invoice (e.g. "1,234.56").
///
/// Thousands separators are stripped and the scale of the source text is
/// kept, so "25.00" parses to `25.00`, not `25`. Returns `None` for anything
/// that is not a plain non-negative decimal.
pub fn parse_cad_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Format an amount with `,` thousands separators and at least two decimals
/// (1234.5 -> "1,234.50").
pub fn format_cad_amount(mut amount: Decimal) -> String {
    if amount.scale() < 2 {
        amount.rescale(2);
    }
    let s = amount.to_string();

    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (integer_part, decimal_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    if decimal_part.is_empty() {
        format!("{}{}", sign, formatted)
    } else {
        format!("{}{}.{}", sign, formatted, decimal_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cad_amount() {
        assert_eq!(
            parse_cad_amount("1,234.56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
        assert_eq!(
            parse_cad_amount("12,345,678.90"),
            Some(Decimal::from_str("12345678.90").unwrap())
        );
        assert_eq!(parse_cad_amount("500"), Some(Decimal::from(500)));
    }

    #[test]
    fn test_parse_keeps_source_scale() {
        let amount = parse_cad_amount("25.00").unwrap();
        assert_eq!(amount.scale(), 2);
        assert_eq!(amount.to_string(), "25.00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_cad_amount(""), None);
        assert_eq!(parse_cad_amount(","), None);
        assert_eq!(parse_cad_amount("1.2.3"), None);
        assert_eq!(parse_cad_amount("-5.00"), None);
        assert_eq!(parse_cad_amount("$5.00"), None);
        assert_eq!(parse_cad_amount("99999999999999999999999999999999999"), None);
    }

    #[test]
    fn test_format_cad_amount() {
        let amount = Decimal::from_str("1234.56").unwrap();
        assert_eq!(format_cad_amount(amount), "1,234.56");

        let amount = Decimal::from_str("12345678.9").unwrap();
        assert_eq!(format_cad_amount(amount), "12,345,678.90");

        assert_eq!(format_cad_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_cad_amount(Decimal::from_str("-25.5").unwrap()), "-25.50");
    }
}
