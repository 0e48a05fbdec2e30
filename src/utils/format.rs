//! Formatting utilities for prices and listing text.

use crate::config::catalog::DESCRIPTION_TAGS;

/// Format a number with Brazilian separators and two decimals (e.g. "1.234,56").
pub fn format_decimal_br(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let units = cents / 100;
    let fraction = cents % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{},{:02}", sign, grouped, fraction)
}

/// Format a price in reais (e.g. "R$ 1.234,56").
pub fn format_brl(value: f64) -> String {
    format!("R$ {}", format_decimal_br(value))
}

/// Parse a price typed in Brazilian notation ("1.234,56", "R$ 50", "12,5").
///
/// Dots are thousands separators and the comma is the decimal mark. Returns
/// `None` for empty, negative or unparseable input.
pub fn parse_price_input(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches("R$")
        .trim()
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Listing description generated from its first tags.
pub fn description_from_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return "Account with assorted items.".to_string();
    }
    tags.iter()
        .take(DESCRIPTION_TAGS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(9.5), "R$ 9,50");
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(999.999), "R$ 1.000,00");
    }

    #[test]
    fn test_format_decimal_br_negative() {
        assert_eq!(format_decimal_br(-12.3), "-12,30");
        assert_eq!(format_decimal_br(-0.001), "0,00");
    }

    #[test]
    fn test_parse_price_input() {
        assert_eq!(parse_price_input("1.234,56"), Some(1234.56));
        assert_eq!(parse_price_input("R$ 50"), Some(50.0));
        assert_eq!(parse_price_input("12,5"), Some(12.5));
        assert_eq!(parse_price_input("1.000.000"), Some(1_000_000.0));
        assert_eq!(parse_price_input(""), None);
        assert_eq!(parse_price_input("abc"), None);
        assert_eq!(parse_price_input("-5"), None);
    }

    #[test]
    fn test_price_input_round_trips_through_edit_format() {
        let shown = format_decimal_br(2500.75);
        assert_eq!(shown, "2.500,75");
        assert_eq!(parse_price_input(&shown), Some(2500.75));
    }

    #[test]
    fn test_description_from_tags() {
        assert_eq!(description_from_tags(&[]), "Account with assorted items.");
        let tags: Vec<String> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(description_from_tags(&tags), "a, b, c, d, e");
    }
}
