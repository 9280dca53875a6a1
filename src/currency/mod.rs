//! Compact currency rendering for tracker cards.

use serde::{Deserialize, Serialize};

const THOUSAND: f64 = 1000.0;

/// Symbol and digit grouping used when rendering amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyStyle {
    pub symbol: String,
    pub grouping_separator: char,
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self {
            symbol: "$".into(),
            grouping_separator: ',',
        }
    }
}

/// Renders `amount` with the default `$` style. See [`format_compact_with`].
pub fn format_compact(amount: f64) -> String {
    format_compact_with(amount, &CurrencyStyle::default())
}

/// Renders the magnitude of `amount` compactly.
///
/// Magnitudes of at least 1000 become thousands with one decimal (none when
/// the amount is a whole multiple of 1000): `1500 → $1.5K`, `2000 → $2K`.
/// Smaller magnitudes are rounded to whole units with digit grouping:
/// `850 → $850`. The sign is never rendered; callers prefix `-` or `+`.
pub fn format_compact_with(amount: f64, style: &CurrencyStyle) -> String {
    let magnitude = if amount.is_finite() { amount.abs() } else { 0.0 };
    if magnitude >= THOUSAND {
        let precision = if magnitude % THOUSAND == 0.0 { 0 } else { 1 };
        format!("{}{:.*}K", style.symbol, precision, magnitude / THOUSAND)
    } else {
        let whole = format!("{:.0}", magnitude);
        format!(
            "{}{}",
            style.symbol,
            group_digits(&whole, style.grouping_separator)
        )
    }
}

/// Inserts `separator` between every group of three integer digits.
pub fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.chars().count();
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_render_with_one_decimal() {
        assert_eq!(format_compact(1500.0), "$1.5K");
        assert_eq!(format_compact(1234.0), "$1.2K");
    }

    #[test]
    fn whole_thousands_drop_the_decimal() {
        assert_eq!(format_compact(2000.0), "$2K");
        assert_eq!(format_compact(3000.0), "$3K");
        assert_eq!(format_compact(1_250_000.0), "$1250K");
    }

    #[test]
    fn small_amounts_render_whole_units() {
        assert_eq!(format_compact(850.0), "$850");
        assert_eq!(format_compact(0.0), "$0");
        assert_eq!(format_compact(42.4), "$42");
    }

    #[test]
    fn sign_is_never_embedded() {
        assert_eq!(format_compact(-1500.0), "$1.5K");
        assert_eq!(format_compact(-200.0), "$200");
    }

    #[test]
    fn rounding_up_to_a_thousand_uses_grouping() {
        assert_eq!(format_compact(999.6), "$1,000");
    }

    #[test]
    fn custom_style_applies_symbol_and_separator() {
        let style = CurrencyStyle {
            symbol: "€".into(),
            grouping_separator: '.',
        };
        assert_eq!(format_compact_with(999.7, &style), "€1.000");
        assert_eq!(format_compact_with(4500.0, &style), "€4.5K");
    }

    #[test]
    fn groups_digits_from_the_right() {
        assert_eq!(group_digits("1234567", ','), "1,234,567");
        assert_eq!(group_digits("123", ','), "123");
        assert_eq!(group_digits("1000", ' '), "1 000");
    }
}
