//! Money Formatting
//!
//! Amounts travel as integer cents. Display follows en-AU currency
//! formatting for AUD: `$` prefix, comma thousands separators, two decimals.

use std::fmt;

use thiserror::Error;

/// An amount in minor currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Cents(pub i64);

impl Cents {
    pub fn dollars(&self) -> i64 {
        self.0 / 100
    }

    pub fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            group_thousands(self.dollars().unsigned_abs()),
            self.cents_part()
        )
    }
}

/// Format an amount in cents for display
pub fn format_cents(cents: i64) -> String {
    Cents(cents).to_string()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Amount entry errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmountParseError {
    #[error("Invalid amount: {0}")]
    Invalid(String),

    #[error("Amount must not be negative: {0}")]
    Negative(String),
}

/// Parse a user-entered amount such as `12.34` or `$1,234.5` into cents
pub fn parse_amount(input: &str) -> Result<Cents, AmountParseError> {
    let raw = input.trim();
    let invalid = || AmountParseError::Invalid(raw.to_string());

    if raw.starts_with('-') {
        return Err(AmountParseError::Negative(raw.to_string()));
    }

    let unsigned = raw.strip_prefix('$').unwrap_or(raw);

    let (grouped, frac) = match unsigned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (unsigned, ""),
    };
    let whole = ungroup(grouped).ok_or_else(invalid)?;

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if frac.len() > 2 || !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let dollars: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac.parse().map_err(|_| invalid())?,
    };

    dollars
        .checked_mul(100)
        .and_then(|d| d.checked_add(cents))
        .map(Cents)
        .ok_or_else(invalid)
}

/// Remove thousands separators, which are only valid between groups of three
fn ungroup(whole: &str) -> Option<String> {
    if !whole.contains(',') {
        return Some(whole.to_string());
    }

    let mut groups = whole.split(',');
    let lead = groups.next().filter(|g| (1..=3).contains(&g.len()))?;
    let mut out = lead.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        out.push_str(group);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero_and_whole_dollars() {
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(100), "$1.00");
        assert_eq!(format_cents(5), "$0.05");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_cents(123456), "$1,234.56");
        assert_eq!(format_cents(50000), "$500.00");
        assert_eq!(format_cents(100_000_000), "$1,000,000.00");
        assert_eq!(format_cents(12_345_678_901), "$123,456,789.01");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_cents(-1234), "-$12.34");
        assert_eq!(format_cents(-5), "-$0.05");
    }

    #[test]
    fn test_grouping_matches_digit_count() {
        for cents in [0i64, 99, 999_99, 1_000_00, 999_999_99, 1_000_000_00] {
            let formatted = format_cents(cents);
            let digits: String = formatted.chars().filter(|c| c.is_ascii_digit()).collect();
            assert_eq!(digits.parse::<i64>().unwrap(), cents, "{}", formatted);
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.34"), Ok(Cents(1234)));
        assert_eq!(parse_amount("$1,234.5"), Ok(Cents(123450)));
        assert_eq!(parse_amount(" 7 "), Ok(Cents(700)));
        assert_eq!(parse_amount(".5"), Ok(Cents(50)));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(matches!(parse_amount("abc"), Err(AmountParseError::Invalid(_))));
        assert!(matches!(parse_amount("1.234"), Err(AmountParseError::Invalid(_))));
        assert!(matches!(parse_amount("."), Err(AmountParseError::Invalid(_))));
        assert!(matches!(parse_amount("-3.00"), Err(AmountParseError::Negative(_))));
    }

    #[test]
    fn test_parse_amount_strict_separators() {
        assert_eq!(parse_amount("1,234,567"), Ok(Cents(123456700)));
        assert!(matches!(parse_amount("1,2,3"), Err(AmountParseError::Invalid(_))));
        assert!(matches!(parse_amount("1234,5"), Err(AmountParseError::Invalid(_))));
        assert!(matches!(parse_amount(",123"), Err(AmountParseError::Invalid(_))));
        assert!(matches!(parse_amount("1.2,3"), Err(AmountParseError::Invalid(_))));
        assert!(matches!(parse_amount("$$5"), Err(AmountParseError::Invalid(_))));
    }
}
