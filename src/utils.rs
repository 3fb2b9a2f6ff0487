use time::{Date, macros::format_description};

use crate::error::ValidationError;

pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(())
}

/// Parses amount text typed by the user: ASCII digits with at most one
/// decimal point, surrounding whitespace ignored. Signs, exponents and
/// thousands separators are rejected.
pub fn parse_amount(text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    let invalid = || ValidationError::InvalidAmount(text.to_string());

    let mut digits = 0usize;
    let mut points = 0usize;
    for c in trimmed.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return Err(invalid()),
        }
    }
    if digits == 0 || points > 1 {
        return Err(invalid());
    }

    let amount: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !amount.is_finite() {
        return Err(invalid());
    }
    Ok(amount)
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("Invalid date {:?}: {}", text, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn description_must_not_be_blank() {
        assert_eq!(validate_description(""), Err(ValidationError::EmptyDescription));
        assert_eq!(validate_description(" \t"), Err(ValidationError::EmptyDescription));
        assert!(validate_description("Lunch").is_ok());
    }

    #[test]
    fn accepts_integers_and_decimals() {
        assert_eq!(parse_amount("10"), Ok(10.0));
        assert_eq!(parse_amount("12.50"), Ok(12.5));
        assert_eq!(parse_amount(" 7 "), Ok(7.0));
        assert_eq!(parse_amount(".5"), Ok(0.5));
        assert_eq!(parse_amount("3."), Ok(3.0));
    }

    #[test]
    fn accepts_zero() {
        assert_eq!(parse_amount("0"), Ok(0.0));
        assert_eq!(parse_amount("0.00"), Ok(0.0));
    }

    #[test]
    fn rejects_non_numeric() {
        for text in ["", " ", "abc", "12a", "-5", "+5", "1e3", "1,000", "1.2.3", ".", "NaN", "inf"] {
            assert_eq!(
                parse_amount(text),
                Err(ValidationError::InvalidAmount(text.to_string())),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2026-10-18"), Ok(date!(2026 - 10 - 18)));
        assert!(parse_date("18/10/2026").is_err());
        assert!(parse_date("2026-02-30").is_err());
    }
}
