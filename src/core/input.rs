//! Parsing rules for user-entered text.
//!
//! Locale separators are normalized here so the rest of the crate only sees
//! [`Decimal`] and integer values.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use std::str::FromStr;

use super::error::TariffError;

/// Parse a decimal amount. Accepts `,` or `.` as the fractional separator and
/// ignores spaces and underscores used as thousands separators.
pub fn parse_amount(input: &str) -> Result<Decimal, TariffError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return Err(TariffError::Parse("empty amount".into()));
    }
    Decimal::from_str(&cleaned).map_err(|e| TariffError::Parse(format!("'{input}': {e}")))
}

/// Parse an engine displacement.
///
/// A value with a fractional separator is liters (`"1.6"`, `"2,0"`) and is
/// converted to cm³; an integer is taken as cm³ directly (`"1598"`).
pub fn parse_displacement(input: &str) -> Result<u32, TariffError> {
    let trimmed = input.trim();
    let is_liters = trimmed.contains('.') || trimmed.contains(',');
    let value = parse_amount(trimmed)?;
    if value.is_sign_negative() {
        return Err(TariffError::Parse(format!(
            "'{input}': displacement must not be negative"
        )));
    }
    let cc = if is_liters {
        value
            .checked_mul(dec!(1000))
            .ok_or_else(|| TariffError::Parse(format!("'{input}': displacement out of range")))?
            .round()
    } else if value.fract().is_zero() {
        value
    } else {
        return Err(TariffError::Parse(format!("'{input}': not a whole number")));
    };
    cc.to_u32()
        .ok_or_else(|| TariffError::Parse(format!("'{input}': displacement out of range")))
}

/// Whole months between a manufacture year/month and `today`.
///
/// The current month counts as zero; a manufacture date after `today` is a
/// validation error.
pub fn age_in_months(year: i32, month: u32, today: NaiveDate) -> Result<u32, TariffError> {
    if !(1..=12).contains(&month) {
        return Err(TariffError::Validation(format!(
            "manufactured.month: {month} is not a calendar month"
        )));
    }
    let months = today
        .year()
        .checked_sub(year)
        .and_then(|y| y.checked_mul(12))
        .and_then(|m| m.checked_add(today.month() as i32 - month as i32))
        .ok_or_else(|| {
            TariffError::Validation(format!("manufactured.year: {year} is out of range"))
        })?;
    u32::try_from(months).map_err(|_| {
        TariffError::Validation(format!(
            "manufactured: {year}-{month:02} is after {today}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn amount_with_comma_and_spaces() {
        assert_eq!(parse_amount("150 000,50").unwrap(), dec!(150000.50));
        assert_eq!(parse_amount("1_000").unwrap(), dec!(1000));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn displacement_liters_and_cc() {
        assert_eq!(parse_displacement("2.0").unwrap(), 2000);
        assert_eq!(parse_displacement("1,6").unwrap(), 1600);
        assert_eq!(parse_displacement("1998").unwrap(), 1998);
        assert_eq!(parse_displacement("1.598").unwrap(), 1598);
        assert!(parse_displacement("-1.5").is_err());
    }

    #[test]
    fn displacement_huge_liters_is_parse_error() {
        let err = parse_displacement("99999999999999999999999999.5").unwrap_err();
        assert!(matches!(err, TariffError::Parse(_)));
        assert!(matches!(
            parse_displacement("5000000.0"),
            Err(TariffError::Parse(_))
        ));
    }

    #[test]
    fn age_same_month_is_zero() {
        assert_eq!(age_in_months(2026, 10, date(2026, 10, 15)).unwrap(), 0);
    }

    #[test]
    fn age_across_years() {
        assert_eq!(age_in_months(2023, 10, date(2026, 10, 1)).unwrap(), 36);
        assert_eq!(age_in_months(2023, 9, date(2026, 10, 1)).unwrap(), 37);
    }

    #[test]
    fn age_future_rejected() {
        assert!(age_in_months(2026, 11, date(2026, 10, 15)).is_err());
    }

    #[test]
    fn age_bad_month_rejected() {
        assert!(age_in_months(2020, 13, date(2026, 10, 15)).is_err());
        assert!(age_in_months(2020, 0, date(2026, 10, 15)).is_err());
    }

    #[test]
    fn age_extreme_year_rejected() {
        let today = date(2026, 10, 15);
        assert!(matches!(
            age_in_months(i32::MIN, 1, today),
            Err(TariffError::Validation(_))
        ));
        assert!(matches!(
            age_in_months(i32::MAX, 1, today),
            Err(TariffError::Validation(_))
        ));
        assert!(age_in_months(-400_000_000, 1, today).is_err());
    }
}
