//! Parsing of raw amount text typed into the salary form.
//!
//! Accepted formats:
//!
//! | Input          | Value     | Notes                                         |
//! |----------------|-----------|-----------------------------------------------|
//! | `12500`        | 12500     |                                               |
//! | `12 500`       | 12500     | whitespace and `_` group thousands            |
//! | `12,500.50`    | 12500.50  | commas are thousands separators next to a dot |
//! | `1234,50`      | 1234.50   | a lone comma without a dot is decimal         |
//! | `1,234,567`    | 1234567   | several commas are thousands separators       |
//!
//! The gross amount is strict and reports an [`InvalidInputError`]. Business
//! costs are lenient: anything that is not a non-negative number becomes zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::InvalidInputError;

/// Removes grouping characters and settles the decimal separator.
pub fn normalize_amount(s: &str) -> String {
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();

    if !compact.contains('.') && compact.matches(',').count() == 1 {
        compact.replace(',', ".")
    } else {
        compact.replace(',', "")
    }
}

/// Parses the gross amount.
///
/// # Errors
///
/// - [`InvalidInputError::MissingGross`] for empty input
/// - [`InvalidInputError::NonNumericGross`] when the text is not a number
/// - [`InvalidInputError::NegativeGross`] below zero
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::input::parse_gross;
/// use salary_core::InvalidInputError;
///
/// assert_eq!(parse_gross("12 500"), Ok(dec!(12500)));
/// assert_eq!(parse_gross("4875,5"), Ok(dec!(4875.5)));
/// assert_eq!(parse_gross(""), Err(InvalidInputError::MissingGross));
/// assert_eq!(parse_gross("-100"), Err(InvalidInputError::NegativeGross(dec!(-100))));
/// ```
pub fn parse_gross(s: &str) -> Result<Decimal, InvalidInputError> {
    let normalized = normalize_amount(s);
    if normalized.is_empty() {
        return Err(InvalidInputError::MissingGross);
    }

    let value = Decimal::from_str(&normalized)
        .map_err(|_| InvalidInputError::NonNumericGross(s.trim().to_string()))?;

    if value < Decimal::ZERO {
        return Err(InvalidInputError::NegativeGross(value));
    }
    Ok(value)
}

/// Parses business costs, falling back to zero.
///
/// Empty input is zero without comment; unparseable or negative input is
/// zero and logs a warning.
pub fn parse_costs(s: &str) -> Decimal {
    let normalized = normalize_amount(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }

    match Decimal::from_str(&normalized) {
        Ok(value) if value >= Decimal::ZERO => value,
        Ok(value) => {
            warn!(input = %s, %value, "negative business costs treated as zero");
            Decimal::ZERO
        }
        Err(e) => {
            warn!(input = %s, "invalid business costs treated as zero: {}", e);
            Decimal::ZERO
        }
    }
}
