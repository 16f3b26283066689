use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount the way Polish locale number formatting does.
///
/// Thousands are grouped with a space, but only from five integer digits up
/// (`8875`, `13 284`). The decimal separator is a comma and at most three
/// fraction digits are kept.
pub fn format_amount(value: Decimal) -> String {
    let value = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = value.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if int_part.len() >= 5 && i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac_part) => format!("{sign}{grouped},{frac_part}"),
        None => format!("{sign}{grouped}"),
    }
}

/// [`format_amount`] with the currency suffix.
pub fn format_pln(value: Decimal) -> String {
    format!("{} PLN", format_amount(value))
}

/// Parses a yes/no answer. Empty input is `None`.
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "1" | "tak" => Some(true),
        "n" | "no" | "f" | "false" | "0" | "nie" => Some(false),
        _ => None,
    }
}
