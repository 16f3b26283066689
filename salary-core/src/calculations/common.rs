//! Common utility functions for salary calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to the nearest whole currency unit.
///
/// Halves round toward positive infinity, so `2.5` becomes `3` and `-2.5`
/// becomes `-2`. Only final figures are rounded; intermediate values in a
/// formula chain stay exact.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(502.2)), dec!(502));
/// assert_eq!(round_whole(dec!(497.8)), dec!(498));
/// assert_eq!(round_whole(dec!(2.5)), dec!(3));
/// assert_eq!(round_whole(dec!(-2.5)), dec!(-2));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    // Half toward +inf is away from zero above zero and toward zero below it.
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(0, strategy)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-380.00), dec!(0)), dec!(0));
/// assert_eq!(max(dec!(16400), dec!(0)), dec!(16400));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}
