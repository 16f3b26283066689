use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::DisplayMode;

/// Contribution and tax figures behind a B2B result. Values are unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Flat social contribution (ZUS).
    pub fixed_contribution: Decimal,

    /// Income the flat tax applies to, floored at zero.
    pub taxable_base: Decimal,

    /// Flat income tax on `taxable_base`.
    pub income_tax: Decimal,
}

/// Net salary estimate for one display mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub display_mode: DisplayMode,

    /// Gross amount from the request, unchanged.
    pub gross_amount: Decimal,

    /// Estimated take-home amount, rounded to a whole unit. May be negative.
    pub net_amount: Decimal,

    /// Taxes and contributions, rounded to a whole unit.
    ///
    /// For B2B this never includes business costs.
    pub deductions_total: Decimal,

    /// Present for B2B results only.
    pub breakdown: Option<DeductionBreakdown>,
}
