//! Error types shared by request construction and the salary calculator.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ContractType;

/// The gross amount of a request could not be accepted.
///
/// Business costs never produce this error; malformed costs are coerced to
/// zero instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    /// No gross amount was entered.
    #[error("gross amount is required")]
    MissingGross,

    /// The gross amount text is not a number.
    #[error("gross amount '{0}' is not a valid number")]
    NonNumericGross(String),

    /// The gross amount was NaN or infinite.
    #[error("gross amount must be a finite number")]
    NonFiniteGross,

    /// The gross amount is below zero.
    #[error("gross amount must not be negative, got {0}")]
    NegativeGross(Decimal),

    /// An amount, or a figure derived from it, exceeds the decimal range.
    #[error("amounts are too large to calculate")]
    AmountOutOfRange,
}

/// Errors raised when validating a [`SalaryRates`](crate::SalaryRates) set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateConfigError {
    /// A flat net factor must be in (0, 1].
    #[error("net factor for {contract} must be between 0 and 1, got {factor}")]
    InvalidNetFactor {
        contract: ContractType,
        factor: Decimal,
    },

    /// The income tax rate must be in [0, 1].
    #[error("income tax rate must be between 0 and 1, got {0}")]
    InvalidIncomeTaxRate(Decimal),

    /// Social contributions cannot be negative.
    #[error("fixed contribution must be non-negative, got {0}")]
    NegativeContribution(Decimal),
}
