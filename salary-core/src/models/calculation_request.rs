use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ContractType;
use crate::error::InvalidInputError;
use crate::input::{parse_costs, parse_gross};

/// One submission of the salary form.
///
/// `business_costs` and `relief_eligible` only matter for
/// [`ContractType::BusinessContract`]; the other formulas ignore them.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::{CalculationRequest, ContractType};
///
/// let request = CalculationRequest::from_raw(ContractType::BusinessContract, "18 000", "2000", true)
///     .unwrap();
///
/// assert_eq!(request.gross_amount, dec!(18000));
/// assert_eq!(request.business_costs, dec!(2000));
/// assert!(request.relief_eligible);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub contract_type: ContractType,
    pub gross_amount: Decimal,
    pub business_costs: Decimal,
    pub relief_eligible: bool,
}

impl CalculationRequest {
    /// Creates a request with no business costs and no relief.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::NegativeGross`] when `gross_amount` is below zero.
    pub fn new(
        contract_type: ContractType,
        gross_amount: Decimal,
    ) -> Result<Self, InvalidInputError> {
        let request = Self {
            contract_type,
            gross_amount,
            business_costs: Decimal::ZERO,
            relief_eligible: false,
        };
        request.validate()?;
        Ok(request)
    }

    /// Sets the business costs. Negative costs are replaced by zero.
    pub fn with_business_costs(
        mut self,
        business_costs: Decimal,
    ) -> Self {
        self.business_costs = if business_costs < Decimal::ZERO {
            warn!(costs = %business_costs, "negative business costs treated as zero");
            Decimal::ZERO
        } else {
            business_costs
        };
        self
    }

    pub fn with_relief(
        mut self,
        relief_eligible: bool,
    ) -> Self {
        self.relief_eligible = relief_eligible;
        self
    }

    /// Builds a request from the raw text a user typed into the form.
    ///
    /// The gross amount is strict; the costs text is lenient and falls back
    /// to zero. See [`crate::input`] for the accepted number formats.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] when the gross text is empty, not a
    /// number, or negative.
    pub fn from_raw(
        contract_type: ContractType,
        gross_text: &str,
        costs_text: &str,
        relief_eligible: bool,
    ) -> Result<Self, InvalidInputError> {
        let gross_amount = parse_gross(gross_text)?;
        Ok(Self::new(contract_type, gross_amount)?
            .with_business_costs(parse_costs(costs_text))
            .with_relief(relief_eligible))
    }

    /// Builds a request from floating point inputs.
    ///
    /// Non-finite costs are treated like absent costs.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::NonFiniteGross`] for NaN or infinite
    /// gross values, [`InvalidInputError::AmountOutOfRange`] for finite values
    /// a `Decimal` cannot hold, and [`InvalidInputError::NegativeGross`] below
    /// zero.
    pub fn from_f64(
        contract_type: ContractType,
        gross_amount: f64,
        business_costs: Option<f64>,
        relief_eligible: bool,
    ) -> Result<Self, InvalidInputError> {
        if !gross_amount.is_finite() {
            return Err(InvalidInputError::NonFiniteGross);
        }
        let gross_amount = Decimal::from_f64(gross_amount).ok_or(InvalidInputError::AmountOutOfRange)?;
        let business_costs = business_costs
            .and_then(Decimal::from_f64)
            .unwrap_or(Decimal::ZERO);
        Ok(Self::new(contract_type, gross_amount)?
            .with_business_costs(business_costs)
            .with_relief(relief_eligible))
    }

    /// Checks the gross amount.
    ///
    /// Requests built through the constructors are always valid; this guards
    /// requests assembled field by field.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.gross_amount < Decimal::ZERO {
            return Err(InvalidInputError::NegativeGross(self.gross_amount));
        }
        Ok(())
    }

    /// Business costs as the formulas see them: zero for non-B2B contracts
    /// and never negative.
    pub fn effective_costs(&self) -> Decimal {
        if self.contract_type.is_business() && self.business_costs > Decimal::ZERO {
            self.business_costs
        } else {
            Decimal::ZERO
        }
    }
}
