use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ContractType;
use crate::error::RateConfigError;

/// Rates and flat amounts used by the salary formulas.
///
/// The defaults are the monthly approximations the estimator ships with.
/// Every field may be omitted when deserialising; missing fields keep their
/// default value.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::SalaryRates;
///
/// let rates = SalaryRates::default();
///
/// assert_eq!(rates.employment_net_factor, dec!(0.71));
/// assert_eq!(rates.contribution(true), dec!(380));
/// assert_eq!(rates.contribution(false), dec!(1600));
/// assert!(rates.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryRates {
    /// Share of gross kept under an employment contract.
    pub employment_net_factor: Decimal,

    /// Share of gross kept under a youth contract.
    pub youth_net_factor: Decimal,

    /// Monthly B2B social contribution without relief.
    pub standard_contribution: Decimal,

    /// Monthly B2B social contribution during the relief period.
    pub relief_contribution: Decimal,

    /// Flat B2B income tax rate.
    pub income_tax_rate: Decimal,
}

impl Default for SalaryRates {
    fn default() -> Self {
        Self {
            employment_net_factor: Decimal::new(71, 2),
            youth_net_factor: Decimal::new(75, 2),
            standard_contribution: Decimal::from(1600),
            relief_contribution: Decimal::from(380),
            income_tax_rate: Decimal::new(19, 2),
        }
    }
}

impl SalaryRates {
    /// Fixed contribution charged to a B2B contractor.
    pub fn contribution(
        &self,
        relief_eligible: bool,
    ) -> Decimal {
        if relief_eligible {
            self.relief_contribution
        } else {
            self.standard_contribution
        }
    }

    /// Checks that every rate is in range.
    ///
    /// # Errors
    ///
    /// Returns [`RateConfigError`] if:
    /// - a net factor is not in (0, 1]
    /// - `income_tax_rate` is not in [0, 1]
    /// - a contribution is negative
    pub fn validate(&self) -> Result<(), RateConfigError> {
        for (contract, factor) in [
            (ContractType::EmploymentContract, self.employment_net_factor),
            (ContractType::YouthContract, self.youth_net_factor),
        ] {
            if factor <= Decimal::ZERO || factor > Decimal::ONE {
                return Err(RateConfigError::InvalidNetFactor { contract, factor });
            }
        }
        if self.income_tax_rate < Decimal::ZERO || self.income_tax_rate > Decimal::ONE {
            return Err(RateConfigError::InvalidIncomeTaxRate(
                self.income_tax_rate,
            ));
        }
        for contribution in [self.standard_contribution, self.relief_contribution] {
            if contribution < Decimal::ZERO {
                return Err(RateConfigError::NegativeContribution(contribution));
            }
        }
        Ok(())
    }
}
