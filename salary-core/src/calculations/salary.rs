//! Net salary estimation for Polish contract types.
//!
//! # Formulas
//!
//! | Contract | Net amount | Deductions |
//! |----------|------------|------------|
//! | UoP      | gross × 0.71 | gross − net |
//! | UZ       | gross × 0.75 | gross − net |
//! | B2B      | see below    | ZUS + tax   |
//!
//! For B2B the fixed contribution (ZUS) is 380 with relief and 1600 without.
//! Income tax is 19% of the taxable base floored at zero. The three display
//! modes differ only in how business costs enter the chain:
//!
//! | Mode           | Taxable base            | Net amount              |
//! |----------------|-------------------------|-------------------------|
//! | Invoice Net    | gross − ZUS − costs     | gross − ZUS − tax       |
//! | Real Cash      | gross − ZUS − costs     | invoice net − costs     |
//! | Ignoring Costs | gross − ZUS             | gross − ZUS − tax       |
//!
//! Net amounts and deductions are rounded to whole units independently, at
//! the end. A B2B net can be negative when the contribution exceeds the
//! gross amount; it is reported as-is.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::{CalculationRequest, ContractType, DisplayMode, SalaryCalculator, select_mode};
//!
//! let request = CalculationRequest::new(ContractType::BusinessContract, dec!(18000))
//!     .unwrap()
//!     .with_business_costs(dec!(2000));
//!
//! let results = SalaryCalculator::default().evaluate(&request).unwrap();
//!
//! let invoice = select_mode(&results, DisplayMode::InvoiceNet).unwrap();
//! assert_eq!(invoice.net_amount, dec!(13664));
//! assert_eq!(invoice.deductions_total, dec!(4336));
//!
//! let real = select_mode(&results, DisplayMode::RealCash).unwrap();
//! assert_eq!(real.net_amount, dec!(11664));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{max, round_whole};
use crate::error::{InvalidInputError, RateConfigError};
use crate::{
    CalculationRequest, CalculationResult, ContractType, DeductionBreakdown, DisplayMode,
    SalaryRates,
};

/// Calculator turning a [`CalculationRequest`] into per-mode results.
///
/// Holds only validated rates, so evaluation has no hidden state and the
/// same request always produces the same results.
#[derive(Debug, Clone)]
pub struct SalaryCalculator {
    rates: SalaryRates,
}

impl Default for SalaryCalculator {
    fn default() -> Self {
        Self {
            rates: SalaryRates::default(),
        }
    }
}

impl SalaryCalculator {
    /// Creates a calculator from custom rates.
    ///
    /// # Errors
    ///
    /// Returns [`RateConfigError`] if any rate is out of range.
    pub fn new(rates: SalaryRates) -> Result<Self, RateConfigError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    pub fn rates(&self) -> &SalaryRates {
        &self.rates
    }

    /// Evaluates a request in every display mode that applies to it.
    ///
    /// B2B requests yield three results ordered as [`DisplayMode::ALL`].
    /// Other contracts yield one result in the default mode.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::NegativeGross`] before computing anything
    /// if the gross amount is negative, and
    /// [`InvalidInputError::AmountOutOfRange`] when costs or contributions
    /// push a B2B figure past the decimal range.
    pub fn evaluate(
        &self,
        request: &CalculationRequest,
    ) -> Result<Vec<CalculationResult>, InvalidInputError> {
        request.validate()?;

        let results = match request.contract_type {
            ContractType::EmploymentContract => {
                vec![self.flat_rate(request.gross_amount, self.rates.employment_net_factor)]
            }
            ContractType::YouthContract => {
                vec![self.flat_rate(request.gross_amount, self.rates.youth_net_factor)]
            }
            ContractType::BusinessContract => self.business(request)?,
        };

        debug!(
            contract = %request.contract_type,
            gross = %request.gross_amount,
            results = results.len(),
            "salary evaluated"
        );
        Ok(results)
    }

    /// Fixed contribution charged to a B2B request.
    pub fn fixed_contribution(
        &self,
        relief_eligible: bool,
    ) -> Decimal {
        self.rates.contribution(relief_eligible)
    }

    /// Net for contracts taxed by a single multiplier.
    fn flat_rate(
        &self,
        gross: Decimal,
        factor: Decimal,
    ) -> CalculationResult {
        let net = gross * factor;
        CalculationResult {
            display_mode: DisplayMode::default(),
            gross_amount: gross,
            net_amount: round_whole(net),
            deductions_total: round_whole(gross - net),
            breakdown: None,
        }
    }

    /// All three B2B display modes.
    fn business(
        &self,
        request: &CalculationRequest,
    ) -> Result<Vec<CalculationResult>, InvalidInputError> {
        let gross = request.gross_amount;
        let costs = request.effective_costs();
        let contribution = self.fixed_contribution(request.relief_eligible);

        let base = in_range(gross.checked_sub(contribution))?;
        let with_costs = self.breakdown(in_range(base.checked_sub(costs))?, contribution)?;
        let without_costs = self.breakdown(base, contribution)?;

        let invoice_net = in_range(base.checked_sub(with_costs.income_tax))?;
        let ignoring_costs_net = in_range(base.checked_sub(without_costs.income_tax))?;
        let real_cash = in_range(invoice_net.checked_sub(costs))?;

        if real_cash < Decimal::ZERO {
            warn!(
                gross = %gross,
                contribution = %contribution,
                costs = %costs,
                "B2B net is negative"
            );
        }

        DisplayMode::ALL
            .into_iter()
            .map(|mode| {
                let (net, breakdown) = match mode {
                    DisplayMode::RealCash => (real_cash, &with_costs),
                    DisplayMode::InvoiceNet => (invoice_net, &with_costs),
                    DisplayMode::IgnoringCosts => (ignoring_costs_net, &without_costs),
                };
                let deductions =
                    in_range(breakdown.fixed_contribution.checked_add(breakdown.income_tax))?;
                Ok(CalculationResult {
                    display_mode: mode,
                    gross_amount: gross,
                    net_amount: round_whole(net),
                    deductions_total: round_whole(deductions),
                    breakdown: Some(breakdown.clone()),
                })
            })
            .collect()
    }

    /// Taxes a base after flooring it at zero.
    fn breakdown(
        &self,
        base: Decimal,
        contribution: Decimal,
    ) -> Result<DeductionBreakdown, InvalidInputError> {
        let taxable_base = max(base, Decimal::ZERO);
        Ok(DeductionBreakdown {
            fixed_contribution: contribution,
            taxable_base,
            income_tax: in_range(taxable_base.checked_mul(self.rates.income_tax_rate))?,
        })
    }
}

fn in_range(value: Option<Decimal>) -> Result<Decimal, InvalidInputError> {
    value.ok_or(InvalidInputError::AmountOutOfRange)
}

/// Picks the result for `mode`.
///
/// Contracts without display modes return their single result whatever mode
/// is asked for. Returns `None` only for an empty slice.
pub fn select_mode(
    results: &[CalculationResult],
    mode: DisplayMode,
) -> Option<&CalculationResult> {
    results
        .iter()
        .find(|r| r.display_mode == mode)
        .or_else(|| results.first())
}

/// Whether switching display modes changes anything for this request.
///
/// Only B2B requests with positive business costs have distinct modes.
pub fn mode_switch_available(request: &CalculationRequest) -> bool {
    request.effective_costs() > Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn b2b(
        gross: Decimal,
        costs: Decimal,
        relief: bool,
    ) -> CalculationRequest {
        CalculationRequest::new(ContractType::BusinessContract, gross)
            .unwrap()
            .with_business_costs(costs)
            .with_relief(relief)
    }

    fn net_for(
        results: &[CalculationResult],
        mode: DisplayMode,
    ) -> Decimal {
        select_mode(results, mode).unwrap().net_amount
    }

    // =========================================================================
    // SalaryCalculator::new tests
    // =========================================================================

    #[test]
    fn new_rejects_invalid_rates() {
        let rates = SalaryRates {
            income_tax_rate: dec!(1.5),
            ..SalaryRates::default()
        };

        let result = SalaryCalculator::new(rates);

        assert_eq!(
            result.unwrap_err(),
            RateConfigError::InvalidIncomeTaxRate(dec!(1.5))
        );
    }

    #[test]
    fn new_keeps_custom_rates() {
        let rates = SalaryRates {
            employment_net_factor: dec!(0.70),
            ..SalaryRates::default()
        };

        let calculator = SalaryCalculator::new(rates.clone()).unwrap();

        assert_eq!(calculator.rates(), &rates);
    }

    // =========================================================================
    // Flat-rate contract tests
    // =========================================================================

    #[test]
    fn employment_contract_keeps_71_percent() {
        let request = CalculationRequest::new(ContractType::EmploymentContract, dec!(12500)).unwrap();

        let results = SalaryCalculator::default().evaluate(&request).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].net_amount, dec!(8875));
        assert_eq!(results[0].deductions_total, dec!(3625));
        assert_eq!(results[0].gross_amount, dec!(12500));
        assert_eq!(results[0].breakdown, None);
    }

    #[test]
    fn youth_contract_keeps_75_percent() {
        let request = CalculationRequest::new(ContractType::YouthContract, dec!(6500)).unwrap();

        let results = SalaryCalculator::default().evaluate(&request).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].net_amount, dec!(4875));
        assert_eq!(results[0].deductions_total, dec!(1625));
    }

    #[test]
    fn flat_rate_rounds_net_and_deductions_independently() {
        // 1000.70 × 0.71 = 710.497, deductions 290.203
        let request = CalculationRequest::new(ContractType::EmploymentContract, dec!(1000.70)).unwrap();

        let results = SalaryCalculator::default().evaluate(&request).unwrap();

        assert_eq!(results[0].net_amount, dec!(710));
        assert_eq!(results[0].deductions_total, dec!(290));
    }

    #[test]
    fn flat_rate_ignores_costs_and_relief() {
        let request = CalculationRequest {
            contract_type: ContractType::YouthContract,
            gross_amount: dec!(6500),
            business_costs: dec!(3000),
            relief_eligible: true,
        };

        let results = SalaryCalculator::default().evaluate(&request).unwrap();

        assert_eq!(results[0].net_amount, dec!(4875));
    }

    #[test]
    fn flat_rate_handles_zero_gross() {
        let request = CalculationRequest::new(ContractType::EmploymentContract, dec!(0)).unwrap();

        let results = SalaryCalculator::default().evaluate(&request).unwrap();

        assert_eq!(results[0].net_amount, dec!(0));
        assert_eq!(results[0].deductions_total, dec!(0));
    }

    // =========================================================================
    // B2B tests
    // =========================================================================

    #[test]
    fn b2b_returns_all_three_modes_in_order() {
        let results = SalaryCalculator::default()
            .evaluate(&b2b(dec!(18000), dec!(2000), false))
            .unwrap();

        let modes: Vec<DisplayMode> = results.iter().map(|r| r.display_mode).collect();
        assert_eq!(modes, DisplayMode::ALL.to_vec());
    }

    #[test]
    fn b2b_without_costs_has_identical_modes() {
        let results = SalaryCalculator::default()
            .evaluate(&b2b(dec!(18000), dec!(0), false))
            .unwrap();

        for result in &results {
            assert_eq!(result.net_amount, dec!(13284));
            assert_eq!(result.deductions_total, dec!(4716));
        }
        let breakdown = results[0].breakdown.as_ref().unwrap();
        assert_eq!(breakdown.fixed_contribution, dec!(1600));
        assert_eq!(breakdown.taxable_base, dec!(16400));
        assert_eq!(breakdown.income_tax, dec!(3116));
    }

    #[test]
    fn b2b_with_costs_applies_each_mode_formula() {
        let results = SalaryCalculator::default()
            .evaluate(&b2b(dec!(18000), dec!(2000), false))
            .unwrap();

        assert_eq!(net_for(&results, DisplayMode::InvoiceNet), dec!(13664));
        assert_eq!(net_for(&results, DisplayMode::RealCash), dec!(11664));
        assert_eq!(net_for(&results, DisplayMode::IgnoringCosts), dec!(13284));
    }

    #[test]
    fn b2b_deductions_exclude_costs_in_every_mode() {
        let results = SalaryCalculator::default()
            .evaluate(&b2b(dec!(18000), dec!(2000), false))
            .unwrap();

        let deductions = |mode| select_mode(&results, mode).unwrap().deductions_total;
        assert_eq!(deductions(DisplayMode::RealCash), dec!(4336));
        assert_eq!(deductions(DisplayMode::InvoiceNet), dec!(4336));
        assert_eq!(deductions(DisplayMode::IgnoringCosts), dec!(4716));
    }

    #[test]
    fn b2b_real_cash_shares_invoice_breakdown() {
        let results = SalaryCalculator::default()
            .evaluate(&b2b(dec!(18000), dec!(2000), false))
            .unwrap();

        let real = select_mode(&results, DisplayMode::RealCash).unwrap();
        let invoice = select_mode(&results, DisplayMode::InvoiceNet).unwrap();
        assert_eq!(real.breakdown, invoice.breakdown);
        assert_eq!(real.breakdown.as_ref().unwrap().taxable_base, dec!(14400));
        assert_eq!(real.breakdown.as_ref().unwrap().income_tax, dec!(2736));
    }

    #[test]
    fn b2b_relief_uses_small_contribution() {
        let results = SalaryCalculator::default()
            .evaluate(&b2b(dec!(1000), dec!(0), true))
            .unwrap();

        let result = &results[0];
        let breakdown = result.breakdown.as_ref().unwrap();
        assert_eq!(breakdown.fixed_contribution, dec!(380));
        assert_eq!(breakdown.taxable_base, dec!(620));
        assert_eq!(breakdown.income_tax, dec!(117.8));
        assert_eq!(result.net_amount, dec!(502));
        assert_eq!(result.deductions_total, dec!(498));
    }

    #[test]
    fn b2b_floors_taxable_base_and_allows_negative_net() {
        let _guard = init_test_tracing();

        let results = SalaryCalculator::default()
            .evaluate(&b2b(dec!(1000), dec!(500), false))
            .unwrap();

        let invoice = select_mode(&results, DisplayMode::InvoiceNet).unwrap();
        assert_eq!(invoice.breakdown.as_ref().unwrap().taxable_base, dec!(0));
        assert_eq!(invoice.breakdown.as_ref().unwrap().income_tax, dec!(0));
        assert_eq!(invoice.net_amount, dec!(-600));
        assert_eq!(invoice.deductions_total, dec!(1600));
        assert_eq!(net_for(&results, DisplayMode::RealCash), dec!(-1100));
        assert_eq!(net_for(&results, DisplayMode::IgnoringCosts), dec!(-600));
    }

    #[test]
    fn b2b_costs_larger_than_base_leave_no_tax() {
        let results = SalaryCalculator::default()
            .evaluate(&b2b(dec!(10000), dec!(9000), false))
            .unwrap();

        // base = 10000 - 1600 - 9000 = -600 → 0
        assert_eq!(net_for(&results, DisplayMode::InvoiceNet), dec!(8400));
        assert_eq!(net_for(&results, DisplayMode::RealCash), dec!(-600));
        // base = 8400, tax = 1596
        assert_eq!(net_for(&results, DisplayMode::IgnoringCosts), dec!(6804));
    }

    #[test]
    fn b2b_costs_past_decimal_range_are_rejected() {
        let request = CalculationRequest::from_raw(
            ContractType::BusinessContract,
            "0",
            "79228162514264337593543950335",
            false,
        )
        .unwrap();

        let result = SalaryCalculator::default().evaluate(&request);

        assert_eq!(result, Err(InvalidInputError::AmountOutOfRange));
    }

    #[test]
    fn b2b_largest_gross_still_evaluates() {
        let results = SalaryCalculator::default()
            .evaluate(&b2b(Decimal::MAX, dec!(0), false))
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].net_amount > Decimal::ZERO);
    }

    #[test]
    fn evaluate_rejects_hand_built_negative_gross() {
        let request = CalculationRequest {
            contract_type: ContractType::BusinessContract,
            gross_amount: dec!(-100),
            business_costs: dec!(0),
            relief_eligible: false,
        };

        let result = SalaryCalculator::default().evaluate(&request);

        assert_eq!(result, Err(InvalidInputError::NegativeGross(dec!(-100))));
    }

    #[test]
    fn evaluate_uses_custom_rates() {
        let rates = SalaryRates {
            standard_contribution: dec!(2000),
            income_tax_rate: dec!(0.12),
            ..SalaryRates::default()
        };
        let calculator = SalaryCalculator::new(rates).unwrap();

        let results = calculator.evaluate(&b2b(dec!(12000), dec!(0), false)).unwrap();

        // 12000 - 2000 - 10000 × 0.12
        assert_eq!(results[0].net_amount, dec!(8800));
    }

    // =========================================================================
    // select_mode / mode_switch_available tests
    // =========================================================================

    #[test]
    fn select_mode_falls_back_to_single_result() {
        let request = CalculationRequest::new(ContractType::EmploymentContract, dec!(12500)).unwrap();
        let results = SalaryCalculator::default().evaluate(&request).unwrap();

        let selected = select_mode(&results, DisplayMode::IgnoringCosts).unwrap();

        assert_eq!(selected.net_amount, dec!(8875));
    }

    #[test]
    fn select_mode_returns_none_for_empty_results() {
        assert_eq!(select_mode(&[], DisplayMode::RealCash), None);
    }

    #[test]
    fn mode_switch_requires_b2b_with_costs() {
        assert!(mode_switch_available(&b2b(dec!(18000), dec!(2000), false)));
        assert!(!mode_switch_available(&b2b(dec!(18000), dec!(0), false)));

        let employment = CalculationRequest {
            contract_type: ContractType::EmploymentContract,
            gross_amount: dec!(18000),
            business_costs: dec!(2000),
            relief_eligible: false,
        };
        assert!(!mode_switch_available(&employment));
    }
}
