//! Session state for the salary wizard.
//!
//! The wizard moves through four steps:
//!
//! ```text
//! Selection ──select──▶ Input ──submit──▶ Loading ──finish──▶ Result
//!     ▲                  │  ▲                                  │
//!     └──change contract─┘  └────────────edit amount───────────┤
//!     ▲                                                        │
//!     └─────────────────────────restart────────────────────────┘
//! ```
//!
//! The session owns only what the user typed and the last results. The
//! calculation itself happens in one call to [`SalaryCalculator::evaluate`]
//! when input is submitted; the loading step is cosmetic.

use std::fmt;

use salary_core::{
    CalculationRequest, CalculationResult, ContractType, DisplayMode, InvalidInputError,
    SalaryCalculator, input::parse_gross, mode_switch_available, select_mode,
};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Selection,
    Input,
    Loading,
    Result,
}

impl fmt::Display for WizardStep {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::Selection => "selection",
            Self::Input => "input",
            Self::Loading => "loading",
            Self::Result => "result",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("cannot {action} during the {step} step")]
    InvalidTransition {
        step: WizardStep,
        action: &'static str,
    },

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("switching display mode needs a B2B calculation with business costs")]
    ModeSwitchUnavailable,
}

/// Contract cards offered on the selection screen.
///
/// Both B2B cards lead to the same formula; relief stays a separate toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractCard {
    B2b,
    B2bSmallZus,
    Uop,
    UopStudent,
}

impl ContractCard {
    pub const ALL: [ContractCard; 4] = [Self::B2b, Self::B2bSmallZus, Self::Uop, Self::UopStudent];

    pub fn title(&self) -> &'static str {
        match self {
            Self::B2b => "B2B",
            Self::B2bSmallZus => "B2B (Small ZUS)",
            Self::Uop => "UoP",
            Self::UopStudent => "UoP (Student)",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::B2b => "Ideal for contractors & freelancers working with diverse clients.",
            Self::B2bSmallZus => "Discounted ZUS for first 24 months of your project.",
            Self::Uop => "Standard full-time roles with standard employment rights.",
            Self::UopStudent => "Best for students under 26 & part-time contributors.",
        }
    }

    pub fn contract_type(&self) -> ContractType {
        match self {
            Self::B2b | Self::B2bSmallZus => ContractType::BusinessContract,
            Self::Uop => ContractType::EmploymentContract,
            Self::UopStudent => ContractType::YouthContract,
        }
    }
}

/// Mutable state of one wizard session.
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    step: WizardStep,
    contract_type: Option<ContractType>,
    gross_text: String,
    costs_text: String,
    relief_eligible: bool,
    view_mode: DisplayMode,
    request: Option<CalculationRequest>,
    results: Vec<CalculationResult>,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn contract_type(&self) -> Option<ContractType> {
        self.contract_type
    }

    pub fn gross_text(&self) -> &str {
        &self.gross_text
    }

    pub fn costs_text(&self) -> &str {
        &self.costs_text
    }

    pub fn relief_eligible(&self) -> bool {
        self.relief_eligible
    }

    pub fn view_mode(&self) -> DisplayMode {
        self.view_mode
    }

    pub fn request(&self) -> Option<&CalculationRequest> {
        self.request.as_ref()
    }

    pub fn results(&self) -> &[CalculationResult] {
        &self.results
    }

    /// Whether the current contract shows the costs and relief fields.
    pub fn is_business(&self) -> bool {
        self.contract_type.is_some_and(|c| c.is_business())
    }

    fn expect_step(
        &self,
        step: WizardStep,
        action: &'static str,
    ) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }

    /// Picks a contract card and moves on to the input step.
    pub fn select_contract(
        &mut self,
        card: ContractCard,
    ) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Selection, "select a contract")?;
        self.contract_type = Some(card.contract_type());
        self.step = WizardStep::Input;
        debug!(card = card.title(), "contract selected");
        Ok(())
    }

    /// Goes back from the input step to contract selection, keeping typed values.
    pub fn change_contract(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Input, "change the contract")?;
        self.step = WizardStep::Selection;
        Ok(())
    }

    pub fn set_gross_text(
        &mut self,
        text: impl Into<String>,
    ) {
        self.gross_text = text.into();
    }

    pub fn set_costs_text(
        &mut self,
        text: impl Into<String>,
    ) {
        self.costs_text = text.into();
    }

    pub fn set_relief(
        &mut self,
        relief_eligible: bool,
    ) {
        self.relief_eligible = relief_eligible;
    }

    pub fn toggle_relief(&mut self) {
        self.relief_eligible = !self.relief_eligible;
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::Input
            && self.contract_type.is_some()
            && parse_gross(&self.gross_text).is_ok()
    }

    /// Builds the request, evaluates it and enters the loading step.
    ///
    /// Invalid gross input leaves the session in the input step.
    pub fn submit(
        &mut self,
        calculator: &SalaryCalculator,
    ) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Input, "submit")?;
        let contract_type = self.contract_type.ok_or(WizardError::InvalidTransition {
            step: self.step,
            action: "submit without a contract",
        })?;

        let request = if contract_type.is_business() {
            CalculationRequest::from_raw(
                contract_type,
                &self.gross_text,
                &self.costs_text,
                self.relief_eligible,
            )?
        } else {
            CalculationRequest::from_raw(contract_type, &self.gross_text, "", false)?
        };
        let results = calculator.evaluate(&request)?;

        info!(
            contract = %request.contract_type,
            gross = %request.gross_amount,
            "calculation submitted"
        );
        self.request = Some(request);
        self.results = results;
        self.step = WizardStep::Loading;
        Ok(())
    }

    /// Leaves the loading step and shows the result.
    pub fn finish_loading(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Loading, "finish loading")?;
        self.step = WizardStep::Result;
        Ok(())
    }

    /// Whether the result step offers the display mode toggle.
    pub fn mode_switch_available(&self) -> bool {
        self.request.as_ref().is_some_and(mode_switch_available)
    }

    /// Switches between precomputed display modes without re-evaluating.
    pub fn switch_mode(
        &mut self,
        mode: DisplayMode,
    ) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Result, "switch display mode")?;
        if !self.mode_switch_available() {
            return Err(WizardError::ModeSwitchUnavailable);
        }
        self.view_mode = mode;
        Ok(())
    }

    /// The result for the active display mode.
    pub fn current_result(&self) -> Option<&CalculationResult> {
        if self.step != WizardStep::Result {
            return None;
        }
        select_mode(&self.results, self.view_mode)
    }

    /// Returns to the input step with the typed values intact.
    pub fn edit_amount(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Result, "edit the amount")?;
        self.request = None;
        self.results.clear();
        self.step = WizardStep::Input;
        Ok(())
    }

    /// Drops everything and starts over at contract selection.
    pub fn restart(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn session_at_input(card: ContractCard) -> WizardSession {
        let mut session = WizardSession::new();
        session.select_contract(card).unwrap();
        session
    }

    fn session_at_result(
        card: ContractCard,
        gross: &str,
        costs: &str,
    ) -> WizardSession {
        let mut session = session_at_input(card);
        session.set_gross_text(gross);
        session.set_costs_text(costs);
        session.submit(&SalaryCalculator::default()).unwrap();
        session.finish_loading().unwrap();
        session
    }

    #[test]
    fn new_session_starts_at_selection() {
        let session = WizardSession::new();

        assert_eq!(session.step(), WizardStep::Selection);
        assert_eq!(session.contract_type(), None);
        assert_eq!(session.view_mode(), DisplayMode::RealCash);
    }

    #[test]
    fn both_b2b_cards_select_business_contract() {
        assert_eq!(ContractCard::B2b.contract_type(), ContractType::BusinessContract);
        assert_eq!(
            ContractCard::B2bSmallZus.contract_type(),
            ContractType::BusinessContract
        );
    }

    #[test]
    fn small_zus_card_does_not_set_relief() {
        let session = session_at_input(ContractCard::B2bSmallZus);

        assert!(!session.relief_eligible());
    }

    #[test]
    fn select_contract_moves_to_input() {
        let session = session_at_input(ContractCard::UopStudent);

        assert_eq!(session.step(), WizardStep::Input);
        assert_eq!(session.contract_type(), Some(ContractType::YouthContract));
    }

    #[test]
    fn change_contract_keeps_typed_values() {
        let mut session = session_at_input(ContractCard::B2b);
        session.set_gross_text("18000");

        session.change_contract().unwrap();
        session.select_contract(ContractCard::Uop).unwrap();

        assert_eq!(session.gross_text(), "18000");
        assert_eq!(session.contract_type(), Some(ContractType::EmploymentContract));
    }

    #[test]
    fn submit_is_blocked_without_valid_gross() {
        let mut session = session_at_input(ContractCard::Uop);
        assert!(!session.can_submit());

        let result = session.submit(&SalaryCalculator::default());

        assert_eq!(
            result,
            Err(WizardError::InvalidInput(InvalidInputError::MissingGross))
        );
        assert_eq!(session.step(), WizardStep::Input);
        assert!(session.results().is_empty());
    }

    #[test]
    fn submit_rejects_negative_gross() {
        let mut session = session_at_input(ContractCard::Uop);
        session.set_gross_text("-100");

        let result = session.submit(&SalaryCalculator::default());

        assert_eq!(
            result,
            Err(WizardError::InvalidInput(InvalidInputError::NegativeGross(
                dec!(-100)
            )))
        );
    }

    #[test]
    fn submit_evaluates_and_enters_loading() {
        let mut session = session_at_input(ContractCard::Uop);
        session.set_gross_text("12500");
        assert!(session.can_submit());

        session.submit(&SalaryCalculator::default()).unwrap();

        assert_eq!(session.step(), WizardStep::Loading);
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.current_result(), None);
    }

    #[test]
    fn finish_loading_shows_result() {
        let session = session_at_result(ContractCard::Uop, "12500", "");

        assert_eq!(session.step(), WizardStep::Result);
        assert_eq!(session.current_result().unwrap().net_amount, dec!(8875));
    }

    #[test]
    fn costs_and_relief_are_ignored_for_employment() {
        let mut session = session_at_input(ContractCard::Uop);
        session.set_gross_text("12500");
        session.set_costs_text("2000");
        session.set_relief(true);

        session.submit(&SalaryCalculator::default()).unwrap();

        let request = session.request().unwrap();
        assert_eq!(request.business_costs, dec!(0));
        assert!(!request.relief_eligible);
    }

    #[test]
    fn switch_mode_uses_precomputed_results() {
        let mut session = session_at_result(ContractCard::B2b, "18000", "2000");
        assert_eq!(session.current_result().unwrap().net_amount, dec!(11664));

        session.switch_mode(DisplayMode::InvoiceNet).unwrap();
        assert_eq!(session.current_result().unwrap().net_amount, dec!(13664));

        session.switch_mode(DisplayMode::IgnoringCosts).unwrap();
        assert_eq!(session.current_result().unwrap().net_amount, dec!(13284));
    }

    #[test]
    fn switch_mode_unavailable_without_costs() {
        let mut session = session_at_result(ContractCard::B2b, "18000", "");

        let result = session.switch_mode(DisplayMode::InvoiceNet);

        assert_eq!(result, Err(WizardError::ModeSwitchUnavailable));
        assert_eq!(session.view_mode(), DisplayMode::RealCash);
    }

    #[test]
    fn toggle_relief_changes_contribution() {
        let mut session = session_at_input(ContractCard::B2b);
        session.set_gross_text("1000");
        session.toggle_relief();

        session.submit(&SalaryCalculator::default()).unwrap();
        session.finish_loading().unwrap();

        assert_eq!(session.current_result().unwrap().net_amount, dec!(502));
    }

    #[test]
    fn edit_amount_discards_results_and_keeps_input() {
        let mut session = session_at_result(ContractCard::B2b, "18000", "2000");

        session.edit_amount().unwrap();

        assert_eq!(session.step(), WizardStep::Input);
        assert_eq!(session.gross_text(), "18000");
        assert_eq!(session.costs_text(), "2000");
        assert!(session.results().is_empty());
        assert_eq!(session.request(), None);
    }

    #[test]
    fn restart_clears_everything() {
        let mut session = session_at_result(ContractCard::B2b, "18000", "2000");
        session.switch_mode(DisplayMode::InvoiceNet).unwrap();

        session.restart();

        assert_eq!(session.step(), WizardStep::Selection);
        assert_eq!(session.contract_type(), None);
        assert_eq!(session.gross_text(), "");
        assert_eq!(session.view_mode(), DisplayMode::RealCash);
        assert!(session.results().is_empty());
    }

    #[test]
    fn out_of_order_actions_are_rejected() {
        let mut session = WizardSession::new();

        assert_eq!(
            session.finish_loading(),
            Err(WizardError::InvalidTransition {
                step: WizardStep::Selection,
                action: "finish loading",
            })
        );
        assert!(session.edit_amount().is_err());
        assert!(session.change_contract().is_err());
    }
}
