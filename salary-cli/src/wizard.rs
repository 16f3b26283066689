//! Interactive terminal wizard.
//!
//! Drives a [`WizardSession`] from line-based input. Reading and writing are
//! generic so the flow can be scripted in tests.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use salary_core::{DisplayMode, SalaryCalculator};
use tracing::debug;

use crate::render::{card_for_choice, result_screen, selection_screen};
use crate::state::{WizardError, WizardSession, WizardStep};
use crate::utils::parse_flag;

pub struct Wizard<'a, R, W> {
    input: R,
    output: W,
    calculator: &'a SalaryCalculator,
    loading_delay: Duration,
    session: WizardSession,
}

impl<'a, R: BufRead, W: Write> Wizard<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        calculator: &'a SalaryCalculator,
        loading_delay: Duration,
    ) -> Self {
        Self {
            input,
            output,
            calculator,
            loading_delay,
            session: WizardSession::new(),
        }
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    /// Runs until the user quits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let keep_going = match self.session.step() {
                WizardStep::Selection => self.selection_step()?,
                WizardStep::Input => self.input_step()?,
                WizardStep::Loading => self.loading_step().await?,
                WizardStep::Result => self.result_step()?,
            };
            if !keep_going {
                debug!("wizard finished");
                return Ok(());
            }
        }
    }

    /// Prompts and reads one trimmed line. `None` at end of input.
    fn prompt(
        &mut self,
        text: &str,
    ) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn selection_step(&mut self) -> Result<bool> {
        write!(self.output, "\n{}", selection_screen())?;
        let Some(answer) = self.prompt("\nChoose 1-4 (q to quit): ")? else {
            return Ok(false);
        };
        if answer.eq_ignore_ascii_case("q") {
            return Ok(false);
        }
        match card_for_choice(&answer) {
            Some(card) => self.session.select_contract(card)?,
            None => writeln!(self.output, "Please pick one of the cards.")?,
        }
        Ok(true)
    }

    fn input_step(&mut self) -> Result<bool> {
        let contract = match self.session.contract_type() {
            Some(contract) => contract,
            None => {
                self.session.change_contract()?;
                return Ok(true);
            }
        };
        writeln!(
            self.output,
            "\n{} selected. Type 'b' at any prompt to change the contract type.",
            contract.label()
        )?;

        let current = self.session.gross_text().to_string();
        let gross_prompt = if current.is_empty() {
            "Gross Salary (PLN): ".to_string()
        } else {
            format!("Gross Salary (PLN) [{current}]: ")
        };
        let Some(gross) = self.prompt(&gross_prompt)? else {
            return Ok(false);
        };
        if gross.eq_ignore_ascii_case("b") {
            self.session.change_contract()?;
            return Ok(true);
        }
        if !gross.is_empty() {
            self.session.set_gross_text(gross);
        }

        if self.session.is_business() {
            let current = self.session.costs_text().to_string();
            let costs_prompt = if current.is_empty() {
                "Business Costs (Net) [0]: ".to_string()
            } else {
                format!("Business Costs (Net) [{current}, '-' clears]: ")
            };
            let Some(costs) = self.prompt(&costs_prompt)? else {
                return Ok(false);
            };
            match costs.as_str() {
                "b" | "B" => {
                    self.session.change_contract()?;
                    return Ok(true);
                }
                "-" => self.session.set_costs_text(""),
                "" => {}
                _ => self.session.set_costs_text(costs.as_str()),
            }

            let current = if self.session.relief_eligible() { "Y/n" } else { "y/N" };
            let relief_prompt = format!("Ulga na start (Relief), first 6 months of business [{current}]: ");
            let Some(relief) = self.prompt(&relief_prompt)? else {
                return Ok(false);
            };
            if let Some(relief) = parse_flag(&relief) {
                self.session.set_relief(relief);
            }
        }

        match self.session.submit(self.calculator) {
            Ok(()) => {}
            Err(WizardError::InvalidInput(error)) => {
                writeln!(self.output, "Cannot calculate yet: {error}.")?;
                self.session.set_gross_text("");
            }
            Err(error) => return Err(error.into()),
        }
        Ok(true)
    }

    async fn loading_step(&mut self) -> Result<bool> {
        writeln!(self.output, "\nCrunching the numbers...")?;
        self.output.flush()?;
        if !self.loading_delay.is_zero() {
            tokio::time::sleep(self.loading_delay).await;
        }
        self.session.finish_loading()?;
        Ok(true)
    }

    fn result_step(&mut self) -> Result<bool> {
        let (Some(request), Some(result)) = (self.session.request(), self.session.current_result())
        else {
            self.session.restart();
            return Ok(true);
        };
        write!(self.output, "\n{}", result_screen(request, result))?;

        let switchable = self.session.mode_switch_available();
        let menu = if switchable {
            "\n[r]eal cash, [i]nvoice net, [z]ero costs, [e]dit amount, [n]ew calculation, [q]uit: "
        } else {
            "\n[e]dit amount, [n]ew calculation, [q]uit: "
        };
        let Some(answer) = self.prompt(menu)? else {
            return Ok(false);
        };

        match answer.to_ascii_lowercase().as_str() {
            "r" if switchable => self.session.switch_mode(DisplayMode::RealCash)?,
            "i" if switchable => self.session.switch_mode(DisplayMode::InvoiceNet)?,
            "z" if switchable => self.session.switch_mode(DisplayMode::IgnoringCosts)?,
            "e" => self.session.edit_amount()?,
            "n" => self.session.restart(),
            "q" => return Ok(false),
            _ => writeln!(self.output, "Unknown option.")?,
        }
        Ok(true)
    }
}
