use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use salary_core::{CalculationRequest, SalaryCalculator, mode_switch_available, select_mode};
use tracing::{debug, info};

use crate::batch::{evaluate_all, load_from_file, render_outcomes};
use crate::cli::{CalcArgs, Cli, Command};
use crate::config::AppConfig;
use crate::render::{result_screen, summary_line};
use crate::wizard::Wizard;

/// Builds a calculator from the configured rates.
pub fn build_calculator(config: &AppConfig) -> Result<SalaryCalculator> {
    SalaryCalculator::new(config.rates.clone()).context("invalid salary rates")
}

/// Output of the `calc` command: the chosen mode's screen, followed by a
/// one-line summary of every mode when the modes differ.
pub fn calc_report(
    calculator: &SalaryCalculator,
    args: &CalcArgs,
) -> Result<String> {
    let request = CalculationRequest::from_raw(args.contract, &args.gross, &args.costs, args.relief)
        .with_context(|| format!("cannot calculate {} salary", args.contract.label()))?;
    let results = calculator.evaluate(&request)?;
    let result = select_mode(&results, args.mode).context("calculation produced no result")?;

    let mut report = result_screen(&request, result);
    if mode_switch_available(&request) {
        report.push('\n');
        report.push_str(&summary_line(&request, &results));
        report.push('\n');
    }
    Ok(report)
}

/// Output of the `batch` command.
pub fn batch_report(
    calculator: &SalaryCalculator,
    path: &Path,
) -> Result<String> {
    let entries = load_from_file(path).with_context(|| format!("cannot load batch file {}", path.display()))?;
    let outcomes = evaluate_all(calculator, entries);
    let failed = outcomes.iter().filter(|o| o.outcome.is_err()).count();
    info!(rows = outcomes.len(), failed, "batch evaluated");
    Ok(render_outcomes(&outcomes))
}

/// Dispatches the parsed command line.
pub async fn run(
    cli: Cli,
    config: AppConfig,
) -> Result<()> {
    let calculator = build_calculator(&config)?;
    let delay = if cli.no_delay {
        Duration::ZERO
    } else {
        config.loading_delay()
    };

    match cli.command {
        Some(Command::Calc(args)) => {
            debug!(?args, "calc");
            let report = calc_report(&calculator, &args)?;
            let mut stdout = io::stdout().lock();
            write!(stdout, "{report}")?;
            stdout.flush()?;
        }
        Some(Command::Batch(args)) => {
            let report = batch_report(&calculator, &args.file)?;
            let mut stdout = io::stdout().lock();
            write!(stdout, "{report}")?;
            stdout.flush()?;
        }
        Some(Command::Wizard) | None => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            Wizard::new(stdin, stdout, &calculator, delay).run().await?;
        }
    }
    Ok(())
}
