use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use salary_core::{ContractType, DisplayMode};

/// Net salary estimator for Polish contract types (UoP, B2B, UZ).
///
/// Without a subcommand the interactive wizard starts.
#[derive(Debug, Parser)]
#[command(name = "salary-estimator", version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file with rates, wizard and logging settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `warn,salary_core=debug`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Skip the pause on the "calculating" screen.
    #[arg(long, global = true, default_value_t = false)]
    pub no_delay: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate one salary and print the result.
    Calc(CalcArgs),

    /// Step through contract selection, input and result interactively.
    Wizard,

    /// Evaluate every row of a CSV file.
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
pub struct CalcArgs {
    /// Contract type: uop, b2b or uz.
    #[arg(short, long, value_parser = parse_contract)]
    pub contract: ContractType,

    /// Monthly gross amount in PLN. Accepts `12500`, `12 500` or `12500,50`.
    #[arg(short, long, allow_hyphen_values = true)]
    pub gross: String,

    /// Monthly business costs (B2B only). Negative or malformed costs count as zero.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub costs: String,

    /// Apply the reduced start-up ZUS contribution (B2B only).
    #[arg(long, default_value_t = false)]
    pub relief: bool,

    /// Which B2B figure to show: real, invoice or zero.
    #[arg(short, long, value_parser = parse_mode, default_value = "real")]
    pub mode: DisplayMode,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// CSV file with `contract,gross[,costs][,relief]` columns.
    #[arg(short, long)]
    pub file: PathBuf,
}

fn parse_contract(s: &str) -> Result<ContractType, String> {
    ContractType::parse(s).ok_or_else(|| format!("unknown contract '{s}' (expected uop, b2b or uz)"))
}

fn parse_mode(s: &str) -> Result<DisplayMode, String> {
    DisplayMode::parse(s).ok_or_else(|| format!("unknown mode '{s}' (expected real, invoice or zero)"))
}
