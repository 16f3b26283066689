//! CSV batch evaluation.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column     | Required | Notes                                               |
//! |------------|----------|-----------------------------------------------------|
//! | `contract` | yes      | `uop`, `b2b` or `uz`                                |
//! | `gross`    | yes      | same formats as the form; invalid rows are reported |
//! | `costs`    | no       | B2B only; empty or malformed becomes 0               |
//! | `relief`   | no       | B2B only; `true`/`false`, `yes`/`no`, `1`/`0`        |
//!
//! ```csv
//! contract,gross,costs,relief
//! uop,12500,,
//! b2b,18000,2000,false
//! ```
//!
//! A bad row never stops the batch: each row carries its own outcome.

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use salary_core::{
    CalculationRequest, CalculationResult, ContractType, InvalidInputError, SalaryCalculator,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::render::summary_line;
use crate::utils::parse_flag;

#[derive(Debug, Deserialize)]
struct CsvRow {
    contract: String,
    gross: String,
    #[serde(default)]
    costs: Option<String>,
    #[serde(default)]
    relief: Option<String>,
}

/// Errors that stop a whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("cannot open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Problems confined to one row.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("unknown contract '{0}' (expected uop, b2b or uz)")]
    UnknownContract(String),

    #[error("relief must be yes or no, got '{0}'")]
    InvalidRelief(String),

    #[error("malformed row: {0}")]
    Malformed(String),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}

/// One parsed row with its 1-based line number in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub line: usize,
    pub request: Result<CalculationRequest, RowError>,
}

/// One evaluated row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub line: usize,
    pub outcome: Result<(CalculationRequest, Vec<CalculationResult>), RowError>,
}

fn row_to_request(row: CsvRow) -> Result<CalculationRequest, RowError> {
    let contract = ContractType::parse(&row.contract)
        .ok_or_else(|| RowError::UnknownContract(row.contract.trim().to_string()))?;

    let relief_text = row.relief.unwrap_or_default();
    let relief = if relief_text.trim().is_empty() {
        false
    } else {
        parse_flag(&relief_text).ok_or_else(|| RowError::InvalidRelief(relief_text.trim().to_string()))?
    };

    Ok(CalculationRequest::from_raw(
        contract,
        &row.gross,
        row.costs.as_deref().unwrap_or(""),
        relief,
    )?)
}

fn malformed(error: &csv::Error) -> RowError {
    let message = match error.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        _ => error.to_string(),
    };
    RowError::Malformed(message)
}

fn line_of(
    position: Option<&csv::Position>,
    fallback: usize,
) -> usize {
    position.map_or(fallback, |p| p.line() as usize)
}

/// Parses every row of a CSV reader into a request or a row error.
///
/// Only I/O failures and an unreadable header stop the batch; a row with the
/// wrong number of fields or a missing value becomes a row error.
pub fn load_requests<R: Read>(reader: R) -> Result<Vec<BatchEntry>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut entries = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        // Line 1 is the header.
        let fallback = index + 2;
        let (line, request) = match record {
            Ok(record) => (
                line_of(record.position(), fallback),
                record
                    .deserialize::<CsvRow>(Some(&headers))
                    .map_err(|e| malformed(&e))
                    .and_then(row_to_request),
            ),
            Err(error) if matches!(error.kind(), csv::ErrorKind::Io(_)) => return Err(error.into()),
            Err(error) => (line_of(error.position(), fallback), Err(malformed(&error))),
        };
        if let Err(error) = &request {
            warn!(line, %error, "skipping invalid batch row");
        }
        entries.push(BatchEntry { line, request });
    }

    Ok(entries)
}

/// Opens `path` and parses it with [`load_requests`].
pub fn load_from_file(path: &Path) -> Result<Vec<BatchEntry>, BatchError> {
    let file = File::open(path).map_err(|source| BatchError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = load_requests(file)?;
    info!(path = %path.display(), rows = entries.len(), "batch file loaded");
    Ok(entries)
}

/// Evaluates each valid entry; invalid entries pass their error through.
pub fn evaluate_all(
    calculator: &SalaryCalculator,
    entries: Vec<BatchEntry>,
) -> Vec<BatchOutcome> {
    entries
        .into_iter()
        .map(|entry| {
            let outcome = entry.request.and_then(|request| {
                let results = calculator.evaluate(&request)?;
                Ok((request, results))
            });
            BatchOutcome {
                line: entry.line,
                outcome,
            }
        })
        .collect()
}

/// Renders one line per outcome.
pub fn render_outcomes(outcomes: &[BatchOutcome]) -> String {
    outcomes
        .iter()
        .map(|o| match &o.outcome {
            Ok((request, results)) => format!("row {:<4} {}\n", o.line, summary_line(request, results)),
            Err(error) => format!("row {:<4} error: {}\n", o.line, error),
        })
        .collect()
}
