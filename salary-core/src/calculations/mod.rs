//! Salary calculation modules.
//!
//! `salary` holds the net salary formulas; `common` the rounding helpers
//! they share.

pub mod common;
pub mod salary;

pub use salary::{SalaryCalculator, mode_switch_available, select_mode};
