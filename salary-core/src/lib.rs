pub mod calculations;
pub mod error;
pub mod input;
pub mod models;

pub use calculations::{SalaryCalculator, mode_switch_available, select_mode};
pub use error::{InvalidInputError, RateConfigError};
pub use models::*;
