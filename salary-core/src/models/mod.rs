mod calculation_request;
mod calculation_result;
mod contract_type;
mod display_mode;
mod salary_rates;

pub use calculation_request::CalculationRequest;
pub use calculation_result::{CalculationResult, DeductionBreakdown};
pub use contract_type::ContractType;
pub use display_mode::DisplayMode;
pub use salary_rates::SalaryRates;
