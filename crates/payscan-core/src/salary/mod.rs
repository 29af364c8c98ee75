//! Salary extraction and normalization.

mod driver;
mod field;
mod normalize;
mod report;
mod resolver;
pub mod rules;

pub use driver::{process_job_descriptions, process_job_descriptions_parallel};
pub use field::{parse_salary_field, SalaryField};
pub use normalize::{to_monthly, to_monthly_from_label, CurrencyConverter, ExchangeRates};
pub use report::{magnitude_mismatches, CountrySummary, ExtractionSummary, MagnitudeMismatch};
pub use resolver::SalaryResolver;

use crate::error::ExtractionError;
use crate::models::salary::ResolvedSalary;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for per-posting salary extraction.
pub trait SalaryExtractor: Send + Sync {
    /// Resolve the salary of one posting text.
    ///
    /// Never fails: a posting without a usable salary yields
    /// [`ResolvedSalary::failure`].
    fn resolve(&self, text: Option<&str>, country: &str, language: Option<&str>) -> ResolvedSalary;
}
