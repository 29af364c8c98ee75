//! Core library for multi-country salary extraction from job postings.
//!
//! This crate provides:
//! - Per-country pattern tables (currencies, number formats, salary terms,
//!   plausibility bounds) and per-language pay-period vocabularies
//! - Salary range resolution from free-text postings
//! - Batch processing over posting tables, sequential or threaded
//! - Monthly normalization and conversion into a base currency
//! - Data-quality reporting

pub mod error;
pub mod models;
pub mod registry;
pub mod salary;

pub use error::{ConfigurationError, ExtractionError, PayscanError, Result};
pub use models::{
    NormalizedSalary, PayPeriod, PayscanConfig, Posting, PostingSource, ProcessedPosting,
    ResolvedSalary, SalaryRow, TextColumn,
};
pub use registry::{Country, Language, PatternRegistry, PlausibilityBounds};
pub use salary::{
    process_job_descriptions, process_job_descriptions_parallel, CurrencyConverter,
    ExchangeRates, ExtractionSummary, SalaryExtractor, SalaryResolver,
};
