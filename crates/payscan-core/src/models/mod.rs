//! Data models for postings, salary results and configuration.

pub mod config;
pub mod posting;
pub mod salary;

pub use config::{ConversionConfig, ExtractionConfig, PayscanConfig};
pub use posting::{
    remove_duplicate_postings, Posting, PostingSource, ProcessedPosting, SalaryRow, TextColumn,
};
pub use salary::{NormalizedSalary, PayPeriod, ResolvedSalary};
