//! Job posting records and the output table row.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

use super::salary::{NormalizedSalary, ResolvedSalary};

/// One scraped job listing.
///
/// Column names follow the scraper output so a CSV export deserializes
/// directly. Everything except `country` may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Posting {
    pub job_id: Option<String>,
    pub job_link: Option<String>,
    pub page: Option<u32>,
    pub country: String,
    pub search_keyword: Option<String>,
    pub search_location: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub company_location: Option<String>,

    /// Raw salary snippet shown next to the listing.
    pub salary: Option<String>,

    /// Free-text description.
    pub job_description: Option<String>,

    /// Detected language (name or ISO-639-1 code).
    pub language: Option<String>,

    /// Normalized/lemmatized description.
    #[serde(alias = "normalized_text")]
    pub job_description_norm: Option<String>,
}

impl Posting {
    /// Create a posting with a country and description.
    pub fn new(country: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            job_description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Set the language column.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the job id.
    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    /// Value of a text column.
    pub fn text(&self, column: TextColumn) -> Option<&str> {
        match column {
            TextColumn::JobDescription => self.job_description.as_deref(),
            TextColumn::NormalizedDescription => self.job_description_norm.as_deref(),
            TextColumn::Salary => self.salary.as_deref(),
        }
    }
}

/// Text columns the driver can scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColumn {
    JobDescription,
    NormalizedDescription,
    Salary,
}

impl TextColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            TextColumn::JobDescription => "job_description",
            TextColumn::NormalizedDescription => "job_description_norm",
            TextColumn::Salary => "salary",
        }
    }
}

impl FromStr for TextColumn {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "job_description" => Ok(TextColumn::JobDescription),
            "job_description_norm" | "normalized_text" => Ok(TextColumn::NormalizedDescription),
            "salary" => Ok(TextColumn::Salary),
            other => Err(ConfigurationError::UnknownTextColumn(other.to_string())),
        }
    }
}

/// A posting with its resolved salary attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedPosting {
    pub posting: Posting,
    pub salary: ResolvedSalary,
}

/// Anything that carries a raw posting.
///
/// The driver reads postings through this trait, so feeding it its own
/// output only ever touches the original columns.
pub trait PostingSource {
    fn posting(&self) -> &Posting;
}

impl PostingSource for Posting {
    fn posting(&self) -> &Posting {
        self
    }
}

impl PostingSource for ProcessedPosting {
    fn posting(&self) -> &Posting {
        &self.posting
    }
}

/// Output table row: raw columns plus the derived salary columns.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryRow {
    pub job_id: Option<String>,
    pub job_link: Option<String>,
    pub page: Option<u32>,
    pub country: String,
    pub search_keyword: Option<String>,
    pub search_location: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub company_location: Option<String>,
    pub salary: Option<String>,
    pub job_description: Option<String>,
    pub language: Option<String>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub currency: Option<String>,
    pub time_period: Option<String>,
    pub salary_extraction_success: bool,
    pub context_string: Option<String>,
    pub min_salary_month: Option<f64>,
    pub max_salary_month: Option<f64>,
    #[serde(rename = "min_salary_month_EUR")]
    pub min_salary_month_eur: Option<f64>,
    #[serde(rename = "max_salary_month_EUR")]
    pub max_salary_month_eur: Option<f64>,
}

impl SalaryRow {
    pub fn new(processed: &ProcessedPosting, normalized: &NormalizedSalary) -> Self {
        let posting = &processed.posting;
        let salary = &processed.salary;
        Self {
            job_id: posting.job_id.clone(),
            job_link: posting.job_link.clone(),
            page: posting.page,
            country: posting.country.clone(),
            search_keyword: posting.search_keyword.clone(),
            search_location: posting.search_location.clone(),
            job_title: posting.job_title.clone(),
            company_name: posting.company_name.clone(),
            company_location: posting.company_location.clone(),
            salary: posting.salary.clone(),
            job_description: posting.job_description.clone(),
            language: posting.language.clone(),
            min_salary: salary.min_salary,
            max_salary: salary.max_salary,
            currency: salary.currency.clone(),
            time_period: salary.time_period.map(|p| p.as_str().to_string()),
            salary_extraction_success: salary.success,
            context_string: salary.context_string.clone(),
            min_salary_month: normalized.min_salary_month,
            max_salary_month: normalized.max_salary_month,
            min_salary_month_eur: normalized.min_salary_month_eur,
            max_salary_month_eur: normalized.max_salary_month_eur,
        }
    }

    /// The normalized columns of this row.
    pub fn normalized(&self) -> NormalizedSalary {
        NormalizedSalary {
            min_salary_month: self.min_salary_month,
            max_salary_month: self.max_salary_month,
            min_salary_month_eur: self.min_salary_month_eur,
            max_salary_month_eur: self.max_salary_month_eur,
        }
    }
}

/// Drop repeated listings, keeping the last one.
///
/// Two postings are the same listing when description, search location and
/// title all match. Relative order of the kept postings is preserved.
pub fn remove_duplicate_postings(postings: Vec<Posting>) -> Vec<Posting> {
    let key = |p: &Posting| {
        (
            p.job_description.clone(),
            p.search_location.clone(),
            p.job_title.clone(),
        )
    };

    let mut last_index = HashMap::new();
    for (i, posting) in postings.iter().enumerate() {
        last_index.insert(key(posting), i);
    }

    let before = postings.len();
    let kept: Vec<Posting> = postings
        .into_iter()
        .enumerate()
        .filter(|(i, p)| last_index.get(&key(p)) == Some(i))
        .map(|(_, p)| p)
        .collect();

    tracing::info!(
        "Removed {} duplicate postings ({} -> {})",
        before - kept.len(),
        before,
        kept.len()
    );

    kept
}
