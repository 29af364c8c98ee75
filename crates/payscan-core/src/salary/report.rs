//! Data-quality reporting over extraction output.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::models::posting::SalaryRow;

/// Extraction counts for one country.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CountrySummary {
    pub total: usize,
    pub successes: usize,
    /// Rows with monthly figures but no base-currency figures.
    pub conversion_gaps: usize,
}

impl CountrySummary {
    /// Share of rows with a resolved salary, in `[0, 1]`.
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.successes as f64 / self.total as f64
        }
    }
}

/// Per-country extraction summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionSummary {
    pub countries: BTreeMap<String, CountrySummary>,
}

impl ExtractionSummary {
    pub fn from_records(rows: &[SalaryRow]) -> Self {
        let mut countries: BTreeMap<String, CountrySummary> = BTreeMap::new();

        for row in rows {
            let entry = countries.entry(row.country.clone()).or_default();
            entry.total += 1;
            if row.salary_extraction_success {
                entry.successes += 1;
            }
            if row.normalized().has_conversion_gap() {
                entry.conversion_gaps += 1;
            }
        }

        Self { countries }
    }

    pub fn total(&self) -> CountrySummary {
        self.countries
            .values()
            .fold(CountrySummary::default(), |acc, c| CountrySummary {
                total: acc.total + c.total,
                successes: acc.successes + c.successes,
                conversion_gaps: acc.conversion_gaps + c.conversion_gaps,
            })
    }

    /// Log one line per country.
    pub fn log(&self) {
        for (country, summary) in &self.countries {
            info!(
                "{}: {}/{} salaries extracted ({:.1}%), {} without conversion",
                country,
                summary.successes,
                summary.total,
                summary.rate() * 100.0,
                summary.conversion_gaps
            );
        }
    }
}

/// A row whose minimum and maximum differ wildly in magnitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeMismatch {
    pub job_id: Option<String>,
    pub min_salary: f64,
    pub max_salary: f64,
    pub context_string: Option<String>,
}

/// Rows whose min and max integer parts differ by two or more digits.
///
/// These usually mean an hourly and an annual figure ended up in the same
/// range.
pub fn magnitude_mismatches(rows: &[SalaryRow]) -> Vec<MagnitudeMismatch> {
    rows.iter()
        .filter_map(|row| {
            let (min, max) = (row.min_salary?, row.max_salary?);
            let diff = integer_digits(min).abs_diff(integer_digits(max));
            (diff >= 2).then(|| MagnitudeMismatch {
                job_id: row.job_id.clone(),
                min_salary: min,
                max_salary: max,
                context_string: row.context_string.clone(),
            })
        })
        .collect()
}

fn integer_digits(value: f64) -> usize {
    (value.trunc().abs() as u64).to_string().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::posting::{Posting, ProcessedPosting};
    use crate::models::salary::{NormalizedSalary, PayPeriod, ResolvedSalary};

    fn row(country: &str, min: f64, max: f64, eur: bool) -> SalaryRow {
        let processed = ProcessedPosting {
            posting: Posting::new(country, "text").with_job_id(format!("{}-{}", min, max)),
            salary: ResolvedSalary::from_values(&[min, max], "$", PayPeriod::PerMonth, "ctx", vec![])
                .unwrap(),
        };
        let normalized = NormalizedSalary {
            min_salary_month: Some(min),
            max_salary_month: Some(max),
            min_salary_month_eur: eur.then_some(min),
            max_salary_month_eur: eur.then_some(max),
        };
        SalaryRow::new(&processed, &normalized)
    }

    fn failed(country: &str) -> SalaryRow {
        let processed = ProcessedPosting {
            posting: Posting::new(country, "text"),
            salary: ResolvedSalary::failure(),
        };
        SalaryRow::new(&processed, &NormalizedSalary::default())
    }

    #[test]
    fn test_summary_counts() {
        let rows = vec![
            row("USA", 5000.0, 6000.0, true),
            row("USA", 5000.0, 6000.0, false),
            failed("USA"),
            failed("Sweden"),
        ];
        let summary = ExtractionSummary::from_records(&rows);

        let usa = &summary.countries["USA"];
        assert_eq!(usa.total, 3);
        assert_eq!(usa.successes, 2);
        assert_eq!(usa.conversion_gaps, 1);
        assert_eq!(summary.countries["Sweden"].rate(), 0.0);
        assert_eq!(summary.total().total, 4);
    }

    #[test]
    fn test_magnitude_mismatches() {
        let rows = vec![
            row("USA", 45.0, 95000.0, true),
            row("USA", 85000.0, 95000.0, true),
            row("USA", 900.0, 1200.0, true),
            failed("USA"),
        ];
        let mismatches = magnitude_mismatches(&rows);

        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].min_salary, 45.0);
    }
}
