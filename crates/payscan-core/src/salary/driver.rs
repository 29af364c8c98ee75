//! Batch salary extraction over posting tables.

use std::thread;

use tracing::info;

use crate::error::ConfigurationError;
use crate::models::posting::{Posting, PostingSource, ProcessedPosting, TextColumn};
use crate::registry::Country;

use super::{SalaryExtractor, SalaryResolver};

/// Resolve salaries for the postings of one country.
///
/// Only postings whose country matches and whose `text_column` mentions a
/// salary term are kept. Works on raw postings and on previously processed
/// ones alike, since only the raw columns are read.
pub fn process_job_descriptions<P: PostingSource>(
    resolver: &SalaryResolver,
    postings: &[P],
    country: &str,
    text_column: &str,
) -> crate::Result<Vec<ProcessedPosting>> {
    let (rows, column) = select_rows(resolver, postings, country, text_column)?;

    let processed: Vec<ProcessedPosting> = rows
        .into_iter()
        .map(|posting| resolve_row(resolver, posting, country, column))
        .collect();

    log_summary(country, &processed);
    Ok(processed)
}

/// Like [`process_job_descriptions`], spread over `workers` threads.
///
/// Output order and values are identical to the sequential version.
pub fn process_job_descriptions_parallel<P: PostingSource + Sync>(
    resolver: &SalaryResolver,
    postings: &[P],
    country: &str,
    text_column: &str,
    workers: usize,
) -> crate::Result<Vec<ProcessedPosting>> {
    let (rows, column) = select_rows(resolver, postings, country, text_column)?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = rows.len().div_ceil(workers.max(1));

    let processed: Vec<ProcessedPosting> = thread::scope(|scope| {
        let handles: Vec<_> = rows
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|posting| resolve_row(resolver, posting, country, column))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(chunk) => chunk,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    log_summary(country, &processed);
    Ok(processed)
}

fn select_rows<'p, P: PostingSource>(
    resolver: &SalaryResolver,
    postings: &'p [P],
    country: &str,
    text_column: &str,
) -> crate::Result<(Vec<&'p Posting>, TextColumn)> {
    let unsupported = || ConfigurationError::UnsupportedCountry(country.to_string());

    let target = Country::parse(country).ok_or_else(unsupported)?;
    let terms = resolver
        .registry()
        .get_salary_context_terms(country)
        .ok_or_else(unsupported)?;
    let column: TextColumn = text_column.parse()?;

    let rows: Vec<&Posting> = postings
        .iter()
        .map(PostingSource::posting)
        .filter(|p| Country::parse(&p.country) == Some(target))
        .filter(|p| {
            p.text(column)
                .is_some_and(|text| terms.is_match(&text.to_lowercase()))
        })
        .collect();

    if rows.is_empty() {
        info!("No {} postings mention a salary in {}", target, column.as_str());
    }

    Ok((rows, column))
}

fn resolve_row(
    resolver: &SalaryResolver,
    posting: &Posting,
    country: &str,
    column: TextColumn,
) -> ProcessedPosting {
    ProcessedPosting {
        posting: posting.clone(),
        salary: resolver.resolve(posting.text(column), country, posting.language.as_deref()),
    }
}

fn log_summary(country: &str, processed: &[ProcessedPosting]) {
    let successes = processed.iter().filter(|p| p.salary.success).count();
    info!(
        "Salary extraction success for {}: {}/{}",
        country,
        successes,
        processed.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayscanError;
    use crate::registry::PatternRegistry;
    use std::sync::Arc;

    fn resolver() -> SalaryResolver {
        SalaryResolver::new(Arc::new(PatternRegistry::standard().unwrap()))
    }

    fn postings() -> Vec<Posting> {
        vec![
            Posting::new("USA", "Salary: $120,000 per year.").with_job_id("1"),
            Posting::new("USA", "Free coffee and snacks.").with_job_id("2"),
            Posting::new("France", "Salaire: 2 500 € par mois").with_job_id("3"),
            Posting::new("usa", "Pay: $25 per hour").with_job_id("4"),
            Posting::new("USA", "Great salary, ask us!").with_job_id("5"),
        ]
    }

    #[test]
    fn test_filters_by_country_and_terms() {
        let processed =
            process_job_descriptions(&resolver(), &postings(), "USA", "job_description").unwrap();

        let ids: Vec<_> = processed
            .iter()
            .map(|p| p.posting.job_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "4", "5"]);

        assert_eq!(processed[0].salary.min_salary, Some(120000.0));
        assert_eq!(processed[1].salary.min_salary, Some(25.0));
        assert!(!processed[2].salary.success);
    }

    #[test]
    fn test_unsupported_country() {
        let result = process_job_descriptions(&resolver(), &postings(), "Germany", "job_description");
        assert!(matches!(
            result,
            Err(PayscanError::Configuration(ConfigurationError::UnsupportedCountry(_)))
        ));
    }

    #[test]
    fn test_unknown_column() {
        let result = process_job_descriptions(&resolver(), &postings(), "USA", "body");
        assert!(matches!(
            result,
            Err(PayscanError::Configuration(ConfigurationError::UnknownTextColumn(_)))
        ));
    }

    #[test]
    fn test_empty_subset() {
        let processed =
            process_job_descriptions(&resolver(), &postings(), "Sweden", "job_description").unwrap();
        assert!(processed.is_empty());
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let resolver = resolver();
        let first = process_job_descriptions(&resolver, &postings(), "USA", "job_description").unwrap();
        let second = process_job_descriptions(&resolver, &first, "USA", "job_description").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let resolver = resolver();
        let mut rows = postings();
        for i in 0..20 {
            rows.push(
                Posting::new("USA", format!("Salary ${},000 per year", 60 + i))
                    .with_job_id(format!("bulk-{}", i)),
            );
        }

        let sequential = process_job_descriptions(&resolver, &rows, "USA", "job_description").unwrap();
        for workers in [1, 3, 8, 64] {
            let parallel =
                process_job_descriptions_parallel(&resolver, &rows, "USA", "job_description", workers)
                    .unwrap();
            assert_eq!(parallel, sequential);
        }
    }
}
