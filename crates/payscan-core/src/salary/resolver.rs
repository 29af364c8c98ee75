//! Salary range resolution for a single posting.

use std::ops::RangeInclusive;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{ConfigurationError, ExtractionError};
use crate::models::config::PayscanConfig;
use crate::models::salary::ResolvedSalary;
use crate::registry::{Country, Language, PatternRegistry};

use super::rules::numbers::DEFAULT_YEARS;
use super::rules::{ContextWindow, NumberExtractor, PeriodClassifier};
use super::{Result, SalaryExtractor};

/// Resolves the salary range of a posting from its currency mentions.
#[derive(Debug, Clone)]
pub struct SalaryResolver {
    registry: Arc<PatternRegistry>,
    /// Characters kept before a currency match.
    look_behind: usize,
    /// Characters kept after a currency match.
    look_ahead: usize,
    /// Values treated as calendar years.
    years: RangeInclusive<u32>,
}

impl SalaryResolver {
    /// Create a resolver with the default window (50 back, 40 ahead).
    pub fn new(registry: Arc<PatternRegistry>) -> Self {
        Self {
            registry,
            look_behind: 50,
            look_ahead: 40,
            years: DEFAULT_YEARS,
        }
    }

    /// Build the registry and resolver settings from configuration.
    pub fn from_config(config: &PayscanConfig) -> std::result::Result<Self, ConfigurationError> {
        let registry = PatternRegistry::from_config(config)?;
        let extraction = &config.extraction;

        Ok(Self::new(Arc::new(registry))
            .with_window(extraction.look_behind, extraction.look_ahead)
            .with_year_range(extraction.min_year..=extraction.max_year))
    }

    /// Set the context window size, in characters.
    pub fn with_window(mut self, look_behind: usize, look_ahead: usize) -> Self {
        self.look_behind = look_behind;
        self.look_ahead = look_ahead;
        self
    }

    /// Set the range of values treated as years.
    pub fn with_year_range(mut self, years: RangeInclusive<u32>) -> Self {
        self.years = years;
        self
    }

    /// Shared pattern registry, e.g. for a [`CurrencyConverter`](super::CurrencyConverter).
    pub fn registry(&self) -> &Arc<PatternRegistry> {
        &self.registry
    }

    fn try_resolve(&self, text: Option<&str>, country: &str, language: Language) -> Result<ResolvedSalary> {
        let text = text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ExtractionError::MalformedInput("missing or blank text".to_string()))?;

        let profile = Country::parse(country)
            .and_then(|c| self.registry.profile(c))
            .ok_or_else(|| ExtractionError::UnknownCountry(country.to_string()))?;
        let context_terms = profile
            .context_terms
            .as_ref()
            .ok_or_else(|| ExtractionError::UnknownCountry(country.to_string()))?;

        let text = text.to_lowercase();
        let numbers = NumberExtractor::new(&self.registry, country, language)
            .with_year_range(self.years.clone());
        let periods = PeriodClassifier::new(&self.registry, language, country);

        for currency in &profile.currencies {
            for m in currency.regex.find_iter(&text) {
                let window =
                    ContextWindow::around(&text, m.start(), m.end(), self.look_behind, self.look_ahead);

                if !context_terms.is_match(window.text) {
                    debug!("No salary term near '{}' at {}", currency.label, m.start());
                    continue;
                }

                let initial = numbers.scan(window.text);
                let candidates = numbers.filter(window.text, initial.clone());
                let period = periods.classify(window.text, &candidates, Some(window.anchor));

                let values: Vec<f64> = candidates
                    .iter()
                    .map(|c| c.value)
                    .filter(|v| profile.bounds.contains(period, *v))
                    .collect();

                let initial_numbers = initial.iter().map(|c| c.value).collect();
                if let Some(resolved) = ResolvedSalary::from_values(
                    &values,
                    currency.label.as_str(),
                    period,
                    window.text,
                    initial_numbers,
                ) {
                    debug!(
                        "Resolved {:?}-{:?} {} {} from '{}'",
                        resolved.min_salary, resolved.max_salary, currency.label, period, window.text
                    );
                    return Ok(resolved);
                }

                debug!(
                    "No plausible {} figure among {} candidates in '{}'",
                    period,
                    candidates.len(),
                    window.text
                );
            }
        }

        Ok(ResolvedSalary::failure())
    }
}

impl SalaryExtractor for SalaryResolver {
    fn resolve(&self, text: Option<&str>, country: &str, language: Option<&str>) -> ResolvedSalary {
        let language = language
            .and_then(Language::parse)
            .or_else(|| Country::parse(country).map(Country::default_language))
            .unwrap_or(Language::English);

        match self.try_resolve(text, country, language) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Salary extraction skipped: {}", e);
                ResolvedSalary::failure()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::salary::PayPeriod;
    use pretty_assertions::assert_eq;

    fn resolver() -> SalaryResolver {
        SalaryResolver::new(Arc::new(PatternRegistry::standard().unwrap()))
    }

    #[test]
    fn test_usa_range() {
        let resolved = resolver().resolve(
            Some("We offer a competitive salary of $85,000 - $95,000 per year plus benefits."),
            "USA",
            Some("en"),
        );

        assert!(resolved.success);
        assert_eq!(resolved.min_salary, Some(85000.0));
        assert_eq!(resolved.max_salary, Some(95000.0));
        assert_eq!(resolved.currency.as_deref(), Some("$"));
        assert_eq!(resolved.time_period, Some(PayPeriod::PerYear));
        assert_eq!(resolved.initial_numbers, vec![85000.0, 95000.0]);
    }

    #[test]
    fn test_france_monthly() {
        let resolved = resolver().resolve(Some("Salaire: 45 000 € par mois"), "France", Some("fr"));

        assert!(resolved.success);
        assert_eq!(resolved.min_salary, Some(45000.0));
        assert_eq!(resolved.max_salary, Some(45000.0));
        assert_eq!(resolved.currency.as_deref(), Some("€"));
        assert_eq!(resolved.time_period, Some(PayPeriod::PerMonth));
    }

    #[test]
    fn test_sweden_kronor() {
        let resolved = resolver().resolve(
            Some("Lön: 35 000 - 42 000 kr per månad, tillträde enligt överenskommelse."),
            "Sweden",
            None,
        );

        assert!(resolved.success);
        assert_eq!(resolved.min_salary, Some(35000.0));
        assert_eq!(resolved.max_salary, Some(42000.0));
        assert_eq!(resolved.currency.as_deref(), Some("kr"));
        assert_eq!(resolved.time_period, Some(PayPeriod::PerMonth));
    }

    #[test]
    fn test_italy_ral() {
        let resolved = resolver().resolve(
            Some("Offriamo una RAL tra 28.000 e 32.000 € in base all'esperienza."),
            "Italy",
            Some("it"),
        );

        assert!(resolved.success);
        assert_eq!(resolved.min_salary, Some(28000.0));
        assert_eq!(resolved.max_salary, Some(32000.0));
        assert_eq!(resolved.time_period, Some(PayPeriod::PerYear));
    }

    #[test]
    fn test_year_is_not_a_salary() {
        let resolved = resolver().resolve(
            Some("Established in 2019. Salary: $75,000 per year."),
            "USA",
            None,
        );

        assert_eq!(resolved.min_salary, Some(75000.0));
        assert_eq!(resolved.max_salary, Some(75000.0));
    }

    #[test]
    fn test_hourly_bound_rejects_annual_figure() {
        let resolved = resolver().resolve(Some("Pay: $50000 per hour"), "USA", None);

        assert!(!resolved.success);
        assert_eq!(resolved, ResolvedSalary::failure());
    }

    #[test]
    fn test_no_salary() {
        let resolved =
            resolver().resolve(Some("Join our amazing team! Free coffee and snacks."), "USA", None);
        assert_eq!(resolved, ResolvedSalary::failure());
    }

    #[test]
    fn test_currency_without_salary_term() {
        let resolved = resolver().resolve(Some("We raised $20 from friends."), "USA", None);
        assert!(!resolved.success);
    }

    #[test]
    fn test_malformed_rows() {
        let resolver = resolver();
        assert!(!resolver.resolve(None, "USA", None).success);
        assert!(!resolver.resolve(Some("   "), "USA", None).success);
        assert!(!resolver.resolve(Some("salary $90,000"), "Germany", None).success);
    }

    #[test]
    fn test_implausible_figures_ignored() {
        let text = "Referral program pays $500. Salary: $120,000 per year.";
        let resolved = resolver().resolve(Some(text), "USA", None);

        assert!(resolved.success);
        assert_eq!(resolved.min_salary, Some(120000.0));
    }

    #[test]
    fn test_narrow_window_keeps_whole_number() {
        let resolver = resolver().with_window(5, 12);
        let resolved = resolver.resolve(Some("You will earn 45,000 dollars yearly pay"), "USA", None);

        assert_eq!(resolved.min_salary, Some(45000.0));
    }
}
