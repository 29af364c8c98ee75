//! Parser for the short salary snippet shown next to a listing.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::models::salary::PayPeriod;
use crate::registry::{Country, Language, PatternRegistry};

use super::rules::patterns::CONTRACT_DURATION;
use super::rules::{FieldExtractor, NumberExtractor, PeriodClassifier};

/// Figures read from a raw salary field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryField {
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub currency: Option<String>,
    pub time_period: Option<PayPeriod>,
}

/// Parse a salary field such as `"35 000 - 40 000 kr per månad"`.
///
/// The first number is the minimum and the second, if any, the maximum. No
/// bounds are applied and no default period is assumed. Fields without a
/// digit, and French contract-length notes, yield an empty result.
pub fn parse_salary_field(
    registry: &PatternRegistry,
    text: Option<&str>,
    country: &str,
    languages: &[Language],
) -> Result<SalaryField, ConfigurationError> {
    let profile = Country::parse(country)
        .and_then(|c| registry.profile(c))
        .ok_or_else(|| ConfigurationError::UnsupportedCountry(country.to_string()))?;

    let Some(text) = text else {
        return Ok(SalaryField::default());
    };
    let text = text.to_lowercase();
    if !text.chars().any(|c| c.is_ascii_digit()) || CONTRACT_DURATION.is_match(&text) {
        return Ok(SalaryField::default());
    }

    let language = languages
        .first()
        .copied()
        .unwrap_or(profile.country.default_language());
    let numbers = NumberExtractor::new(registry, country, language).scan(&text);

    let currency = profile
        .currencies
        .iter()
        .find(|c| c.regex.is_match(&text))
        .map(|c| c.label.clone());

    let time_period = languages
        .iter()
        .find_map(|&language| PeriodClassifier::new(registry, language, country).extract(&text))
        .map(|phrase| phrase.value);

    Ok(SalaryField {
        min_salary: numbers.first().map(|n| n.value),
        max_salary: numbers.get(1).or(numbers.first()).map(|n| n.value),
        currency,
        time_period,
    })
}
