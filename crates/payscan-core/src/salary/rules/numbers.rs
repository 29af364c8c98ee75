//! Numeric token extraction for the four supported number formats.

use std::ops::RangeInclusive;

use regex::Regex;
use tracing::trace;

use super::patterns::nuisance_patterns;
use super::{ExtractionMatch, FieldExtractor};
use crate::error::ExtractionError;
use crate::registry::{Country, Language, PatternRegistry};

/// A parsed numeric token with its raw text and byte span.
pub type SalaryCandidate = ExtractionMatch<f64>;

/// Default range of values treated as calendar years.
pub const DEFAULT_YEARS: RangeInclusive<u32> = 1900..=2030;

/// Number extractor bound to one country's number format.
pub struct NumberExtractor<'a> {
    pattern: &'a Regex,
    country: Option<Country>,
    year_markers: Vec<&'a Regex>,
    years: RangeInclusive<u32>,
}

impl<'a> NumberExtractor<'a> {
    pub fn new(registry: &'a PatternRegistry, country: &str, language: Language) -> Self {
        let mut year_markers = vec![registry.year_markers(language)];
        if language != Language::English {
            // Postings mix English boilerplate into local text.
            year_markers.push(registry.year_markers(Language::English));
        }

        Self {
            pattern: registry.get_number_pattern(country),
            country: Country::parse(country),
            year_markers,
            years: DEFAULT_YEARS,
        }
    }

    /// Set the range of values treated as years.
    pub fn with_year_range(mut self, years: RangeInclusive<u32>) -> Self {
        self.years = years;
        self
    }

    /// Every parseable non-zero token, before any filtering.
    pub fn scan(&self, text: &str) -> Vec<SalaryCandidate> {
        let mut results = Vec::new();

        for token in self.pattern.find_iter(text) {
            match parse_number(token.as_str(), self.country) {
                Ok(value) if value != 0.0 => results.push(
                    ExtractionMatch::new(value, token.as_str())
                        .with_position(token.start(), token.end()),
                ),
                Ok(_) => {}
                Err(e) => trace!("Skipping token: {}", e),
            }
        }

        results
    }

    /// Drop nuisance numbers and calendar years.
    pub fn filter(&self, text: &str, candidates: Vec<SalaryCandidate>) -> Vec<SalaryCandidate> {
        let nuisances: Vec<(usize, usize)> = nuisance_patterns()
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.end())))
            .collect();

        candidates
            .into_iter()
            .filter(|candidate| {
                let Some((start, end)) = candidate.position else {
                    return true;
                };

                if nuisances.iter().any(|&(s, e)| s < end && start < e) {
                    trace!("Dropping nuisance number {}", candidate.source);
                    return false;
                }

                if is_likely_year(
                    &candidate.source,
                    &text[..start],
                    &self.year_markers,
                    &self.years,
                ) {
                    trace!("Dropping year {}", candidate.source);
                    return false;
                }

                true
            })
            .collect()
    }
}

impl FieldExtractor for NumberExtractor<'_> {
    type Output = SalaryCandidate;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.filter(text, self.scan(text))
    }
}

/// Extract salary candidates from a window of text.
pub fn extract_numbers(
    registry: &PatternRegistry,
    text: &str,
    country: &str,
    language: Language,
) -> Vec<SalaryCandidate> {
    NumberExtractor::new(registry, country, language).extract_all(text)
}

/// Parse one numeric token in a country's format.
///
/// A trailing `k` multiplies by 1000. Without a country, a comma is read as a
/// decimal separator.
pub fn parse_number(token: &str, country: Option<Country>) -> Result<f64, ExtractionError> {
    let token = token.trim();
    let (digits, multiplier) = match token.strip_suffix(['k', 'K']) {
        Some(digits) => (digits, 1000.0),
        None => (token, 1.0),
    };

    let normalized = match country {
        Some(Country::Usa) => {
            if digits.starts_with('0') {
                return Err(parse_error(token));
            }
            digits.replace(',', "")
        }
        Some(Country::France) => parse_french_digits(digits),
        Some(Country::Sweden) => strip_whitespace(digits).replace(',', "."),
        Some(Country::Italy) => digits.replace('.', "").replace(',', "."),
        None => strip_whitespace(digits).replace(',', "."),
    };

    let value: f64 = normalized.parse().map_err(|_| parse_error(token))?;
    let value = value * multiplier;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(parse_error(token))
    }
}

/// French postings mix `45 000,50` with English-style `90,000`.
fn parse_french_digits(digits: &str) -> String {
    let english_thousands = digits
        .split_once(',')
        .is_some_and(|(_, rest)| rest.len() == 3 && rest.bytes().all(|b| b.is_ascii_digit()));

    if english_thousands {
        strip_whitespace(digits).replace(',', "")
    } else {
        strip_whitespace(digits).replace(',', ".")
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn parse_error(token: &str) -> ExtractionError {
    ExtractionError::Parse {
        field: "number".to_string(),
        value: token.to_string(),
    }
}

/// Whether a token is a calendar year rather than an amount.
///
/// The token must be exactly four digits inside `years`, and the text right
/// before it must end with a year word: a preposition ("since", "en", "nel"),
/// a start word ("starting", "démarrage") or a month name ("janvier 2025").
pub fn is_likely_year(
    token: &str,
    preceding: &str,
    markers: &[&Regex],
    years: &RangeInclusive<u32>,
) -> bool {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    match token.parse::<u32>() {
        Ok(year) if years.contains(&year) => markers.iter().any(|re| re.is_match(preceding)),
        _ => false,
    }
}
