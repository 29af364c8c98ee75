//! Per-country and per-language pattern tables.
//!
//! The registry is built once (usually from a [`PayscanConfig`]) and then
//! shared read-only between workers. Lookups keyed by free-form strings are
//! lenient: an unknown country yields an empty result instead of an error.

mod tables;

use std::collections::HashMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::models::config::PayscanConfig;
use crate::models::salary::PayPeriod;

/// Supported job markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Usa,
    France,
    Italy,
    Sweden,
}

impl Country {
    pub const ALL: [Country; 4] = [Country::Usa, Country::France, Country::Italy, Country::Sweden];

    /// Parse a country name or code, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "usa" | "us" | "united states" | "united states of america" => Some(Country::Usa),
            "france" | "fra" | "fr" => Some(Country::France),
            "italy" | "italia" | "ita" | "it" => Some(Country::Italy),
            "sweden" | "sverige" | "swe" | "se" => Some(Country::Sweden),
            _ => None,
        }
    }

    /// Name used in the `country` column.
    pub fn name(self) -> &'static str {
        match self {
            Country::Usa => "USA",
            Country::France => "France",
            Country::Italy => "Italy",
            Country::Sweden => "Sweden",
        }
    }

    /// Language most postings of this market are written in.
    pub fn default_language(self) -> Language {
        match self {
            Country::Usa => Language::English,
            Country::France => Language::French,
            Country::Italy => Language::Italian,
            Country::Sweden => Language::Swedish,
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Posting languages with pay-period vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    French,
    Italian,
    Swedish,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::French,
        Language::Italian,
        Language::Swedish,
    ];

    /// Parse a language name or ISO-639-1 code, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Language::English),
            "french" | "fr" | "français" | "francais" => Some(Language::French),
            "italian" | "it" | "italiano" => Some(Language::Italian),
            "swedish" | "sv" | "svenska" => Some(Language::Swedish),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::French => "french",
            Language::Italian => "italian",
            Language::Swedish => "swedish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed numeric ranges a salary must fall into, by period class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlausibilityBounds {
    /// Range for hourly figures.
    pub hourly: (f64, f64),

    /// Range for weekly figures; falls back to `other` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly: Option<(f64, f64)>,

    /// Range for every other period.
    pub other: (f64, f64),
}

impl PlausibilityBounds {
    /// Range that applies to figures paid per `period`.
    pub fn range_for(&self, period: PayPeriod) -> (f64, f64) {
        match period {
            PayPeriod::PerHour => self.hourly,
            PayPeriod::PerWeek => self.weekly.unwrap_or(self.other),
            _ => self.other,
        }
    }

    /// Whether `value` is plausible for `period`.
    pub fn contains(&self, period: PayPeriod, value: f64) -> bool {
        let (lo, hi) = self.range_for(period);
        lo <= value && value <= hi
    }

    fn validate(&self, country: Country) -> Result<(), ConfigurationError> {
        let ranges = [Some(self.hourly), self.weekly, Some(self.other)];
        for (lo, hi) in ranges.into_iter().flatten() {
            if !(lo.is_finite() && hi.is_finite()) || lo < 0.0 || lo > hi {
                return Err(ConfigurationError::InvalidBounds {
                    country: country.name().to_string(),
                    reason: format!("range [{}, {}] is empty or negative", lo, hi),
                });
            }
        }
        Ok(())
    }
}

/// A currency label and the regex matching its occurrences.
#[derive(Debug, Clone)]
pub struct CurrencyPattern {
    /// Label reported in the `currency` column (e.g. `"€"`, `"kr"`).
    pub label: String,

    /// ISO 4217 code used for exchange-rate lookup.
    pub code: String,

    pub regex: Regex,
}

impl CurrencyPattern {
    pub fn new(label: &str, code: &str, pattern: &str) -> Result<Self, ConfigurationError> {
        Ok(Self {
            label: label.to_string(),
            code: code.to_string(),
            regex: compile(label, pattern)?,
        })
    }
}

/// Pay-period phrases of one language, in classifier scan order.
#[derive(Debug, Clone)]
pub struct PeriodVocabulary {
    pub language: Language,
    pub phrases: Vec<(PayPeriod, Regex)>,
}

/// Everything the resolver needs to know about one market.
#[derive(Debug, Clone)]
pub struct CountryProfile {
    pub country: Country,
    pub currencies: Vec<CurrencyPattern>,

    /// Salary-context trigger words. A profile without them is incomplete
    /// and rejected by the row-level driver.
    pub context_terms: Option<Regex>,

    pub number_pattern: Regex,
    pub bounds: PlausibilityBounds,

    /// Period assumed when a window names none.
    pub default_period: PayPeriod,
}

/// Immutable registry of all pattern tables.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    profiles: HashMap<Country, CountryProfile>,
    /// Indexed by `Language as usize`.
    vocabularies: Vec<PeriodVocabulary>,
    year_markers: Vec<Regex>,
    generic_number: Regex,
}

impl PatternRegistry {
    /// Registry with no countries and the standard language tables.
    pub fn empty() -> Result<Self, ConfigurationError> {
        let mut vocabularies = Vec::with_capacity(Language::ALL.len());
        let mut year_markers = Vec::with_capacity(Language::ALL.len());
        for language in Language::ALL {
            vocabularies.push(tables::period_vocabulary(language)?);
            year_markers.push(tables::year_markers(language)?);
        }

        Ok(Self {
            profiles: HashMap::new(),
            vocabularies,
            year_markers,
            generic_number: compile("generic number", tables::GENERIC_NUMBER)?,
        })
    }

    /// Registry with the built-in tables for all supported countries.
    pub fn standard() -> Result<Self, ConfigurationError> {
        Self::from_config(&PayscanConfig::default())
    }

    /// Standard registry with the configured bound overrides applied.
    pub fn from_config(config: &PayscanConfig) -> Result<Self, ConfigurationError> {
        let mut registry = Self::empty()?;

        for country in Country::ALL {
            let mut profile = tables::country_profile(country)?;
            if let Some(bounds) = config
                .bounds
                .iter()
                .find(|(name, _)| Country::parse(name) == Some(country))
                .map(|(_, bounds)| *bounds)
            {
                bounds.validate(country)?;
                profile.bounds = bounds;
            }
            registry = registry.with_profile(profile);
        }

        for name in config.bounds.keys() {
            if Country::parse(name).is_none() {
                return Err(ConfigurationError::UnsupportedCountry(name.clone()));
            }
        }

        Ok(registry)
    }

    /// Add or replace a country profile.
    pub fn with_profile(mut self, profile: CountryProfile) -> Self {
        self.profiles.insert(profile.country, profile);
        self
    }

    /// Profile of a supported country.
    pub fn profile(&self, country: Country) -> Option<&CountryProfile> {
        self.profiles.get(&country)
    }

    fn profile_by_name(&self, country: &str) -> Option<&CountryProfile> {
        Country::parse(country).and_then(|c| self.profiles.get(&c))
    }

    /// Currency patterns registered for a country; empty when unknown.
    pub fn get_currency_patterns(&self, country: &str) -> &[CurrencyPattern] {
        self.profile_by_name(country)
            .map(|p| p.currencies.as_slice())
            .unwrap_or(&[])
    }

    /// Salary-context trigger words for a country.
    pub fn get_salary_context_terms(&self, country: &str) -> Option<&Regex> {
        self.profile_by_name(country)
            .and_then(|p| p.context_terms.as_ref())
    }

    /// Number grammar for a country; a generic grammar when unknown.
    pub fn get_number_pattern(&self, country: &str) -> &Regex {
        self.profile_by_name(country)
            .map(|p| &p.number_pattern)
            .unwrap_or(&self.generic_number)
    }

    /// Plausibility bounds for a country.
    pub fn bounds(&self, country: &str) -> Option<PlausibilityBounds> {
        self.profile_by_name(country).map(|p| p.bounds)
    }

    /// Period assumed for a country when a window names none.
    pub fn default_period(&self, country: &str) -> Option<PayPeriod> {
        self.profile_by_name(country).map(|p| p.default_period)
    }

    /// Pay-period phrases for a language; English when unknown.
    pub fn get_pay_period_patterns(&self, language: &str) -> &PeriodVocabulary {
        self.vocabulary(Language::parse(language).unwrap_or(Language::English))
    }

    /// Pay-period phrases for a known language.
    pub fn vocabulary(&self, language: Language) -> &PeriodVocabulary {
        &self.vocabularies[language as usize]
    }

    /// Words that, right before a four-digit number, mark it as a year.
    pub fn year_markers(&self, language: Language) -> &Regex {
        &self.year_markers[language as usize]
    }

    /// ISO code of a currency label, across all registered countries.
    pub fn currency_code(&self, label: &str) -> Option<&str> {
        let label = label.trim().to_lowercase();
        Country::ALL
            .iter()
            .filter_map(|c| self.profiles.get(c))
            .flat_map(|p| p.currencies.iter())
            .find(|c| c.label == label || c.code.eq_ignore_ascii_case(&label))
            .map(|c| c.code.as_str())
    }
}

pub(crate) fn compile(label: &str, pattern: &str) -> Result<Regex, ConfigurationError> {
    Regex::new(pattern).map_err(|source| ConfigurationError::InvalidPattern {
        label: label.to_string(),
        source,
    })
}
