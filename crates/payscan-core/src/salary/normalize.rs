//! Monthly normalization and currency conversion.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::config::ConversionConfig;
use crate::models::salary::{NormalizedSalary, PayPeriod, ResolvedSalary};
use crate::registry::PatternRegistry;

/// Monthly equivalent of a figure paid per `period`.
pub fn to_monthly(value: Option<f64>, period: Option<PayPeriod>) -> Option<f64> {
    Some(period?.to_monthly(value?))
}

/// Monthly equivalent of a figure with a free-form period label.
///
/// Unknown labels yield `None`.
pub fn to_monthly_from_label(value: Option<f64>, label: Option<&str>) -> Option<f64> {
    to_monthly(value, label.and_then(PayPeriod::from_label))
}

/// Exchange rates into a base currency.
///
/// A rate reads "one unit of the keyed currency is worth `rate` units of
/// `base`".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub base: String,

    /// Date the rates were published, when fetched from a service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
}

impl ExchangeRates {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            date: None,
            rates: BTreeMap::new(),
        }
    }

    /// Static rates from configuration.
    pub fn from_config(config: &ConversionConfig) -> Self {
        config
            .rates
            .iter()
            .fold(Self::new(&config.base_currency), |rates, (code, rate)| {
                rates.with_rate(code, *rate)
            })
    }

    pub fn with_rate(mut self, code: &str, rate: f64) -> Self {
        self.rates.insert(code.to_uppercase(), rate);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Rate for an ISO code; the base itself is always 1.
    pub fn rate(&self, code: &str) -> Option<f64> {
        if code.eq_ignore_ascii_case(&self.base) {
            return Some(1.0);
        }
        self.rates.get(&code.to_uppercase()).copied()
    }

    /// Merge `other` into these rates. Rates already present are replaced.
    pub fn merge(&mut self, other: ExchangeRates) {
        self.rates.extend(other.rates);
        self.date = other.date.or(self.date);
    }

    /// Load rates from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save rates to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Converts resolved salaries into monthly base-currency figures.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    registry: Arc<PatternRegistry>,
    rates: ExchangeRates,
}

impl CurrencyConverter {
    pub fn new(registry: Arc<PatternRegistry>, rates: ExchangeRates) -> Self {
        Self { registry, rates }
    }

    pub fn rates(&self) -> &ExchangeRates {
        &self.rates
    }

    /// Convert an amount given a currency label (`"kr"`, `"$"`, `"eur"`, ...).
    ///
    /// Returns `None` when either input is missing or no rate is known; a
    /// missing rate is never treated as 1.
    pub fn convert(&self, amount: Option<f64>, label: Option<&str>) -> Option<f64> {
        let amount = amount?;
        let code = self.registry.currency_code(label?)?;
        Some(amount * self.rates.rate(code)?)
    }

    /// Monthly and base-currency figures for a resolved salary.
    pub fn normalize(&self, salary: &ResolvedSalary) -> NormalizedSalary {
        let min_salary_month = to_monthly(salary.min_salary, salary.time_period);
        let max_salary_month = to_monthly(salary.max_salary, salary.time_period);
        let currency = salary.currency.as_deref();

        NormalizedSalary {
            min_salary_month,
            max_salary_month,
            min_salary_month_eur: self.convert(min_salary_month, currency),
            max_salary_month_eur: self.convert(max_salary_month, currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn converter(rates: ExchangeRates) -> CurrencyConverter {
        CurrencyConverter::new(Arc::new(PatternRegistry::standard().unwrap()), rates)
    }

    #[test]
    fn test_to_monthly() {
        assert_eq!(to_monthly(Some(25.0), Some(PayPeriod::PerHour)), Some(4000.0));
        assert_eq!(to_monthly(Some(200.0), Some(PayPeriod::PerDay)), Some(4000.0));
        assert_eq!(to_monthly(Some(1000.0), Some(PayPeriod::PerWeek)), Some(4000.0));
        assert_eq!(to_monthly(Some(3210.5), Some(PayPeriod::PerMonth)), Some(3210.5));
        assert_eq!(to_monthly(Some(48000.0), Some(PayPeriod::PerYear)), Some(4000.0));
        assert_eq!(to_monthly(None, Some(PayPeriod::PerYear)), None);
        assert_eq!(to_monthly(Some(48000.0), None), None);
    }

    #[test]
    fn test_to_monthly_from_label() {
        assert_eq!(to_monthly_from_label(Some(20.0), Some("heure")), Some(3200.0));
        assert_eq!(to_monthly_from_label(Some(36000.0), Some("anno")), Some(3000.0));
        assert_eq!(to_monthly_from_label(Some(500.0), Some("settimana")), Some(2000.0));
        assert_eq!(to_monthly_from_label(Some(100.0), Some("jour")), Some(2000.0));
        assert_eq!(to_monthly_from_label(Some(100.0), Some("fortnight")), None);
        assert_eq!(to_monthly_from_label(Some(100.0), None), None);
    }

    #[test]
    fn test_convert_uses_iso_code() {
        let converter = converter(ExchangeRates::new("EUR").with_rate("SEK", 0.5));

        assert_eq!(converter.convert(Some(35000.0), Some("kr")), Some(17500.0));
        assert_eq!(converter.convert(Some(35000.0), Some("sek")), Some(17500.0));
        assert_eq!(converter.convert(Some(3000.0), Some("€")), Some(3000.0));
        assert_eq!(converter.convert(Some(3000.0), Some("$")), None);
        assert_eq!(converter.convert(None, Some("kr")), None);
    }

    #[test]
    fn test_missing_rate_is_a_gap() {
        let converter = converter(ExchangeRates::new("EUR"));
        let resolved = ResolvedSalary::from_values(
            &[35000.0],
            "kr",
            PayPeriod::PerMonth,
            "lön 35 000 kr",
            vec![35000.0],
        )
        .unwrap();

        let normalized = converter.normalize(&resolved);
        assert_eq!(normalized.min_salary_month, Some(35000.0));
        assert_eq!(normalized.min_salary_month_eur, None);
        assert!(normalized.has_conversion_gap());
    }

    #[test]
    fn test_normalize_failure() {
        let converter = converter(ExchangeRates::new("EUR"));
        assert_eq!(
            converter.normalize(&ResolvedSalary::failure()),
            NormalizedSalary::default()
        );
    }

    #[test]
    fn test_rates_from_config_and_merge() {
        let mut config = ConversionConfig::default();
        config.rates.insert("sek".to_string(), 0.087);

        let mut rates = ExchangeRates::from_config(&config);
        assert_eq!(rates.rate("SEK"), Some(0.087));
        assert_eq!(rates.rate("eur"), Some(1.0));

        rates.merge(ExchangeRates::new("EUR").with_rate("USD", 0.92));
        assert_eq!(rates.rate("USD"), Some(0.92));
        assert_eq!(rates.rate("SEK"), Some(0.087));
    }

    #[test]
    fn test_rates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.json");

        let rates = ExchangeRates::new("EUR")
            .with_rate("SEK", 0.087)
            .with_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        rates.save(&path).unwrap();

        assert_eq!(ExchangeRates::from_file(&path).unwrap(), rates);
    }
}
