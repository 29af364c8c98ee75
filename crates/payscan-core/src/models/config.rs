//! Configuration structures for the salary pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::PlausibilityBounds;

/// Main configuration for the payscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PayscanConfig {
    /// Context window and filtering configuration.
    pub extraction: ExtractionConfig,

    /// Per-country plausibility bound overrides, keyed by country name.
    pub bounds: BTreeMap<String, PlausibilityBounds>,

    /// Currency conversion configuration.
    pub conversion: ConversionConfig,
}

/// Salary extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters kept before a currency match.
    pub look_behind: usize,

    /// Characters kept after a currency match.
    pub look_ahead: usize,

    /// Posting column scanned for salaries.
    pub text_column: String,

    /// Earliest value treated as a calendar year.
    pub min_year: u32,

    /// Latest value treated as a calendar year.
    pub max_year: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            look_behind: 50,
            look_ahead: 40,
            text_column: "job_description".to_string(),
            min_year: 1900,
            max_year: 2030,
        }
    }
}

/// Currency conversion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Currency every monthly figure is converted into.
    pub base_currency: String,

    /// Static rates ("1 unit of key = value units of base").
    pub rates: BTreeMap<String, f64>,

    /// Endpoint of the exchange-rate service.
    pub rates_url: String,

    /// Request timeout for the exchange-rate service.
    pub timeout_secs: u64,

    /// Extra attempts after a failed rate request.
    pub retries: u32,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            base_currency: "EUR".to_string(),
            rates: BTreeMap::new(),
            rates_url: "https://api.frankfurter.app/latest".to_string(),
            timeout_secs: 10,
            retries: 2,
        }
    }
}

impl PayscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PayscanConfig::default();
        assert_eq!(config.extraction.look_behind, 50);
        assert_eq!(config.extraction.look_ahead, 40);
        assert_eq!(config.conversion.base_currency, "EUR");
        assert!(config.bounds.is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"extraction": {"look_ahead": 60}, "conversion": {"rates": {"SEK": 0.087}}}"#;
        let config: PayscanConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.extraction.look_ahead, 60);
        assert_eq!(config.extraction.look_behind, 50);
        assert_eq!(config.conversion.rates.get("SEK"), Some(&0.087));
        assert_eq!(config.conversion.timeout_secs, 10);
    }

    #[test]
    fn test_bounds_override_json() {
        let json = r#"{"bounds": {"Italy": {"hourly": [1.0, 500.0], "other": [200.0, 500000.0]}}}"#;
        let config: PayscanConfig = serde_json::from_str(json).unwrap();

        let italy = config.bounds.get("Italy").unwrap();
        assert_eq!(italy.other, (200.0, 500000.0));
        assert!(italy.weekly.is_none());
    }
}
