//! Salary result models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing cadence of a salary figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayPeriod {
    PerHour,
    PerDay,
    PerWeek,
    PerMonth,
    PerYear,
}

impl PayPeriod {
    /// All periods in classifier scan order.
    pub const ALL: [PayPeriod; 5] = [
        PayPeriod::PerHour,
        PayPeriod::PerDay,
        PayPeriod::PerWeek,
        PayPeriod::PerMonth,
        PayPeriod::PerYear,
    ];

    /// Multiplier that turns one unit of this period into a monthly figure.
    ///
    /// The yearly factor is not exact in binary floating point; convert
    /// amounts with [`PayPeriod::to_monthly`], which divides yearly figures
    /// by twelve.
    pub fn monthly_factor(self) -> f64 {
        match self {
            PayPeriod::PerHour => 160.0,
            PayPeriod::PerDay => 20.0,
            PayPeriod::PerWeek => 4.0,
            PayPeriod::PerMonth => 1.0,
            PayPeriod::PerYear => 1.0 / 12.0,
        }
    }

    /// Monthly equivalent of `value` paid once per this period.
    pub fn to_monthly(self, value: f64) -> f64 {
        match self {
            PayPeriod::PerYear => value / 12.0,
            _ => value * self.monthly_factor(),
        }
    }

    /// Canonical column value.
    pub fn as_str(self) -> &'static str {
        match self {
            PayPeriod::PerHour => "per_hour",
            PayPeriod::PerDay => "per_day",
            PayPeriod::PerWeek => "per_week",
            PayPeriod::PerMonth => "per_month",
            PayPeriod::PerYear => "per_year",
        }
    }

    /// Parse a period label.
    ///
    /// Accepts the canonical `per_*` values, their spaced forms and the bare
    /// unit words used by postings in all four languages.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase().replace('_', " ");
        match normalized.as_str() {
            "per hour" | "hour" | "hourly" | "ora" | "heure" | "timme" => Some(PayPeriod::PerHour),
            "per day" | "day" | "daily" | "giorno" | "jour" | "dag" => Some(PayPeriod::PerDay),
            "per week" | "week" | "weekly" | "settimana" | "semaine" | "vecka" => {
                Some(PayPeriod::PerWeek)
            }
            "per month" | "month" | "monthly" | "mese" | "mois" | "månad" => {
                Some(PayPeriod::PerMonth)
            }
            "per year" | "year" | "yearly" | "annual" | "anno" | "par an" | "år" => {
                Some(PayPeriod::PerYear)
            }
            _ => None,
        }
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one posting.
///
/// A failed resolution is a regular value with `success == false` and every
/// optional field empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSalary {
    /// Lowest surviving salary figure.
    pub min_salary: Option<f64>,

    /// Highest surviving salary figure.
    pub max_salary: Option<f64>,

    /// Currency label of the match that produced the figures (e.g. `"$"`, `"kr"`).
    pub currency: Option<String>,

    /// Classified pay period.
    pub time_period: Option<PayPeriod>,

    /// Text window the figures were taken from.
    pub context_string: Option<String>,

    /// Numbers found in the window before year and bound filtering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial_numbers: Vec<f64>,

    /// Whether a salary was found.
    pub success: bool,
}

impl ResolvedSalary {
    /// The failure sentinel.
    pub fn failure() -> Self {
        Self {
            min_salary: None,
            max_salary: None,
            currency: None,
            time_period: None,
            context_string: None,
            initial_numbers: Vec::new(),
            success: false,
        }
    }

    /// Build a successful result from the surviving figures.
    ///
    /// Returns `None` when `values` is empty, so a success always carries
    /// both bounds and a period.
    pub fn from_values(
        values: &[f64],
        currency: impl Into<String>,
        time_period: PayPeriod,
        context: impl Into<String>,
        initial_numbers: Vec<f64>,
    ) -> Option<Self> {
        let min = values.iter().copied().reduce(f64::min)?;
        let max = values.iter().copied().reduce(f64::max)?;

        Some(Self {
            min_salary: Some(min),
            max_salary: Some(max),
            currency: Some(currency.into()),
            time_period: Some(time_period),
            context_string: Some(context.into()),
            initial_numbers,
            success: true,
        })
    }
}

impl Default for ResolvedSalary {
    fn default() -> Self {
        Self::failure()
    }
}

/// Monthly and base-currency equivalents of a [`ResolvedSalary`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSalary {
    pub min_salary_month: Option<f64>,
    pub max_salary_month: Option<f64>,
    pub min_salary_month_eur: Option<f64>,
    pub max_salary_month_eur: Option<f64>,
}

impl NormalizedSalary {
    /// Monthly figures exist but could not be converted for lack of a rate.
    pub fn has_conversion_gap(&self) -> bool {
        (self.min_salary_month.is_some() && self.min_salary_month_eur.is_none())
            || (self.max_salary_month.is_some() && self.max_salary_month_eur.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_monthly_matches_factor() {
        for period in [
            PayPeriod::PerHour,
            PayPeriod::PerDay,
            PayPeriod::PerWeek,
            PayPeriod::PerMonth,
        ] {
            assert_eq!(period.to_monthly(37.5), 37.5 * period.monthly_factor());
        }

        assert_eq!(PayPeriod::PerYear.to_monthly(120000.0), 10000.0);
        assert_eq!(PayPeriod::PerYear.to_monthly(45000.0), 3750.0);
        let nominal = 45000.0 * PayPeriod::PerYear.monthly_factor();
        assert!((PayPeriod::PerYear.to_monthly(45000.0) - nominal).abs() < 1e-9);
    }

    #[test]
    fn test_period_labels() {
        assert_eq!(PayPeriod::from_label("per_hour"), Some(PayPeriod::PerHour));
        assert_eq!(PayPeriod::from_label("Per Year"), Some(PayPeriod::PerYear));
        assert_eq!(PayPeriod::from_label("par an"), Some(PayPeriod::PerYear));
        assert_eq!(PayPeriod::from_label("mese"), Some(PayPeriod::PerMonth));
        assert_eq!(PayPeriod::from_label("månad"), Some(PayPeriod::PerMonth));
        assert_eq!(PayPeriod::from_label("giorno"), Some(PayPeriod::PerDay));
        assert_eq!(PayPeriod::from_label("fortnight"), None);
        assert_eq!(PayPeriod::from_label(""), None);
    }

    #[test]
    fn test_period_round_trips_through_label() {
        for period in PayPeriod::ALL {
            assert_eq!(PayPeriod::from_label(period.as_str()), Some(period));
        }
    }

    #[test]
    fn test_from_values_orders_bounds() {
        let resolved =
            ResolvedSalary::from_values(&[95000.0, 85000.0], "$", PayPeriod::PerYear, "ctx", vec![])
                .unwrap();

        assert_eq!(resolved.min_salary, Some(85000.0));
        assert_eq!(resolved.max_salary, Some(95000.0));
        assert!(resolved.success);
        assert_eq!(resolved.time_period, Some(PayPeriod::PerYear));
    }

    #[test]
    fn test_from_values_empty() {
        assert!(ResolvedSalary::from_values(&[], "$", PayPeriod::PerYear, "", vec![]).is_none());
    }

    #[test]
    fn test_failure_sentinel() {
        let failure = ResolvedSalary::failure();
        assert!(!failure.success);
        assert!(failure.min_salary.is_none());
        assert!(failure.max_salary.is_none());
        assert!(failure.currency.is_none());
        assert!(failure.time_period.is_none());
        assert!(failure.context_string.is_none());
    }

    #[test]
    fn test_period_serializes_snake_case() {
        let json = serde_json::to_string(&PayPeriod::PerMonth).unwrap();
        assert_eq!(json, "\"per_month\"");
    }
}
