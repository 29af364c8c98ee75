//! Pay-period classification.

use super::{ExtractionMatch, FieldExtractor, SalaryCandidate};
use crate::models::salary::PayPeriod;
use crate::registry::{Country, Language, PatternRegistry, PeriodVocabulary};

/// French figures at or above this are annual when no period is named.
const FRANCE_ANNUAL_THRESHOLD: f64 = 10_000.0;

/// Classifies the pay period of a salary window.
pub struct PeriodClassifier<'a> {
    vocabulary: &'a PeriodVocabulary,
    country: Option<Country>,
    default: PayPeriod,
}

impl<'a> PeriodClassifier<'a> {
    pub fn new(registry: &'a PatternRegistry, language: Language, country: &str) -> Self {
        Self {
            vocabulary: registry.vocabulary(language),
            country: Country::parse(country),
            default: registry.default_period(country).unwrap_or(PayPeriod::PerYear),
        }
    }

    /// The period phrase closest to the salary figure.
    ///
    /// With a currency `anchor`, the figure is the number nearest that anchor,
    /// so working-hours counts elsewhere in the window ("40 tim/vecka") do not
    /// pull the period. Without an anchor every number counts. Ties, and the
    /// case without numbers, go to the first phrase in scan order (hour, day,
    /// week, month, year).
    pub fn find_phrase(
        &self,
        text: &str,
        numbers: &[SalaryCandidate],
        anchor: Option<(usize, usize)>,
    ) -> Option<ExtractionMatch<PayPeriod>> {
        let figures = nearest_to_anchor(numbers, anchor);
        let mut best: Option<(usize, ExtractionMatch<PayPeriod>)> = None;

        for phrase in self.extract_all(text) {
            let Some((start, end)) = phrase.position else {
                continue;
            };
            let distance = figures
                .iter()
                .map(|n| n.distance_to(start, end))
                .min()
                .unwrap_or(0);

            if best.as_ref().is_none_or(|(d, _)| distance < *d) {
                best = Some((distance, phrase));
            }
        }

        best.map(|(_, phrase)| phrase)
    }

    /// Classify a window, falling back to the country default.
    pub fn classify(
        &self,
        text: &str,
        numbers: &[SalaryCandidate],
        anchor: Option<(usize, usize)>,
    ) -> PayPeriod {
        if let Some(phrase) = self.find_phrase(text, numbers, anchor) {
            return phrase.value;
        }

        if self.country == Some(Country::France)
            && numbers.iter().any(|n| n.value >= FRANCE_ANNUAL_THRESHOLD)
        {
            return PayPeriod::PerYear;
        }

        self.default
    }
}

/// Numbers tied for the smallest distance to `anchor`.
fn nearest_to_anchor(
    numbers: &[SalaryCandidate],
    anchor: Option<(usize, usize)>,
) -> Vec<&SalaryCandidate> {
    let Some((start, end)) = anchor else {
        return numbers.iter().collect();
    };

    let Some(closest) = numbers.iter().map(|n| n.distance_to(start, end)).min() else {
        return Vec::new();
    };

    numbers
        .iter()
        .filter(|n| n.distance_to(start, end) == closest)
        .collect()
}

impl FieldExtractor for PeriodClassifier<'_> {
    type Output = ExtractionMatch<PayPeriod>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.find_phrase(text, &[], None)
    }

    /// Every phrase match, grouped by period in scan order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for (period, regex) in &self.vocabulary.phrases {
            for m in regex.find_iter(text) {
                results.push(
                    ExtractionMatch::new(*period, m.as_str()).with_position(m.start(), m.end()),
                );
            }
        }

        results
    }
}
