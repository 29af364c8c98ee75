//! Built-in pattern tables.
//!
//! The resolver lower-cases postings first. Patterns with letters still carry
//! `(?i)` so they also work on raw text.

use regex::Regex;

use super::{
    compile, Country, CountryProfile, CurrencyPattern, Language, PeriodVocabulary,
    PlausibilityBounds,
};
use crate::error::ConfigurationError;
use crate::models::salary::PayPeriod;

/// Number grammar for countries without a profile.
pub(super) const GENERIC_NUMBER: &str = r"\b\d+(?:[.,]\d+)?\b";

const ENGLISH_CONTEXT: &str = "salary|compensation|pay|wage";

pub(super) fn country_profile(country: Country) -> Result<CountryProfile, ConfigurationError> {
    let profile = match country {
        Country::Usa => CountryProfile {
            country,
            currencies: vec![
                CurrencyPattern::new("$", "USD", r"\$")?,
                CurrencyPattern::new("usd", "USD", r"(?i)(?:\b|\d)(?:usd|dollars?)\b")?,
            ],
            context_terms: Some(compile("USA context", &format!("(?i){}", ENGLISH_CONTEXT))?),
            number_pattern: compile("USA number", r"(?i)\b\d+(?:,\d{3})*(?:\.\d+)?k?\b")?,
            bounds: PlausibilityBounds {
                hourly: (1.0, 1000.0),
                weekly: None,
                other: (15000.0, 1000000.0),
            },
            default_period: PayPeriod::PerYear,
        },
        Country::France => CountryProfile {
            country,
            currencies: vec![
                CurrencyPattern::new("€", "EUR", r"€")?,
                CurrencyPattern::new("eur", "EUR", r"(?i)(?:\b|\d)eur(?:os?)?\b")?,
            ],
            context_terms: Some(compile(
                "France context",
                r"(?i)salaire|rémunération|remuneration|revenu|taux horaire|conditions salariales",
            )?),
            number_pattern: compile("France number", r"(?i)\b\d+(?:\s?\d{3})*(?:[,.]\d+)?k?\b")?,
            bounds: PlausibilityBounds {
                hourly: (36.0, 500.0),
                weekly: Some((100.0, 7000.0)),
                other: (500.0, 100000.0),
            },
            default_period: PayPeriod::PerMonth,
        },
        Country::Italy => CountryProfile {
            country,
            currencies: vec![
                CurrencyPattern::new("€", "EUR", r"€")?,
                CurrencyPattern::new("eur", "EUR", r"(?i)(?:\b|\d)eur(?:os?)?\b")?,
            ],
            context_terms: Some(compile(
                "Italy context",
                &format!(
                    r"(?i)stipendio|retribuzione|compenso|\bral\b|{}",
                    ENGLISH_CONTEXT
                ),
            )?),
            number_pattern: compile("Italy number", r"\b\d+(?:\.?\d{3})*(?:,\d+)?\b")?,
            bounds: PlausibilityBounds {
                hourly: (1.0, 500.0),
                weekly: None,
                other: (200.0, 100000.0),
            },
            default_period: PayPeriod::PerMonth,
        },
        Country::Sweden => CountryProfile {
            country,
            currencies: vec![
                CurrencyPattern::new("kr", "SEK", r"(?i)(?:\b|\d)kr(?:onor)?\b")?,
                CurrencyPattern::new("sek", "SEK", r"(?i)(?:\b|\d)sek\b")?,
            ],
            context_terms: Some(compile(
                "Sweden context",
                &format!("(?i)lön|betalning|{}", ENGLISH_CONTEXT),
            )?),
            number_pattern: compile("Sweden number", r"\b\d+(?:\s?\d{3})*(?:,\d+)?\b")?,
            bounds: PlausibilityBounds {
                hourly: (250.0, 10000.0),
                weekly: None,
                other: (6000.0, 1000000.0),
            },
            default_period: PayPeriod::PerMonth,
        },
    };

    Ok(profile)
}

pub(super) fn period_vocabulary(language: Language) -> Result<PeriodVocabulary, ConfigurationError> {
    let phrases: [(PayPeriod, &str); 5] = match language {
        Language::English => [
            (
                PayPeriod::PerHour,
                r"(?i)\b(?:per\s+hour|hourly|an\s+hour|per\s+hr)\b|/\s?(?:hour|hr|h)\b",
            ),
            (
                PayPeriod::PerDay,
                r"(?i)\b(?:per\s+day|daily\s+rate|a\s+day|day\s+rate)\b|/\s?day\b",
            ),
            (
                PayPeriod::PerWeek,
                r"(?i)\b(?:per\s+week|weekly|a\s+week)\b|/\s?(?:week|wk)\b",
            ),
            (
                PayPeriod::PerMonth,
                r"(?i)\b(?:per\s+month|monthly|a\s+month)\b|/\s?(?:month|mo)\b",
            ),
            (
                PayPeriod::PerYear,
                r"(?i)\b(?:per\s+(?:year|annum)|yearly|annual(?:ly)?|a\s+year|p\.a\b)|/\s?(?:year|yr)\b",
            ),
        ],
        Language::French => [
            (
                PayPeriod::PerHour,
                r"(?i)\b(?:par\s+heure|de\s+l'heure|horaire|heure)\b|/\s?(?:heure|h)\b",
            ),
            (
                PayPeriod::PerDay,
                r"(?i)\b(?:par\s+jour|journalier|jour)\b|/\s?(?:jour|j)\b",
            ),
            (
                PayPeriod::PerWeek,
                r"(?i)\b(?:par\s+semaine|hebdomadaire|semaine)\b|/\s?semaine\b",
            ),
            (
                PayPeriod::PerMonth,
                r"(?i)\b(?:par\s+mois|mensuel(?:le)?|mois)\b|/\s?mois\b",
            ),
            (
                PayPeriod::PerYear,
                r"(?i)\b(?:par\s+an|annuel(?:le)?|année|annee|an)\b|/\s?an\b",
            ),
        ],
        Language::Italian => [
            (
                PayPeriod::PerHour,
                r"(?i)\b(?:all'ora|l'ora|orario|oraria|ora)\b|/\s?(?:ora|h)\b",
            ),
            (
                PayPeriod::PerDay,
                r"(?i)\b(?:al\s+giorno|giornaliero|giornaliera)\b|/\s?giorno\b",
            ),
            (
                PayPeriod::PerWeek,
                r"(?i)\b(?:alla\s+settimana|settimanale)\b|/\s?settimana\b",
            ),
            (
                PayPeriod::PerMonth,
                r"(?i)\b(?:al\s+mese|mensile|mensili|mese)\b|/\s?mese\b",
            ),
            (
                PayPeriod::PerYear,
                r"(?i)\b(?:all'anno|annuo|annua|annuale|annui|anno|ral)\b|/\s?anno\b",
            ),
        ],
        Language::Swedish => [
            (
                PayPeriod::PerHour,
                r"(?i)\b(?:per\s+timme|i\s+timmen|timlön|timme|tim)\b|/\s?(?:tim|h)\b",
            ),
            (
                PayPeriod::PerDay,
                r"(?i)\b(?:per\s+dag|om\s+dagen|dagslön)\b|/\s?dag\b",
            ),
            (
                PayPeriod::PerWeek,
                r"(?i)\b(?:per\s+vecka|i\s+veckan|veckolön|vecka)\b|/\s?v(?:ecka)?\b",
            ),
            (
                PayPeriod::PerMonth,
                r"(?i)\b(?:per\s+månad|i\s+månaden|månadslön|månad|mån)\b|/\s?mån(?:ad)?\b",
            ),
            (
                PayPeriod::PerYear,
                r"(?i)\b(?:per\s+år|om\s+året|årslön|årlig|år)\b|/\s?år\b",
            ),
        ],
    };

    let phrases = phrases
        .into_iter()
        .map(|(period, pattern)| {
            compile(&format!("{} {}", language, period), pattern).map(|re| (period, re))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PeriodVocabulary { language, phrases })
}

/// Words that, right before a four-digit number, mark it as a calendar year.
pub(super) fn year_markers(language: Language) -> Result<Regex, ConfigurationError> {
    let words = match language {
        Language::English => concat!(
            r"since|in|from|until|by|founded|established|est\.?|year|fy|fiscal|class\s+of|as\s+of|",
            r"start|starts|starting|start\s+date|",
            r"january|february|march|april|may|june|july|august|september|october|november|december|",
            r"(?:jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec)\.?"
        ),
        Language::French => concat!(
            r"en|depuis|dès|à\s+partir\s+de|a\s+partir\s+de|année|annee|fondée?|créée?|jusqu'en|",
            r"démarrage|demarrage|début|debut|rentrée|",
            r"janvier|février|fevrier|mars|avril|mai|juin|juillet|août|aout|septembre|octobre|novembre|décembre|decembre"
        ),
        Language::Italian => concat!(
            r"nel|dal|dall'|entro|anno|fondata|fondato|dal\s+lontano|inizio|a\s+partire\s+da|",
            r"gennaio|febbraio|marzo|aprile|maggio|giugno|luglio|agosto|settembre|ottobre|novembre|dicembre"
        ),
        Language::Swedish => concat!(
            r"sedan|sen|år|grundat|grundades|grundad|från|i|till|start|tillträde|",
            r"januari|februari|mars|april|maj|juni|juli|augusti|september|oktober|november|december"
        ),
    };

    compile(
        &format!("{} year markers", language),
        &format!(r"(?i)\b(?:{})\s*[:\-]?\s*$", words),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period_of(language: Language, text: &str) -> Vec<PayPeriod> {
        let vocabulary = period_vocabulary(language).unwrap();
        vocabulary
            .phrases
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(p, _)| *p)
            .collect()
    }

    #[test]
    fn test_all_tables_compile() {
        for country in Country::ALL {
            country_profile(country).unwrap();
        }
        for language in Language::ALL {
            period_vocabulary(language).unwrap();
            year_markers(language).unwrap();
        }
    }

    #[test]
    fn test_currency_words_do_not_match_inside_words() {
        let sweden = country_profile(Country::Sweden).unwrap();
        let kr = &sweden.currencies[0].regex;

        assert!(kr.is_match("45000kr"));
        assert!(kr.is_match("45 000 kr/mån"));
        assert!(kr.is_match("30 000 kronor"));
        assert!(!kr.is_match("krav på erfarenhet"));

        let france = country_profile(Country::France).unwrap();
        let eur = &france.currencies[1].regex;
        assert!(eur.is_match("45000 euros"));
        assert!(!eur.is_match("europe"));
    }

    #[test]
    fn test_english_phrases() {
        assert_eq!(period_of(Language::English, "$40/hr"), vec![PayPeriod::PerHour]);
        assert_eq!(
            period_of(Language::English, "$85,000 per year"),
            vec![PayPeriod::PerYear]
        );
        assert_eq!(
            period_of(Language::English, "€60k p.a."),
            vec![PayPeriod::PerYear]
        );
        assert!(period_of(Language::English, "payroll and benefits").is_empty());
    }

    #[test]
    fn test_localized_phrases() {
        assert_eq!(
            period_of(Language::French, "45 000 € par mois"),
            vec![PayPeriod::PerMonth]
        );
        assert_eq!(
            period_of(Language::Italian, "1.800 € al mese"),
            vec![PayPeriod::PerMonth]
        );
        assert_eq!(
            period_of(Language::Swedish, "180 kr per timme"),
            vec![PayPeriod::PerHour]
        );
        assert_eq!(
            period_of(Language::Swedish, "35 000 kr/mån"),
            vec![PayPeriod::PerMonth]
        );
    }

    #[test]
    fn test_year_markers() {
        let english = year_markers(Language::English).unwrap();
        assert!(english.is_match("established in "));
        assert!(english.is_match("since "));
        assert!(!english.is_match("salary: $"));

        let french = year_markers(Language::French).unwrap();
        assert!(french.is_match("créée en "));
        assert!(french.is_match("démarrage en janvier "));
        assert!(!french.is_match("salaire de "));

        assert!(english.is_match("starting january "));
        assert!(english.is_match("start date: sept. "));
        assert!(year_markers(Language::Italian).unwrap().is_match("inizio gennaio "));
        assert!(year_markers(Language::Swedish).unwrap().is_match("tillträde i augusti "));
    }
}
