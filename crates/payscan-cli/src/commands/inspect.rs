//! Inspect command - resolve the salary of one posting text.

use clap::Args;
use serde::Serialize;

use payscan_core::salary::{parse_salary_field, SalaryField};
use payscan_core::{
    ConfigurationError, Country, CurrencyConverter, ExchangeRates, Language, NormalizedSalary,
    PlausibilityBounds, ResolvedSalary, SalaryExtractor, SalaryResolver,
};

use super::load_config;

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Posting text
    #[arg(required = true)]
    text: String,

    /// Country the posting belongs to
    #[arg(long)]
    country: String,

    /// Posting language (name or ISO code, defaults to the country's language)
    #[arg(short, long)]
    language: Option<String>,

    /// Also parse the text as a short salary field
    #[arg(long)]
    field: bool,
}

#[derive(Serialize)]
struct InspectOutput {
    country: &'static str,
    language: &'static str,
    bounds: Option<PlausibilityBounds>,
    resolved: ResolvedSalary,
    normalized: NormalizedSalary,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<SalaryField>,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let country = Country::parse(&args.country)
        .ok_or_else(|| ConfigurationError::UnsupportedCountry(args.country.clone()))?;
    let language = match args.language.as_deref() {
        Some(name) => {
            Language::parse(name).ok_or_else(|| anyhow::anyhow!("Unknown language: {}", name))?
        }
        None => country.default_language(),
    };

    let resolver = SalaryResolver::from_config(&config)?;
    let converter = CurrencyConverter::new(
        resolver.registry().clone(),
        ExchangeRates::from_config(&config.conversion),
    );

    let resolved = resolver.resolve(Some(&args.text), country.name(), Some(language.name()));
    let normalized = converter.normalize(&resolved);

    let field = if args.field {
        let mut languages = vec![language];
        if language != Language::English {
            languages.push(Language::English);
        }
        Some(parse_salary_field(
            resolver.registry(),
            Some(&args.text),
            country.name(),
            &languages,
        )?)
    } else {
        None
    };

    let output = InspectOutput {
        country: country.name(),
        language: language.name(),
        bounds: resolver.registry().bounds(country.name()),
        resolved,
        normalized,
        field,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
