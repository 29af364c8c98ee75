//! Rates command - fetch exchange rates into the base currency.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{debug, warn};

use payscan_core::models::ConversionConfig;
use payscan_core::ExchangeRates;

use super::load_config;

/// Arguments for the rates command.
#[derive(Args)]
pub struct RatesArgs {
    #[command(subcommand)]
    command: RatesCommand,
}

#[derive(Subcommand)]
enum RatesCommand {
    /// Fetch current rates from the configured service
    Fetch(FetchArgs),
}

#[derive(Args)]
struct FetchArgs {
    /// Comma-separated ISO currency codes (e.g. SEK,USD)
    #[arg(long, value_delimiter = ',', required = true)]
    currencies: Vec<String>,

    /// Output path for the rates file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Response body of the rate service.
#[derive(Debug, Deserialize)]
struct RateResponse {
    date: NaiveDate,
    rates: BTreeMap<String, f64>,
}

pub async fn run(args: RatesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    match args.command {
        RatesCommand::Fetch(fetch_args) => fetch_rates(fetch_args, &config.conversion).await,
    }
}

async fn fetch_rates(args: FetchArgs, conversion: &ConversionConfig) -> anyhow::Result<()> {
    let base = conversion.base_currency.to_uppercase();
    let currencies: Vec<String> = args
        .currencies
        .iter()
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .collect();

    if currencies.is_empty() {
        anyhow::bail!("No currencies given");
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!("payscan/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(conversion.timeout_secs))
        .build()?;

    let pb = ProgressBar::new(currencies.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} currencies")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut rates = ExchangeRates::new(&base);
    let mut failed = Vec::new();

    for code in &currencies {
        if *code == base {
            pb.inc(1);
            continue;
        }

        match fetch_with_retries(&client, &conversion.rates_url, code, &base, conversion.retries)
            .await
        {
            Ok(response) => {
                let rate = response.rates.get(&base).copied();
                match rate {
                    Some(rate) => {
                        debug!("1 {} = {} {} ({})", code, rate, base, response.date);
                        rates = rates.with_rate(code, rate);
                        rates.date = rates.date.max(Some(response.date));
                    }
                    None => failed.push((code.clone(), format!("no {} rate in response", base))),
                }
            }
            Err(e) => failed.push((code.clone(), e.to_string())),
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            rates.save(&path)?;
            eprintln!(
                "{} Wrote {} rates to {}",
                style("✓").green(),
                rates.rates.len(),
                path.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&rates)?),
    }

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed currencies:").red());
        for (code, error) in &failed {
            eprintln!("  - {}: {}", code, error);
        }
    }

    Ok(())
}

async fn fetch_with_retries(
    client: &reqwest::Client,
    url: &str,
    from: &str,
    to: &str,
    retries: u32,
) -> anyhow::Result<RateResponse> {
    let mut attempt = 0;
    loop {
        match fetch_rate(client, url, from, to).await {
            Ok(response) => return Ok(response),
            Err(e) if attempt < retries => {
                attempt += 1;
                warn!("Rate request for {} failed (attempt {}): {}", from, attempt, e);
            }
            Err(e) => return Err(e),
        }
    }
}

async fn fetch_rate(
    client: &reqwest::Client,
    url: &str,
    from: &str,
    to: &str,
) -> anyhow::Result<RateResponse> {
    let response = client
        .get(url)
        .query(&[("from", from), ("to", to)])
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {}", response.status());
    }

    Ok(response.json().await?)
}
