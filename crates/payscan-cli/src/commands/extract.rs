//! Extract command - resolve salaries across posting CSV files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use payscan_core::models::remove_duplicate_postings;
use payscan_core::salary::magnitude_mismatches;
use payscan_core::{
    process_job_descriptions_parallel, CurrencyConverter, ExchangeRates, ExtractionSummary,
    Posting, SalaryResolver, SalaryRow,
};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input CSV files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Country whose postings are processed
    #[arg(long)]
    country: String,

    /// Posting column to scan (defaults to the configured column)
    #[arg(long)]
    column: Option<String>,

    /// Exchange-rates JSON file, as written by `payscan rates fetch`
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Output CSV file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Drop duplicate listings before extraction
    #[arg(long)]
    dedup: bool,

    /// Print a per-country summary and magnitude mismatches
    #[arg(long)]
    summary: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("csv")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching CSV files found for pattern: {}", args.input);
    }

    // Status goes to stderr so the CSV can be piped from stdout.
    eprintln!(
        "{} Found {} files to read",
        style("ℹ").blue(),
        files.len()
    );

    let mut postings = read_postings(&files)?;
    if args.dedup {
        postings = remove_duplicate_postings(postings);
    }

    let mut rates = ExchangeRates::from_config(&config.conversion);
    if let Some(ref path) = args.rates {
        let fetched = ExchangeRates::from_file(path)?;
        if !fetched.base.eq_ignore_ascii_case(&rates.base) {
            anyhow::bail!(
                "Rates file {} is based on {}, expected {}",
                path.display(),
                fetched.base,
                rates.base
            );
        }
        rates.merge(fetched);
    }

    let resolver = SalaryResolver::from_config(&config)?;
    let converter = CurrencyConverter::new(resolver.registry().clone(), rates);
    let column = args
        .column
        .clone()
        .unwrap_or_else(|| config.extraction.text_column.clone());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!(
        "Resolving salaries in {} postings",
        postings.len()
    ));

    let country = args.country.clone();
    let jobs = args.jobs;
    let processed = tokio::task::spawn_blocking(move || {
        process_job_descriptions_parallel(&resolver, &postings, &country, &column, jobs)
    })
    .await??;

    spinner.finish_and_clear();

    let rows: Vec<SalaryRow> = processed
        .iter()
        .map(|p| SalaryRow::new(p, &converter.normalize(&p.salary)))
        .collect();

    write_rows(args.output.as_deref(), &rows)?;

    let extracted = rows.iter().filter(|r| r.salary_extraction_success).count();
    eprintln!();
    eprintln!(
        "{} Extracted {} of {} {} salaries in {:?}",
        style("✓").green(),
        style(extracted).green(),
        rows.len(),
        args.country,
        start.elapsed()
    );
    if let Some(ref path) = args.output {
        eprintln!("   Wrote {}", path.display());
    }

    if args.summary {
        print_summary(&rows);
    }

    Ok(())
}

fn read_postings(files: &[PathBuf]) -> anyhow::Result<Vec<Posting>> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut postings = Vec::new();
    for path in files {
        let mut reader = csv::Reader::from_path(path)?;
        let before = postings.len();
        for record in reader.deserialize() {
            let posting: Posting = record
                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
            postings.push(posting);
        }
        debug!("Read {} postings from {}", postings.len() - before, path.display());
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(postings)
}

fn write_rows(output: Option<&Path>, rows: &[SalaryRow]) -> anyhow::Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            Box::new(fs::File::create(path)?)
        }
        None => Box::new(std::io::stdout()),
    };

    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_summary(rows: &[SalaryRow]) {
    let summary = ExtractionSummary::from_records(rows);
    summary.log();

    eprintln!();
    eprintln!("{}", style("Summary").bold());
    for (country, counts) in &summary.countries {
        eprintln!(
            "  {:<10} {:>6}/{:<6} {:>6.1}%   {} without conversion",
            country,
            counts.successes,
            counts.total,
            counts.rate() * 100.0,
            counts.conversion_gaps
        );
    }
    let total = summary.total();
    eprintln!(
        "  {:<10} {:>6}/{:<6} {:>6.1}%   {} without conversion",
        "Total",
        total.successes,
        total.total,
        total.rate() * 100.0,
        total.conversion_gaps
    );

    let mismatches = magnitude_mismatches(rows);
    if !mismatches.is_empty() {
        eprintln!();
        eprintln!("{}", style("Magnitude mismatches:").yellow());
        for m in &mismatches {
            eprintln!(
                "  - {}: {} - {} ({})",
                m.job_id.as_deref().unwrap_or("?"),
                m.min_salary,
                m.max_salary,
                m.context_string.as_deref().unwrap_or("")
            );
        }
    }
}
