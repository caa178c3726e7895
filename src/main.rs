//! Command line front end for the job scraper
//!
//! Runs one search, ranks the listings and writes the result table as CSV
//! or JSON to a file or stdout. Ctrl-C cancels in-flight requests.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use job_scout::domain::SearchParameters;
use job_scout::infrastructure::{AppConfig, export, init_logging_with_config};
use job_scout::{ResultTable, ScrapeOrchestrator};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(name = "job-scout")]
#[command(about = "Scrape job listings and rank them by keyword preference")]
struct Cli {
    /// Search query
    #[arg(short, long, default_value = "Graduate Python")]
    query: String,

    /// Search location
    #[arg(short, long, default_value = "London")]
    location: String,

    /// Search radius in miles
    #[arg(short, long, default_value_t = 15)]
    miles: u32,

    /// Description keywords, most preferred first (comma separated)
    #[arg(
        short,
        long,
        default_value = "Banking, Finance, Hedge, Python, Fintech, SQL, Analysis, Modelling"
    )]
    keywords: String,

    /// Title keywords, most preferred first (comma separated)
    #[arg(short, long, default_value = "Graduate, Junior")]
    title_keywords: String,

    /// Title keywords that rule a listing out (comma separated)
    #[arg(short, long, default_value = "Recruitment, Headhunting")]
    exclude_keywords: String,

    /// Number of results pages to scrape
    #[arg(short, long, default_value_t = 10)]
    pages: u32,

    /// Config file (defaults to the per-user config location)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(Some(path.as_path())),
        None => AppConfig::load_default(),
    }
    .context("Failed to load configuration")?;

    let _logging_guard = init_logging_with_config(&config.logging)?;

    let params = SearchParameters::from_comma_lists(
        &cli.query,
        &cli.location,
        cli.miles,
        &cli.keywords,
        &cli.title_keywords,
        &cli.exclude_keywords,
        cli.pages,
    )
    .context("Invalid search parameters")?;

    let orchestrator = ScrapeOrchestrator::new(config.scraper)?;

    let cancellation_token = CancellationToken::new();
    let ctrl_c_token = cancellation_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling scrape");
            ctrl_c_token.cancel();
        }
    });

    let report = orchestrator
        .scrape_with_cancellation(&params, cancellation_token)
        .await?;

    if report.is_total_failure() {
        warn!("No results page could be fetched");
    }
    info!(
        listings = report.result_set.len(),
        pages_failed = report.pages_failed,
        listings_failed = report.listings_failed,
        "Scrape summary"
    );

    let table = report.result_set.to_table();
    match &cli.output {
        Some(path) => write_table_file(&table, cli.format, path)?,
        None => write_table(&table, cli.format, std::io::stdout().lock())?,
    }

    Ok(())
}

fn write_table_file(table: &ResultTable, format: OutputFormat, path: &Path) -> Result<()> {
    match format {
        OutputFormat::Csv => export::write_csv_file(table, path),
        OutputFormat::Json => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_table(table, format, file)
        }
    }
}

fn write_table<W: Write>(table: &ResultTable, format: OutputFormat, mut writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => export::write_csv(table, writer),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &table.rows)?;
            writeln!(writer)?;
            Ok(())
        }
    }
}
