//! Command-line trigger: run one scrape and print the JSON envelope to stdout.
//!
//! Logs go to stderr (`RUST_LOG`, default `info`). Exit code is 1 when the
//! scrape failed.

use std::path::PathBuf;
use std::time::Instant;

use adaptive_scrape::{
    ExecutionResponse, RunRecord, ScrapeError, ScrapeOutcome, ScrapeRequest, ScraperConfig,
    StrategyCoordinator, validate_selectors,
};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "adaptive-scrape",
    about = "Extract structured records from a page, falling back to a headless browser",
    version
)]
struct Cli {
    /// Absolute http(s) URL to scrape
    #[arg(long)]
    url: String,

    /// Selector specification as JSON text, e.g. '{"container": ".item", "title": "h2"}'
    #[arg(long, conflicts_with = "selectors_file", required_unless_present = "selectors_file")]
    selectors: Option<String>,

    /// Read the selector specification from a file
    #[arg(long)]
    selectors_file: Option<PathBuf>,

    /// Time bound for each attempted strategy
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Skip the static attempt and render directly
    #[arg(long)]
    force_dynamic: bool,

    /// Scraper configuration id stamped on the run record
    #[arg(long, default_value = "cli")]
    scraper_id: String,

    /// Print a run record instead of the execution envelope
    #[arg(long)]
    record: bool,

    /// Show the browser window (ignored in release builds)
    #[arg(long)]
    headful: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    let result = run(&cli).await;
    let elapsed = start.elapsed();

    let json = if cli.record {
        let record = RunRecord::from_result(&cli.scraper_id, &result, elapsed, chrono::Utc::now())?;
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string_pretty(&ExecutionResponse::from_result(&result, elapsed))?
    };
    println!("{json}");

    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<ScrapeOutcome, ScrapeError> {
    let request = build_request(cli)
        .await
        .map_err(|e| ScrapeError::failed(&cli.url, e))?;

    let config = ScraperConfig::builder()
        .headless(!cli.headful)
        .build()
        .map_err(|e| ScrapeError::failed(&cli.url, ScrapeError::Validation(e.to_string())))?;

    StrategyCoordinator::from_config(config)
        .map_err(|e| ScrapeError::failed(&cli.url, e))?
        .scrape(&request)
        .await
}

async fn build_request(cli: &Cli) -> Result<ScrapeRequest, ScrapeError> {
    let raw = match (&cli.selectors, &cli.selectors_file) {
        (Some(raw), _) => raw.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path).await.map_err(|e| {
            ScrapeError::Validation(format!(
                "Failed to read selectors file {}: {e}",
                path.display()
            ))
        })?,
        (None, None) => "{}".to_string(),
    };

    let mut builder = ScrapeRequest::builder()
        .url(&cli.url)
        .selectors(validate_selectors(&raw)?)
        .force_dynamic(cli.force_dynamic);
    if let Some(ms) = cli.timeout_ms {
        builder = builder.timeout_ms(ms);
    }
    builder.build()
}
