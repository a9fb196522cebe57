//! Command-line entry point.
//!
//! Wires the engine together: tracing init, config load, URL validation,
//! pipeline construction, batch run, and JSON report output. The engine
//! itself lives in the library crate.

use article_digest::cli::Cli;
use article_digest::config::EngineConfig;
use article_digest::error::EngineError;
use article_digest::model::{HttpSummarizer, WordTokenizer};
use article_digest::output::{ensure_writable_dir, write_report};
use article_digest::pipeline::ArticlePipeline;
use article_digest::validate::validate_urls;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // --- Config ---
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(n) = args.concurrency {
        config.concurrency = n;
    }

    // --- Gather and validate URLs ---
    let mut raw_urls = args.urls.clone();
    if let Some(path) = &args.urls_file {
        let contents = std::fs::read_to_string(path)?;
        raw_urls.extend(contents.lines().map(str::to_string));
    }
    let urls = validate_urls(&raw_urls);
    if urls.is_empty() {
        error!(supplied = raw_urls.len(), "No valid URLs to process");
        return Err(EngineError::Validation.into());
    }

    // Early check: ensure the report directory is writable before any work.
    if let Err(e) = ensure_writable_dir(&config.output_dir).await {
        error!(
            path = %config.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    // --- Build and run the pipeline ---
    let model = HttpSummarizer::new(&config.model)?;
    let pipeline = ArticlePipeline::new(model, WordTokenizer, &config)?;
    info!(
        count = urls.len(),
        sequential = args.sequential,
        concurrency = config.concurrency,
        "Starting batch"
    );

    let report = pipeline.run_batch(&urls, args.sequential).await;

    // --- Output ---
    match write_report(&report, &config.output_dir).await {
        Ok(path) => info!(%path, "Report written"),
        Err(e) => error!(error = %e, "Failed to write report"),
    }
    println!("{}", serde_json::to_string_pretty(&report)?);

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        total = report.total,
        successful = report.successful,
        failed = report.failed,
        "Execution complete"
    );
    Ok(())
}
