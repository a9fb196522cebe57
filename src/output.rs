//! JSON batch-report persistence.
//!
//! Reports are organized by date so repeated runs accumulate cleanly:
//!
//! ```text
//! output_dir/
//! └── 2026-08-27/
//!     ├── digest_09-15-02.json
//!     └── digest_17-40-11.json
//! ```

use crate::error::EngineError;
use crate::models::BatchReport;
use chrono::Local;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize a batch report to a dated JSON file, creating directories as
/// needed. Returns the path written.
#[instrument(level = "info", skip(report))]
pub async fn write_report(report: &BatchReport, output_dir: &str) -> Result<String, EngineError> {
    let json = serde_json::to_string_pretty(report)?;

    let date = Local::now().date_naive().to_string();
    let dir = format!("{}/{date}", output_dir.trim_end_matches('/'));
    fs::create_dir_all(&dir).await?;

    let stamp = Local::now().format("%H-%M-%S");
    let path = format!("{dir}/digest_{stamp}.json");
    fs::write(&path, json).await?;
    info!(path = %path, articles = report.total, "Wrote batch report");
    Ok(path)
}

/// Ensure a directory exists and is writable by probing with a scratch file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), EngineError> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    Ok(())
}
