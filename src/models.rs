//! Data models for extracted articles and their summarized results.
//!
//! This module defines the core data structures used throughout the engine:
//! - [`ArticleRecord`]: Best-effort extraction output for one page
//! - [`SummaryResult`]: Per-URL pipeline output, renderable without null checks
//! - [`BatchReport`]: Aggregate payload returned to batch callers
//!
//! Every field is a plain `String`; the empty string is the explicit
//! "not found" sentinel so downstream serialization has a uniform shape.

use serde::{Deserialize, Serialize};

/// Placeholder title when every title probe comes up empty.
pub const NO_TITLE_FOUND: &str = "No title found";
/// Placeholder content when every content probe comes up empty.
pub const NO_CONTENT_FOUND: &str = "No content found";

/// Best-effort title/body/metadata tuple extracted from one page.
///
/// Produced once per URL by the extractor and immutable afterwards. The
/// extractor never fails: `title` and `content` fall back to their sentinel
/// strings, while `author`, `publish_date`, and `description` fall back to
/// the empty string because they are optional metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// The URL the page was fetched from (filled in by the caller).
    pub url: String,
    /// The article title or [`NO_TITLE_FOUND`].
    pub title: String,
    /// The normalized article body or [`NO_CONTENT_FOUND`].
    pub content: String,
    /// The article author, or `""` when no attribution was found.
    pub author: String,
    /// The publish date as the page stated it, or `""`.
    pub publish_date: String,
    /// The meta description, or `""`.
    pub description: String,
}

/// The per-URL pipeline output.
///
/// A non-empty `error` marks a failed item. Failed items still carry
/// diagnostic placeholder text in `content` and `summary` so callers can
/// render a result row unconditionally.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryResult {
    pub url: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub author: String,
    pub publish_date: String,
    pub description: String,
    /// Empty on success; the failure cause otherwise.
    pub error: String,
}

impl SummaryResult {
    /// Build a successful result from an extracted record and its summary.
    pub fn from_record(record: ArticleRecord, summary: String) -> Self {
        Self {
            url: record.url,
            title: record.title,
            content: record.content,
            summary,
            author: record.author,
            publish_date: record.publish_date,
            description: record.description,
            error: String::new(),
        }
    }

    /// Build a failed result with diagnostic placeholders.
    pub fn failed(url: &str, cause: &str) -> Self {
        Self {
            url: url.to_string(),
            title: "Error".to_string(),
            content: "Failed to extract content".to_string(),
            summary: format!("Processing failed: {cause}"),
            author: String::new(),
            publish_date: String::new(),
            description: String::new(),
            error: cause.to_string(),
        }
    }

    /// A result counts as successful when its `error` field is empty.
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

/// Aggregate batch payload: one result per input URL plus counts.
///
/// The invariant `total == successful + failed` always holds.
#[derive(Debug, Deserialize, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<SummaryResult>,
}

impl BatchReport {
    /// Compute aggregate counts over a finished batch.
    pub fn from_results(results: Vec<SummaryResult>) -> Self {
        let total = results.len();
        let successful = results.iter().filter(|r| r.is_success()).count();
        Self {
            total,
            successful,
            failed: total - successful,
            results,
        }
    }
}
