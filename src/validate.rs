//! URL validation and normalization.
//!
//! The acceptance rule is a deliberately loose heuristic, not RFC
//! validation: trim, drop empties, default to `https://`, and require the
//! result to contain a `.` and be longer than 10 characters. Rejected
//! entries are logged at `warn` and dropped silently; the caller only sees
//! the surviving list. An empty output is not an error here - detecting the
//! "no valid URLs" condition is the caller's responsibility.

use tracing::{info, warn};

/// Normalize and filter a caller-supplied list of URL strings.
pub fn validate_urls(urls: &[String]) -> Vec<String> {
    let mut valid = Vec::new();

    for raw in urls {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        if url.contains('.') && url.len() > 10 {
            valid.push(url);
        } else {
            warn!(%url, "Invalid URL skipped");
        }
    }

    info!(
        valid = valid.len(),
        supplied = urls.len(),
        "Validated URL list"
    );
    valid
}
