//! Per-URL pipeline orchestration and batch fan-out.
//!
//! [`ArticlePipeline`] composes fetch -> extract -> summarize for one URL and
//! guarantees **failure isolation at the URL boundary**: every failure is
//! caught here and converted into a [`SummaryResult`] with `error` set, so a
//! batch always returns exactly one record per input URL and one bad URL can
//! never abort its siblings.
//!
//! Two batch modes exist. Sequential processing walks the list in order on
//! the calling task. Concurrent processing fans out over a bounded number of
//! lanes with `buffer_unordered`; completion order is arbitrary, so results
//! are re-sorted to input order before returning and callers may rely on
//! positional correlation in both modes.

use crate::config::EngineConfig;
use crate::extract::extract;
use crate::fetch::Fetcher;
use crate::model::{SummarizeModel, Tokenizer};
use crate::models::{BatchReport, SummaryResult};
use crate::summarize::ChunkedSummarizer;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Explicitly constructed engine instance; no ambient global state.
pub struct ArticlePipeline<M, T> {
    fetcher: Fetcher,
    summarizer: ChunkedSummarizer<M, T>,
    concurrency: usize,
    summary_min: usize,
    summary_max: usize,
}

impl<M, T> ArticlePipeline<M, T>
where
    M: SummarizeModel,
    T: Tokenizer,
{
    /// Build a pipeline from its collaborators and configuration.
    pub fn new(
        model: M,
        tokenizer: T,
        config: &EngineConfig,
    ) -> Result<Self, crate::error::EngineError> {
        let fetcher = Fetcher::new(Duration::from_secs_f64(config.rate_limit_secs))?;
        let summarizer = ChunkedSummarizer::new(model, tokenizer);
        Ok(Self {
            fetcher,
            summarizer,
            concurrency: config.concurrency.max(1),
            summary_min: config.summary.min_length,
            summary_max: config.summary.max_length,
        })
    }

    /// Process one URL end to end. Never fails; failures become results.
    #[instrument(level = "info", skip(self))]
    pub async fn process(&self, url: &str) -> SummaryResult {
        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Fetch failed; recording failed result");
                return SummaryResult::failed(url, &e.to_string());
            }
        };

        let mut record = extract(&body);
        record.url = url.to_string();

        let summary = self
            .summarizer
            .summarize_article(&record.title, &record.content, self.summary_min, self.summary_max)
            .await;

        info!(
            title = %preview(&record.title, 60),
            content_len = record.content.len(),
            summary_len = summary.len(),
            "Processed article"
        );
        SummaryResult::from_record(record, summary)
    }

    /// Process URLs one at a time on the calling task. The rate limiter's
    /// throttle is exact here and strictly serializes requests.
    #[instrument(level = "info", skip_all, fields(count = urls.len()))]
    pub async fn process_many(&self, urls: &[String]) -> Vec<SummaryResult> {
        let mut results = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            info!(index = i + 1, total = urls.len(), %url, "Processing URL");
            results.push(self.process(url).await);
        }
        results
    }

    /// Process URLs across a bounded number of concurrent lanes.
    ///
    /// Results are re-sorted to input order before returning, so the output
    /// matches `urls` 1:1 by position as well as by `url` field.
    #[instrument(level = "info", skip_all, fields(count = urls.len(), concurrency = self.concurrency))]
    pub async fn process_many_concurrent(&self, urls: &[String]) -> Vec<SummaryResult> {
        let mut indexed: Vec<(usize, SummaryResult)> = stream::iter(urls.iter().enumerate())
            .map(|(i, url)| async move { (i, self.process(url).await) })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;
        indexed.sort_by_key(|(i, _)| *i);
        indexed.into_iter().map(|(_, result)| result).collect()
    }

    /// Run a full batch in the chosen mode and aggregate the counts.
    pub async fn run_batch(&self, urls: &[String], sequential: bool) -> BatchReport {
        let results = if sequential {
            self.process_many(urls).await
        } else {
            self.process_many_concurrent(urls).await
        };
        let report = BatchReport::from_results(results);
        info!(
            total = report.total,
            successful = report.successful,
            failed = report.failed,
            "Batch complete"
        );
        report
    }
}

/// Truncate a string for logging, respecting char boundaries.
fn preview(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::model::WordTokenizer;

    /// Model that never gets called in these tests (all fetches fail), but
    /// satisfies the pipeline's collaborator seam.
    struct InertModel;

    impl SummarizeModel for InertModel {
        async fn summarize(
            &self,
            _text: &str,
            _min_length: usize,
            _max_length: usize,
        ) -> Result<String, EngineError> {
            Ok("unused".to_string())
        }

        fn max_input_tokens(&self) -> usize {
            1024
        }
    }

    fn pipeline() -> ArticlePipeline<InertModel, WordTokenizer> {
        let mut config = EngineConfig::default();
        config.rate_limit_secs = 0.0;
        ArticlePipeline::new(InertModel, WordTokenizer, &config).unwrap()
    }

    // Port 9 (discard) is unassigned on loopback; connections are refused
    // immediately, giving a deterministic fetch failure without a network.
    fn dead_urls() -> Vec<String> {
        vec![
            "http://127.0.0.1:9/a".to_string(),
            "http://127.0.0.1:9/b".to_string(),
            "http://127.0.0.1:9/c".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_failed_fetch_becomes_result_not_error() {
        let result = pipeline().process("http://127.0.0.1:9/x").await;
        assert!(!result.is_success());
        assert_eq!(result.url, "http://127.0.0.1:9/x");
        assert_eq!(result.content, "Failed to extract content");
        assert!(result.summary.starts_with("Processing failed:"));
    }

    #[tokio::test]
    async fn test_sequential_batch_returns_one_result_per_url_in_order() {
        let urls = dead_urls();
        let results = pipeline().process_many(&urls).await;
        assert_eq!(results.len(), urls.len());
        for (url, result) in urls.iter().zip(&results) {
            assert_eq!(&result.url, url);
        }
    }

    #[tokio::test]
    async fn test_concurrent_batch_is_resorted_to_input_order() {
        let urls = dead_urls();
        let results = pipeline().process_many_concurrent(&urls).await;
        assert_eq!(results.len(), urls.len());
        for (url, result) in urls.iter().zip(&results) {
            assert_eq!(&result.url, url);
        }
    }

    #[tokio::test]
    async fn test_batch_counts_always_reconcile() {
        let urls = dead_urls();
        let report = pipeline().run_batch(&urls, false).await;
        assert_eq!(report.total, urls.len());
        assert_eq!(report.total, report.successful + report.failed);
        assert_eq!(report.failed, urls.len());
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("ééééé", 3), "ééé…");
    }
}
