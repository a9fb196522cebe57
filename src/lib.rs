//! # Article Digest
//!
//! An engine that extracts readable article content from arbitrary web pages
//! and produces length-bounded summaries, tolerating wildly inconsistent page
//! markup and content longer than the summarization model's input budget.
//!
//! ## Architecture
//!
//! Processing is a per-URL pipeline with failure isolation at the URL
//! boundary:
//!
//! 1. **Validation**: normalize and filter the caller's URL list
//! 2. **Fetching**: rate-limited, single-shot page download
//! 3. **Extraction**: selector fallback chains recover title, body, and
//!    metadata from untrusted markup; never fails
//! 4. **Summarization**: token-budget-aware chunk/summarize/recombine
//!    against an abstract model capability; never fails
//!
//! Batches fan out across a bounded number of concurrent lanes and always
//! return one [`models::SummaryResult`] per input URL, plus aggregate
//! `{total, successful, failed}` counts.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod models;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod summarize;
pub mod validate;

pub use config::EngineConfig;
pub use error::EngineError;
pub use models::{ArticleRecord, BatchReport, SummaryResult};
pub use pipeline::ArticlePipeline;
