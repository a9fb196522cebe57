//! Token-budget-aware chunked summarization.
//!
//! The model can only summarize a bounded number of tokens at once, while
//! article content is unbounded. [`ChunkedSummarizer`] bridges the gap with a
//! map-then-reduce scheme: split the text into token-bounded chunks at
//! sentence boundaries, summarize each chunk at half the target length, then
//! join the surviving summaries and re-summarize once more if the combination
//! still exceeds the chunk budget.
//!
//! The public entry point never fails. Internal failures degrade to a
//! diagnostic placeholder string embedding the failure reason, and a single
//! failed chunk is dropped rather than failing the whole article - overall
//! summarization only fails when *every* chunk failed.

use crate::model::{SummarizeModel, Tokenizer};
use crate::models::{NO_CONTENT_FOUND, NO_TITLE_FOUND};
use tracing::{debug, instrument, warn};

/// Token budgets derived once from the model's reported input limit.
///
/// `max_chunk_tokens` stays strictly below `max_input_tokens`, reserving
/// headroom for special tokens.
#[derive(Debug, Clone, Copy)]
pub struct ChunkBudget {
    pub max_input_tokens: usize,
    pub max_chunk_tokens: usize,
}

impl ChunkBudget {
    pub fn for_model(max_input_tokens: usize) -> Self {
        let max_chunk_tokens = 1024.min(max_input_tokens.saturating_sub(50));
        Self {
            max_input_tokens,
            max_chunk_tokens,
        }
    }
}

/// Summarizer that adapts to content length under a fixed token budget.
pub struct ChunkedSummarizer<M, T> {
    model: M,
    tokenizer: T,
    budget: ChunkBudget,
}

impl<M, T> ChunkedSummarizer<M, T>
where
    M: SummarizeModel,
    T: Tokenizer,
{
    /// Derive the chunk budget from the model's input limit.
    pub fn new(model: M, tokenizer: T) -> Self {
        let budget = ChunkBudget::for_model(model.max_input_tokens());
        Self {
            model,
            tokenizer,
            budget,
        }
    }

    pub fn budget(&self) -> ChunkBudget {
        self.budget
    }

    /// Produce a bounded-length summary for one article. Never fails.
    ///
    /// Empty or sentinel content short-circuits to a placeholder without a
    /// model call. A meaningful title is prepended to the content so the
    /// summary can anchor on it.
    #[instrument(level = "info", skip_all, fields(title_len = title.len(), content_len = content.len()))]
    pub async fn summarize_article(
        &self,
        title: &str,
        content: &str,
        min_length: usize,
        max_length: usize,
    ) -> String {
        let content = content.trim();
        if content.is_empty() || content == NO_CONTENT_FOUND {
            warn!("No content to summarize");
            return format!("Summary not available - insufficient content. Title: {title}");
        }

        let meaningful_title = !title.trim().is_empty() && title != NO_TITLE_FOUND;
        let prepared = if meaningful_title {
            format!("{title}. {content}")
        } else {
            content.to_string()
        };

        if self.tokenizer.count(&prepared) <= self.budget.max_chunk_tokens {
            match self.summarize_once(&prepared, min_length, max_length).await {
                Ok(summary) => summary,
                Err(e) => {
                    warn!(error = %e, "Summarization failed");
                    format!("Summary generation failed: {e}")
                }
            }
        } else {
            self.summarize_long(&prepared, min_length, max_length).await
        }
    }

    /// Map-then-reduce summarization for text over the chunk budget.
    async fn summarize_long(&self, text: &str, min_length: usize, max_length: usize) -> String {
        let chunks = self.split_into_chunks(text);

        if chunks.len() == 1 {
            return match self.summarize_once(&chunks[0], min_length, max_length).await {
                Ok(summary) => summary,
                Err(e) => format!("Summary generation failed: {e}"),
            };
        }

        // Half-length chunk summaries reserve room for the reduce pass.
        let chunk_min = min_length / 2;
        let chunk_max = max_length / 2;
        let mut chunk_summaries = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            match self.summarize_once(chunk, chunk_min, chunk_max).await {
                Ok(summary) => {
                    debug!(chunk = i + 1, total = chunks.len(), "Summarized chunk");
                    chunk_summaries.push(summary);
                }
                Err(e) => {
                    warn!(
                        chunk = i + 1,
                        total = chunks.len(),
                        error = %e,
                        "Chunk summarization failed; dropping chunk"
                    );
                }
            }
        }

        if chunk_summaries.is_empty() {
            return "Failed to generate summary for long text".to_string();
        }

        let combined = chunk_summaries.join(" ");
        if self.tokenizer.count(&combined) > self.budget.max_chunk_tokens {
            match self.summarize_once(&combined, min_length, max_length).await {
                Ok(summary) => summary,
                Err(e) => format!("Failed to summarize long content: {e}"),
            }
        } else {
            combined
        }
    }

    /// One guarded model call: clamp the minimum length and token-truncate
    /// the input to the chunk budget so no call can exceed the model's hard
    /// input limit.
    async fn summarize_once(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> Result<String, crate::error::EngineError> {
        let min_length = min_length.min(max_length / 2);
        let tokens = self.tokenizer.encode(text);
        let bounded;
        let text = if tokens.len() > self.budget.max_chunk_tokens {
            bounded = self
                .tokenizer
                .decode(&tokens[..self.budget.max_chunk_tokens]);
            bounded.as_str()
        } else {
            text
        };
        self.model.summarize(text, min_length, max_length).await
    }

    /// Greedily pack sentences into token-bounded chunks.
    ///
    /// A single sentence over the budget becomes its own over-budget chunk
    /// rather than being dropped; the model-call guard truncates it. Zero
    /// sentences degenerate to one raw-truncated chunk.
    pub fn split_into_chunks(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for sentence in split_sentences(text) {
            let candidate = if current.is_empty() {
                sentence.clone()
            } else {
                format!("{current} {sentence}")
            };
            if self.tokenizer.count(&candidate) <= self.budget.max_chunk_tokens {
                current = candidate;
            } else {
                if !current.is_empty() {
                    chunks.push(current);
                }
                current = sentence;
            }
        }
        if !current.is_empty() {
            chunks.push(current);
        }

        if chunks.is_empty() {
            chunks.push(text.chars().take(self.budget.max_chunk_tokens).collect());
        }
        chunks
    }
}

/// Split text into sentences at `.`/`!`/`?` followed by whitespace.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_none_or(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}
