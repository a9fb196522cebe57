//! Summarization model and tokenizer capabilities.
//!
//! The engine consumes the pretrained model as an abstract capability:
//! "summarize text within a length bound, or fail". The trait-based design
//! keeps the chunking policy independent of any particular backend and lets
//! tests script model behavior per call.
//!
//! [`HttpSummarizer`] is the production backend: an OpenAI-compatible chat
//! completions endpoint. [`WordTokenizer`] is the default length-measurement
//! capability; tokens are whole words, so `decode(encode(text)[..n])` is
//! always boundary-safe. A model-specific tokenizer can be swapped in
//! through the [`Tokenizer`] trait without touching the chunking logic.

use crate::config::ModelConfig;
use crate::error::EngineError;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{instrument, warn};

/// Length measurement and boundary-safe slicing over opaque tokens.
///
/// The engine depends on nothing beyond counting and slicing; token identity
/// is private to the implementation.
pub trait Tokenizer: Send + Sync {
    type Token: Clone + Send;

    fn encode(&self, text: &str) -> Vec<Self::Token>;
    fn decode(&self, tokens: &[Self::Token]) -> String;

    /// Token count of `text`.
    fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}

/// Whitespace-word tokenizer used for budget accounting by default.
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    type Token = String;

    fn encode(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn decode(&self, tokens: &[String]) -> String {
        tokens.join(" ")
    }
}

/// Async summarization capability.
///
/// Implementations fail only exceptionally ([`EngineError::Model`]), never by
/// returning malformed output. `max_input_tokens` reports the model's hard
/// input limit, from which the chunk budget is derived.
pub trait SummarizeModel: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> Result<String, EngineError>;

    fn max_input_tokens(&self) -> usize;
}

/// OpenAI-compatible chat completions client.
#[derive(Debug)]
pub struct HttpSummarizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_input_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl HttpSummarizer {
    /// Build a client from model configuration. The API key, if any, is read
    /// from the environment variable named in the config.
    pub fn new(config: &ModelConfig) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.name.clone(),
            api_key: std::env::var(&config.api_key_env).ok(),
            max_input_tokens: config.max_input_tokens,
        })
    }
}

impl SummarizeModel for HttpSummarizer {
    #[instrument(level = "info", skip_all, fields(min_length, max_length))]
    async fn summarize(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> Result<String, EngineError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": format!(
                        "You are a summarization engine. Summarize the user's text in \
                         {min_length} to {max_length} words. Respond with the summary only."
                    ),
                },
                { "role": "user", "content": text },
            ],
        });

        let t0 = Instant::now();
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EngineError::Model(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "Model call failed");
            return Err(EngineError::Model(format!("unexpected status {status}")));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Model(format!("malformed completion: {e}")))?;
        let summary = payload
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(EngineError::Model("empty completion".to_string()));
        }
        Ok(summary.to_string())
    }

    fn max_input_tokens(&self) -> usize {
        self.max_input_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_tokenizer_counts_words() {
        let tok = WordTokenizer;
        assert_eq!(tok.count("one two  three\nfour"), 4);
        assert_eq!(tok.count(""), 0);
        assert_eq!(tok.count("   "), 0);
    }

    #[test]
    fn test_word_tokenizer_decode_is_boundary_safe() {
        let tok = WordTokenizer;
        let tokens = tok.encode("alpha beta gamma delta");
        assert_eq!(tok.decode(&tokens[..2]), "alpha beta");
        assert_eq!(tok.decode(&tokens), "alpha beta gamma delta");
    }

    #[test]
    fn test_chat_response_parsing() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":" A summary. "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, " A summary. ");
    }
}
