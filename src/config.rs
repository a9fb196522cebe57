//! Engine configuration loaded from a YAML file.
//!
//! Construction-time configuration for an engine instance: model endpoint,
//! rate-limit interval, concurrency, and summary length targets. Every field
//! has a default so a missing or partial config file still yields a working
//! engine. There is no ambient global state; the loaded config is handed to
//! the pipeline constructor explicitly.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Top-level engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub model: ModelConfig,
    /// Minimum interval between outbound requests, in seconds.
    pub rate_limit_secs: f64,
    /// Concurrent lane count for batch processing.
    pub concurrency: usize,
    pub summary: SummaryConfig,
    /// Directory for JSON batch reports.
    pub output_dir: String,
}

/// Summarization model endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// OpenAI-compatible chat completions endpoint.
    pub endpoint: String,
    /// Model name sent with each request.
    pub name: String,
    /// Environment variable holding the API key, if the endpoint needs one.
    pub api_key_env: String,
    /// The model's hard input limit, in tokens.
    pub max_input_tokens: usize,
}

/// Target summary length bounds, in tokens.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            rate_limit_secs: 1.0,
            concurrency: 3,
            summary: SummaryConfig::default(),
            output_dir: "./reports".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:1234/v1/chat/completions".to_string(),
            name: "default".to_string(),
            api_key_env: "ARTICLE_DIGEST_API_KEY".to_string(),
            max_input_tokens: 1024,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            min_length: 50,
            max_length: 150,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path).map_err(|e| EngineError::Config {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&raw).map_err(|e| EngineError::Config {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.rate_limit_secs, 1.0);
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.summary.min_length, 50);
        assert_eq!(config.summary.max_length, 150);
        assert_eq!(config.model.max_input_tokens, 1024);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "concurrency: 5\nsummary:\n  max_length: 200\n";
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.summary.max_length, 200);
        // Untouched fields keep their defaults.
        assert_eq!(config.summary.min_length, 50);
        assert_eq!(config.rate_limit_secs, 1.0);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = EngineConfig::load("/nonexistent/config.yaml").unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }
}
