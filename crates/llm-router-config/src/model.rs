// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for llm-router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Default Ollama address.
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Top-level llm-router configuration.
///
/// Every section is optional and defaults to the values the CLI documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Inference backend connection settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Category-to-model routing table.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Prompt classifier settings.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Inference backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the Ollama server. A missing scheme defaults to `http://`.
    #[serde(default = "default_host")]
    pub host: String,

    /// Stream chunks as they arrive instead of waiting for the full answer.
    #[serde(default = "default_stream")]
    pub stream: bool,

    /// Connect and per-read timeout in seconds. `None` keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            stream: default_stream(),
            timeout_secs: None,
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_stream() -> bool {
    true
}

/// Model routing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Model for summarization prompts.
    #[serde(default = "default_summarization_model")]
    pub summarization_model: String,

    /// Model for coding prompts.
    #[serde(default = "default_coding_model")]
    pub coding_model: String,

    /// Model for prompts matching neither keyword set.
    #[serde(default = "default_general_model")]
    pub default_model: String,

    /// Send every prompt to this model, bypassing classification.
    #[serde(default)]
    pub force_model: Option<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            summarization_model: default_summarization_model(),
            coding_model: default_coding_model(),
            default_model: default_general_model(),
            force_model: None,
        }
    }
}

fn default_summarization_model() -> String {
    "gpt-oss".to_string()
}

fn default_coding_model() -> String {
    "qwen2.5-coder".to_string()
}

fn default_general_model() -> String {
    "qwen2.5-coder".to_string()
}

/// Classifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Only inspect the first N characters of the prompt. `None` inspects everything.
    #[serde(default)]
    pub instruction_window: Option<usize>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
