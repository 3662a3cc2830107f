// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama backend for llm-router.
//!
//! This crate implements [`ChatBackend`] for a local Ollama server's
//! `/api/chat` endpoint, providing both single-shot completion and
//! NDJSON-streamed responses.

pub mod client;
pub mod ndjson;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use llm_router_config::model::BackendConfig;
use llm_router_core::{ChatBackend, ChatRequest, ChatResponse, ChunkStream, RouterError};
use tracing::debug;

use crate::client::OllamaClient;

/// Ollama backend implementing [`ChatBackend`].
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: OllamaClient,
}

impl OllamaBackend {
    /// Creates a backend talking to `host` (`http://localhost:11434` style).
    pub fn new(host: &str, timeout: Option<Duration>) -> Result<Self, RouterError> {
        let client = OllamaClient::new(host, timeout)?;
        debug!(host = client.host(), ?timeout, "Ollama backend initialized");
        Ok(Self { client })
    }

    /// Creates a backend from the `[backend]` config section.
    pub fn from_config(config: &BackendConfig) -> Result<Self, RouterError> {
        Self::new(&config.host, config.timeout_secs.map(Duration::from_secs))
    }

    /// The normalized base URL requests are sent to.
    pub fn host(&self) -> &str {
        self.client.host()
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, RouterError> {
        self.client.chat(&request).await
    }

    async fn stream(&self, request: ChatRequest) -> Result<ChunkStream, RouterError> {
        self.client.chat_stream(&request).await
    }
}
