// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Ollama chat API.
//!
//! Provides [`OllamaClient`] which handles request construction, error
//! mapping, and both single-shot and NDJSON-streamed chat calls. Every call
//! is attempted exactly once.

use std::time::Duration;

use llm_router_core::{ChatRequest, ChatResponse, ChunkStream, RouterError};
use tracing::debug;

use crate::ndjson;
use crate::types::{ApiErrorResponse, OllamaChatRequest, StreamLine};

/// Path of the chat endpoint, relative to the host.
const CHAT_PATH: &str = "/api/chat";

/// HTTP client for one Ollama host.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    host: String,
    timeout: Option<Duration>,
}

impl OllamaClient {
    /// Creates a client for `host`.
    ///
    /// A host without a scheme is treated as `http://`; a host that is still
    /// not a valid http(s) URL is a [`RouterError::Config`]. When `timeout` is
    /// set it bounds connecting and each individual read, so a long
    /// streamed answer is not cut off as long as tokens keep arriving.
    pub fn new(host: &str, timeout: Option<Duration>) -> Result<Self, RouterError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.connect_timeout(t).read_timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| RouterError::Config(format!("failed to build HTTP client: {e}")))?;

        let host = normalize_host(host);
        let url = reqwest::Url::parse(&host)
            .map_err(|e| RouterError::Config(format!("invalid backend host {host:?}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RouterError::Config(format!(
                "backend host {host:?} must use http or https"
            )));
        }

        Ok(Self {
            client,
            host,
            timeout,
        })
    }

    /// The normalized base URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn chat_url(&self) -> String {
        format!("{}{CHAT_PATH}", self.host)
    }

    /// Sends one chat request and checks the HTTP status.
    async fn send(&self, request: &ChatRequest) -> Result<reqwest::Response, RouterError> {
        let body = OllamaChatRequest {
            model: &request.model,
            messages: &request.messages,
            stream: request.stream,
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, self.timeout))?;

        let status = response.status();
        debug!(status = %status, model = request.model.as_str(), stream = request.stream, "chat response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_err) => api_err.error,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            Err(_) => body,
        };
        Err(RouterError::Backend {
            status: Some(status.as_u16()),
            message,
        })
    }

    /// Sends a non-streaming request and returns the full response.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, RouterError> {
        let mut req = request.clone();
        req.stream = false;

        let response = self.send(&req).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(e, self.timeout))?;

        match serde_json::from_slice::<StreamLine>(&body) {
            Ok(StreamLine::Chunk(resp)) if resp.message.is_some() => Ok(resp.into_response()),
            Ok(StreamLine::Chunk(_)) => Err(RouterError::MalformedResponse {
                message: "response has no message".to_string(),
                source: None,
            }),
            Ok(StreamLine::Error(err)) => Err(RouterError::Backend {
                status: None,
                message: err.error,
            }),
            Err(e) => Err(RouterError::MalformedResponse {
                message: format!("failed to parse chat response: {e}"),
                source: Some(Box::new(e)),
            }),
        }
    }

    /// Sends a streaming request and returns the chunk stream.
    ///
    /// Connection and HTTP status errors are returned here, before any
    /// chunk is produced.
    pub async fn chat_stream(&self, request: &ChatRequest) -> Result<ChunkStream, RouterError> {
        let mut req = request.clone();
        req.stream = true;

        let response = self.send(&req).await?;
        Ok(ndjson::chunk_stream(response, self.timeout))
    }
}

/// Adds `http://` to a bare `host:port` and strips trailing slashes.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let with_scheme = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

/// Maps a transport error onto the router's error taxonomy.
pub(crate) fn map_reqwest_error(e: reqwest::Error, timeout: Option<Duration>) -> RouterError {
    if e.is_timeout() {
        return RouterError::Timeout {
            duration: timeout.unwrap_or_default(),
        };
    }
    if e.is_decode() {
        return RouterError::MalformedResponse {
            message: format!("failed to decode response body: {e}"),
            source: Some(Box::new(e)),
        };
    }
    RouterError::Connection {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}
