// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat backend for deterministic testing.
//!
//! `MockBackend` implements `ChatBackend` with pre-configured responses and
//! records every request it receives, enabling fast tests without a running
//! inference server.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream;
use tokio::sync::Mutex;

use llm_router_core::{
    ChatBackend, ChatChunk, ChatMessage, ChatRequest, ChatResponse, ChunkStream, Role,
    RouterError, TokenUsage,
};

/// How the mock answers.
#[derive(Debug, Clone)]
enum Behavior {
    /// Answer from the response queue.
    Answer,
    /// Fail every call with a connection error.
    Unreachable,
    /// Stream the queued answer, then fail instead of sending the final chunk.
    FailMidStream(String),
}

/// A mock backend that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned.
pub struct MockBackend {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
    behavior: Behavior,
}

impl MockBackend {
    /// Create a new mock backend with an empty response queue.
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Create a mock backend pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            requests: Arc::new(Mutex::new(Vec::new())),
            behavior: Behavior::Answer,
        }
    }

    /// A backend whose every call fails with [`RouterError::Connection`].
    pub fn unreachable() -> Self {
        Self {
            behavior: Behavior::Unreachable,
            ..Self::new()
        }
    }

    /// A backend that streams `partial` and then yields a backend error.
    pub fn failing_mid_stream(partial: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::FailMidStream(message.into()),
            ..Self::with_responses(vec![partial.into()])
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// All requests received so far, in order.
    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }

    async fn record(&self, request: &ChatRequest) -> Result<(), RouterError> {
        self.requests.lock().await.push(request.clone());
        match self.behavior {
            Behavior::Unreachable => Err(RouterError::Connection {
                message: "mock backend is unreachable".to_string(),
                source: None,
            }),
            _ => Ok(()),
        }
    }

    /// Pop the next response, or return the default.
    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn usage() -> TokenUsage {
    TokenUsage {
        prompt_tokens: 10,
        completion_tokens: 20,
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    fn name(&self) -> &str {
        "mock-backend"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, RouterError> {
        self.record(&request).await?;
        let text = self.next_response().await;
        Ok(ChatResponse {
            model: request.model,
            message: ChatMessage {
                role: Role::Assistant,
                content: text,
            },
            done_reason: Some("stop".to_string()),
            usage: Some(usage()),
        })
    }

    async fn stream(&self, request: ChatRequest) -> Result<ChunkStream, RouterError> {
        self.record(&request).await?;
        let text = self.next_response().await;
        let model = request.model;

        // One chunk per word (keeping its trailing space), then the final chunk.
        let mut items: Vec<Result<ChatChunk, RouterError>> = text
            .split_inclusive(' ')
            .map(|piece| {
                Ok(ChatChunk {
                    model: model.clone(),
                    content: piece.to_string(),
                    done: false,
                    done_reason: None,
                    usage: None,
                })
            })
            .collect();

        match &self.behavior {
            Behavior::FailMidStream(message) => items.push(Err(RouterError::Backend {
                status: None,
                message: message.clone(),
            })),
            _ => items.push(Ok(ChatChunk {
                model,
                content: String::new(),
                done: true,
                done_reason: Some("stop".to_string()),
                usage: Some(usage()),
            })),
        }

        Ok(Box::pin(stream::iter(items)))
    }
}
