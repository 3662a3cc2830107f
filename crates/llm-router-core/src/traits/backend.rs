// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend trait for chat-completion services (Ollama, test mocks).

use async_trait::async_trait;

use crate::error::RouterError;
use crate::types::{ChatRequest, ChatResponse, ChunkStream};

/// A chat-completion service the dispatcher can forward prompts to.
///
/// Implementations perform exactly one network attempt per call and never
/// retry. `stream` must fail before returning when the backend cannot be
/// reached, so that callers see connection errors before any chunk.
#[async_trait]
pub trait ChatBackend: Send + Sync + 'static {
    /// Returns the human-readable name of this backend.
    fn name(&self) -> &str;

    /// Sends a request and waits for the full aggregated response.
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, RouterError>;

    /// Sends a request and returns the incremental chunk stream.
    async fn stream(&self, request: ChatRequest) -> Result<ChunkStream, RouterError>;
}
