// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend-agnostic chat types and the task category enum.

use std::pin::Pin;

use futures_core::Stream;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::RouterError;

/// The closed set of task categories a prompt can be classified into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    /// Condense or recap a body of text.
    Summarization,
    /// Write, explain, or fix code.
    Coding,
    /// Anything else; routed to the default model.
    General,
}

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Creates a `user` message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chat completion request, independent of the backend wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Backend model identifier.
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Whether the caller wants incremental chunks.
    pub stream: bool,
}

impl ChatRequest {
    /// Builds a single-turn request carrying `prompt` as the only user message.
    pub fn single_turn(model: impl Into<String>, prompt: impl Into<String>, stream: bool) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
            stream,
        }
    }
}

/// Token counters reported by the backend, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// The aggregated result of a non-streaming call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    /// Model that produced the answer, as reported by the backend.
    pub model: String,
    pub message: ChatMessage,
    /// Why generation stopped (`stop`, `length`, ...).
    pub done_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

impl ChatResponse {
    /// The full response text.
    pub fn content(&self) -> &str {
        &self.message.content
    }
}

/// One incremental unit of a streamed response.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatChunk {
    pub model: String,
    /// Content fragment; may be empty on the final chunk.
    pub content: String,
    /// True on the last chunk of the stream.
    pub done: bool,
    pub done_reason: Option<String>,
    /// Only present on the final chunk.
    pub usage: Option<TokenUsage>,
}

/// A lazy, finite, single-consumption sequence of chunks.
///
/// Dropping the stream releases the underlying connection.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<ChatChunk, RouterError>> + Send>>;
