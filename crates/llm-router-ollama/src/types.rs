// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Ollama `/api/chat` endpoint.

use llm_router_core::{ChatChunk, ChatMessage, ChatResponse, Role, TokenUsage};
use serde::{Deserialize, Serialize};

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct OllamaChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    /// Ollama streams by default, so this is always sent explicitly.
    pub stream: bool,
}

/// Message object inside a chat response line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// One chat response object.
///
/// A non-streaming call returns exactly one of these; a streaming call
/// returns one per NDJSON line. Fields Ollama omits on intermediate lines
/// are defaulted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OllamaChatResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub message: Option<WireMessage>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
    /// Tokens in the prompt (final line only).
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    /// Tokens generated (final line only).
    #[serde(default)]
    pub eval_count: Option<u32>,
}

impl OllamaChatResponse {
    fn usage(&self) -> Option<TokenUsage> {
        if self.prompt_eval_count.is_none() && self.eval_count.is_none() {
            return None;
        }
        Some(TokenUsage {
            prompt_tokens: self.prompt_eval_count.unwrap_or(0),
            completion_tokens: self.eval_count.unwrap_or(0),
        })
    }

    fn content(&self) -> String {
        self.message
            .as_ref()
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }

    /// Converts a streamed line into a [`ChatChunk`].
    pub fn into_chunk(self) -> ChatChunk {
        ChatChunk {
            content: self.content(),
            usage: self.usage(),
            model: self.model,
            done: self.done,
            done_reason: self.done_reason,
        }
    }

    /// Converts a complete (non-streamed) reply into a [`ChatResponse`].
    pub fn into_response(self) -> ChatResponse {
        ChatResponse {
            message: ChatMessage {
                role: Role::Assistant,
                content: self.content(),
            },
            usage: self.usage(),
            model: self.model,
            done_reason: self.done_reason,
        }
    }
}

/// Error body Ollama sends on failure, both as an HTTP error body and as a
/// line inside a stream.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// A decoded NDJSON line: either a response object or an in-band error.
///
/// `Error` is tried first; every field of [`OllamaChatResponse`] is
/// optional so it would otherwise accept an error object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StreamLine {
    Error(ApiErrorResponse),
    Chunk(OllamaChatResponse),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_messages_and_stream_flag() {
        let messages = vec![ChatMessage::user("hi")];
        let req = OllamaChatRequest {
            model: "qwen2.5-coder",
            messages: &messages,
            stream: false,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "qwen2.5-coder",
                "messages": [{"role": "user", "content": "hi"}],
                "stream": false
            })
        );
    }

    #[test]
    fn final_line_carries_usage() {
        let line = r#"{"model":"gpt-oss","created_at":"2024-01-01T00:00:00Z","message":{"role":"assistant","content":""},"done":true,"done_reason":"stop","prompt_eval_count":26,"eval_count":290}"#;
        let parsed: OllamaChatResponse = serde_json::from_str(line).unwrap();
        let chunk = parsed.into_chunk();
        assert!(chunk.done);
        assert_eq!(chunk.done_reason.as_deref(), Some("stop"));
        assert_eq!(
            chunk.usage,
            Some(TokenUsage {
                prompt_tokens: 26,
                completion_tokens: 290
            })
        );
    }

    #[test]
    fn intermediate_line_has_no_usage() {
        let line = r#"{"model":"gpt-oss","message":{"role":"assistant","content":"The"},"done":false}"#;
        let chunk = serde_json::from_str::<OllamaChatResponse>(line)
            .unwrap()
            .into_chunk();
        assert_eq!(chunk.content, "The");
        assert!(!chunk.done);
        assert!(chunk.usage.is_none());
    }

    #[test]
    fn error_line_is_recognized() {
        let line: StreamLine = serde_json::from_str(r#"{"error":"model 'x' not found"}"#).unwrap();
        assert!(matches!(line, StreamLine::Error(ref e) if e.error == "model 'x' not found"));

        let line: StreamLine = serde_json::from_str(r#"{"model":"m","done":false}"#).unwrap();
        assert!(matches!(line, StreamLine::Chunk(_)));
    }
}
