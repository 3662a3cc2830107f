// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for llm-router.
//!
//! This crate provides the error taxonomy, the backend-agnostic chat types,
//! and the [`ChatBackend`] trait that inference backends implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RouterError;
pub use traits::ChatBackend;
pub use types::{
    ChatChunk, ChatMessage, ChatRequest, ChatResponse, ChunkStream, Role, TaskCategory,
    TokenUsage,
};
