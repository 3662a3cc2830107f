// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt classification and model dispatch for llm-router.
//!
//! This crate provides:
//! - [`Classifier`]: keyword-based task classification (pure, zero-latency)
//! - [`RoutingTable`]: category-to-model mapping
//! - [`PromptRouter`]: classifies a prompt, picks its model, and forwards it
//!   to a [`ChatBackend`](llm_router_core::ChatBackend)

pub mod classifier;
pub mod router;
pub mod table;

pub use classifier::{classify, ClassificationResult, Classifier};
pub use router::{PromptRouter, Response, RoutedResponse, RoutingDecision};
pub use table::RoutingTable;
