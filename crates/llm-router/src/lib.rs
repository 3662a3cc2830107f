// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route prompts to task-specific models on a local Ollama server.
//!
//! Prompts are classified by keyword into summarization, coding, or general
//! tasks, and each category is served by its own model.
//!
//! ```no_run
//! # async fn demo() -> Result<(), llm_router::RouterError> {
//! use llm_router::Response;
//!
//! let router = llm_router::router_for_host("http://localhost:11434")?;
//! let routed = router.route("Summarize the following text: ...", false).await?;
//! if let Response::Complete(resp) = routed.response {
//!     println!("{} answered: {}", routed.decision.model, resp.content());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;

use std::sync::Arc;

pub use llm_router_config::model::RouterConfig;
pub use llm_router_core::{
    ChatBackend, ChatChunk, ChatRequest, ChatResponse, ChunkStream, RouterError, TaskCategory,
};
pub use llm_router_dispatch::{
    classify, ClassificationResult, Classifier, PromptRouter, Response, RoutedResponse,
    RoutingDecision, RoutingTable,
};
pub use llm_router_ollama::OllamaBackend;

/// Builds a router with the default models against the Ollama server at `host`.
pub fn router_for_host(host: &str) -> Result<PromptRouter, RouterError> {
    let mut config = RouterConfig::default();
    config.backend.host = host.to_string();
    router_from_config(&config)
}

/// Builds a router from a full configuration.
///
/// The configuration is validated first; every problem found is reported in
/// one [`RouterError::Config`].
pub fn router_from_config(config: &RouterConfig) -> Result<PromptRouter, RouterError> {
    llm_router_config::validation::validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        RouterError::Config(messages.join("; "))
    })?;
    let backend = OllamaBackend::from_config(&config.backend)?;
    Ok(PromptRouter::from_config(config, Arc::new(backend)))
}
