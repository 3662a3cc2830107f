// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt dispatch: classify, pick a model, forward to the backend.
//!
//! Priority order: global force_model config > keyword classification.

use std::sync::Arc;

use llm_router_config::model::RouterConfig;
use llm_router_core::{
    ChatBackend, ChatRequest, ChatResponse, ChunkStream, RouterError, TaskCategory,
};
use tracing::info;

use crate::classifier::Classifier;
use crate::table::RoutingTable;

/// Which model a prompt goes to, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    pub category: TaskCategory,
    pub model: String,
    /// Whether `force_model` bypassed the routing table.
    pub forced: bool,
    pub reason: String,
}

/// Backend output for one routed prompt.
pub enum Response {
    /// The full aggregated answer (`stream == false`).
    Complete(ChatResponse),
    /// Incremental chunks (`stream == true`).
    ///
    /// The stream can be consumed once. Replaying the answer requires a new
    /// [`PromptRouter::route`] call, which sends a new request to the backend.
    /// Dropping the stream early closes the connection.
    Stream(ChunkStream),
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Complete(resp) => f.debug_tuple("Complete").field(resp).finish(),
            Response::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A routing decision together with the backend's response.
#[derive(Debug)]
pub struct RoutedResponse {
    pub decision: RoutingDecision,
    pub response: Response,
}

/// Routes prompts to category-specific models on a chat backend.
///
/// Holds no per-call state; every [`route`](Self::route) call is independent.
pub struct PromptRouter {
    classifier: Classifier,
    table: RoutingTable,
    force_model: Option<String>,
    backend: Arc<dyn ChatBackend>,
}

impl PromptRouter {
    /// Create a router with an explicit table and classifier.
    pub fn new(table: RoutingTable, classifier: Classifier, backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            classifier,
            table,
            force_model: None,
            backend,
        }
    }

    /// Create a router from the `[routing]` and `[classifier]` config sections.
    pub fn from_config(config: &RouterConfig, backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            classifier: Classifier::from_config(&config.classifier),
            table: RoutingTable::from_config(&config.routing),
            force_model: config.routing.force_model.clone(),
            backend,
        }
    }

    /// Send every prompt to `model` regardless of its category.
    pub fn with_force_model(mut self, model: impl Into<String>) -> Self {
        self.force_model = Some(model.into());
        self
    }

    /// Name of the backend prompts are forwarded to.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Decide which model `text` goes to without contacting the backend.
    pub fn decide(&self, text: &str) -> RoutingDecision {
        let classification = self.classifier.classify(text);

        if let Some(ref forced) = self.force_model {
            return RoutingDecision {
                category: classification.category,
                model: forced.clone(),
                forced: true,
                reason: "global force_model config".to_string(),
            };
        }

        RoutingDecision {
            category: classification.category,
            model: self.table.model_for(classification.category).to_string(),
            forced: false,
            reason: classification.reason.to_string(),
        }
    }

    /// Classify `text`, select its model, and send it as a single-turn chat.
    ///
    /// With `stream` set the returned [`Response::Stream`] yields chunks
    /// lazily; otherwise the call waits for the complete answer. Connection
    /// failures are returned here, before any chunk is produced. No retries.
    pub async fn route(&self, text: &str, stream: bool) -> Result<RoutedResponse, RouterError> {
        let decision = self.decide(text);
        info!(
            category = %decision.category,
            model = decision.model.as_str(),
            forced = decision.forced,
            stream,
            reason = decision.reason.as_str(),
            "routing prompt"
        );

        let request = ChatRequest::single_turn(&decision.model, text, stream);
        let response = if stream {
            Response::Stream(self.backend.stream(request).await?)
        } else {
            Response::Complete(self.backend.complete(request).await?)
        };

        Ok(RoutedResponse { decision, response })
    }
}
