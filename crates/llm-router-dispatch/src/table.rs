// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category-to-model routing table.

use llm_router_config::model::RoutingConfig;
use llm_router_core::TaskCategory;

/// Fixed mapping from [`TaskCategory`] to backend model identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    summarization: String,
    coding: String,
    default: String,
}

impl RoutingTable {
    pub fn new(
        summarization: impl Into<String>,
        coding: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            summarization: summarization.into(),
            coding: coding.into(),
            default: default.into(),
        }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(
            &config.summarization_model,
            &config.coding_model,
            &config.default_model,
        )
    }

    /// Model identifier for `category`.
    pub fn model_for(&self, category: TaskCategory) -> &str {
        match category {
            TaskCategory::Summarization => &self.summarization,
            TaskCategory::Coding => &self.coding,
            TaskCategory::General => &self.default,
        }
    }
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}
