// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based task classification.
//!
//! Classifies prompts into Summarization/Coding/General using two fixed
//! keyword sets. No model call, no network, no state: the same text always
//! yields the same category.

use llm_router_config::model::ClassifierConfig;
use llm_router_core::TaskCategory;

/// Summarization intent keywords.
pub const SUMMARIZATION_KEYWORDS: &[&str] = &[
    "summarize", "summary", "summarise", "tldr", "brief", "overview",
    "recap", "digest", "abstract", "synopsis", "condense", "shorten",
    "key points", "main points",
];

/// Coding intent keywords.
pub const CODING_KEYWORDS: &[&str] = &[
    "code", "program", "function", "script", "implement", "write",
    "create", "develop", "build", "algorithm", "python", "javascript",
    "java", "cpp", "rust", "go", "class", "method", "api", "debug",
    "fix", "refactor",
];

/// Keywords this short must match a whole word (`api` must not hit `capital`).
const WHOLE_WORD_MAX_LEN: usize = 3;

/// Result of classifying a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub category: TaskCategory,
    /// Summarization keywords found, in keyword-set order.
    pub summarization_hits: Vec<&'static str>,
    /// Coding keywords found, in keyword-set order.
    pub coding_hits: Vec<&'static str>,
    /// Human-readable reason for the classification.
    pub reason: &'static str,
}

/// Stateless keyword classifier.
///
/// Precedence is fixed: a prompt with any summarization keyword is
/// Summarization, even when coding keywords also match. Coding comes next,
/// and everything else is General.
///
/// Match counts are not weighed. A single summarization word outranks any
/// number of coding words, so "Write a brief Python script" and "Write an
/// abstract class in Java" both go to the summarization model. Pin a model
/// with `force_model` when such prompts are common.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    instruction_window: Option<usize>,
}

impl Classifier {
    /// Create a classifier that inspects the whole prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier from configuration.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self {
            instruction_window: config.instruction_window,
        }
    }

    /// Only inspect the first `chars` characters of each prompt.
    pub fn with_instruction_window(chars: usize) -> Self {
        Self {
            instruction_window: Some(chars),
        }
    }

    /// Classify a prompt.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let window: String = match self.instruction_window {
            Some(limit) => text.chars().take(limit).collect(),
            None => text.to_owned(),
        };
        let lower = window.to_lowercase();

        let summarization_hits = matching_keywords(&lower, SUMMARIZATION_KEYWORDS);
        let coding_hits = matching_keywords(&lower, CODING_KEYWORDS);

        let (category, reason) = match (summarization_hits.is_empty(), coding_hits.is_empty()) {
            (false, true) => (TaskCategory::Summarization, "summarization keywords"),
            (false, false) => (
                TaskCategory::Summarization,
                "summarization keywords take precedence over coding keywords",
            ),
            (true, false) => (TaskCategory::Coding, "coding keywords"),
            (true, true) => (TaskCategory::General, "no task keywords"),
        };

        ClassificationResult {
            category,
            summarization_hits,
            coding_hits,
            reason,
        }
    }
}

/// Classify `text` with default settings.
pub fn classify(text: &str) -> TaskCategory {
    Classifier::new().classify(text).category
}

fn matching_keywords(lower: &str, keywords: &[&'static str]) -> Vec<&'static str> {
    keywords
        .iter()
        .copied()
        .filter(|kw| contains_keyword(lower, kw))
        .collect()
}

/// True if `keyword` occurs in `text` starting at a word boundary.
///
/// Short keywords must also end at a word boundary.
fn contains_keyword(text: &str, keyword: &str) -> bool {
    let whole_word = keyword.len() <= WHOLE_WORD_MAX_LEN;
    text.match_indices(keyword).any(|(start, _)| {
        let end = start + keyword.len();
        let starts_word = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let ends_word = text[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        starts_word && (!whole_word || ends_word)
    })
}
