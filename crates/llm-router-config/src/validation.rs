// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as host URL shape, non-empty model identifiers, and positive limits.

use crate::diagnostic::ConfigError;
use crate::model::RouterConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    validate_host(&config.backend.host, &mut errors);

    if config.backend.timeout_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "backend.timeout_secs must be greater than 0".to_string(),
        });
    }

    let models = [
        ("routing.summarization_model", Some(&config.routing.summarization_model)),
        ("routing.coding_model", Some(&config.routing.coding_model)),
        ("routing.default_model", Some(&config.routing.default_model)),
        ("routing.force_model", config.routing.force_model.as_ref()),
    ];
    for (key, value) in models {
        if let Some(model) = value {
            if model.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("{key} must not be empty"),
                });
            }
        }
    }

    if config.classifier.instruction_window == Some(0) {
        errors.push(ConfigError::Validation {
            message: "classifier.instruction_window must be greater than 0".to_string(),
        });
    }

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_host(host: &str, errors: &mut Vec<ConfigError>) {
    let host = host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "backend.host must not be empty".to_string(),
        });
        return;
    }

    // A bare `host:port` is accepted; anything with a scheme must be http(s).
    if let Some((scheme, rest)) = host.split_once("://") {
        if scheme != "http" && scheme != "https" {
            errors.push(ConfigError::Validation {
                message: format!("backend.host `{host}` must use http or https, got `{scheme}`"),
            });
        } else if rest.trim_matches('/').is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("backend.host `{host}` has no address after the scheme"),
            });
        }
    }

    if host.chars().any(char::is_whitespace) {
        errors.push(ConfigError::Validation {
            message: format!("backend.host `{host}` must not contain whitespace"),
        });
    }
}
