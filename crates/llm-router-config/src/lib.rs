// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for llm-router.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette diagnostic
//! rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use llm_router_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("backend: {}", config.backend.host);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::RouterConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid `RouterConfig` or every diagnostic that was found.
pub fn load_and_validate() -> Result<RouterConfig, Vec<ConfigError>> {
    let config = load_with_diagnostics(None)?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from one explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<RouterConfig, Vec<ConfigError>> {
    let config = load_with_diagnostics(Some(path))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load and deserialize configuration without semantic validation.
///
/// With `path` only that file (plus env overrides) is read; otherwise the
/// standard hierarchy is used. Parse failures are still reported as
/// diagnostics. Callers that layer further overrides on top must run
/// [`validation::validate_config`] themselves.
pub fn load_with_diagnostics(path: Option<&Path>) -> Result<RouterConfig, Vec<ConfigError>> {
    match path {
        Some(path) => {
            if !path.is_file() {
                return Err(vec![ConfigError::Other(format!(
                    "config file {} does not exist",
                    path.display()
                ))]);
            }
            loader::load_config_from_path(path).map_err(|err| {
                let sources = read_sources(std::iter::once(path));
                diagnostic::figment_to_config_errors(err, &sources)
            })
        }
        None => loader::load_config().map_err(|err| {
            let candidates = loader::config_file_candidates();
            let sources = read_sources(candidates.iter().map(|p| p.as_path()));
            diagnostic::figment_to_config_errors(err, &sources)
        }),
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<RouterConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Read existing config files for error span resolution, keyed by display path.
fn read_sources<'a>(paths: impl Iterator<Item = &'a Path>) -> Vec<(String, String)> {
    paths
        .filter_map(|path| {
            let content = std::fs::read_to_string(path).ok()?;
            let display = if path.is_relative() {
                std::env::current_dir()
                    .map(|d| d.join(path).display().to_string())
                    .unwrap_or_else(|_| path.display().to_string())
            } else {
                path.display().to_string()
            };
            Some((display, content))
        })
        .collect()
}
