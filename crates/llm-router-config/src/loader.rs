// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./llm-router.toml` > `~/.config/llm-router/llm-router.toml`
//! > `/etc/llm-router/llm-router.toml`, with environment variable overrides via the
//! `LLM_ROUTER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::RouterConfig;

/// File name looked up in every directory of the hierarchy.
pub const CONFIG_FILE_NAME: &str = "llm-router.toml";

const SYSTEM_CONFIG_PATH: &str = "/etc/llm-router/llm-router.toml";

/// Candidate config files in merge order (lowest precedence first).
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("llm-router").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/llm-router/llm-router.toml` (system-wide)
/// 3. `~/.config/llm-router/llm-router.toml` (user XDG config)
/// 4. `./llm-router.toml` (local directory)
/// 5. `LLM_ROUTER_*` environment variables
pub fn load_config() -> Result<RouterConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and inline configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<RouterConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RouterConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
///
/// The XDG hierarchy is skipped entirely.
pub fn load_config_from_path(path: &Path) -> Result<RouterConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RouterConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    config_file_candidates()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(RouterConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `LLM_ROUTER_ROUTING_CODING_MODEL` must map to
/// `routing.coding_model`, not `routing.coding.model`.
fn env_provider() -> Env {
    Env::prefixed("LLM_ROUTER_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: &[&str] = &["backend", "routing", "classifier", "logging"];

    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
