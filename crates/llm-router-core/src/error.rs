// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every llm-router crate.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type returned by routing, backend calls, and input handling.
///
/// Each failure mode the caller may want to react to differently has its own
/// variant: a missing prompt is not a dead backend, and a dead backend is not
/// a backend that answered with garbage.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No prompt was provided (neither positional text nor file content).
    #[error("no prompt provided: {0}")]
    Input(String),

    /// The named prompt file does not exist or cannot be read.
    #[error("cannot read prompt file {}: {source}", path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backend host is unreachable, refused the connection, or dropped it.
    #[error("cannot reach backend: {message}")]
    Connection {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with an error status, or sent an error object mid-stream.
    #[error("{}", format_backend_error(*status, message))]
    Backend { status: Option<u16>, message: String },

    /// The backend payload could not be parsed as the expected message structure.
    #[error("malformed backend response: {message}")]
    MalformedResponse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The configured request timeout elapsed.
    #[error("backend request timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Client construction failed (bad host URL, TLS setup).
    #[error("configuration error: {0}")]
    Config(String),
}

fn format_backend_error(status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("backend returned {code}: {message}"),
        None => format!("backend error: {message}"),
    }
}

impl RouterError {
    /// Returns true when the failure happened before any byte reached the backend.
    pub fn is_connection(&self) -> bool {
        matches!(self, RouterError::Connection { .. })
    }

    /// Returns true for errors reported by the backend itself, including bad payloads.
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            RouterError::Backend { .. } | RouterError::MalformedResponse { .. }
        )
    }
}
