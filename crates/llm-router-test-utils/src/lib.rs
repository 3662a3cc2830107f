// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for llm-router.
//!
//! Provides [`MockBackend`], a scripted [`ChatBackend`](llm_router_core::ChatBackend)
//! that records requests, for dispatcher and CLI tests that must not touch
//! the network.

pub mod mock_backend;

pub use mock_backend::MockBackend;
