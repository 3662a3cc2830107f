// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the dispatcher and inference backends.

pub mod backend;

pub use backend::ChatBackend;
