// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line front end.
//!
//! Reads a prompt from the positional argument, a file, or stdin, routes it,
//! and prints the answer to stdout as it arrives. The routing notice and
//! errors go to stderr so stdout carries only model output.

use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use futures::StreamExt;
use llm_router_config::model::RouterConfig;
use llm_router_config::ConfigError;
use llm_router_core::RouterError;
use llm_router_dispatch::{PromptRouter, Response, RoutingDecision};
use tracing::{debug, warn};

/// Route a prompt to a task-specific model on a local Ollama server.
#[derive(Parser, Debug)]
#[command(name = "llm-router", version, about, long_about = None)]
pub struct Cli {
    /// Prompt text. Ignored when --file is given.
    pub prompt: Option<String>,

    /// Read the prompt from a file (`-` reads stdin).
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Ollama host, e.g. http://localhost:11434.
    #[arg(long, value_name = "URL")]
    pub host: Option<String>,

    /// Wait for the full answer instead of streaming it.
    #[arg(long)]
    pub no_stream: bool,

    /// Load configuration from this file instead of the standard locations.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Send the prompt to this model regardless of its category.
    #[arg(short, long, value_name = "ID")]
    pub model: Option<String>,

    /// Connect and per-read timeout in seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Do not print the routing notice.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Applies command-line flags on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut RouterConfig) {
        if let Some(ref host) = self.host {
            config.backend.host = host.clone();
        }
        if self.no_stream {
            config.backend.stream = false;
        }
        if let Some(secs) = self.timeout {
            config.backend.timeout_secs = Some(secs);
        }
        if let Some(ref model) = self.model {
            config.routing.force_model = Some(model.clone());
        }
    }
}

/// Errors surfaced by a CLI invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Router(#[from] RouterError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Loads configuration for `cli`, applies its flags, and validates the result.
///
/// Validation runs once, after the flags, so a flag can replace a bad file value.
pub fn load_config(cli: &Cli) -> Result<RouterConfig, Vec<ConfigError>> {
    let mut config = llm_router_config::load_with_diagnostics(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    llm_router_config::validation::validate_config(&config)?;
    Ok(config)
}

/// Determines the prompt text.
///
/// A file wins over the positional prompt; `-` reads `stdin`. Blank input is
/// rejected.
pub fn resolve_prompt(
    prompt: Option<&str>,
    file: Option<&Path>,
    stdin: impl Read,
) -> Result<String, RouterError> {
    let text = match file {
        Some(path) => {
            if prompt.is_some() {
                warn!(file = %path.display(), "both a prompt and --file given; using the file");
            }
            read_prompt_file(path, stdin)?
        }
        None => prompt.map(str::to_owned).ok_or_else(|| {
            RouterError::Input("pass a prompt argument or --file".to_string())
        })?,
    };

    if text.trim().is_empty() {
        return Err(RouterError::Input("prompt is empty".to_string()));
    }
    Ok(text)
}

fn read_prompt_file(path: &Path, mut stdin: impl Read) -> Result<String, RouterError> {
    let file_err = |source| RouterError::File {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new("-") {
        let mut text = String::new();
        stdin.read_to_string(&mut text).map_err(file_err)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(file_err)
    }
}

/// The one-line notice naming the selected model, styled only when `color`.
pub fn routing_notice(decision: &RoutingDecision, color: bool) -> String {
    let detail = if decision.forced {
        format!("{} task, forced", decision.category)
    } else {
        format!("{} task", decision.category)
    };
    if color {
        format!("routing to {} ({detail})", decision.model.bold())
            .dimmed()
            .to_string()
    } else {
        format!("routing to {} ({detail})", decision.model)
    }
}

/// Whether stderr, where notices and errors go, should carry ANSI styling.
pub fn stderr_color() -> bool {
    std::io::stderr().is_terminal()
}

/// Per-invocation output settings.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub stream: bool,
    pub quiet: bool,
    /// Style the routing notice.
    pub color: bool,
}

/// Routes `prompt` and writes the answer to `out`.
///
/// Streamed chunks are flushed as they arrive. Text already written stays
/// written when the stream fails part-way.
pub async fn run(
    router: &PromptRouter,
    prompt: &str,
    options: RunOptions,
    out: &mut impl Write,
    notice: &mut impl Write,
) -> Result<(), CliError> {
    if !options.quiet {
        writeln!(notice, "{}", routing_notice(&router.decide(prompt), options.color))?;
    }

    let routed = router.route(prompt, options.stream).await?;
    match routed.response {
        Response::Complete(resp) => {
            debug!(usage = ?resp.usage, done_reason = ?resp.done_reason, "response complete");
            writeln!(out, "{}", resp.content())?;
        }
        Response::Stream(mut stream) => {
            while let Some(chunk) = stream.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        writeln!(out)?;
                        out.flush()?;
                        return Err(e.into());
                    }
                };
                write!(out, "{}", chunk.content)?;
                out.flush()?;
                if chunk.done {
                    debug!(usage = ?chunk.usage, done_reason = ?chunk.done_reason, "stream complete");
                }
            }
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Runs one CLI invocation against an already loaded configuration.
pub async fn execute(cli: &Cli, config: &RouterConfig) -> Result<(), CliError> {
    let prompt = resolve_prompt(cli.prompt.as_deref(), cli.file.as_deref(), std::io::stdin())?;
    let router = crate::router_from_config(config)?;
    let options = RunOptions {
        stream: config.backend.stream,
        quiet: cli.quiet,
        color: stderr_color(),
    };
    run(
        &router,
        &prompt,
        options,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await
}
