// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! llm-router - route prompts to task-specific local models.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::Parser;
use colored::Colorize;
use llm_router::cli::{self, Cli};

/// Exit status for runtime failures (input, backend, output).
const EXIT_FAILURE: i32 = 1;
/// Exit status for invalid configuration.
const EXIT_CONFIG: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli::load_config(&cli) {
        Ok(config) => config,
        Err(errors) => {
            llm_router_config::render_errors(&errors);
            std::process::exit(EXIT_CONFIG);
        }
    };

    init_tracing(&config.logging.level);

    if let Err(e) = cli::execute(&cli, &config).await {
        let label = if cli::stderr_color() {
            "error".red().to_string()
        } else {
            "error".to_string()
        };
        eprintln!("{label}: {e}");
        std::process::exit(EXIT_FAILURE);
    }
}

/// Initialize the tracing subscriber with the configured log level.
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so stdout only
/// carries model output.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("llm_router={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
