// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `foreman`: wires the coordinator tool surface to an MCP server over
//! stdio. A coordinator LLM session (or a human driving one directly)
//! connects to this process's stdin/stdout as its MCP server.

mod config;
mod exit_error;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use config::ForemanConfig;
use exit_error::ExitError;
use foreman_core::SystemClock;
use foreman_fabric::Fabric;
use foreman_prompts::PromptRegistry;
use foreman_rpc::CoordinatorTools;
use foreman_state::{CoordinatorState, WorkerPool};
use foreman_supervisor::ProviderRegistry;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

/// Coordinate a pool of headless AI-coding-assistant workers over MCP.
#[derive(Debug, Parser)]
#[command(name = "foreman", version)]
struct Cli {
    /// Override the config file's work_dir (root directory new workers spawn under).
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Override the config file's log_level (a tracing-subscriber EnvFilter directive).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    if let Err(exit) = try_main() {
        eprintln!("foreman: {exit}");
        std::process::exit(exit.code);
    }
}

fn try_main() -> Result<(), ExitError> {
    let cli = Cli::parse();
    let mut config = ForemanConfig::load().map_err(|e| ExitError::new(2, e.to_string()))?;
    if let Some(work_dir) = cli.work_dir {
        config.work_dir = work_dir;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ExitError::new(1, format!("failed to start tokio runtime: {e}")))?;

    runtime.block_on(run(config)).map_err(|e| ExitError::new(1, e.to_string()))
}

async fn run(config: ForemanConfig) -> anyhow::Result<()> {
    let state = Arc::new(CoordinatorState::new());
    let pool = Arc::new(WorkerPool::new());
    let fabric = Arc::new(Fabric::new(SystemClock));
    let providers = Arc::new(ProviderRegistry::default());
    let prompts = Arc::new(PromptRegistry::new());

    let coordinator =
        CoordinatorTools::new(state, pool, fabric, providers, prompts, config.work_dir.clone(), config.max_task_duration_ms);

    tracing::info!(work_dir = %config.work_dir.display(), max_task_duration_ms = config.max_task_duration_ms, "foreman coordinator starting");

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    coordinator.serve(transport).await?.waiting().await?;
    Ok(())
}
