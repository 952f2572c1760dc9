// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Foreman's own configuration: a TOML file at `~/.config/foreman/config.toml`
//! with env var overrides, following the daemon's `OJ_*` env var convention.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_MAX_TASK_DURATION_MS: u64 = foreman_state::DEFAULT_MAX_TASK_DURATION_MS;
const DEFAULT_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("failed to parse {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
}

/// Foreman's process-wide configuration. Loaded once at startup and shared
/// read-only for the rest of the binary's lifetime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForemanConfig {
    /// Root directory workers are spawned under when a tool call doesn't
    /// specify one explicitly.
    pub work_dir: PathBuf,
    /// How long a task may sit assigned to a worker before
    /// `check_stuck_workers` flags it, in milliseconds.
    pub max_task_duration_ms: u64,
    /// Default per-spawn subprocess timeout, in seconds.
    pub default_timeout_secs: u64,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"info"` or
    /// `"foreman_supervisor=debug,info"`.
    pub log_level: String,
    /// Additional executable search paths per provider name, merged ahead
    /// of each provider's own built-in `known_paths()`.
    pub provider_known_paths: HashMap<String, Vec<String>>,
}

impl Default for ForemanConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            max_task_duration_ms: DEFAULT_MAX_TASK_DURATION_MS,
            default_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            provider_known_paths: HashMap::new(),
        }
    }
}

impl ForemanConfig {
    /// Load from `~/.config/foreman/config.toml` (or `$XDG_CONFIG_HOME/foreman/config.toml`),
    /// falling back to defaults when the file is absent. `FOREMAN_*` env vars
    /// override individual fields after the file is parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;
        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.clone(), e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(ConfigError::Read(path, e)),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("FOREMAN_WORK_DIR") {
            self.work_dir = PathBuf::from(dir);
        }
        if let Some(ms) = std::env::var("FOREMAN_MAX_TASK_DURATION_MS").ok().and_then(|s| s.parse().ok()) {
            self.max_task_duration_ms = ms;
        }
        if let Some(secs) = std::env::var("FOREMAN_DEFAULT_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()) {
            self.default_timeout_secs = secs;
        }
        if let Ok(level) = std::env::var("FOREMAN_LOG_LEVEL") {
            self.log_level = level;
        }
    }
}

fn config_path() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("FOREMAN_CONFIG_DIR") {
        return Ok(PathBuf::from(dir).join("config.toml"));
    }
    dirs::config_dir().map(|dir| dir.join("foreman").join("config.toml")).ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
