// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-spawn configuration contract every provider adapter consumes.

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Everything a provider needs to build argv and spawn its child process.
#[derive(Debug, Clone)]
pub struct SpawnConfig {
    pub work_dir: PathBuf,
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub model: Option<String>,
    /// Present when resuming a prior conversation.
    pub session_id: Option<String>,
    pub timeout: Option<Duration>,
    pub skip_permissions: bool,
    /// Merged into the provider's per-workdir MCP config file before spawn,
    /// if non-empty.
    pub mcp_config: Option<Value>,
    pub extra_env: HashMap<String, String>,
}

impl SpawnConfig {
    pub fn new(work_dir: impl Into<PathBuf>, prompt: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            prompt: prompt.into(),
            system_prompt: None,
            model: None,
            session_id: None,
            timeout: None,
            skip_permissions: false,
            mcp_config: None,
            extra_env: HashMap::new(),
        }
    }

    foreman_core::setters! {
        option { system_prompt: String, model: String, session_id: String }
        set { timeout: Option<Duration>, skip_permissions: bool }
    }

    pub fn with_mcp_config(mut self, config: Value) -> Self {
        self.mcp_config = Some(config);
        self
    }
}

#[cfg(test)]
#[path = "spawn_config_tests.rs"]
mod tests;
