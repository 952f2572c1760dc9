// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-provider MCP config file merge: `<work_dir>/<provider-dir>/mcp.json`.

use serde_json::{json, Value};
use std::path::Path;

/// Merge `new_config`'s `mcpServers` map into the existing file at
/// `<work_dir>/<provider_dir>/mcp.json`, creating it if absent. New entries
/// overwrite colliding keys; a malformed existing file is overwritten
/// rather than failing the spawn. Empty `work_dir` or empty `new_config` is
/// a no-op.
pub fn merge(work_dir: &Path, provider_dir: &str, new_config: &Value) -> std::io::Result<()> {
    if work_dir.as_os_str().is_empty() || is_empty_config(new_config) {
        return Ok(());
    }

    let dir = work_dir.join(provider_dir);
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("mcp.json");

    let mut merged = read_existing_or_empty(&path);
    let new_servers = new_config.get("mcpServers").cloned().unwrap_or_else(|| json!({}));
    if let (Some(existing_servers), Some(new_servers)) =
        (merged.get_mut("mcpServers").and_then(Value::as_object_mut), new_servers.as_object())
    {
        for (key, value) in new_servers {
            existing_servers.insert(key.clone(), value.clone());
        }
    } else {
        merged["mcpServers"] = new_servers;
    }

    std::fs::write(&path, serde_json::to_vec_pretty(&merged)?)?;
    Ok(())
}

fn is_empty_config(config: &Value) -> bool {
    match config.get("mcpServers").and_then(Value::as_object) {
        Some(servers) => servers.is_empty(),
        None => true,
    }
}

/// Read and parse the existing config file, falling back to an empty
/// `{"mcpServers": {}}` document when the file is absent or malformed.
fn read_existing_or_empty(path: &Path) -> Value {
    std::fs::read(path)
        .ok()
        .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
        .filter(|v| v.get("mcpServers").and_then(Value::as_object).is_some())
        .unwrap_or_else(|| json!({"mcpServers": {}}))
}

#[cfg(test)]
#[path = "mcp_config_tests.rs"]
mod tests;
