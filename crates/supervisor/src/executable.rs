// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executable discovery: provider known-paths (with `~`/`{name}`
//! expansion), falling back to the system PATH.

use crate::error::SupervisorError;
use std::path::{Path, PathBuf};

/// Expand `~` (home-relative) and `{name}` (the executable's own name) in
/// one known-path template.
fn expand(template: &str, name: &str) -> PathBuf {
    let substituted = template.replace("{name}", name);
    if let Some(rest) = substituted.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(substituted)
}

fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

/// Resolve `name`'s executable by checking `known_paths` in order, then the
/// system `PATH`. On failure, the error names every location checked.
pub fn discover(provider: &str, name: &str, known_paths: &[&'static str]) -> Result<PathBuf, SupervisorError> {
    let mut checked = Vec::new();

    for template in known_paths {
        let candidate = expand(template, name);
        checked.push(candidate.display().to_string());
        if is_executable_file(&candidate) {
            return Ok(candidate);
        }
    }

    if let Some(path) = which::which(name).ok() {
        return Ok(path);
    }
    checked.push(format!("$PATH/{name}"));

    Err(SupervisorError::ExecutableNotFound {
        provider: provider.to_string(),
        checked,
    })
}

#[cfg(test)]
#[path = "executable_tests.rs"]
mod tests;
