// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised by the process supervisor, provider registry, and parsers.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SupervisorError {
    /// None of the provider's known paths nor the system PATH had the
    /// executable. Carries every location checked, per the spec's
    /// requirement that the error name every path.
    #[error("executable not found for provider {provider}; checked: {}", .checked.join(", "))]
    ExecutableNotFound {
        provider: String,
        checked: Vec<String>,
    },

    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("spawn failed: {0}")]
    SpawnFailed(String),

    #[error("subprocess exited non-zero when success was expected: {0}")]
    SubprocessFatal(String),

    #[error("malformed event line: {0}")]
    Transport(String),
}

/// A non-sentinel parse failure: invalid JSON, or a shape the adapter
/// cannot interpret at all. Distinct from the `SkipEvent` sentinel, which
/// is not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("parse error: {0}")]
pub struct ParseError(pub String);
