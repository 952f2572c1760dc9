// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker identifier.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// A [`WorkerId`] that is empty or contains whitespace.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("worker id must be non-empty and contain no whitespace: {0:?}")]
pub struct InvalidWorkerId(pub String);

/// Unique identifier for a worker slot in the pool.
///
/// Opaque and non-empty; must not contain whitespace (`spawn_worker`
/// generates these internally, but any tool that accepts one as an
/// argument validates it with [`WorkerId::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct WorkerId(pub String);

impl WorkerId {
    /// Create a new WorkerId from any string-like value, without validation.
    /// Used for IDs the coordinator generates itself.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse and validate a worker ID received as an RPC argument.
    pub fn parse(s: impl Into<String>) -> Result<Self, InvalidWorkerId> {
        let s = s.into();
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(InvalidWorkerId(s));
        }
        Ok(Self(s))
    }

    /// Get the string value of this WorkerId.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WorkerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WorkerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for WorkerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for WorkerId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for WorkerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
