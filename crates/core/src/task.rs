// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task identifier.
//!
//! `TaskId` is used both as an internal key and as a command-line argument
//! to the external tracker, so its validation is a security boundary: no
//! shell metacharacters, no path separators, no leading dashes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// A string that does not match the task ID grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid task id: {0:?} (expected `prefix-suffix` or `prefix-suffix.N`)")]
pub struct InvalidTaskId(pub String);

/// Unique identifier for an externally-tracked task.
///
/// Matches `^[A-Za-z]{2,}-[A-Za-z0-9]{2,10}(\.[0-9]+)?$`: an alphabetic
/// prefix of at least 2 characters, a dash, 2-10 alphanumeric characters,
/// and an optional `.digits` subtask suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Parse and validate a task ID. This is the only way to construct a
    /// `TaskId` — there is no infallible `From<&str>`, unlike [`WorkerId`](crate::WorkerId),
    /// because malformed task IDs are passed as argv to an external process.
    pub fn parse(s: impl Into<String>) -> Result<Self, InvalidTaskId> {
        let s = s.into();
        if is_valid_task_id(&s) {
            Ok(Self(s))
        } else {
            Err(InvalidTaskId(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validate a string against the task ID grammar without allocating a [`TaskId`].
pub fn is_valid_task_id(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return false;
    }

    // Split at the LAST '.' only if the remainder after it is all digits
    // and non-empty; otherwise treat the whole string as having no subtask.
    let (base, subtask) = match s.rfind('.') {
        Some(idx) => {
            let (base, rest) = s.split_at(idx);
            let digits = &rest[1..];
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                (base, Some(digits))
            } else {
                (s, None)
            }
        }
        None => (s, None),
    };

    // base must be "prefix-suffix" with no other '.' in it.
    if base.contains('.') {
        return false;
    }
    let Some(dash_idx) = base.find('-') else {
        return false;
    };
    let prefix = &base[..dash_idx];
    let suffix = &base[dash_idx + 1..];

    if prefix.len() < 2 || !prefix.bytes().all(|b| b.is_ascii_alphabetic()) {
        return false;
    }
    if suffix.len() < 2 || suffix.len() > 10 || !suffix.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return false;
    }

    let _ = subtask;
    true
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TaskId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TaskId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
