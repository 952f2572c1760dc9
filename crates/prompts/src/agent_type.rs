// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent-type validation and parsing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shell metacharacters rejected outright in an agent-type string.
const FORBIDDEN_CHARS: &[char] = &[
    ';', '|', '&', '$', '`', '\\', '"', '\'', '<', '>', '(', ')', '{', '}', '[', ']', '!', '#',
    '*', '?', '~',
];

/// An agent-type string contains a shell metacharacter, `..`, or `/`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid agent type: {0:?} (contains a shell metacharacter, `..`, or `/`)")]
pub struct InvalidAgentType(pub String);

/// The four prompt roles a spawned worker can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    Generic,
    Implementer,
    Reviewer,
    Researcher,
}

foreman_core::simple_display! {
    AgentType {
        Generic => "generic",
        Implementer => "implementer",
        Reviewer => "reviewer",
        Researcher => "researcher",
    }
}

impl AgentType {
    /// Validate `s` against the forbidden-character/`..`/`/` rule, then map
    /// it to a known type. Unknown but otherwise-safe strings fall back to
    /// `generic` rather than erroring — only the unsafe-character check can
    /// fail this.
    pub fn parse(s: &str) -> Result<Self, InvalidAgentType> {
        if s.contains("..") || s.contains('/') || s.chars().any(|c| FORBIDDEN_CHARS.contains(&c)) {
            return Err(InvalidAgentType(s.to_string()));
        }
        Ok(match s {
            "implementer" => AgentType::Implementer,
            "reviewer" => AgentType::Reviewer,
            "researcher" => AgentType::Researcher,
            _ => AgentType::Generic,
        })
    }
}

#[cfg(test)]
#[path = "agent_type_tests.rs"]
mod tests;
