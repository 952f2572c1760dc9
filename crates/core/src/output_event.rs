// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The unified subprocess event schema every provider adapter normalizes into.
//!
//! This module only owns the shape of `OutputEvent` and its nested payloads.
//! Parsing provider-specific JSON into this shape is a per-provider concern
//! that lives in the supervisor crate.

use serde::{Deserialize, Serialize};

/// A single content block inside a message's `content` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        #[serde(default)]
        output: String,
    },
}

/// Token accounting for one assistant turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cache_read_tokens: u64,
    #[serde(default)]
    pub cache_creation_tokens: u64,
}

impl Usage {
    /// Sum of input, cache-read, and cache-creation tokens, per the
    /// accounting rule for assistant events: output tokens are excluded
    /// since they count against the *next* turn's context, not this one.
    pub fn context_tokens(&self) -> u64 {
        self.input_tokens + self.cache_read_tokens + self.cache_creation_tokens
    }
}

/// The `message` payload nested in `assistant`/`tool_use`/`tool_result` events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

/// The `tool` payload synthesized for unified `tool_use`/`tool_result` events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Normalized reason attached to an [`EventError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    ContextExceeded,
}

/// The normalized shape of a provider's polymorphic error field (it may
/// arrive as a bare string or as a nested object; the adapter collapses
/// both into this struct before producing an `OutputEvent`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ErrorReason>,
}

/// Starter set of substrings that, found in an error message, indicate the
/// provider's context window was exceeded. Per-provider adapters may extend
/// this with their own patterns — this is deliberately not exhaustive.
pub const CONTEXT_EXCEEDED_PATTERNS: &[&str] =
    &["Prompt is too long", "Context window exceeded"];

/// The explicit error code providers use for context-exhaustion, independent
/// of message text.
pub const CONTEXT_EXCEEDED_CODE: &str = "invalid_request";

/// Decide whether an error message/code pair indicates context exhaustion,
/// combining substring matches against `patterns` with the explicit code
/// check. Callers pass their provider's own pattern list (which may start
/// from [`CONTEXT_EXCEEDED_PATTERNS`] and add provider-specific entries).
pub fn is_context_exhausted(message: &str, code: Option<&str>, patterns: &[&str]) -> bool {
    if code == Some(CONTEXT_EXCEEDED_CODE) {
        return true;
    }
    patterns.iter().any(|pattern| message.contains(pattern))
}

/// The unified event every provider adapter normalizes its line-delimited
/// JSON stream into. At minimum, `event_type` takes one of `system`,
/// `assistant`, `tool_use`, `tool_result`, `result`, `error`; unrecognized
/// provider types pass through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<MessagePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<ToolPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_usage: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error_result: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<EventError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Exact input bytes this event was parsed from. Never serialized onto
    /// the wire — it exists for the parser round-trip guarantee, not for
    /// consumers of the unified schema.
    #[serde(skip)]
    pub raw: Vec<u8>,
}

impl OutputEvent {
    /// An event with `event_type` and `raw` set, everything else default.
    /// Providers build up from this rather than constructing the struct
    /// literal directly, so new optional fields don't break every adapter.
    pub fn new(event_type: impl Into<String>, raw: Vec<u8>) -> Self {
        Self {
            event_type: event_type.into(),
            raw,
            ..Default::default()
        }
    }
}

#[cfg(test)]
#[path = "output_event_tests.rs"]
mod tests;
