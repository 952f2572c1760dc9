// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fabric message entry types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reserved fabric recipient meaning the coordinator process.
pub const COORDINATOR: &str = "COORDINATOR";

/// Reserved fabric recipient meaning every agent.
pub const ALL: &str = "ALL";

/// Typed category of a fabric entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Info,
    WorkerReady,
    Handoff,
}

crate::simple_display! {
    MessageType {
        Info => "info",
        WorkerReady => "worker_ready",
        Handoff => "handoff",
    }
}

/// One entry in the append-only fabric log.
///
/// `from`/`to` are plain strings rather than [`WorkerId`](crate::WorkerId)
/// because `to` may hold a worker id or one of the reserved identifiers
/// [`COORDINATOR`]/[`ALL`], neither of which is itself a valid worker id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MessageEntry {
    pub id: u64,
    pub timestamp: u64,
    pub from: String,
    pub to: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
}

impl MessageEntry {
    /// Build the literal handoff body: `"[HANDOFF]\n" + summary`.
    pub fn handoff_content(summary: &str) -> String {
        format!("[HANDOFF]\n{summary}")
    }
}

crate::builder! {
    pub struct MessageEntryBuilder => MessageEntry {
        set { id: u64 = 0 }
        set { timestamp: u64 = 0 }
        into { from: String = COORDINATOR }
        into { to: String = ALL }
        into { content: String = "test message" }
        set { kind: MessageType = MessageType::Info }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
