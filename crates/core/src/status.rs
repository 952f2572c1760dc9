// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task workflow status state machine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Workflow status of a tracked task. `Completed` is terminal: it never
/// transitions to anything else, not even itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskWorkflowStatus {
    Implementing,
    InReview,
    Approved,
    Denied,
    Committing,
    Completed,
}

crate::simple_display! {
    TaskWorkflowStatus {
        Implementing => "implementing",
        InReview => "in_review",
        Approved => "approved",
        Denied => "denied",
        Committing => "committing",
        Completed => "completed",
    }
}

/// A requested status transition is not in the transition table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid task status transition: {from} -> {to}")]
pub struct InvalidStatusTransition {
    pub from: TaskWorkflowStatus,
    pub to: TaskWorkflowStatus,
}

impl TaskWorkflowStatus {
    /// True once in `Completed` — a task in this status never moves again.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskWorkflowStatus::Completed)
    }

    /// Validate a requested transition against the table in spec §4.1.
    /// Unlike [`WorkerPhase`](crate::WorkerPhase), task status has no
    /// blanket self-loop allowance: `Completed` admits no transition at all,
    /// including to itself, and no other status is declared reentrant.
    pub fn validate_transition(self, to: TaskWorkflowStatus) -> Result<(), InvalidStatusTransition> {
        use TaskWorkflowStatus::*;
        let ok = matches!(
            (self, to),
            (Implementing, InReview)
                | (InReview, Approved)
                | (InReview, Denied)
                | (Approved, Committing)
                | (Denied, Implementing)
                | (Committing, Completed)
                | (Committing, Implementing)
        );
        if ok {
            Ok(())
        } else {
            Err(InvalidStatusTransition { from: self, to })
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
