// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker phase state machine.

use crate::role::WorkerRole;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle phase of a worker. Initial state for every worker is `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkerPhase {
    Idle,
    Implementing,
    AwaitingReview,
    Reviewing,
    AddressingFeedback,
    Committing,
}

crate::simple_display! {
    WorkerPhase {
        Idle => "idle",
        Implementing => "implementing",
        AwaitingReview => "awaiting_review",
        Reviewing => "reviewing",
        AddressingFeedback => "addressing_feedback",
        Committing => "committing",
    }
}

/// A requested phase transition is not in the transition table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid worker phase transition: {from} -> {to}")]
pub struct InvalidPhaseTransition {
    pub from: WorkerPhase,
    pub to: WorkerPhase,
}

impl WorkerPhase {
    /// Validate a requested transition against the table in spec §4.1.
    /// Self-loops (retry/noop) are allowed from every state.
    pub fn validate_transition(self, to: WorkerPhase) -> Result<(), InvalidPhaseTransition> {
        use WorkerPhase::*;
        if self == to {
            return Ok(());
        }
        let ok = matches!(
            (self, to),
            (Idle, Implementing)
                | (Idle, Reviewing)
                | (Implementing, AwaitingReview)
                | (Implementing, Idle)
                | (AwaitingReview, Reviewing)
                | (AwaitingReview, AddressingFeedback)
                | (AwaitingReview, Committing)
                | (AwaitingReview, Idle)
                | (Reviewing, Idle)
                | (AddressingFeedback, AwaitingReview)
                | (AddressingFeedback, Idle)
                | (Committing, Idle)
                | (Committing, AddressingFeedback)
        );
        if ok {
            Ok(())
        } else {
            Err(InvalidPhaseTransition { from: self, to })
        }
    }

    /// The role required while in this phase, or `None` if the phase
    /// requires no role (only `Idle`).
    pub fn allowed_role(self) -> Option<WorkerRole> {
        match self {
            WorkerPhase::Idle => None,
            WorkerPhase::Reviewing => Some(WorkerRole::Reviewer),
            WorkerPhase::Implementing
            | WorkerPhase::AwaitingReview
            | WorkerPhase::AddressingFeedback
            | WorkerPhase::Committing => Some(WorkerRole::Implementer),
        }
    }

    /// True if `role` is consistent with this phase per the table in spec §4.1.
    pub fn is_consistent_with(self, role: Option<WorkerRole>) -> bool {
        self.allowed_role() == role
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
