// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker pool record types.

use crate::phase::WorkerPhase;
use crate::task::TaskId;
use crate::worker::WorkerId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pool-level status of a worker, distinct from its [`WorkerPhase`].
/// `Retired` is terminal within a session: a retired worker never becomes
/// `Ready` or `Working` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Ready,
    Working,
    Retired,
}

crate::simple_display! {
    WorkerStatus {
        Ready => "ready",
        Working => "working",
        Retired => "retired",
    }
}

/// A requested worker status transition is not allowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid worker status transition: {from} -> {to}")]
pub struct InvalidStatusTransition {
    pub from: WorkerStatus,
    pub to: WorkerStatus,
}

impl WorkerStatus {
    /// `ready -> working` (on assign), `working -> ready` (on complete),
    /// any status `-> retired` (one-way). All other transitions, including
    /// any attempt to leave `retired`, are rejected.
    pub fn validate_transition(self, to: WorkerStatus) -> Result<(), InvalidStatusTransition> {
        use WorkerStatus::*;
        let ok = matches!(
            (self, to),
            (Ready, Working) | (Working, Ready) | (Ready, Retired) | (Working, Retired)
        );
        if ok {
            Ok(())
        } else {
            Err(InvalidStatusTransition { from: self, to })
        }
    }
}

/// A worker pool record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub status: WorkerStatus,
    pub phase: WorkerPhase,
    pub current_task_id: Option<TaskId>,
}

impl Worker {
    /// A freshly spawned worker: ready, idle, no assignment.
    pub fn new(id: WorkerId) -> Self {
        Self {
            id,
            status: WorkerStatus::Ready,
            phase: WorkerPhase::Idle,
            current_task_id: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != WorkerStatus::Retired
    }
}

crate::builder! {
    pub struct WorkerBuilder => Worker {
        into { id: WorkerId = "worker-1" }
        set { status: WorkerStatus = WorkerStatus::Ready }
        set { phase: WorkerPhase = WorkerPhase::Idle }
        option { current_task_id: TaskId = None }
    }
}

#[cfg(test)]
#[path = "pool_types_tests.rs"]
mod tests;
