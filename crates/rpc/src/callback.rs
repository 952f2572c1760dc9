// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker-side state mutation via a callback handle rather than a direct
//! reference to coordinator state — the daemon's `ListenCtx` pattern of
//! threading a shared `Arc` handle through handlers without holding its
//! lock across an await.

use crate::error::ForemanError;
use foreman_core::{TaskWorkflowStatus, WorkerPhase, WorkerId};
use foreman_state::{CoordinatorState, WorkerPool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Verdict a reviewer reports via `report_review_verdict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewVerdict {
    Approved,
    Denied,
}

/// The exactly-three-method interface worker tools use to ask about their
/// own phase and push phase transitions back into the coordinator.
pub trait WorkerStateCallback: Send + Sync {
    fn get_worker_phase(&self, worker_id: &WorkerId) -> Result<WorkerPhase, ForemanError>;
    fn on_implementation_complete(&self, worker_id: &WorkerId, summary: &str) -> Result<WorkerPhase, ForemanError>;
    fn on_review_verdict(
        &self,
        worker_id: &WorkerId,
        verdict: ReviewVerdict,
        comments: &str,
    ) -> Result<WorkerPhase, ForemanError>;
}

/// The coordinator's own implementation: acquires the coordinator lock,
/// applies the transition, and for a review verdict updates the reviewed
/// task's status.
pub struct CoordinatorCallback {
    state: Arc<CoordinatorState>,
    pool: Arc<WorkerPool>,
}

impl CoordinatorCallback {
    pub fn new(state: Arc<CoordinatorState>, pool: Arc<WorkerPool>) -> Self {
        Self { state, pool }
    }
}

impl WorkerStateCallback for CoordinatorCallback {
    fn get_worker_phase(&self, worker_id: &WorkerId) -> Result<WorkerPhase, ForemanError> {
        Ok(self
            .state
            .worker_assignment(worker_id)
            .map(|a| a.phase)
            .unwrap_or(WorkerPhase::Idle))
    }

    fn on_implementation_complete(&self, worker_id: &WorkerId, _summary: &str) -> Result<WorkerPhase, ForemanError> {
        let mut assignment = self
            .state
            .worker_assignment(worker_id)
            .ok_or_else(|| ForemanError::InvalidTransition(format!("worker {worker_id} has no active assignment")))?;

        if !matches!(assignment.phase, WorkerPhase::Implementing | WorkerPhase::AddressingFeedback) {
            return Err(ForemanError::InvalidTransition(format!(
                "worker {worker_id} cannot report implementation complete from phase {}",
                assignment.phase
            )));
        }

        assignment.phase.validate_transition(WorkerPhase::AwaitingReview)?;
        assignment.phase = WorkerPhase::AwaitingReview;
        self.state.set_worker_assignment(worker_id.clone(), assignment.clone());
        self.pool
            .set_worker_phase(worker_id, WorkerPhase::AwaitingReview, Some(assignment.task_id))?;
        Ok(WorkerPhase::AwaitingReview)
    }

    fn on_review_verdict(
        &self,
        worker_id: &WorkerId,
        verdict: ReviewVerdict,
        _comments: &str,
    ) -> Result<WorkerPhase, ForemanError> {
        let assignment = self
            .state
            .worker_assignment(worker_id)
            .ok_or_else(|| ForemanError::InvalidTransition(format!("worker {worker_id} has no active assignment")))?;

        if assignment.phase != WorkerPhase::Reviewing {
            return Err(ForemanError::InvalidTransition(format!(
                "worker {worker_id} cannot report a review verdict from phase {}",
                assignment.phase
            )));
        }

        let mut task = self
            .state
            .task_assignment(&assignment.task_id)
            .ok_or_else(|| ForemanError::NotFound(format!("task {} not found", assignment.task_id)))?;

        let new_status = match verdict {
            ReviewVerdict::Approved => TaskWorkflowStatus::Approved,
            ReviewVerdict::Denied => TaskWorkflowStatus::Denied,
        };
        task.status.validate_transition(new_status)?;
        task.status = new_status;
        self.state.set_task_assignment(task.task_id.clone(), task);

        self.state.clear_worker_assignment(worker_id);
        self.pool.set_worker_phase(worker_id, WorkerPhase::Idle, None)?;
        self.pool.complete(worker_id)?;
        Ok(WorkerPhase::Idle)
    }
}

#[cfg(test)]
#[path = "callback_tests.rs"]
mod tests;
