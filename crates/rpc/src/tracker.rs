// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The external issue-tracker is an out-of-scope collaborator: this module
//! defines only the named interface `get_task_status` proxies through, plus
//! a default implementation backed by the coordinator's own state so the
//! tool is usable without a real tracker CLI wired in.

use crate::error::ForemanError;
use foreman_core::{TaskId, TaskWorkflowStatus};
use foreman_state::CoordinatorState;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Status of one task as reported by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TrackerStatus {
    pub task_id: String,
    pub status: TaskWorkflowStatus,
}

/// Read-only proxy to the external tracker. The real CLI integration is
/// explicitly out of scope; implementors of this trait are the collaborator
/// boundary a concrete tracker adapter would sit behind.
pub trait TaskTracker: Send + Sync {
    fn get_task_status(&self, task_id: &TaskId) -> Result<TrackerStatus, ForemanError>;
}

/// Answers `get_task_status` from the coordinator's own in-memory record,
/// used when no external tracker process is configured.
pub struct StateTracker {
    state: Arc<CoordinatorState>,
}

impl StateTracker {
    pub fn new(state: Arc<CoordinatorState>) -> Self {
        Self { state }
    }
}

impl TaskTracker for StateTracker {
    fn get_task_status(&self, task_id: &TaskId) -> Result<TrackerStatus, ForemanError> {
        let assignment = self
            .state
            .task_assignment(task_id)
            .ok_or_else(|| ForemanError::NotFound(format!("task {task_id} not found")))?;
        Ok(TrackerStatus {
            task_id: assignment.task_id.as_str().to_string(),
            status: assignment.status,
        })
    }
}
