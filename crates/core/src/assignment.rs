// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Assignment records held by the coordinator state store.

use crate::phase::WorkerPhase;
use crate::status::TaskWorkflowStatus;
use crate::task::TaskId;
use crate::worker::WorkerId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One per worker with an active assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WorkerAssignment {
    pub task_id: TaskId,
    pub role: crate::role::WorkerRole,
    pub phase: WorkerPhase,
    pub assigned_at: u64,
    /// Set when `role == reviewer`: the worker being reviewed.
    pub implementer_id: Option<WorkerId>,
    /// Set when `role == implementer` and the task is currently under review.
    pub reviewer_id: Option<WorkerId>,
}

crate::builder! {
    pub struct WorkerAssignmentBuilder => WorkerAssignment {
        set { task_id: TaskId = TaskId::parse("test-abcd").expect("valid test task id") }
        set { role: crate::role::WorkerRole = crate::role::WorkerRole::Implementer }
        set { phase: WorkerPhase = WorkerPhase::Implementing }
        set { assigned_at: u64 = 0 }
        option { implementer_id: WorkerId = None }
        option { reviewer_id: WorkerId = None }
    }
}

/// One per task the coordinator is tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaskAssignment {
    pub task_id: TaskId,
    pub implementer: WorkerId,
    pub reviewer: Option<WorkerId>,
    pub status: TaskWorkflowStatus,
    pub started_at: u64,
    pub review_started_at: Option<u64>,
}

crate::builder! {
    pub struct TaskAssignmentBuilder => TaskAssignment {
        set { task_id: TaskId = TaskId::parse("test-abcd").expect("valid test task id") }
        into { implementer: WorkerId = "worker-1" }
        option { reviewer: WorkerId = None }
        set { status: TaskWorkflowStatus = TaskWorkflowStatus::Implementing }
        set { started_at: u64 = 0 }
        option { review_started_at: u64 = None }
    }
}
