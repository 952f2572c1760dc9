// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by the coordinator state store and worker pool.

use foreman_core::{
    InvalidPhaseTransition, InvalidTaskStatusTransition, InvalidWorkerStatusTransition, TaskId,
    WorkerId, WorkerPhase, WorkerStatus,
};
use thiserror::Error;

/// An invariant-violation or not-found condition raised by a validated
/// mutator. Each variant carries the specific message spec'd in the error
/// handling design, rather than a single generic string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("worker {0} not in pool")]
    WorkerNotFound(WorkerId),
    #[error("worker {worker_id} not ready (status: {status})")]
    WorkerNotReady {
        worker_id: WorkerId,
        status: WorkerStatus,
    },
    #[error("worker {0} already has an active assignment")]
    WorkerAlreadyAssigned(WorkerId),
    #[error("task {task_id} already assigned to {implementer}")]
    TaskAlreadyAssigned {
        task_id: TaskId,
        implementer: WorkerId,
    },
    #[error("reviewer cannot be the same as implementer: {0}")]
    ReviewerIsImplementer(WorkerId),
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    #[error("task {task_id} implementer mismatch: expected {expected}, got {actual}")]
    ImplementerMismatch {
        task_id: TaskId,
        expected: WorkerId,
        actual: WorkerId,
    },
    #[error("task {task_id} implementer not awaiting review (phase: {phase})")]
    ImplementerNotAwaitingReview { task_id: TaskId, phase: WorkerPhase },
    #[error("task {task_id} already has a reviewer: {reviewer}")]
    TaskAlreadyHasReviewer { task_id: TaskId, reviewer: WorkerId },
    #[error(transparent)]
    InvalidPhaseTransition(#[from] InvalidPhaseTransition),
    #[error(transparent)]
    InvalidTaskStatusTransition(#[from] InvalidTaskStatusTransition),
}

/// Errors raised by [`crate::pool::WorkerPool`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("worker {0} not in pool")]
    WorkerNotFound(WorkerId),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidWorkerStatusTransition),
}
