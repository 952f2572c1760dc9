// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `CoordinatorState`: the authoritative, in-memory graph of worker and task
//! assignments, plus its validated mutators and read-only background scans.

use crate::error::StateError;
use crate::pool::WorkerPool;
use foreman_core::{TaskAssignment, TaskId, WorkerAssignment, WorkerId, WorkerPhase, WorkerStatus};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Default `MaxTaskDuration`, past which an in-flight assignment is reported
/// stuck by [`CoordinatorState::check_stuck_workers`].
pub const DEFAULT_MAX_TASK_DURATION_MS: u64 = 30 * 60 * 1000;

#[derive(Default)]
struct Assignments {
    workers: HashMap<WorkerId, WorkerAssignment>,
    tasks: HashMap<TaskId, TaskAssignment>,
}

/// Owns `workerAssignments` and `taskAssignments` behind a single RW lock, so
/// that a worker assignment and its mirrored task assignment are always
/// established (or torn down) within one locked operation. No reader can
/// observe one half of a cross-map mutation without the other.
#[derive(Default)]
pub struct CoordinatorState {
    assignments: RwLock<Assignments>,
}

impl CoordinatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn worker_assignment(&self, worker_id: &WorkerId) -> Option<WorkerAssignment> {
        self.assignments.read().workers.get(worker_id).cloned()
    }

    pub fn task_assignment(&self, task_id: &TaskId) -> Option<TaskAssignment> {
        self.assignments.read().tasks.get(task_id).cloned()
    }

    pub fn all_worker_assignments(&self) -> Vec<(WorkerId, WorkerAssignment)> {
        self.assignments.read().workers.iter().map(|(id, a)| (id.clone(), a.clone())).collect()
    }

    pub fn all_task_assignments(&self) -> Vec<(TaskId, TaskAssignment)> {
        self.assignments.read().tasks.iter().map(|(id, a)| (id.clone(), a.clone())).collect()
    }

    /// Unconditional setter, used only after the corresponding `validate_*`
    /// call has returned `Ok`.
    pub fn set_worker_assignment(&self, worker_id: WorkerId, assignment: WorkerAssignment) {
        self.assignments.write().workers.insert(worker_id, assignment);
    }

    /// Unconditional setter, used only after the corresponding `validate_*`
    /// call has returned `Ok`.
    pub fn set_task_assignment(&self, task_id: TaskId, assignment: TaskAssignment) {
        self.assignments.write().tasks.insert(task_id, assignment);
    }

    /// Insert a worker assignment and its mirrored task assignment in one
    /// locked operation, e.g. assigning a task or handing a task to a
    /// reviewer.
    pub fn set_worker_and_task_assignment(
        &self,
        worker_id: WorkerId,
        worker_assignment: WorkerAssignment,
        task_id: TaskId,
        task_assignment: TaskAssignment,
    ) {
        let mut guard = self.assignments.write();
        guard.workers.insert(worker_id, worker_assignment);
        guard.tasks.insert(task_id, task_assignment);
    }

    /// Update a task assignment and free a worker in one locked operation,
    /// e.g. completing a task frees its implementer.
    pub fn set_task_assignment_and_clear_worker(&self, task_id: TaskId, task_assignment: TaskAssignment, worker_id: &WorkerId) {
        let mut guard = self.assignments.write();
        guard.tasks.insert(task_id, task_assignment);
        guard.workers.remove(worker_id);
    }

    /// Remove a worker's assignment, e.g. when its task completes or the
    /// worker is replaced. Returns the removed assignment, if any.
    pub fn clear_worker_assignment(&self, worker_id: &WorkerId) -> Option<WorkerAssignment> {
        self.assignments.write().workers.remove(worker_id)
    }

    /// Remove a task's assignment entirely. Tasks are destroyed only by
    /// `mark_task_complete`/`mark_task_failed`.
    pub fn remove_task_assignment(&self, task_id: &TaskId) -> Option<TaskAssignment> {
        self.assignments.write().tasks.remove(task_id)
    }

    /// Remove a task's assignment and free the given workers in one locked
    /// operation, e.g. a failed task frees its implementer and reviewer
    /// together.
    pub fn remove_task_and_clear_workers(&self, task_id: &TaskId, worker_ids: &[&WorkerId]) -> Option<TaskAssignment> {
        let mut guard = self.assignments.write();
        let task = guard.tasks.remove(task_id);
        for worker_id in worker_ids {
            guard.workers.remove(*worker_id);
        }
        task
    }

    /// Validate an `assign_task` request before any mutation.
    ///
    /// Fails when: the worker is not in the pool, the worker is not
    /// `ready`, the worker already has an active assignment, or the task is
    /// already assigned to someone.
    pub fn validate_task_assignment(
        &self,
        worker_id: &WorkerId,
        task_id: &TaskId,
        pool: &WorkerPool,
    ) -> Result<(), StateError> {
        let worker = pool
            .get_worker(worker_id)
            .ok_or_else(|| StateError::WorkerNotFound(worker_id.clone()))?;
        if worker.status != WorkerStatus::Ready {
            return Err(StateError::WorkerNotReady {
                worker_id: worker_id.clone(),
                status: worker.status,
            });
        }
        let guard = self.assignments.read();
        if guard.workers.contains_key(worker_id) {
            return Err(StateError::WorkerAlreadyAssigned(worker_id.clone()));
        }
        if let Some(existing) = guard.tasks.get(task_id) {
            return Err(StateError::TaskAlreadyAssigned {
                task_id: task_id.clone(),
                implementer: existing.implementer.clone(),
            });
        }
        Ok(())
    }

    /// Validate an `assign_task_review` request before any mutation.
    ///
    /// Fails when: reviewer == implementer, the task is not found or its
    /// implementer doesn't match, the implementer is not `awaiting_review`,
    /// the task already has a reviewer, or the reviewer is not `ready`.
    pub fn validate_review_assignment(
        &self,
        reviewer_id: &WorkerId,
        task_id: &TaskId,
        implementer_id: &WorkerId,
        pool: &WorkerPool,
    ) -> Result<(), StateError> {
        if reviewer_id == implementer_id {
            return Err(StateError::ReviewerIsImplementer(reviewer_id.clone()));
        }

        let guard = self.assignments.read();
        let task = guard.tasks.get(task_id).cloned().ok_or_else(|| StateError::TaskNotFound(task_id.clone()))?;
        if &task.implementer != implementer_id {
            return Err(StateError::ImplementerMismatch {
                task_id: task_id.clone(),
                expected: task.implementer,
                actual: implementer_id.clone(),
            });
        }
        if let Some(reviewer) = task.reviewer {
            return Err(StateError::TaskAlreadyHasReviewer { task_id: task_id.clone(), reviewer });
        }

        let implementer_assignment =
            guard.workers.get(implementer_id).cloned().ok_or_else(|| StateError::TaskNotFound(task_id.clone()))?;
        if implementer_assignment.phase != WorkerPhase::AwaitingReview {
            return Err(StateError::ImplementerNotAwaitingReview {
                task_id: task_id.clone(),
                phase: implementer_assignment.phase,
            });
        }
        drop(guard);

        let reviewer = pool
            .get_worker(reviewer_id)
            .ok_or_else(|| StateError::WorkerNotFound(reviewer_id.clone()))?;
        if reviewer.status != WorkerStatus::Ready {
            return Err(StateError::WorkerNotReady {
                worker_id: reviewer_id.clone(),
                status: reviewer.status,
            });
        }

        Ok(())
    }

    /// Every task whose implementer or reviewer is missing from the pool
    /// or has been retired.
    pub fn detect_orphaned_tasks(&self, pool: &WorkerPool) -> Vec<TaskId> {
        let is_orphaned = |worker_id: &WorkerId| match pool.get_worker(worker_id) {
            None => true,
            Some(worker) => worker.status == WorkerStatus::Retired,
        };

        self.assignments
            .read()
            .tasks
            .values()
            .filter(|task| is_orphaned(&task.implementer) || task.reviewer.as_ref().is_some_and(is_orphaned))
            .map(|task| task.task_id.clone())
            .collect()
    }

    /// Every worker whose assignment has been in flight longer than
    /// `max_task_duration_ms`.
    pub fn check_stuck_workers(&self, now_epoch_ms: u64, max_task_duration_ms: u64) -> Vec<WorkerId> {
        self.assignments
            .read()
            .workers
            .iter()
            .filter(|(_, assignment)| now_epoch_ms.saturating_sub(assignment.assigned_at) > max_task_duration_ms)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
