// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker pool: the set of workers known to the coordinator, independent of
//! their task assignments (those live in [`crate::store::CoordinatorState`]).

use crate::error::PoolError;
use foreman_core::{Worker, WorkerId, WorkerPhase, WorkerStatus};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Concurrent-safe map from [`WorkerId`] to [`Worker`].
///
/// Every mutator acquires the single internal lock exclusively and releases
/// it before returning; none of them ever block on I/O or another lock, so
/// holding the write guard briefly under concurrent callers is safe.
#[derive(Default)]
pub struct WorkerPool {
    workers: RwLock<HashMap<WorkerId, Worker>>,
}

impl WorkerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly spawned worker: ready, idle, no assignment.
    pub fn add_worker(&self, id: WorkerId) -> Worker {
        let worker = Worker::new(id);
        self.workers.write().insert(worker.id.clone(), worker.clone());
        worker
    }

    /// Register a worker in an arbitrary state, bypassing the normal
    /// spawn lifecycle. Test-only: production callers only ever create
    /// workers via [`WorkerPool::add_worker`].
    #[cfg(any(test, feature = "test-support"))]
    pub fn add_test_worker(&self, worker: Worker) {
        self.workers.write().insert(worker.id.clone(), worker);
    }

    pub fn get_worker(&self, id: &WorkerId) -> Option<Worker> {
        self.workers.read().get(id).cloned()
    }

    /// Every worker whose status is not `retired`.
    pub fn active_workers(&self) -> Vec<Worker> {
        self.workers
            .read()
            .values()
            .filter(|w| w.is_active())
            .cloned()
            .collect()
    }

    /// Transition a worker `ready -> working`. Fails if the worker is
    /// missing or not currently ready.
    pub fn assign(&self, id: &WorkerId) -> Result<(), PoolError> {
        self.transition(id, WorkerStatus::Working)
    }

    /// Transition a worker `working -> ready`, on task completion.
    pub fn complete(&self, id: &WorkerId) -> Result<(), PoolError> {
        self.transition(id, WorkerStatus::Ready)
    }

    fn transition(&self, id: &WorkerId, to: WorkerStatus) -> Result<(), PoolError> {
        let mut workers = self.workers.write();
        let worker = workers.get_mut(id).ok_or_else(|| PoolError::WorkerNotFound(id.clone()))?;
        worker.status.validate_transition(to)?;
        worker.status = to;
        Ok(())
    }

    /// Retire a worker: one-way, idempotent (retiring an already-retired
    /// worker is a no-op rather than an error, so `Close()` can call this
    /// on every worker unconditionally).
    pub fn retire(&self, id: &WorkerId) -> Result<(), PoolError> {
        let mut workers = self.workers.write();
        let worker = workers.get_mut(id).ok_or_else(|| PoolError::WorkerNotFound(id.clone()))?;
        if worker.status == WorkerStatus::Retired {
            return Ok(());
        }
        worker.status.validate_transition(WorkerStatus::Retired)?;
        worker.status = WorkerStatus::Retired;
        worker.phase = WorkerPhase::Idle;
        worker.current_task_id = None;
        Ok(())
    }

    /// Update a worker's phase and current task after a state-store
    /// mutation has already validated the transition.
    pub fn set_worker_phase(
        &self,
        id: &WorkerId,
        phase: WorkerPhase,
        current_task_id: Option<foreman_core::TaskId>,
    ) -> Result<(), PoolError> {
        let mut workers = self.workers.write();
        let worker = workers.get_mut(id).ok_or_else(|| PoolError::WorkerNotFound(id.clone()))?;
        worker.phase = phase;
        worker.current_task_id = current_task_id;
        Ok(())
    }

    /// Retire every worker. Safe to call more than once.
    pub fn close(&self) {
        let ids: Vec<WorkerId> = self.workers.read().keys().cloned().collect();
        for id in ids {
            let _ = self.retire(&id);
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
