// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use foreman_core::{TaskAssignment, TaskId, TaskWorkflowStatus, Worker, WorkerAssignment, WorkerRole, WorkerStatus};
use yare::parameterized;

fn fixture() -> (Arc<CoordinatorState>, Arc<WorkerPool>, CoordinatorCallback) {
    let state = Arc::new(CoordinatorState::new());
    let pool = Arc::new(WorkerPool::new());
    let callback = CoordinatorCallback::new(state.clone(), pool.clone());
    (state, pool, callback)
}

#[test]
fn get_worker_phase_defaults_to_idle_with_no_assignment() {
    let (_state, _pool, callback) = fixture();
    let worker_id = WorkerId::new("worker-1");
    assert_eq!(callback.get_worker_phase(&worker_id).unwrap(), WorkerPhase::Idle);
}

#[parameterized(
    implementing = { WorkerPhase::Implementing },
    addressing_feedback = { WorkerPhase::AddressingFeedback },
)]
fn on_implementation_complete_succeeds_from_valid_phases(from: WorkerPhase) {
    let (state, pool, callback) = fixture();
    let worker_id = WorkerId::new("worker-1");
    pool.add_test_worker(Worker::builder().id("worker-1").status(WorkerStatus::Working).build());
    state.set_worker_assignment(
        worker_id.clone(),
        WorkerAssignment::builder().phase(from).role(WorkerRole::Implementer).build(),
    );

    let phase = callback.on_implementation_complete(&worker_id, "done").unwrap();
    assert_eq!(phase, WorkerPhase::AwaitingReview);
    assert_eq!(state.worker_assignment(&worker_id).unwrap().phase, WorkerPhase::AwaitingReview);
}

#[test]
fn on_implementation_complete_from_idle_fails() {
    let (_state, _pool, callback) = fixture();
    let worker_id = WorkerId::new("worker-1");
    let err = callback.on_implementation_complete(&worker_id, "done").unwrap_err();
    assert!(matches!(err, ForemanError::InvalidTransition(_)));
}

#[test]
fn on_review_verdict_approved_sets_task_approved_and_frees_reviewer() {
    let (state, pool, callback) = fixture();
    let reviewer_id = WorkerId::new("worker-2");
    let task_id = TaskId::parse("perles-abc").unwrap();
    pool.add_test_worker(Worker::builder().id("worker-2").status(WorkerStatus::Working).build());
    state.set_worker_assignment(
        reviewer_id.clone(),
        WorkerAssignment::builder()
            .task_id(task_id.clone())
            .phase(WorkerPhase::Reviewing)
            .role(WorkerRole::Reviewer)
            .build(),
    );
    state.set_task_assignment(
        task_id.clone(),
        TaskAssignment::builder().task_id(task_id.clone()).status(TaskWorkflowStatus::InReview).build(),
    );

    let phase = callback.on_review_verdict(&reviewer_id, ReviewVerdict::Approved, "LGTM").unwrap();
    assert_eq!(phase, WorkerPhase::Idle);
    assert!(state.worker_assignment(&reviewer_id).is_none());
    assert_eq!(state.task_assignment(&task_id).unwrap().status, TaskWorkflowStatus::Approved);
    assert_eq!(pool.get_worker(&reviewer_id).unwrap().status, WorkerStatus::Ready);
}

#[test]
fn on_review_verdict_from_non_reviewing_phase_fails() {
    let (state, _pool, callback) = fixture();
    let worker_id = WorkerId::new("worker-1");
    state.set_worker_assignment(worker_id.clone(), WorkerAssignment::builder().phase(WorkerPhase::Implementing).build());
    let err = callback.on_review_verdict(&worker_id, ReviewVerdict::Denied, "nope").unwrap_err();
    assert!(matches!(err, ForemanError::InvalidTransition(_)));
}
