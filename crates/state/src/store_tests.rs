// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use foreman_core::{WorkerPhase, WorkerRole};

fn ready_worker(pool: &WorkerPool, id: &str) -> WorkerId {
    let worker_id = WorkerId::new(id);
    pool.add_worker(worker_id.clone());
    worker_id
}

fn task(id: &str) -> TaskId {
    TaskId::parse(id).unwrap()
}

fn assign(state: &CoordinatorState, pool: &WorkerPool, worker: &WorkerId, task_id: &TaskId, assigned_at: u64) {
    state.validate_task_assignment(worker, task_id, pool).unwrap();
    pool.assign(worker).unwrap();
    pool.set_worker_phase(worker, WorkerPhase::Implementing, Some(task_id.clone()))
        .unwrap();
    state.set_worker_assignment(
        worker.clone(),
        WorkerAssignment::builder()
            .task_id(task_id.clone())
            .role(WorkerRole::Implementer)
            .phase(WorkerPhase::Implementing)
            .assigned_at(assigned_at)
            .build(),
    );
    state.set_task_assignment(
        task_id.clone(),
        TaskAssignment::builder()
            .task_id(task_id.clone())
            .implementer(worker.clone())
            .started_at(assigned_at)
            .build(),
    );
}

#[test]
fn validate_task_assignment_rejects_unknown_worker() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let err = state
        .validate_task_assignment(&WorkerId::new("ghost"), &task("test-abcd"), &pool)
        .unwrap_err();
    assert!(matches!(err, StateError::WorkerNotFound(_)));
}

#[test]
fn validate_task_assignment_rejects_non_ready_worker() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let worker = ready_worker(&pool, "worker-1");
    pool.assign(&worker).unwrap();

    let err = state.validate_task_assignment(&worker, &task("test-abcd"), &pool).unwrap_err();
    assert!(matches!(err, StateError::WorkerNotReady { .. }));
}

#[test]
fn validate_task_assignment_rejects_already_assigned_worker() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let worker = ready_worker(&pool, "worker-1");
    assign(&state, &pool, &worker, &task("test-abcd"), 0);

    let err = state
        .validate_task_assignment(&worker, &task("test-efgh"), &pool)
        .unwrap_err();
    assert!(matches!(err, StateError::WorkerAlreadyAssigned(_)));
}

#[test]
fn validate_task_assignment_rejects_already_assigned_task() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let worker1 = ready_worker(&pool, "worker-1");
    let worker2 = ready_worker(&pool, "worker-2");
    assign(&state, &pool, &worker1, &task("test-abcd"), 0);

    let err = state.validate_task_assignment(&worker2, &task("test-abcd"), &pool).unwrap_err();
    assert!(matches!(err, StateError::TaskAlreadyAssigned { .. }));
}

#[test]
fn validate_review_assignment_rejects_reviewer_equal_implementer() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let worker = ready_worker(&pool, "worker-1");
    let err = state
        .validate_review_assignment(&worker, &task("test-abcd"), &worker, &pool)
        .unwrap_err();
    assert!(matches!(err, StateError::ReviewerIsImplementer(_)));
}

#[test]
fn validate_review_assignment_requires_implementer_awaiting_review() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let implementer = ready_worker(&pool, "worker-1");
    let reviewer = ready_worker(&pool, "worker-2");
    // implementer is still `implementing`, not `awaiting_review`
    assign(&state, &pool, &implementer, &task("test-abcd"), 0);

    let err = state
        .validate_review_assignment(&reviewer, &task("test-abcd"), &implementer, &pool)
        .unwrap_err();
    assert!(matches!(err, StateError::ImplementerNotAwaitingReview { .. }));
}

#[test]
fn validate_review_assignment_succeeds_when_implementer_awaiting_review() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let implementer = ready_worker(&pool, "worker-1");
    let reviewer = ready_worker(&pool, "worker-2");
    let task_id = task("test-abcd");
    assign(&state, &pool, &implementer, &task_id, 0);

    let mut assignment = state.worker_assignment(&implementer).unwrap();
    assignment.phase = WorkerPhase::AwaitingReview;
    state.set_worker_assignment(implementer.clone(), assignment);

    state
        .validate_review_assignment(&reviewer, &task_id, &implementer, &pool)
        .unwrap();
}

#[test]
fn validate_review_assignment_rejects_task_with_existing_reviewer() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let implementer = ready_worker(&pool, "worker-1");
    let reviewer1 = ready_worker(&pool, "worker-2");
    let reviewer2 = ready_worker(&pool, "worker-3");
    let task_id = task("test-abcd");
    assign(&state, &pool, &implementer, &task_id, 0);

    let mut task_assignment = state.task_assignment(&task_id).unwrap();
    task_assignment.reviewer = Some(reviewer1);
    state.set_task_assignment(task_id.clone(), task_assignment);

    let err = state
        .validate_review_assignment(&reviewer2, &task_id, &implementer, &pool)
        .unwrap_err();
    assert!(matches!(err, StateError::TaskAlreadyHasReviewer { .. }));
}

#[test]
fn detect_orphaned_tasks_is_empty_while_both_workers_active() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let worker = ready_worker(&pool, "worker-1");
    assign(&state, &pool, &worker, &task("test-abcd"), 0);

    assert!(state.detect_orphaned_tasks(&pool).is_empty());
}

#[test]
fn detect_orphaned_tasks_finds_task_after_implementer_retires() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let worker = ready_worker(&pool, "worker-1");
    let task_id = task("test-abcd");
    assign(&state, &pool, &worker, &task_id, 0);

    pool.retire(&worker).unwrap();

    assert_eq!(state.detect_orphaned_tasks(&pool), vec![task_id]);
}

#[test]
fn check_stuck_workers_returns_only_the_overdue_one() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let stuck = ready_worker(&pool, "worker-1");
    let fine = ready_worker(&pool, "worker-2");

    let now = 60 * 60 * 1000u64; // 1 hour, in ms
    assign(&state, &pool, &stuck, &task("test-abcd"), 0); // assigned at epoch 0: 1h ago
    assign(&state, &pool, &fine, &task("test-efgh"), now - 5 * 60 * 1000); // 5 min ago

    let overdue = state.check_stuck_workers(now, DEFAULT_MAX_TASK_DURATION_MS);
    assert_eq!(overdue, vec![stuck]);
}

#[test]
fn clear_and_remove_drop_assignments() {
    let state = CoordinatorState::new();
    let pool = WorkerPool::new();
    let worker = ready_worker(&pool, "worker-1");
    let task_id = task("test-abcd");
    assign(&state, &pool, &worker, &task_id, 0);

    assert!(state.clear_worker_assignment(&worker).is_some());
    assert!(state.worker_assignment(&worker).is_none());
    assert!(state.remove_task_assignment(&task_id).is_some());
    assert!(state.task_assignment(&task_id).is_none());
}
