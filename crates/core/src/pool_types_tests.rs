// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    assign = { WorkerStatus::Ready, WorkerStatus::Working },
    complete = { WorkerStatus::Working, WorkerStatus::Ready },
    retire_from_ready = { WorkerStatus::Ready, WorkerStatus::Retired },
    retire_from_working = { WorkerStatus::Working, WorkerStatus::Retired },
)]
fn valid_transitions_are_accepted(from: WorkerStatus, to: WorkerStatus) {
    assert!(from.validate_transition(to).is_ok());
}

#[test]
fn retired_is_terminal() {
    assert!(WorkerStatus::Retired.validate_transition(WorkerStatus::Ready).is_err());
    assert!(WorkerStatus::Retired.validate_transition(WorkerStatus::Working).is_err());
    assert!(WorkerStatus::Retired.validate_transition(WorkerStatus::Retired).is_err());
}

#[test]
fn ready_cannot_jump_to_itself_via_no_op() {
    assert!(WorkerStatus::Ready.validate_transition(WorkerStatus::Ready).is_err());
    assert!(WorkerStatus::Working.validate_transition(WorkerStatus::Working).is_err());
}

#[test]
fn new_worker_is_ready_and_idle() {
    let w = Worker::new(WorkerId::new("worker-1"));
    assert_eq!(w.status, WorkerStatus::Ready);
    assert_eq!(w.phase, WorkerPhase::Idle);
    assert!(w.current_task_id.is_none());
    assert!(w.is_active());
}

#[test]
fn retired_worker_is_not_active() {
    let w = Worker::builder().status(WorkerStatus::Retired).build();
    assert!(!w.is_active());
}
