// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn starts_pending() {
    assert_eq!(StatusCell::default().get(), SupervisorStatus::Pending);
}

#[test]
fn set_succeeds_before_terminal() {
    let cell = StatusCell::default();
    assert!(cell.set(SupervisorStatus::Running));
    assert_eq!(cell.get(), SupervisorStatus::Running);
}

#[test]
fn terminal_states_are_sticky() {
    let cell = StatusCell::default();
    cell.set(SupervisorStatus::Running);
    assert!(cell.set(SupervisorStatus::Completed));
    // a subsequent cancel must not overwrite an already-completed status
    assert!(!cell.set(SupervisorStatus::Cancelled));
    assert_eq!(cell.get(), SupervisorStatus::Completed);
}

#[test]
fn cancel_on_already_terminal_does_not_change_status() {
    let cell = StatusCell::default();
    cell.set(SupervisorStatus::Running);
    cell.set(SupervisorStatus::Failed);
    assert!(!cell.set(SupervisorStatus::Cancelled));
    assert_eq!(cell.get(), SupervisorStatus::Failed);
}
