// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor lifecycle status, with sticky terminal-state semantics.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a supervised subprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupervisorStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

foreman_core::simple_display! {
    SupervisorStatus {
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

impl SupervisorStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SupervisorStatus::Completed | SupervisorStatus::Failed | SupervisorStatus::Cancelled
        )
    }
}

/// Thread-safe status cell with sticky-terminal gating: once the status is
/// `completed`, `failed`, or `cancelled`, no further write takes effect.
/// This is what makes a late `Cancel()` racing a natural process exit safe —
/// whichever terminal write lands first wins, permanently.
pub struct StatusCell(Mutex<SupervisorStatus>);

impl Default for StatusCell {
    fn default() -> Self {
        Self(Mutex::new(SupervisorStatus::Pending))
    }
}

impl StatusCell {
    pub fn get(&self) -> SupervisorStatus {
        *self.0.lock()
    }

    /// Attempt to set a new status. Returns `true` if the write took
    /// effect (i.e. the previous status was not terminal).
    pub fn set(&self, to: SupervisorStatus) -> bool {
        let mut guard = self.0.lock();
        if guard.is_terminal() {
            return false;
        }
        *guard = to;
        true
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
