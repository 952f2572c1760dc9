// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker role: which side of a review a worker is currently playing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Role a worker plays in its current assignment. Unset when the worker's
/// phase is `idle` (tracked as `Option<WorkerRole>` on [`WorkerAssignment`](crate::WorkerAssignment)
/// — there is no assignment at all for an idle worker, so the option is
/// structural rather than a third enum variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkerRole {
    Implementer,
    Reviewer,
}

crate::simple_display! {
    WorkerRole {
        Implementer => "implementer",
        Reviewer => "reviewer",
    }
}
