// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! foreman-state: the coordinator's authoritative worker/task graph and
//! worker pool, with validated mutators and background scans.

pub mod error;
pub mod pool;
pub mod store;

pub use error::{PoolError, StateError};
pub use pool::WorkerPool;
pub use store::{CoordinatorState, DEFAULT_MAX_TASK_DURATION_MS};
