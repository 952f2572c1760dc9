// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The tool-boundary error aggregation point. Every crate below this one
//! defines its own error enum; handlers in [`crate::coordinator_tools`] and
//! [`crate::worker_tools`] map them here, matching the daemon's
//! `ConnectionError` aggregation pattern in its listener module.

use foreman_core::{
    InvalidPhaseTransition, InvalidTaskId, InvalidTaskStatusTransition, InvalidWorkerId,
    InvalidWorkerStatusTransition,
};
use foreman_prompts::InvalidAgentType;
use foreman_state::{PoolError, StateError};
use foreman_supervisor::SupervisorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForemanError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invariant violation: {0}")]
    Invariant(String),
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream failure: {0}")]
    Upstream(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("subprocess fatal: {0}")]
    SubprocessFatal(String),
    #[error("context exhausted")]
    ContextExhausted,
}

impl From<InvalidTaskId> for ForemanError {
    fn from(e: InvalidTaskId) -> Self {
        ForemanError::Validation(e.to_string())
    }
}

impl From<InvalidWorkerId> for ForemanError {
    fn from(e: InvalidWorkerId) -> Self {
        ForemanError::Validation(e.to_string())
    }
}

impl From<InvalidAgentType> for ForemanError {
    fn from(e: InvalidAgentType) -> Self {
        ForemanError::Validation(e.to_string())
    }
}

impl From<InvalidPhaseTransition> for ForemanError {
    fn from(e: InvalidPhaseTransition) -> Self {
        ForemanError::InvalidTransition(e.to_string())
    }
}

impl From<InvalidTaskStatusTransition> for ForemanError {
    fn from(e: InvalidTaskStatusTransition) -> Self {
        ForemanError::InvalidTransition(e.to_string())
    }
}

impl From<InvalidWorkerStatusTransition> for ForemanError {
    fn from(e: InvalidWorkerStatusTransition) -> Self {
        ForemanError::InvalidTransition(e.to_string())
    }
}

impl From<PoolError> for ForemanError {
    fn from(e: PoolError) -> Self {
        match e {
            PoolError::WorkerNotFound(_) => ForemanError::NotFound(e.to_string()),
            PoolError::InvalidTransition(_) => ForemanError::InvalidTransition(e.to_string()),
        }
    }
}

impl From<StateError> for ForemanError {
    fn from(e: StateError) -> Self {
        match e {
            StateError::WorkerNotFound(_) | StateError::TaskNotFound(_) => ForemanError::NotFound(e.to_string()),
            StateError::InvalidPhaseTransition(_) | StateError::InvalidTaskStatusTransition(_) => {
                ForemanError::InvalidTransition(e.to_string())
            }
            StateError::WorkerNotReady { .. }
            | StateError::WorkerAlreadyAssigned(_)
            | StateError::TaskAlreadyAssigned { .. }
            | StateError::ReviewerIsImplementer(_)
            | StateError::ImplementerMismatch { .. }
            | StateError::ImplementerNotAwaitingReview { .. }
            | StateError::TaskAlreadyHasReviewer { .. } => ForemanError::Invariant(e.to_string()),
        }
    }
}

impl From<SupervisorError> for ForemanError {
    fn from(e: SupervisorError) -> Self {
        match e {
            SupervisorError::ExecutableNotFound { .. } | SupervisorError::UnknownProvider(_) => {
                ForemanError::NotFound(e.to_string())
            }
            SupervisorError::SpawnFailed(_) | SupervisorError::SubprocessFatal(_) => {
                ForemanError::SubprocessFatal(e.to_string())
            }
            SupervisorError::Transport(_) => ForemanError::Transport(e.to_string()),
        }
    }
}
