// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-agent-type prompt registry.

use crate::agent_type::AgentType;
use crate::workflow_config::{compose, WorkflowConfig};
use foreman_core::WorkerId;
use std::collections::HashMap;

/// Built-in system/initial prompt text for one agent type. Placeholder
/// content: the template text itself is an external concern, only the
/// override/append composition logic is in scope here.
#[derive(Debug, Clone, Copy)]
struct PromptSet {
    system: &'static str,
    initial: &'static str,
}

const GENERIC: PromptSet = PromptSet {
    system: "You are a general-purpose worker in a multi-agent orchestration session.",
    initial: "Await instructions from the coordinator.",
};

const IMPLEMENTER: PromptSet = PromptSet {
    system: "You are an implementer worker: you write code to satisfy assigned tasks.",
    initial: "Wait for a task assignment, then implement it.",
};

const REVIEWER: PromptSet = PromptSet {
    system: "You are a reviewer worker: you vet another worker's implementation.",
    initial: "Wait for a review assignment, then evaluate the implementation.",
};

const RESEARCHER: PromptSet = PromptSet {
    system: "You are a researcher worker: you investigate and report findings.",
    initial: "Wait for a research request from the coordinator.",
};

/// Maps each [`AgentType`] to its built-in prompt text, and applies a
/// worker's [`WorkflowConfig`] override/append precedence on top of it.
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    prompts: HashMap<AgentType, PromptSet>,
}

impl Default for PromptRegistry {
    fn default() -> Self {
        let mut prompts = HashMap::new();
        prompts.insert(AgentType::Generic, GENERIC);
        prompts.insert(AgentType::Implementer, IMPLEMENTER);
        prompts.insert(AgentType::Reviewer, REVIEWER);
        prompts.insert(AgentType::Researcher, RESEARCHER);
        Self { prompts }
    }
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn base(&self, agent_type: AgentType) -> PromptSet {
        self.prompts
            .get(&agent_type)
            .copied()
            .unwrap_or(GENERIC)
    }

    /// The composed system prompt for `worker_id`, given its agent type and
    /// optional per-worker overrides.
    pub fn system_prompt(
        &self,
        _worker_id: &WorkerId,
        agent_type: AgentType,
        config: Option<&WorkflowConfig>,
    ) -> String {
        let base = self.base(agent_type);
        compose(
            base.system,
            config.and_then(|c| c.system_override.as_deref()),
            config.and_then(|c| c.system_append.as_deref()),
        )
    }

    /// The composed initial prompt for `worker_id`.
    pub fn initial_prompt(
        &self,
        _worker_id: &WorkerId,
        agent_type: AgentType,
        config: Option<&WorkflowConfig>,
    ) -> String {
        let base = self.base(agent_type);
        compose(
            base.initial,
            config.and_then(|c| c.initial_override.as_deref()),
            config.and_then(|c| c.initial_append.as_deref()),
        )
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
