// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn worker() -> WorkerId {
    WorkerId::new("worker-1")
}

#[test]
fn each_agent_type_gets_distinct_base_prompts() {
    let registry = PromptRegistry::new();
    let implementer = registry.system_prompt(&worker(), AgentType::Implementer, None);
    let reviewer = registry.system_prompt(&worker(), AgentType::Reviewer, None);
    assert_ne!(implementer, reviewer);
}

#[test]
fn no_config_returns_the_base_prompt() {
    let registry = PromptRegistry::new();
    let prompt = registry.system_prompt(&worker(), AgentType::Generic, None);
    assert_eq!(prompt, GENERIC.system);
}

#[test]
fn append_is_joined_with_base_via_the_fabric_separator() {
    let registry = PromptRegistry::new();
    let config = WorkflowConfig {
        system_append: Some("Also: be terse.".to_string()),
        ..Default::default()
    };
    let prompt = registry.system_prompt(&worker(), AgentType::Generic, Some(&config));
    assert_eq!(prompt, format!("{}\n\nAlso: be terse.", GENERIC.system));
}

#[test]
fn override_replaces_the_base_prompt_entirely() {
    let registry = PromptRegistry::new();
    let config = WorkflowConfig {
        initial_override: Some("Custom initial prompt.".to_string()),
        ..Default::default()
    };
    let prompt = registry.initial_prompt(&worker(), AgentType::Reviewer, Some(&config));
    assert_eq!(prompt, "Custom initial prompt.");
}
