// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Codex CLI adapter.

use crate::error::ParseError;
use crate::provider::{EventParser, ParsedEvent, Provider};
use crate::spawn_config::SpawnConfig;
use foreman_core::{ContentBlock, MessagePayload, OutputEvent, ToolPayload};
use serde_json::Value;

const KNOWN_PATHS: &[&str] = &["~/.local/bin/codex", "/usr/local/bin/codex", "{name}"];
const CONTEXT_WINDOW_SIZE: usize = 128_000;

pub struct CodexProvider;

impl Provider for CodexProvider {
    fn name(&self) -> &'static str {
        "codex"
    }

    fn known_paths(&self) -> &[&'static str] {
        KNOWN_PATHS
    }

    fn build_argv(&self, cfg: &SpawnConfig) -> Vec<String> {
        let mut argv = vec!["exec".to_string(), "--json".to_string()];
        if let Some(model) = &cfg.model {
            argv.push("--model".to_string());
            argv.push(model.clone());
        }
        if cfg.skip_permissions {
            argv.push("--dangerously-bypass-approvals-and-sandbox".to_string());
        }
        argv.push(cfg.prompt.clone());
        argv
    }

    fn parser(&self) -> &dyn EventParser {
        &CodexParser
    }

    fn mcp_config_subdir(&self) -> Option<&'static str> {
        None
    }
}

pub struct CodexParser;

impl EventParser for CodexParser {
    fn parse(&self, line: &[u8]) -> Result<ParsedEvent, ParseError> {
        let raw = line.to_vec();
        let value: Value = serde_json::from_slice(line).map_err(|e| ParseError(e.to_string()))?;
        let event_type = value.get("type").and_then(Value::as_str).unwrap_or_default();

        Ok(match event_type {
            "session_configured" => {
                let mut event = OutputEvent::new("system", raw);
                event.subtype = Some("init".to_string());
                event.session_id = value.get("session_id").and_then(Value::as_str).map(String::from);
                ParsedEvent::Event(event)
            }
            "agent_message" => {
                let text = value.get("message").and_then(Value::as_str).unwrap_or_default().trim().to_string();
                if text.is_empty() {
                    return Ok(ParsedEvent::Skip);
                }
                let mut event = OutputEvent::new("assistant", raw);
                event.message = Some(MessagePayload {
                    role: Some("assistant".to_string()),
                    content: vec![ContentBlock::Text { text }],
                    ..Default::default()
                });
                ParsedEvent::Event(event)
            }
            "exec_command_begin" => {
                let call_id = value.get("call_id").and_then(Value::as_str).unwrap_or_default().to_string();
                let command = value
                    .get("command")
                    .and_then(Value::as_array)
                    .map(|parts| parts.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(" "))
                    .unwrap_or_default();
                let mut event = OutputEvent::new("tool_use", raw);
                event.tool = Some(ToolPayload {
                    id: Some(call_id.clone()),
                    name: Some("exec".to_string()),
                    input: Some(Value::String(command.clone())),
                    output: None,
                });
                event.message = Some(MessagePayload {
                    content: vec![ContentBlock::ToolUse {
                        id: call_id,
                        name: "exec".to_string(),
                        input: Value::String(command),
                    }],
                    ..Default::default()
                });
                ParsedEvent::Event(event)
            }
            "exec_command_end" => {
                let call_id = value.get("call_id").and_then(Value::as_str).unwrap_or_default().to_string();
                let output = value.get("stdout").and_then(Value::as_str).unwrap_or_default().to_string();
                let mut event = OutputEvent::new("tool_result", raw);
                event.tool = Some(ToolPayload {
                    id: Some(call_id.clone()),
                    name: None,
                    input: None,
                    output: Some(output.clone()),
                });
                event.message = Some(MessagePayload {
                    content: vec![ContentBlock::ToolResult { tool_use_id: call_id, output }],
                    ..Default::default()
                });
                ParsedEvent::Event(event)
            }
            "task_complete" => {
                let mut event = OutputEvent::new("result", raw);
                event.result = value.get("last_agent_message").and_then(Value::as_str).map(String::from);
                ParsedEvent::Event(event)
            }
            _ => ParsedEvent::Skip,
        })
    }

    fn context_window_size(&self) -> usize {
        CONTEXT_WINDOW_SIZE
    }
}

#[cfg(test)]
#[path = "codex_tests.rs"]
mod tests;
