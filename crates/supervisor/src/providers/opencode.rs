// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The OpenCode CLI adapter.

use crate::error::ParseError;
use crate::provider::{EventParser, ParsedEvent, Provider};
use crate::spawn_config::SpawnConfig;
use foreman_core::{ContentBlock, MessagePayload, OutputEvent, ToolPayload};
use serde_json::Value;

const KNOWN_PATHS: &[&str] = &["~/.local/bin/opencode", "/usr/local/bin/opencode", "{name}"];
const CONTEXT_WINDOW_SIZE: usize = 128_000;

pub struct OpencodeProvider;

impl Provider for OpencodeProvider {
    fn name(&self) -> &'static str {
        "opencode"
    }

    fn known_paths(&self) -> &[&'static str] {
        KNOWN_PATHS
    }

    fn build_argv(&self, cfg: &SpawnConfig) -> Vec<String> {
        let mut argv = vec!["run".to_string(), "--print-logs".to_string(), "--format".to_string(), "json".to_string()];
        if let Some(model) = &cfg.model {
            argv.push("--model".to_string());
            argv.push(model.clone());
        }
        argv.push(cfg.prompt.clone());
        argv
    }

    fn parser(&self) -> &dyn EventParser {
        &OpencodeParser
    }

    fn mcp_config_subdir(&self) -> Option<&'static str> {
        None
    }
}

pub struct OpencodeParser;

impl EventParser for OpencodeParser {
    fn parse(&self, line: &[u8]) -> Result<ParsedEvent, ParseError> {
        let raw = line.to_vec();
        let value: Value = serde_json::from_slice(line).map_err(|e| ParseError(e.to_string()))?;
        let event_type = value.get("type").and_then(Value::as_str).unwrap_or_default();

        Ok(match event_type {
            "text" => {
                let text = value.get("text").and_then(Value::as_str).unwrap_or_default().trim().to_string();
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
            "tool" => {
                let name = value.get("name").and_then(Value::as_str).unwrap_or_default().to_string();
                let id = value.get("id").and_then(Value::as_str).unwrap_or_default().to_string();
                match value.get("status").and_then(Value::as_str) {
                    Some("end") => {
                        let output =
                            value.get("output").and_then(Value::as_str).unwrap_or_default().to_string();
                        let mut event = OutputEvent::new("tool_result", raw);
                        event.tool = Some(ToolPayload {
                            id: Some(id.clone()),
                            name: None,
                            input: None,
                            output: Some(output.clone()),
                        });
                        event.message = Some(MessagePayload {
                            content: vec![ContentBlock::ToolResult { tool_use_id: id, output }],
                            ..Default::default()
                        });
                        ParsedEvent::Event(event)
                    }
                    _ => {
                        let input = value.get("input").cloned().unwrap_or(Value::Null);
                        let mut event = OutputEvent::new("tool_use", raw);
                        event.tool = Some(ToolPayload {
                            id: Some(id.clone()),
                            name: Some(name.clone()),
                            input: Some(input.clone()),
                            output: None,
                        });
                        event.message = Some(MessagePayload {
                            content: vec![ContentBlock::ToolUse { id, name, input }],
                            ..Default::default()
                        });
                        ParsedEvent::Event(event)
                    }
                }
            }
            _ => ParsedEvent::Skip,
        })
    }

    fn context_window_size(&self) -> usize {
        CONTEXT_WINDOW_SIZE
    }
}

#[cfg(test)]
#[path = "opencode_tests.rs"]
mod tests;
