// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Gemini CLI adapter.

use crate::error::ParseError;
use crate::provider::{EventParser, ParsedEvent, Provider};
use crate::spawn_config::SpawnConfig;
use foreman_core::{ContentBlock, MessagePayload, OutputEvent, ToolPayload};
use serde_json::Value;

const KNOWN_PATHS: &[&str] = &["~/.local/bin/gemini", "/usr/local/bin/gemini", "{name}"];
const CONTEXT_WINDOW_SIZE: usize = 1_000_000;

pub struct GeminiProvider;

impl Provider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn known_paths(&self) -> &[&'static str] {
        KNOWN_PATHS
    }

    fn build_argv(&self, cfg: &SpawnConfig) -> Vec<String> {
        let mut argv = vec!["--output-format".to_string(), "json".to_string()];
        if let Some(model) = &cfg.model {
            argv.push("--model".to_string());
            argv.push(model.clone());
        }
        if cfg.skip_permissions {
            argv.push("--yolo".to_string());
        }
        argv.push("--prompt".to_string());
        argv.push(cfg.prompt.clone());
        argv
    }

    fn parser(&self) -> &dyn EventParser {
        &GeminiParser
    }

    fn mcp_config_subdir(&self) -> Option<&'static str> {
        None
    }
}

pub struct GeminiParser;

impl EventParser for GeminiParser {
    fn parse(&self, line: &[u8]) -> Result<ParsedEvent, ParseError> {
        let raw = line.to_vec();
        let value: Value = serde_json::from_slice(line).map_err(|e| ParseError(e.to_string()))?;
        let event_type = value.get("type").and_then(Value::as_str).unwrap_or_default();

        Ok(match event_type {
            "content" => {
                let text = value
                    .get("parts")
                    .and_then(Value::as_array)
                    .map(|parts| {
                        parts
                            .iter()
                            .filter_map(|part| part.get("text").and_then(Value::as_str))
                            .collect::<Vec<_>>()
                            .join("")
                    })
                    .unwrap_or_default();
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Ok(ParsedEvent::Skip);
                }
                let mut event = OutputEvent::new("assistant", raw);
                event.message = Some(MessagePayload {
                    role: value.get("role").and_then(Value::as_str).map(String::from),
                    content: vec![ContentBlock::Text { text }],
                    ..Default::default()
                });
                ParsedEvent::Event(event)
            }
            "functionCall" => {
                let name = value.get("name").and_then(Value::as_str).unwrap_or_default().to_string();
                let input = value.get("args").cloned().unwrap_or(Value::Null);
                let mut event = OutputEvent::new("tool_use", raw);
                event.tool = Some(ToolPayload {
                    id: None,
                    name: Some(name.clone()),
                    input: Some(input.clone()),
                    output: None,
                });
                event.message = Some(MessagePayload {
                    content: vec![ContentBlock::ToolUse { id: name.clone(), name, input }],
                    ..Default::default()
                });
                ParsedEvent::Event(event)
            }
            "functionResponse" => {
                let name = value.get("name").and_then(Value::as_str).unwrap_or_default().to_string();
                let output = value
                    .get("response")
                    .and_then(|r| r.get("output"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let mut event = OutputEvent::new("tool_result", raw);
                event.tool = Some(ToolPayload {
                    id: None,
                    name: None,
                    input: None,
                    output: Some(output.clone()),
                });
                event.message = Some(MessagePayload {
                    content: vec![ContentBlock::ToolResult { tool_use_id: name, output }],
                    ..Default::default()
                });
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
#[path = "gemini_tests.rs"]
mod tests;
