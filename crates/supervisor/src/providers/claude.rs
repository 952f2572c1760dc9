// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Claude Code CLI adapter: known paths, argv construction, and the
//! concrete line parser for its `stream-json` output format.

use crate::error::ParseError;
use crate::provider::{EventParser, ParsedEvent, Provider};
use crate::spawn_config::SpawnConfig;
use foreman_core::{ContentBlock, ErrorReason, EventError, MessagePayload, OutputEvent, ToolPayload, Usage};
use serde_json::Value;

const KNOWN_PATHS: &[&str] =
    &["~/.claude/local/claude", "~/.local/bin/claude", "/usr/local/bin/claude", "{name}"];

const CONTEXT_WINDOW_SIZE: usize = 200_000;

pub struct ClaudeProvider;

impl Provider for ClaudeProvider {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn known_paths(&self) -> &[&'static str] {
        KNOWN_PATHS
    }

    fn build_argv(&self, cfg: &SpawnConfig) -> Vec<String> {
        let mut argv = vec![
            "--print".to_string(),
            "--output-format".to_string(),
            "stream-json".to_string(),
            "--verbose".to_string(),
        ];
        if let Some(system_prompt) = &cfg.system_prompt {
            argv.push("--append-system-prompt".to_string());
            argv.push(system_prompt.clone());
        }
        if let Some(model) = &cfg.model {
            argv.push("--model".to_string());
            argv.push(model.clone());
        }
        if let Some(session_id) = &cfg.session_id {
            argv.push("--resume".to_string());
            argv.push(session_id.clone());
        }
        if cfg.skip_permissions {
            argv.push("--dangerously-skip-permissions".to_string());
        }
        argv.push(cfg.prompt.clone());
        argv
    }

    fn parser(&self) -> &dyn EventParser {
        &ClaudeParser
    }

    fn mcp_config_subdir(&self) -> Option<&'static str> {
        None
    }
}

pub struct ClaudeParser;

impl EventParser for ClaudeParser {
    fn parse(&self, line: &[u8]) -> Result<ParsedEvent, ParseError> {
        let raw = line.to_vec();
        let value: Value = serde_json::from_slice(line).map_err(|e| ParseError(e.to_string()))?;
        let event_type = value.get("type").and_then(Value::as_str).unwrap_or_default();

        Ok(match event_type {
            "system" => parse_system(&value, raw),
            "assistant" => parse_assistant(&value, raw),
            "tool_call" => parse_tool_call(&value, raw),
            "result" => parse_result(&value, raw),
            "error" => parse_error_event(&value, raw),
            other => ParsedEvent::Event(OutputEvent::new(other, raw)),
        })
    }

    fn context_window_size(&self) -> usize {
        CONTEXT_WINDOW_SIZE
    }
}

fn parse_system(value: &Value, raw: Vec<u8>) -> ParsedEvent {
    let subtype = value.get("subtype").and_then(Value::as_str).map(String::from);

    let mut event = OutputEvent::new("system", raw);
    if subtype.as_deref() == Some("init") {
        event.session_id = value.get("session_id").and_then(Value::as_str).map(String::from);
        event.work_dir = value.get("cwd").and_then(Value::as_str).map(String::from);
    }
    event.subtype = subtype;
    ParsedEvent::Event(event)
}

fn parse_usage(value: &Value) -> Option<Usage> {
    let usage = value.get("usage")?;
    Some(Usage {
        input_tokens: usage.get("input_tokens").and_then(Value::as_u64).unwrap_or(0),
        output_tokens: usage.get("output_tokens").and_then(Value::as_u64).unwrap_or(0),
        cache_read_tokens: usage.get("cache_read_input_tokens").and_then(Value::as_u64).unwrap_or(0),
        cache_creation_tokens: usage
            .get("cache_creation_input_tokens")
            .and_then(Value::as_u64)
            .unwrap_or(0),
    })
}

fn parse_content_block(block: &Value) -> Option<ContentBlock> {
    match block.get("type").and_then(Value::as_str)? {
        "text" => Some(ContentBlock::Text {
            text: block.get("text").and_then(Value::as_str).unwrap_or_default().to_string(),
        }),
        "tool_use" => Some(ContentBlock::ToolUse {
            id: block.get("id").and_then(Value::as_str).unwrap_or_default().to_string(),
            name: block.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
            input: block.get("input").cloned().unwrap_or(Value::Null),
        }),
        "tool_result" => Some(ContentBlock::ToolResult {
            tool_use_id: block.get("tool_use_id").and_then(Value::as_str).unwrap_or_default().to_string(),
            output: block.get("content").and_then(Value::as_str).unwrap_or_default().to_string(),
        }),
        _ => None,
    }
}

fn parse_assistant(value: &Value, raw: Vec<u8>) -> ParsedEvent {
    let message = value.get("message");
    let blocks: Vec<ContentBlock> = message
        .and_then(|m| m.get("content"))
        .and_then(Value::as_array)
        .map(|blocks| blocks.iter().filter_map(parse_content_block).collect())
        .unwrap_or_default();

    let has_tool_use = blocks.iter().any(|b| matches!(b, ContentBlock::ToolUse { .. }));
    let all_text_empty = blocks.iter().all(|b| match b {
        ContentBlock::Text { text } => text.trim().is_empty(),
        _ => false,
    });
    if !has_tool_use && all_text_empty {
        return ParsedEvent::Skip;
    }

    let trimmed: Vec<ContentBlock> = blocks
        .into_iter()
        .map(|b| match b {
            ContentBlock::Text { text } => ContentBlock::Text { text: text.trim().to_string() },
            other => other,
        })
        .collect();

    let usage = message.and_then(parse_usage);
    let payload = MessagePayload {
        id: message.and_then(|m| m.get("id")).and_then(Value::as_str).map(String::from),
        role: message.and_then(|m| m.get("role")).and_then(Value::as_str).map(String::from),
        model: message.and_then(|m| m.get("model")).and_then(Value::as_str).map(String::from),
        content: trimmed,
        usage,
        stop_reason: message.and_then(|m| m.get("stop_reason")).and_then(Value::as_str).map(String::from),
    };

    let mut event = OutputEvent::new("assistant", raw);
    event.usage = usage;
    event.message = Some(payload);
    ParsedEvent::Event(event)
}

/// Map a `tool_call` object's single variant key (e.g. `shellToolCall`) to a
/// unified tool name, plus its `args` payload.
fn tool_name_and_args(tool_call: &Value) -> (String, Value) {
    let Some((key, inner)) = tool_call.as_object().and_then(|obj| obj.iter().next()) else {
        return ("unknown".to_string(), Value::Null);
    };
    let name = match key.as_str() {
        "shellToolCall" => "Bash".to_string(),
        "readToolCall" => "Read".to_string(),
        "writeToolCall" => "Write".to_string(),
        "editToolCall" => "Edit".to_string(),
        "globToolCall" => "Glob".to_string(),
        "grepToolCall" => "Grep".to_string(),
        other => other.to_string(),
    };
    (name, inner.get("args").cloned().unwrap_or(Value::Null))
}

fn tool_result_output(tool_call: &Value) -> String {
    tool_call
        .pointer("/result/success/stdout")
        .or_else(|| tool_call.pointer("/result/success/output"))
        .or_else(|| tool_call.pointer("/result/failure/stderr"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn parse_tool_call(value: &Value, raw: Vec<u8>) -> ParsedEvent {
    let subtype = value.get("subtype").and_then(Value::as_str).unwrap_or_default();
    let call_id = value.get("call_id").and_then(Value::as_str).unwrap_or_default().to_string();
    let tool_call = value.get("tool_call");

    match subtype {
        "started" => {
            let (name, input) =
                tool_call.map(tool_name_and_args).unwrap_or_else(|| ("unknown".to_string(), Value::Null));
            let mut event = OutputEvent::new("tool_use", raw);
            event.tool = Some(ToolPayload {
                id: Some(call_id.clone()),
                name: Some(name.clone()),
                input: Some(input.clone()),
                output: None,
            });
            event.message = Some(MessagePayload {
                content: vec![ContentBlock::ToolUse { id: call_id, name, input }],
                ..Default::default()
            });
            ParsedEvent::Event(event)
        }
        "completed" => {
            let output = tool_call.map(tool_result_output).unwrap_or_default();
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
        _ => ParsedEvent::Skip,
    }
}

fn parse_result(value: &Value, raw: Vec<u8>) -> ParsedEvent {
    let mut event = OutputEvent::new("result", raw);
    event.subtype = value.get("subtype").and_then(Value::as_str).map(String::from);
    event.result = value.get("result").and_then(Value::as_str).map(String::from);
    event.total_cost_usd = value.get("total_cost_usd").and_then(Value::as_f64);
    event.duration_ms = value.get("duration_ms").and_then(Value::as_u64);
    event.is_error_result = value.get("is_error").and_then(Value::as_bool);
    event.usage = parse_usage(value);
    ParsedEvent::Event(event)
}

fn parse_error_event(value: &Value, raw: Vec<u8>) -> ParsedEvent {
    let error_value = value.get("error").cloned().unwrap_or_else(|| value.clone());
    let (message, code) = match &error_value {
        Value::String(s) => (s.clone(), None),
        Value::Object(_) => (
            error_value.get("message").and_then(Value::as_str).unwrap_or_default().to_string(),
            error_value.get("code").and_then(Value::as_str).map(String::from),
        ),
        _ => (String::new(), None),
    };
    let reason = foreman_core::is_context_exhausted(&message, code.as_deref(), foreman_core::CONTEXT_EXCEEDED_PATTERNS)
        .then_some(ErrorReason::ContextExceeded);

    let mut event = OutputEvent::new("error", raw);
    event.error = Some(EventError { code, message, reason });
    ParsedEvent::Event(event)
}

#[cfg(test)]
#[path = "claude_tests.rs"]
mod tests;
