// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn parse(line: &str) -> ParsedEvent {
    ClaudeParser.parse(line.as_bytes()).unwrap()
}

#[test]
fn system_init_extracts_session_and_work_dir() {
    let event = parse(
        r#"{"type":"system","subtype":"init","session_id":"sess-1","cwd":"/repo"}"#,
    );
    match event {
        ParsedEvent::Event(event) => {
            assert_eq!(event.event_type, "system");
            assert_eq!(event.session_id.as_deref(), Some("sess-1"));
            assert_eq!(event.work_dir.as_deref(), Some("/repo"));
        }
        ParsedEvent::Skip => panic!("expected an event"),
    }
}

#[test]
fn tool_call_started_maps_to_tool_use() {
    let line = r#"{"type":"tool_call","subtype":"started","call_id":"t1","tool_call":{"shellToolCall":{"args":{"command":"ls"}}}}"#;
    match parse(line) {
        ParsedEvent::Event(event) => {
            assert_eq!(event.event_type, "tool_use");
            let tool = event.tool.unwrap();
            assert_eq!(tool.id.as_deref(), Some("t1"));
            assert_eq!(tool.name.as_deref(), Some("Bash"));

            let content = &event.message.unwrap().content;
            assert_eq!(content.len(), 1);
            match &content[0] {
                ContentBlock::ToolUse { id, name, .. } => {
                    assert_eq!(id, "t1");
                    assert_eq!(name, "Bash");
                }
                other => panic!("expected ToolUse, got {other:?}"),
            }
        }
        ParsedEvent::Skip => panic!("expected an event"),
    }
}

#[test]
fn tool_call_completed_maps_to_tool_result() {
    let line = r#"{"type":"tool_call","subtype":"completed","call_id":"t1","tool_call":{"result":{"success":{"stdout":"file.txt\n"}}}}"#;
    match parse(line) {
        ParsedEvent::Event(event) => {
            assert_eq!(event.event_type, "tool_result");
            assert_eq!(event.tool.unwrap().output.as_deref(), Some("file.txt\n"));
            match &event.message.unwrap().content[0] {
                ContentBlock::ToolResult { tool_use_id, output } => {
                    assert_eq!(tool_use_id, "t1");
                    assert_eq!(output, "file.txt\n");
                }
                other => panic!("expected ToolResult, got {other:?}"),
            }
        }
        ParsedEvent::Skip => panic!("expected an event"),
    }
}

#[test]
fn assistant_text_is_trimmed() {
    let line = r#"{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"  hello  "}]}}"#;
    match parse(line) {
        ParsedEvent::Event(event) => match &event.message.unwrap().content[0] {
            ContentBlock::Text { text } => assert_eq!(text, "hello"),
            other => panic!("expected Text, got {other:?}"),
        },
        ParsedEvent::Skip => panic!("expected an event"),
    }
}

#[test]
fn assistant_with_only_blank_text_and_no_tool_use_is_skipped() {
    let line = r#"{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"   "}]}}"#;
    assert!(matches!(parse(line), ParsedEvent::Skip));
}

#[test]
fn assistant_with_blank_text_but_tool_use_is_not_skipped() {
    let line = r#"{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":""},{"type":"tool_use","id":"t1","name":"Bash","input":{}}]}}"#;
    assert!(matches!(parse(line), ParsedEvent::Event(_)));
}

#[test]
fn assistant_usage_excludes_output_tokens_from_context_tokens() {
    let line = r#"{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"hi"}],"usage":{"input_tokens":10,"output_tokens":20,"cache_read_input_tokens":5,"cache_creation_input_tokens":2}}}"#;
    match parse(line) {
        ParsedEvent::Event(event) => {
            let usage = event.usage.unwrap();
            assert_eq!(usage.context_tokens(), 17);
        }
        ParsedEvent::Skip => panic!("expected an event"),
    }
}

#[test]
fn error_with_matching_code_is_context_exceeded() {
    let line = r#"{"type":"error","error":{"code":"invalid_request","message":"boom"}}"#;
    match parse(line) {
        ParsedEvent::Event(event) => {
            assert_eq!(event.error.unwrap().reason, Some(ErrorReason::ContextExceeded));
        }
        ParsedEvent::Skip => panic!("expected an event"),
    }
}

#[test]
fn error_with_matching_text_is_context_exceeded() {
    let line = r#"{"type":"error","error":{"message":"Prompt is too long for this model"}}"#;
    match parse(line) {
        ParsedEvent::Event(event) => {
            assert_eq!(event.error.unwrap().reason, Some(ErrorReason::ContextExceeded));
        }
        ParsedEvent::Skip => panic!("expected an event"),
    }
}

#[test]
fn unrelated_error_has_no_reason() {
    let line = r#"{"type":"error","error":{"message":"network timeout"}}"#;
    match parse(line) {
        ParsedEvent::Event(event) => assert_eq!(event.error.unwrap().reason, None),
        ParsedEvent::Skip => panic!("expected an event"),
    }
}

#[test]
fn invalid_json_is_a_parse_error() {
    assert!(ClaudeParser.parse(b"not json").is_err());
}

#[test]
fn unrecognized_event_type_passes_through() {
    match parse(r#"{"type":"thinking_delta"}"#) {
        ParsedEvent::Event(event) => assert_eq!(event.event_type, "thinking_delta"),
        ParsedEvent::Skip => panic!("expected an event"),
    }
}

#[test]
fn empty_object_passes_through_with_empty_type() {
    match parse("{}") {
        ParsedEvent::Event(event) => assert_eq!(event.event_type, ""),
        ParsedEvent::Skip => panic!("expected an event"),
    }
}

#[test]
fn build_argv_includes_resume_and_model_flags() {
    let mut cfg = SpawnConfig::new("/repo", "do the thing");
    cfg = cfg.with_model("opus").with_session_id("sess-1").with_skip_permissions(true);
    let argv = ClaudeProvider.build_argv(&cfg);
    assert!(argv.contains(&"--model".to_string()));
    assert!(argv.contains(&"opus".to_string()));
    assert!(argv.contains(&"--resume".to_string()));
    assert!(argv.contains(&"--dangerously-skip-permissions".to_string()));
    assert_eq!(argv.last(), Some(&"do the thing".to_string()));
}

#[test]
fn context_window_size_is_claudes() {
    assert_eq!(ClaudeParser.context_window_size(), 200_000);
}
