// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_sets_type_and_raw_with_defaults_elsewhere() {
    let event = OutputEvent::new("assistant", b"{\"type\":\"assistant\"}".to_vec());
    assert_eq!(event.event_type, "assistant");
    assert_eq!(event.raw, b"{\"type\":\"assistant\"}");
    assert!(event.message.is_none());
    assert!(event.error.is_none());
}

#[test]
fn raw_is_not_serialized() {
    let event = OutputEvent::new("result", b"raw bytes".to_vec());
    let json = serde_json::to_string(&event).unwrap();
    assert!(!json.contains("raw"));
}

#[yare::parameterized(
    matches_pattern = { "Prompt is too long for this model", None, true },
    matches_other_pattern = { "Context window exceeded: reduce input", None, true },
    matches_explicit_code = { "some opaque failure", Some("invalid_request"), true },
    no_match = { "network timeout", Some("rate_limited"), false },
)]
fn is_context_exhausted_combines_text_and_code(message: &str, code: Option<&str>, expected: bool) {
    assert_eq!(
        is_context_exhausted(message, code, CONTEXT_EXCEEDED_PATTERNS),
        expected
    );
}

#[test]
fn usage_context_tokens_excludes_output() {
    let usage = Usage {
        input_tokens: 10,
        output_tokens: 999,
        cache_read_tokens: 5,
        cache_creation_tokens: 2,
    };
    assert_eq!(usage.context_tokens(), 17);
}

#[test]
fn content_block_tags_round_trip() {
    let block = ContentBlock::ToolUse {
        id: "t1".to_string(),
        name: "Bash".to_string(),
        input: serde_json::json!({"command": "ls"}),
    };
    let json = serde_json::to_string(&block).unwrap();
    assert!(json.contains("\"type\":\"tool_use\""));
    let round_tripped: ContentBlock = serde_json::from_str(&json).unwrap();
    assert_eq!(round_tripped, block);
}
