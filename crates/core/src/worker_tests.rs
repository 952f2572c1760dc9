// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parse_accepts_plain_id() {
    assert_eq!(WorkerId::parse("worker-1").unwrap(), WorkerId::new("worker-1"));
}

#[test]
fn parse_rejects_empty() {
    assert!(WorkerId::parse("").is_err());
}

#[test]
fn parse_rejects_whitespace() {
    assert!(WorkerId::parse("worker 1").is_err());
    assert!(WorkerId::parse("worker\t1").is_err());
    assert!(WorkerId::parse("worker\n").is_err());
}

#[test]
fn display_roundtrips() {
    let id = WorkerId::new("worker-7");
    assert_eq!(id.to_string(), "worker-7");
    assert_eq!(id.as_str(), "worker-7");
}

#[test]
fn borrow_str_lookup() {
    use std::collections::HashMap;
    let mut map: HashMap<WorkerId, u32> = HashMap::new();
    map.insert(WorkerId::new("worker-1"), 1);
    assert_eq!(map.get("worker-1"), Some(&1));
}
