// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;

#[test]
fn expand_substitutes_name_placeholder() {
    let path = expand("/usr/local/bin/{name}", "claude");
    assert_eq!(path, PathBuf::from("/usr/local/bin/claude"));
}

#[test]
fn discover_finds_a_known_path_hit() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("claude");
    fs::write(&exe, b"#!/bin/sh\n").unwrap();

    let template: &'static str = Box::leak(dir.path().join("{name}").display().to_string().into_boxed_str());
    let found = discover("claude", "claude", &[template]).unwrap();
    assert_eq!(found, exe);
}

#[test]
fn discover_reports_every_checked_location_on_failure() {
    let err = discover("claude", "definitely-not-on-this-machine-xyz", &["/nonexistent/{name}"])
        .unwrap_err();
    match err {
        SupervisorError::ExecutableNotFound { provider, checked } => {
            assert_eq!(provider, "claude");
            assert!(checked.iter().any(|c| c.contains("/nonexistent/")));
            assert!(checked.iter().any(|c| c.contains("$PATH")));
        }
        _ => panic!("expected ExecutableNotFound"),
    }
}
