// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn base_is_used_when_nothing_is_set() {
    assert_eq!(compose("base", None, None), "base");
}

#[test]
fn append_joins_with_exactly_two_newlines() {
    assert_eq!(compose("base", None, Some("extra")), "base\n\nextra");
}

#[test]
fn override_wins_over_append() {
    assert_eq!(compose("base", Some("override"), Some("extra")), "override");
}

#[test]
fn override_wins_over_base_alone() {
    assert_eq!(compose("base", Some("override"), None), "override");
}
