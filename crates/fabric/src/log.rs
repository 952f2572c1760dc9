// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use foreman_core::{Clock, MessageEntry, MessageType};
use parking_lot::Mutex;
use std::collections::HashMap;

struct Inner {
    entries: Vec<MessageEntry>,
    cursors: HashMap<String, usize>,
}

/// Append-only log of [`MessageEntry`], with a per-agent read cursor.
///
/// Entries and cursors share a single lock: advancing a cursor to "current
/// length" must see a consistent snapshot of the log, so the two can't be
/// guarded independently without risking a cursor racing ahead of an
/// in-flight append.
pub struct Fabric<C: Clock> {
    clock: C,
    inner: Mutex<Inner>,
}

impl<C: Clock> Fabric<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            inner: Mutex::new(Inner {
                entries: Vec::new(),
                cursors: HashMap::new(),
            }),
        }
    }

    /// Append an entry and return a copy of the entry as stored.
    pub fn append(
        &self,
        from: impl Into<String>,
        to: impl Into<String>,
        content: impl Into<String>,
        kind: MessageType,
    ) -> MessageEntry {
        let mut inner = self.inner.lock();
        let entry = MessageEntry {
            id: inner.entries.len() as u64,
            timestamp: self.clock.epoch_ms(),
            from: from.into(),
            to: to.into(),
            content: content.into(),
            kind,
        };
        inner.entries.push(entry.clone());
        entry
    }

    /// Every entry at or after `agent_id`'s read cursor, regardless of
    /// recipient — every agent sees every entry. Returns an owned copy, so
    /// later appends never affect an already-returned slice.
    pub fn unread_for(&self, agent_id: &str) -> Vec<MessageEntry> {
        let inner = self.inner.lock();
        let cursor = inner.cursors.get(agent_id).copied().unwrap_or(0);
        inner.entries.get(cursor..).map(|s| s.to_vec()).unwrap_or_default()
    }

    /// Advance `agent_id`'s cursor to the current log length.
    pub fn mark_read(&self, agent_id: &str) {
        let mut inner = self.inner.lock();
        let len = inner.entries.len();
        inner.cursors.insert(agent_id.to_string(), len);
    }

    /// Full snapshot of the log in insertion order.
    pub fn entries(&self) -> Vec<MessageEntry> {
        self.inner.lock().entries.clone()
    }

    /// The tail of the log: the last `limit` entries, or the entire log
    /// when `limit` is `None`.
    pub fn tail(&self, limit: Option<usize>) -> Vec<MessageEntry> {
        let inner = self.inner.lock();
        match limit {
            Some(n) => inner.entries.iter().rev().take(n).rev().cloned().collect(),
            None => inner.entries.clone(),
        }
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
