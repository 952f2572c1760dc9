// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Provider`/`EventParser` trait pair every vendor CLI adapter implements.

use crate::error::ParseError;
use crate::spawn_config::SpawnConfig;
use foreman_core::OutputEvent;
use std::time::Duration;

/// A parsed line, or a sentinel meaning "no-op, drop this line" (a
/// "thinking" delta, or an assistant message that trims to nothing with no
/// tool-use content).
pub enum ParsedEvent {
    Event(OutputEvent),
    Skip,
}

/// Per-provider JSON-line parser. One instance handles every line from one
/// subprocess's stdout.
pub trait EventParser: Send + Sync {
    /// Parse one line of the child's stdout. Invalid JSON is a hard error;
    /// a recognized no-op line is [`ParsedEvent::Skip`].
    fn parse(&self, line: &[u8]) -> Result<ParsedEvent, ParseError>;

    /// The provider's context window size, for usage percentage
    /// calculations performed by callers.
    fn context_window_size(&self) -> usize;

    /// Extract a session reference from an event, when the generic
    /// `system/init` extraction the supervisor performs isn't sufficient.
    /// Most providers return `None` here since `init` extraction suffices.
    fn extract_session_ref(&self, event: &OutputEvent, raw: &[u8]) -> Option<String> {
        let _ = raw;
        event.session_id.clone()
    }

    /// Whether `event` indicates the provider's context window was
    /// exceeded, combining message-text patterns with an explicit error
    /// code. Providers override this to extend
    /// [`foreman_core::CONTEXT_EXCEEDED_PATTERNS`] with their own.
    fn is_context_exhausted(&self, event: &OutputEvent) -> bool {
        match &event.error {
            Some(error) => foreman_core::is_context_exhausted(
                &error.message,
                error.code.as_deref(),
                foreman_core::CONTEXT_EXCEEDED_PATTERNS,
            ),
            None => false,
        }
    }
}

/// One vendor CLI backend: how to find its executable, how to build its
/// argv, and which parser understands its event stream.
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Provider-specific search locations, checked before the system PATH.
    /// May contain `~` (home-relative) and a `{name}` placeholder for the
    /// executable's own name.
    fn known_paths(&self) -> &[&'static str];

    fn build_argv(&self, cfg: &SpawnConfig) -> Vec<String>;

    fn parser(&self) -> &dyn EventParser;

    /// The subdirectory an MCP config file lives under inside `work_dir`
    /// (e.g. `.cursor`), or `None` if this provider has no such file.
    fn mcp_config_subdir(&self) -> Option<&'static str>;

    /// Grace period between SIGTERM and SIGKILL on cancellation.
    fn kill_grace_period(&self) -> Duration {
        Duration::from_secs(5)
    }
}
