// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide, read-only-after-construction map of provider name to
//! implementation.

use crate::error::SupervisorError;
use crate::provider::Provider;
use crate::providers::{claude, codex, cursor, gemini, opencode};
use std::collections::HashMap;
use std::sync::Arc;

/// String-keyed factory of [`Provider`] implementations, built once at
/// startup. Lookups afterward are read-only. Providers are held behind `Arc`
/// so a [`crate::supervisor::Supervisor`] can own one for the lifetime of its
/// background pump task.
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Arc<dyn Provider>>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        let mut providers: HashMap<&'static str, Arc<dyn Provider>> = HashMap::new();
        for provider in [
            Arc::new(claude::ClaudeProvider) as Arc<dyn Provider>,
            Arc::new(codex::CodexProvider) as Arc<dyn Provider>,
            Arc::new(gemini::GeminiProvider) as Arc<dyn Provider>,
            Arc::new(cursor::CursorProvider) as Arc<dyn Provider>,
            Arc::new(opencode::OpencodeProvider) as Arc<dyn Provider>,
        ] {
            providers.insert(provider.name(), provider);
        }
        Self { providers }
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Provider>, SupervisorError> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| SupervisorError::UnknownProvider(name.to_string()))
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.providers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Register an additional provider, overwriting any existing entry
    /// under the same name. Test-only: production callers only ever use
    /// the fixed set built by [`Default::default`].
    #[cfg(any(test, feature = "test-support"))]
    pub fn insert_test_provider(&mut self, provider: Arc<dyn Provider>) {
        self.providers.insert(provider.name(), provider);
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
