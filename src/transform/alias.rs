//! Tracks the local name the validation library is bound to in one file.

use tracing::trace;

use crate::{ast::statements::ImportStmt, config::TransformConfig};

#[derive(Debug, Clone, PartialEq)]
pub enum AliasState {
    /// No library import seen yet in this file
    Default,
    /// Bound by the default specifier of a library import
    Bound(String),
}

/// Alias in effect while translating annotations.
///
/// Handed to the translator and emitter explicitly, so neither reads any
/// per-file state of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationContext {
    pub alias: String,
}

impl TranslationContext {
    pub fn new(alias: impl Into<String>) -> Self {
        TranslationContext { alias: alias.into() }
    }
}

pub struct AliasTracker {
    state: AliasState,
    config: TransformConfig,
}

impl AliasTracker {
    pub fn new(config: &TransformConfig) -> Self {
        AliasTracker {
            state: AliasState::Default,
            config: config.clone(),
        }
    }

    pub fn on_file_enter(&mut self) {
        self.state = AliasState::Default;
    }

    /// Rebinds the alias when `import` pulls the library in with a default
    /// specifier. Any other import leaves the state alone. A later library
    /// import in the same file replaces an earlier binding.
    pub fn on_import(&mut self, import: &ImportStmt) {
        if !self.config.is_library_module(&import.source) {
            return;
        }

        match import.default_binding() {
            Some(local) => {
                trace!(module = %import.source, alias = local, "validation library alias bound");
                self.state = AliasState::Bound(local.to_string());
            }
            None => {
                trace!(module = %import.source, "library import without default binding, alias unchanged");
            }
        }
    }

    pub fn state(&self) -> &AliasState {
        &self.state
    }

    pub fn current_alias(&self) -> &str {
        match &self.state {
            AliasState::Default => &self.config.default_alias,
            AliasState::Bound(local) => local,
        }
    }

    pub fn context(&self) -> TranslationContext {
        TranslationContext::new(self.current_alias())
    }
}
