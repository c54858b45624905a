//! Language handler registry
//!
//! Maps language ids and file extensions to lexers. Registration is
//! first-come: a key that is already taken keeps its first handler.
//! Lookups for unknown keys fall back to a default handler picked from
//! the first non-whitespace character of the text.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::builtin;
use super::lexer::Lexer;
use crate::error::Result;

/// Handler used for text that looks like markup
pub const DEFAULT_MARKUP: &str = "default-markup";
/// Handler used for everything else
pub const DEFAULT_CODE: &str = "default-code";

/// Language id / extension -> lexer table
#[derive(Default)]
pub struct LangRegistry {
    handlers: HashMap<String, Arc<dyn Lexer>>,
}

impl LangRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in languages
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        builtin::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Register a handler under each of `extensions`
    ///
    /// Keys already registered are skipped with a warning. Returns the
    /// number of keys that now point at `handler`.
    pub fn register(&mut self, handler: Arc<dyn Lexer>, extensions: &[&str]) -> usize {
        let mut accepted = 0;
        for ext in extensions {
            if self.handlers.contains_key(*ext) {
                tracing::warn!(extension = %ext, "cannot override language handler");
                continue;
            }
            self.handlers.insert(ext.to_string(), Arc::clone(&handler));
            accepted += 1;
        }
        accepted
    }

    /// Register a lexer or matcher closure under each of `extensions`
    pub fn register_lexer(&mut self, lexer: impl Lexer + 'static, extensions: &[&str]) -> usize {
        self.register(Arc::new(lexer), extensions)
    }

    /// Get the handler registered under exactly `ext`
    pub fn get(&self, ext: &str) -> Option<&dyn Lexer> {
        self.handlers.get(ext).map(|h| h.as_ref())
    }

    /// Check whether `ext` is registered
    pub fn contains(&self, ext: &str) -> bool {
        self.handlers.contains_key(ext)
    }

    /// Find the handler for `ext`, inferring a default from `source`
    /// when `ext` is missing or unknown
    pub fn resolve(&self, ext: Option<&str>, source: &str) -> Option<&dyn Lexer> {
        if let Some(handler) = ext.and_then(|e| self.get(e)) {
            return Some(handler);
        }
        let fallback = Self::default_language(source);
        tracing::debug!(requested = ?ext, fallback, "using default language handler");
        self.get(fallback)
    }

    /// Default language id for `source`
    ///
    /// Markup if the first non-whitespace character is `<`, code otherwise.
    pub fn default_language(source: &str) -> &'static str {
        if source.trim_start().starts_with('<') {
            DEFAULT_MARKUP
        } else {
            DEFAULT_CODE
        }
    }

    /// Registered language id for a file name, from its extension
    pub fn detect_language(&self, filename: &Path) -> Option<String> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.contains(&ext).then_some(ext)
    }

    /// List registered keys, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}
