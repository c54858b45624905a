//! Configuration file support
//!
//! Loads settings from ~/.prettify.toml (or %USERPROFILE%\.prettify.toml on Windows)
//!
//! Example:
//! ```toml
//! # prettify configuration
//! slice-budget-ms = 250
//! line-numbers = true
//! tab-width = 4
//! default-lang = "py"
//! color = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use toml::{Table, Value};

use crate::error::{HighlightError, Result};

const FILE_NAME: &str = ".prettify.toml";

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Time a batch may run before yielding
    pub slice_budget: Duration,
    /// Whether to number lines when no hint says otherwise
    pub line_numbers: bool,
    /// Tab stop width used when extracting source
    pub tab_width: usize,
    /// Language used when neither the caller nor a hint names one
    pub default_lang: Option<String>,
    /// Whether terminal output is colored
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slice_budget: Duration::from_millis(250),
            line_numbers: false,
            tab_width: 8,
            default_lang: None,
            color: true,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(FILE_NAME))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME").ok().map(|home| PathBuf::from(home).join(FILE_NAME))
        }
    }

    /// Load configuration from file
    ///
    /// A missing file gives the defaults. A malformed one is reported and
    /// also gives the defaults.
    pub fn load() -> Self {
        Self::config_path().map_or_else(Self::default, |path| Self::load_from(&path))
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match Self::parse(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                Self::default()
            }
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents
            .parse()
            .map_err(|e: toml::de::Error| HighlightError::Config(e.to_string()))?;
        let mut config = Config::default();
        config.apply(&table);
        Ok(config)
    }

    /// Apply settings from a parsed table, ignoring unknown keys and
    /// values of the wrong type
    fn apply(&mut self, table: &Table) {
        if let Some(ms) = table.get("slice-budget-ms").and_then(Value::as_integer) {
            self.slice_budget = Duration::from_millis(ms.max(1) as u64); // Minimum 1ms
        }

        if let Some(on) = table.get("line-numbers").and_then(Value::as_bool) {
            self.line_numbers = on;
        }

        if let Some(n) = table.get("tab-width").and_then(Value::as_integer) {
            self.tab_width = n.clamp(1, 16) as usize; // Between 1 and 16
        }

        if let Some(lang) = table.get("default-lang").and_then(Value::as_str) {
            self.default_lang = (!lang.is_empty()).then(|| lang.to_string());
        }

        if let Some(on) = table.get("color").and_then(Value::as_bool) {
            self.color = on;
        }
    }

    /// Serialize to the config file format
    pub fn to_toml(&self) -> String {
        let mut table = Table::new();
        table.insert(
            "slice-budget-ms".into(),
            Value::Integer(self.slice_budget.as_millis().min(i64::MAX as u128) as i64),
        );
        table.insert("line-numbers".into(), Value::Boolean(self.line_numbers));
        table.insert("tab-width".into(), Value::Integer(self.tab_width as i64));
        if let Some(lang) = &self.default_lang {
            table.insert("default-lang".into(), Value::String(lang.clone()));
        }
        table.insert("color".into(), Value::Boolean(self.color));
        format!("# prettify configuration\n# Generated automatically\n\n{}", table)
    }

    /// Save current configuration to the config file, returning its path
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| HighlightError::Config("no home directory".into()))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save current configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml())?;
        Ok(())
    }
}
