//! Error types for prettify

use thiserror::Error;

/// Result type alias for prettify operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    #[error("Shortcut pattern `{0}` declares no shortcut characters")]
    MissingShortcut(String),

    #[error("No language handler for `{0}`")]
    NoHandler(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),
}
