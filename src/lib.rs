//! prettify - regex-driven syntax highlighting
//!
//! Source text is split into tokens by per-language lexers compiled from
//! ordered style patterns. A lexer can hand part of a token to another
//! language, so markup with embedded scripts and stylesheets highlights
//! in one pass.

pub mod config;
pub mod error;
pub mod extract;
pub mod highlighter;
pub mod hint;
pub mod render;
pub mod scheduler;
pub mod syntax;

pub use config::Config;
pub use error::{HighlightError, Result};
pub use highlighter::{HighlightOutput, HighlightRequest, Highlighter};
pub use render::OutputFormat;
pub use scheduler::{BatchScheduler, SliceOutcome};
