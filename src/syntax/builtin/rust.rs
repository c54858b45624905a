//! Rust language definition

use super::keywords;
use crate::error::Result;
use crate::syntax::lexer::SimpleLexer;
use crate::syntax::source::{source_decorator, SourceOptions};

/// Create the Rust lexer
pub fn rust_language() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions {
        keywords: keywords::rust(),
        c_style_comments: true,
        ..Default::default()
    })
}
