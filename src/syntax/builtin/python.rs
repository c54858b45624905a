//! Python language definition

use super::keywords;
use crate::error::Result;
use crate::syntax::lexer::SimpleLexer;
use crate::syntax::source::{source_decorator, SourceOptions};

/// Create the Python lexer
pub fn python_language() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions {
        keywords: keywords::python(),
        hash_comments: 1,
        multi_line_strings: true,
        triple_quoted_strings: true,
        ..Default::default()
    })
}
