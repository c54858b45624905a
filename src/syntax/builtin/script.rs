//! Shell, Perl and Ruby language definitions

use super::keywords;
use crate::error::Result;
use crate::syntax::lexer::SimpleLexer;
use crate::syntax::source::{source_decorator, SourceOptions};

pub fn shell_language() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions {
        keywords: keywords::shell(),
        hash_comments: 1,
        multi_line_strings: true,
        ..Default::default()
    })
}

/// Perl; regular expression literals may span lines
pub fn perl_language() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions {
        keywords: keywords::PERL.to_string(),
        hash_comments: 1,
        multi_line_strings: true,
        regex_literals: 2,
        ..Default::default()
    })
}

pub fn ruby_language() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions {
        keywords: keywords::ruby(),
        hash_comments: 1,
        multi_line_strings: true,
        regex_literals: 1,
        ..Default::default()
    })
}
