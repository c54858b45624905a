//! C-family language definitions (C/C++, C#, Java, JSON) and the
//! default lexer for code of unknown language

use super::keywords;
use crate::error::Result;
use crate::syntax::lexer::SimpleLexer;
use crate::syntax::source::{source_decorator, SourceOptions};

/// Lexer for text whose language is unknown
///
/// Knows every built-in keyword and accepts both `#` and C comments.
pub fn default_code() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions {
        keywords: keywords::all(),
        hash_comments: 1,
        c_style_comments: true,
        multi_line_strings: true,
        regex_literals: 1,
        ..Default::default()
    })
}

/// C and C++
pub fn c_language() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions {
        keywords: keywords::cpp(),
        hash_comments: 1,
        c_style_comments: true,
        types: Some(keywords::C_TYPES.to_string()),
        ..Default::default()
    })
}

pub fn csharp_language() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions {
        keywords: keywords::csharp(),
        hash_comments: 1,
        c_style_comments: true,
        verbatim_strings: true,
        types: Some(keywords::C_TYPES.to_string()),
        ..Default::default()
    })
}

pub fn java_language() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions {
        keywords: keywords::java(),
        c_style_comments: true,
        ..Default::default()
    })
}

pub fn json_language() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions::with_keywords(keywords::JSON))
}
