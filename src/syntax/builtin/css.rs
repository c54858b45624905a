//! CSS language definitions
//!
//! `css-kw` and `css-str` are helper languages for property names and
//! `url(...)` bodies embedded by the main stylesheet lexer.

use crate::error::Result;
use crate::syntax::lexer::SimpleLexer;
use crate::syntax::rules::StylePattern;
use crate::syntax::tokens::StyleTag;

const IDENT: &str = r"-?(?:[_a-z]|(?:\\[\da-f]+ ?))(?:[_a-z\d\-]|\\(?:\\[\da-f]+ ?))*";

pub fn css_language() -> Result<SimpleLexer> {
    SimpleLexer::new(
        vec![StylePattern::new(StyleTag::Plain, r"[ \t\r\n\f]+")?.with_shortcuts(" \t\r\n\x0c")],
        vec![
            StylePattern::new(StyleTag::String, r#""(?:[^\n\r\f\\"]|\\(?:\r\n?|\n|\f)|\\[\s\S])*""#)?,
            StylePattern::new(StyleTag::String, r"'(?:[^\n\r\f\\']|\\(?:\r\n?|\n|\f)|\\[\s\S])*'")?,
            StylePattern::embed("css-str", r#"(?i:url\(([^)"']+)\))"#)?,
            StylePattern::new(
                StyleTag::Keyword,
                r"(?i:(?:url|rgb|!important|@import|@page|@media|@charset|inherit)(?=[^\-\w]|$))",
            )?,
            StylePattern::embed("css-kw", &format!(r"(?i:({})\s*:)", IDENT))?,
            StylePattern::new(StyleTag::Comment, r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")?,
            StylePattern::new(StyleTag::Comment, r"(?:<!--|-->)")?,
            StylePattern::new(StyleTag::Literal, r"(?i:(?:\d+|\d*\.\d+)(?:%|[a-z]+)?)")?,
            StylePattern::new(StyleTag::Literal, r"(?i:#(?:[0-9a-f]{3}){1,2}\b)")?,
            StylePattern::new(StyleTag::Plain, &format!("(?i:{})", IDENT))?,
            StylePattern::new(StyleTag::Punctuation, r#"[^\s\w'"]+"#)?,
        ],
    )
}

/// Property names
pub fn css_keyword_language() -> Result<SimpleLexer> {
    SimpleLexer::new(vec![], vec![StylePattern::new(StyleTag::Keyword, &format!("(?i:{})", IDENT))?])
}

/// Unquoted `url(...)` bodies
pub fn css_string_language() -> Result<SimpleLexer> {
    SimpleLexer::new(vec![], vec![StylePattern::new(StyleTag::String, r#"[^)"']+"#)?])
}
