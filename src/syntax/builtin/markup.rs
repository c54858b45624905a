//! Markup language definitions
//!
//! The markup lexer only splits a document into text, comments,
//! declarations and tags. Tags are handed to the `in.tag` lexer, script
//! and style bodies to `js` and `css`, and processing instructions or
//! server-side blocks to whatever language their content looks like.

use crate::error::Result;
use crate::syntax::lexer::SimpleLexer;
use crate::syntax::rules::StylePattern;
use crate::syntax::tokens::StyleTag;

/// HTML, XML and friends
pub fn markup_language() -> Result<SimpleLexer> {
    SimpleLexer::new(
        vec![],
        vec![
            StylePattern::new(StyleTag::Plain, r"[^<?]+")?,
            StylePattern::new(StyleTag::Declaration, r"<!\w[^>]*(?:>|$)")?,
            StylePattern::new(StyleTag::Comment, r"<!--[\s\S]*?(?:-->|$)")?,
            // Unescaped content in an unknown language
            StylePattern::embed("", r"<\?([\s\S]+?)(?:\?>|$)")?,
            StylePattern::embed("", r"<%([\s\S]+?)(?:%>|$)")?,
            StylePattern::new(StyleTag::Punctuation, r"(?:<[%?]|[%?]>)")?,
            StylePattern::embed("", r"(?i:<xmp\b[^>]*>([\s\S]+?)</xmp\b[^>]*>)")?,
            StylePattern::embed("js", r"(?i:<script\b[^>]*>([\s\S]*?)(</script\b[^>]*>))")?,
            StylePattern::embed("css", r"(?i:<style\b[^>]*>([\s\S]*?)(</style\b[^>]*>))")?,
            StylePattern::embed("in.tag", r"(?i:(</?[a-z][^<>]*>))")?,
        ],
    )
}

/// Inside of a single tag: name, attributes and values
pub fn tag_language() -> Result<SimpleLexer> {
    SimpleLexer::new(
        vec![
            StylePattern::new(StyleTag::Plain, r"\s+")?.with_shortcuts(" \t\r\n"),
            StylePattern::new(StyleTag::AttribValue, r#"(?:"[^"]*"?|'[^']*'?)"#)?.with_shortcuts("\"'"),
        ],
        vec![
            StylePattern::new(StyleTag::Tag, r"(?i:^</?[a-z](?:[\w.:-]*\w)?|/?>$)")?,
            StylePattern::new(StyleTag::AttribName, r"(?i:(?!style[\s=]|on)[a-z](?:[\w:-]*\w)?)")?,
            StylePattern::embed("uq.val", r#"=\s*([^>'"\s]*(?:[^>'"\s/]|/(?=\s)))"#)?,
            StylePattern::new(StyleTag::Punctuation, r"[=<>/]+")?,
            StylePattern::embed("js", r#"(?i:on\w+\s*=\s*"([^"]+)")"#)?,
            StylePattern::embed("js", r"(?i:on\w+\s*=\s*'([^']+)')")?,
            StylePattern::embed("js", r#"(?i:on\w+\s*=\s*([^"'>\s]+))"#)?,
            StylePattern::embed("css", r#"(?i:style\s*=\s*"([^"]+)")"#)?,
            StylePattern::embed("css", r"(?i:style\s*=\s*'([^']+)')")?,
            StylePattern::embed("css", r#"(?i:style\s*=\s*([^"'>\s]+))"#)?,
        ],
    )
}

/// Unquoted attribute value
pub fn unquoted_value_language() -> Result<SimpleLexer> {
    SimpleLexer::new(vec![], vec![StylePattern::new(StyleTag::AttribValue, r"[\s\S]+")?])
}
