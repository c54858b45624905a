//! Configurable lexer factory for C-like and script languages
//!
//! Most programming languages share the same building blocks: string
//! literals in a few flavours, `#` and/or C-style comments, optional
//! regular expression literals, a keyword list, and the usual
//! identifier / number / punctuation cascade. [`source_decorator`]
//! assembles those fragments from a [`SourceOptions`] description.

use super::lexer::SimpleLexer;
use super::rules::StylePattern;
use super::tokens::StyleTag;
use crate::error::Result;

/// Tokens after which a `/` starts a regular expression literal rather
/// than a division. `^` is the start of the text being lexed.
const REGEXP_PRECEDER: &str = r"(?:^\.?|[+-]|[!=]=?=?|#|%=?|&&?=?|\(|\*=?|[+\-]=|->|/=?|::?|<<?=?|>>?>?=?|,|;|\?|@|\[|~|\{|\^\^?=?|\|\|?=?|break|case|continue|delete|do|else|finally|instanceof|return|throw|try|typeof)\s*";

/// Options describing a language family
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOptions {
    /// `'''` and `"""` strings (Python)
    pub triple_quoted_strings: bool,
    /// Strings may span lines; backquoted strings allowed
    pub multi_line_strings: bool,
    /// `@"..."` strings (C#)
    pub verbatim_strings: bool,
    /// `#` comments: 0 off, 1 to end of line, 2+ also `### ... ###` blocks
    pub hash_comments: u8,
    /// `//` and `/* */` comments
    pub c_style_comments: bool,
    /// `/.../` literals: 0 off, 1 single-line, 2+ may span lines
    pub regex_literals: u8,
    /// Pattern matching built-in type names
    pub types: Option<String>,
    /// Keywords separated by commas and/or whitespace
    pub keywords: String,
}

impl SourceOptions {
    /// Options with only a keyword list set
    pub fn with_keywords(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            ..Default::default()
        }
    }
}

/// Build the pattern for a keyword list, `None` if the list is empty
fn keyword_pattern(keywords: &str) -> Option<String> {
    let words: Vec<&str> = keywords
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(format!(r"(?:{})\b", words.join("|")))
    }
}

/// Regular expression literal body, optionally allowed to span lines
fn regex_literal(multi_line: bool) -> String {
    let excl = if multi_line { "" } else { r"\n\r" };
    let any = if multi_line { r"[\S\s]" } else { "." };
    format!(
        r"/(?=[^/*{excl}])(?:[^/\[\\{excl}]|\\{any}|\[(?:[^\\\]{excl}]|\\{any})*(?:\]|$))+/",
        excl = excl,
        any = any,
    )
}

/// Build a lexer for the language family described by `options`
pub fn source_decorator(options: &SourceOptions) -> Result<SimpleLexer> {
    let mut shortcut = Vec::new();
    let mut fallthrough = Vec::new();

    if options.triple_quoted_strings {
        shortcut.push(
            StylePattern::new(
                StyleTag::String,
                r#"(?:'''(?:[^'\\]|\\[\s\S]|'{1,2}(?:[^'\\]|\\[\s\S]))*(?:'''|$)|"""(?:[^"\\]|\\[\s\S]|"{1,2}(?:[^"\\]|\\[\s\S]))*(?:"""|$)|'(?:[^\\']|\\[\s\S])*(?:'|$)|"(?:[^\\"]|\\[\s\S])*(?:"|$))"#,
            )?
            .with_shortcuts("'\""),
        );
    } else if options.multi_line_strings {
        shortcut.push(
            StylePattern::new(
                StyleTag::String,
                r#"(?:'(?:[^\\']|\\[\s\S])*(?:'|$)|"(?:[^\\"]|\\[\s\S])*(?:"|$)|`(?:[^\\`]|\\[\s\S])*(?:`|$))"#,
            )?
            .with_shortcuts("'\"`"),
        );
    } else {
        shortcut.push(
            StylePattern::new(
                StyleTag::String,
                r#"(?:'(?:[^\\'\r\n]|\\.)*(?:'|$)|"(?:[^\\"\r\n]|\\.)*(?:"|$))"#,
            )?
            .with_shortcuts("\"'"),
        );
    }

    if options.verbatim_strings {
        fallthrough.push(StylePattern::new(StyleTag::String, r#"@"(?:[^"]|"")*(?:"|$)"#)?);
    }

    let hc = options.hash_comments;
    if hc > 0 {
        if options.c_style_comments {
            if hc > 1 {
                shortcut.push(
                    StylePattern::new(StyleTag::Comment, r"#(?:##(?:[^#]|#(?!##))*(?:###|$)|.*)")?
                        .with_shortcuts("#"),
                );
            } else {
                // Preprocessor directives stop short so a trailing comment
                // is lexed on its own
                shortcut.push(
                    StylePattern::new(
                        StyleTag::Comment,
                        r"#(?:(?:define|e(?:l|nd)if|else|error|ifn?def|include|line|pragma|undef|warning)\b|[^\r\n]*)",
                    )?
                    .with_shortcuts("#"),
                );
            }
            // #include <stdio.h>
            fallthrough.push(StylePattern::new(
                StyleTag::String,
                r"<(?:(?:(?:\.\./)*|/?)(?:[\w-]+(?:/[\w-]+)+)?[\w-]+\.h(?:h|pp|\+\+)?|[a-z]\w*)>",
            )?);
        } else {
            shortcut.push(StylePattern::new(StyleTag::Comment, r"#[^\r\n]*")?.with_shortcuts("#"));
        }
    }

    if options.c_style_comments {
        fallthrough.push(StylePattern::new(StyleTag::Comment, r"//[^\r\n]*")?);
        fallthrough.push(StylePattern::new(StyleTag::Comment, r"/\*[\s\S]*?(?:\*/|$)")?);
    }

    if options.regex_literals > 0 {
        let literal = regex_literal(options.regex_literals > 1);
        fallthrough.push(StylePattern::embed(
            "regex",
            &format!("{}({})", REGEXP_PRECEDER, literal),
        )?);
    }

    if let Some(types) = &options.types {
        fallthrough.push(StylePattern::new(StyleTag::Type, types)?);
    }

    if let Some(keywords) = keyword_pattern(&options.keywords) {
        fallthrough.push(StylePattern::new(StyleTag::Keyword, &keywords)?);
    }

    shortcut.push(StylePattern::new(StyleTag::Plain, r"\s+")?.with_shortcuts(" \r\n\t\u{a0}"));

    let mut punctuation = String::from(r#".[^\s\w.$@'"`/\\]*"#);
    if options.regex_literals > 0 {
        punctuation.push_str(r"(?!\s*/)");
    }

    fallthrough.extend([
        StylePattern::new(StyleTag::Literal, r"(?i:@[a-z_$][a-z_$@0-9]*)")?,
        StylePattern::new(StyleTag::Type, r"(?:[@_]?[A-Z]+[a-z][A-Za-z_$@0-9]*|\w+_t\b)")?,
        StylePattern::new(StyleTag::Plain, r"(?i:[a-z_$][a-z_$@0-9]*)")?,
        StylePattern::new(
            StyleTag::Literal,
            r"(?i:(?:0x[a-f0-9]+|(?:\d(?:_\d+)*\d*(?:\.\d*)?|\.\d+)(?:e[+\-]?\d+)?)[a-z]*)",
        )?
        .with_shortcuts("0123456789"),
        // Escaped characters, e.g. \" in shell, are not string starts
        StylePattern::new(StyleTag::Plain, r"\\[\s\S]?")?,
        StylePattern::new(StyleTag::Punctuation, &punctuation)?,
    ]);

    SimpleLexer::new(shortcut, fallthrough)
}
