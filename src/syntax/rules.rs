//! Style pattern rules
//!
//! A style pattern pairs a prefix-anchored regular expression with the
//! style it assigns, or with the language a captured sub-span should be
//! handed to. Patterns optionally name the characters that select them
//! without trying any other pattern.
//!
//! Patterns the `regex` crate can express also get a linear-time twin,
//! which is preferred for matching. Only patterns with look-around run
//! on the backtracking engine, and those stop at [`BACKTRACK_LIMIT`].

use std::fmt;
use std::ops::Range;

use fancy_regex::{Regex, RegexBuilder};

use super::tokens::StyleTag;
use crate::error::{HighlightError, Result};

/// Backtracking steps one search on the backtracking engine may take
pub const BACKTRACK_LIMIT: usize = 1_000_000;

/// Compile `pattern` for the backtracking engine with [`BACKTRACK_LIMIT`]
pub(crate) fn compile(pattern: &str) -> fancy_regex::Result<Regex> {
    RegexBuilder::new(pattern).backtrack_limit(BACKTRACK_LIMIT).build()
}

/// What a pattern does with the text it matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternStyle {
    /// Assign a style to the whole token
    Tag(StyleTag),
    /// Hand capture group 1 to the lexer registered for this language.
    /// An empty id lets the registry infer the language from the text.
    Embed(String),
}

impl From<StyleTag> for PatternStyle {
    fn from(tag: StyleTag) -> Self {
        PatternStyle::Tag(tag)
    }
}

/// How a single token was classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The whole token carries one style
    Styled(StyleTag),
    /// `span` (relative to the token) is source in language `lang`
    Embedded { lang: String, span: Range<usize> },
}

/// A compiled style pattern
pub struct StylePattern {
    /// Style or embedding target
    pub style: PatternStyle,
    /// Pattern text as written, without the prefix anchor
    source: String,
    /// `source` anchored at the start of the haystack
    anchored: Regex,
    /// Linear-time form of `anchored`, absent when `source` uses look-around
    linear: Option<regex::Regex>,
    /// Characters that deterministically select this pattern
    shortcut_chars: Vec<char>,
}

impl StylePattern {
    /// Compile a pattern
    ///
    /// `pattern` must not carry its own leading anchor; inside it `^`
    /// means "start of the text being lexed" and `$` means its end.
    pub fn new(style: impl Into<PatternStyle>, pattern: &str) -> Result<Self> {
        let anchored_src = format!("^(?:{})", pattern);
        let anchored = compile(&anchored_src).map_err(|e| HighlightError::Pattern {
            pattern: pattern.to_string(),
            source: Box::new(e),
        })?;
        let linear = regex::Regex::new(&anchored_src).ok();
        Ok(Self {
            style: style.into(),
            source: pattern.to_string(),
            anchored,
            linear,
            shortcut_chars: Vec::new(),
        })
    }

    /// Compile a pattern whose capture group 1 is source in `lang`
    pub fn embed(lang: &str, pattern: &str) -> Result<Self> {
        Self::new(PatternStyle::Embed(lang.to_string()), pattern)
    }

    /// Builder: declare the shortcut characters for this pattern
    pub fn with_shortcuts(mut self, chars: &str) -> Self {
        self.shortcut_chars = chars.chars().collect();
        self
    }

    /// Pattern text as written
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Shortcut characters (empty if none were declared)
    pub fn shortcut_chars(&self) -> &[char] {
        &self.shortcut_chars
    }

    /// Whether matching runs in linear time
    pub fn is_linear(&self) -> bool {
        self.linear.is_some()
    }

    /// Length of the prefix of `text` this pattern matches
    ///
    /// Fails only when the backtracking engine gives up.
    pub fn match_len(&self, text: &str) -> fancy_regex::Result<Option<usize>> {
        if let Some(linear) = &self.linear {
            return Ok(linear.find(text).map(|m| m.end()));
        }
        Ok(self.anchored.find(text)?.map(|m| m.end()))
    }

    /// Check whether this pattern matches a prefix of `token`
    ///
    /// Engine errors (e.g. the backtracking limit) count as no match.
    pub fn is_match(&self, token: &str) -> bool {
        if let Some(linear) = &self.linear {
            return linear.is_match(token);
        }
        match self.anchored.is_match(token) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::debug!(pattern = %self.source, error = %e, "pattern failed to run");
                false
            }
        }
    }

    /// Span of capture group 1 when this pattern matches `token`
    ///
    /// Returns `None` when the pattern does not match, and `Some(None)`
    /// when it matches but group 1 did not participate.
    pub fn captured_span(&self, token: &str) -> Option<Option<Range<usize>>> {
        if let Some(linear) = &self.linear {
            return linear.captures(token).map(|caps| caps.get(1).map(|m| m.range()));
        }
        match self.anchored.captures(token) {
            Ok(Some(caps)) => Some(caps.get(1).map(|m| m.start()..m.end())),
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(pattern = %self.source, error = %e, "pattern failed to run");
                None
            }
        }
    }

    /// Classify `token` if this pattern matches it
    ///
    /// Embedding patterns that match without capturing group 1 degrade
    /// to [`StyleTag::Source`].
    pub fn match_token(&self, token: &str) -> Option<Resolution> {
        match &self.style {
            PatternStyle::Tag(tag) => self.is_match(token).then_some(Resolution::Styled(*tag)),
            PatternStyle::Embed(lang) => self.captured_span(token).map(|span| match span {
                Some(span) => Resolution::Embedded {
                    lang: lang.clone(),
                    span,
                },
                None => Resolution::Styled(StyleTag::Source),
            }),
        }
    }

    /// Classify `token`, assuming this pattern was selected for it
    ///
    /// A pattern chosen by shortcut keeps its style even if it does not
    /// match the token.
    pub fn resolve(&self, token: &str) -> Resolution {
        self.match_token(token).unwrap_or_else(|| match &self.style {
            PatternStyle::Tag(tag) => Resolution::Styled(*tag),
            PatternStyle::Embed(_) => Resolution::Styled(StyleTag::Source),
        })
    }
}

impl fmt::Debug for StylePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StylePattern")
            .field("style", &self.style)
            .field("source", &self.source)
            .field("linear", &self.linear.is_some())
            .field("shortcut_chars", &self.shortcut_chars)
            .finish()
    }
}
