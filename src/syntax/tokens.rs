//! Style tags for syntax highlighting
//!
//! This module defines the categories a lexer assigns to spans of
//! source text, their short class names, and their default terminal
//! styles.

use super::style::{Color, Style};

/// Categories a span of source text can be classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// String literals ("...", '...', heredocs)
    String,
    /// Language keywords (if, else, fn, let, etc.)
    Keyword,
    /// Source code comments
    Comment,
    /// Type names
    Type,
    /// Numeric and other literal values
    Literal,
    /// Operators and punctuation
    Punctuation,
    /// Plain text, identifiers and whitespace
    Plain,
    /// Markup tag names
    Tag,
    /// Markup declarations (<!DOCTYPE ...>)
    Declaration,
    /// Embedded source that could not be handed to another lexer
    Source,
    /// Markup attribute names
    AttribName,
    /// Markup attribute values
    AttribValue,
    /// Text that must not be highlighted
    NoCode,
}

impl StyleTag {
    /// Every tag, in declaration order
    pub const ALL: [StyleTag; 13] = [
        StyleTag::String,
        StyleTag::Keyword,
        StyleTag::Comment,
        StyleTag::Type,
        StyleTag::Literal,
        StyleTag::Punctuation,
        StyleTag::Plain,
        StyleTag::Tag,
        StyleTag::Declaration,
        StyleTag::Source,
        StyleTag::AttribName,
        StyleTag::AttribValue,
        StyleTag::NoCode,
    ];

    /// Short class name used in rendered markup
    pub fn class_name(&self) -> &'static str {
        match self {
            StyleTag::String => "str",
            StyleTag::Keyword => "kwd",
            StyleTag::Comment => "com",
            StyleTag::Type => "typ",
            StyleTag::Literal => "lit",
            StyleTag::Punctuation => "pun",
            StyleTag::Plain => "pln",
            StyleTag::Tag => "tag",
            StyleTag::Declaration => "dec",
            StyleTag::Source => "src",
            StyleTag::AttribName => "atn",
            StyleTag::AttribValue => "atv",
            StyleTag::NoCode => "nocode",
        }
    }

    /// Parse a tag from its class name
    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.class_name() == name)
    }

    /// Get the default terminal style for this tag
    pub fn default_style(&self) -> Style {
        match self {
            StyleTag::String => Style::fg(Color::Green),
            StyleTag::Keyword => Style::fg(Color::Magenta).with_bold(),
            StyleTag::Comment => Style::fg(Color::BrightBlack).with_italic(),
            StyleTag::Type => Style::fg(Color::Yellow),
            StyleTag::Literal => Style::fg(Color::Cyan),
            StyleTag::Punctuation => Style::default(),
            StyleTag::Plain => Style::default(),
            StyleTag::Tag => Style::fg(Color::Blue).with_bold(),
            StyleTag::Declaration => Style::fg(Color::BrightMagenta),
            StyleTag::Source => Style::default(),
            StyleTag::AttribName => Style::fg(Color::BrightBlue),
            StyleTag::AttribValue => Style::fg(Color::Green),
            StyleTag::NoCode => Style::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles() {
        assert!(!StyleTag::Comment.default_style().is_default());
        assert!(!StyleTag::String.default_style().is_default());
        assert!(!StyleTag::Keyword.default_style().is_default());
        // Plain text and punctuation are left alone
        assert!(StyleTag::Plain.default_style().is_default());
        assert!(StyleTag::Punctuation.default_style().is_default());
    }

    #[test]
    fn test_class_name_roundtrip() {
        for tag in StyleTag::ALL {
            assert_eq!(StyleTag::from_class_name(tag.class_name()), Some(tag));
        }
    }

    #[test]
    fn test_from_class_name_invalid() {
        assert_eq!(StyleTag::from_class_name("keyword"), None);
        assert_eq!(StyleTag::from_class_name(""), None);
    }
}
