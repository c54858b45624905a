//! Language and line-numbering hints
//!
//! Hints come from two places: the class attribute of a code block
//! (`prettyprint lang-py linenums:4`) and a `<?prettify ...?>` directive
//! at the head of the markup (`<?prettify lang=py linenums=true?>`).

use std::sync::LazyLock;

use regex::Regex;

static LANG_CLASS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\blang(?:uage)?-([\w.]+)(?:\s|$)").unwrap());

static LINENUMS_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\blinenums\b(?::(\d+))?").unwrap());

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*<\?prettify\b([^>]*?)\??>").unwrap());

static DIRECTIVE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\b(\w+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'?>]+))"#).unwrap());

/// Language and line-numbering settings for one code block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassHint {
    /// Language id, if one was named
    pub lang: Option<String>,
    /// First line number, if lines should be numbered
    pub line_numbers: Option<usize>,
}

impl ClassHint {
    /// Parse a whitespace separated class list
    pub fn parse(classes: &str) -> Self {
        let lang = LANG_CLASS.captures(classes).map(|c| c[1].to_string());
        let line_numbers = LINENUMS_CLASS
            .captures(classes)
            .map(|c| c.get(1).and_then(|n| n.as_str().parse().ok()).unwrap_or(1));
        Self { lang, line_numbers }
    }

    /// Fill unset fields from `other`
    pub fn or(self, other: ClassHint) -> Self {
        Self {
            lang: self.lang.or(other.lang),
            line_numbers: self.line_numbers.or(other.line_numbers),
        }
    }
}

/// A `<?prettify ...?>` directive and the markup following it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    pub hint: ClassHint,
    pub rest: &'a str,
}

impl<'a> Directive<'a> {
    /// Parse a directive at the start of `markup`
    ///
    /// Returns `None` when the markup does not open with one.
    pub fn parse(markup: &'a str) -> Option<Self> {
        let caps = DIRECTIVE.captures(markup)?;
        let whole = caps.get(0)?;
        let mut hint = ClassHint::default();

        for attr in DIRECTIVE_ATTR.captures_iter(&caps[1]) {
            let value = attr
                .get(2)
                .or_else(|| attr.get(3))
                .or_else(|| attr.get(4))
                .map_or("", |m| m.as_str());
            match &attr[1] {
                "lang" if !value.is_empty() => hint.lang = Some(value.to_string()),
                "linenums" => hint.line_numbers = parse_linenums(value),
                other => tracing::debug!(attribute = other, "ignoring directive attribute"),
            }
        }

        Some(Self { hint, rest: &markup[whole.end()..] })
    }
}

/// `true` starts at line 1, a number starts there, anything else is off
fn parse_linenums(value: &str) -> Option<usize> {
    match value.to_lowercase().as_str() {
        "true" => Some(1),
        v => v.parse().ok(),
    }
}
