//! Lexer engine
//!
//! A [`SimpleLexer`] compiles an ordered set of style patterns into one
//! combined tokenizer plus a shortcut table, then walks a [`Job`]'s text
//! in a single pass, emitting a [`Decoration`] at the start of every
//! token. Tokens matched by an embedding pattern have their captured
//! span lexed by another language's handler; its decorations are
//! spliced into the same list.
//!
//! If the combined tokenizer gives up on a text (the backtracking limit),
//! the rest of that text is split by trying the patterns one at a time.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use fancy_regex::Regex;

use super::registry::LangRegistry;
use super::rules::{compile, Resolution, StylePattern};
use super::tokens::StyleTag;
use crate::error::{HighlightError, Result};

/// Nesting limit for embedded languages; deeper spans are styled as source
pub const MAX_EMBED_DEPTH: usize = 16;

/// Start of a run of text sharing one style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    /// Byte offset where the style starts to apply
    pub offset: usize,
    /// Style applying from here to the next decoration
    pub style: StyleTag,
}

/// Ordered list of decorations produced by a lex pass
///
/// Each decoration's style applies up to the next decoration's offset,
/// the last one up to the end of the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decorations(Vec<Decoration>);

impl Decorations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, offset: usize, style: StyleTag) {
        self.0.push(Decoration { offset, style });
    }

    pub fn extend(&mut self, other: Decorations) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Decoration] {
        &self.0
    }

    /// Styled byte ranges, the last one ending at `end`
    pub fn runs(&self, end: usize) -> Vec<(Range<usize>, StyleTag)> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let next = self.0.get(i + 1).map_or(end, |n| n.offset);
                (d.offset..next.max(d.offset), d.style)
            })
            .collect()
    }

    pub(crate) fn inner_mut(&mut self) -> &mut Vec<Decoration> {
        &mut self.0
    }
}

impl From<Vec<Decoration>> for Decorations {
    fn from(v: Vec<Decoration>) -> Self {
        Self(v)
    }
}

impl<'a> IntoIterator for &'a Decorations {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One lex invocation over a span of text
pub struct Job<'a> {
    /// Text to decorate
    pub source: &'a str,
    /// Offset of `source` within the outermost text
    pub base: usize,
    /// Output, filled in by the lexer
    pub decorations: Decorations,
    registry: &'a LangRegistry,
    depth: usize,
}

impl<'a> Job<'a> {
    /// Create a top-level job
    pub fn new(source: &'a str, registry: &'a LangRegistry) -> Self {
        Self {
            source,
            base: 0,
            decorations: Decorations::new(),
            registry,
            depth: 0,
        }
    }

    /// Builder: set the base offset
    pub fn with_base(mut self, base: usize) -> Self {
        self.base = base;
        self
    }

    /// Registry used to resolve embedded languages
    pub fn registry(&self) -> &'a LangRegistry {
        self.registry
    }

    /// Number of embedding levels above this job
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Anything that can decorate a job
///
/// Implemented by [`SimpleLexer`] and by plain closures, so raw matcher
/// functions can be registered next to compiled rule sets.
pub trait Lexer: Send + Sync {
    fn decorate(&self, job: &mut Job<'_>);
}

impl<F> Lexer for F
where
    F: Fn(&mut Job<'_>) + Send + Sync,
{
    fn decorate(&self, job: &mut Job<'_>) {
        self(job)
    }
}

/// Lex `source` with `lexer` as a child of a job and append the result
fn append_decorations(
    out: &mut Decorations,
    registry: &LangRegistry,
    depth: usize,
    base: usize,
    source: &str,
    lexer: &dyn Lexer,
) {
    if source.is_empty() {
        return;
    }
    let mut job = Job {
        source,
        base,
        decorations: Decorations::new(),
        registry,
        depth,
    };
    lexer.decorate(&mut job);
    out.extend(job.decorations);
}

/// A lexer compiled from shortcut and fallthrough style patterns
pub struct SimpleLexer {
    /// Shortcut patterns followed by fallthrough patterns
    patterns: Vec<StylePattern>,
    /// Index of the first fallthrough pattern in `patterns`
    fallthrough_start: usize,
    /// First character -> index of the pattern it selects
    shortcuts: HashMap<char, usize>,
    /// All pattern sources as alternatives, plus a one-char catch-all
    tokenizer: Regex,
}

impl SimpleLexer {
    /// Compile a lexer
    ///
    /// Every shortcut pattern must declare at least one shortcut
    /// character. Fallthrough patterns may declare some too. When two
    /// patterns claim the same character the earlier one keeps it.
    pub fn new(shortcut: Vec<StylePattern>, fallthrough: Vec<StylePattern>) -> Result<Self> {
        if let Some(p) = shortcut.iter().find(|p| p.shortcut_chars().is_empty()) {
            return Err(HighlightError::MissingShortcut(p.source().to_string()));
        }

        let fallthrough_start = shortcut.len();
        let patterns: Vec<StylePattern> = shortcut.into_iter().chain(fallthrough).collect();

        let mut shortcuts = HashMap::new();
        for (idx, pattern) in patterns.iter().enumerate().rev() {
            for &c in pattern.shortcut_chars() {
                shortcuts.insert(c, idx);
            }
        }

        let mut seen = HashSet::new();
        let mut alternatives: Vec<String> = patterns
            .iter()
            .map(StylePattern::source)
            .filter(|src| seen.insert(*src))
            .map(|src| format!("(?:{})", src))
            .collect();
        alternatives.push("(?s:.)".to_string());
        let combined = alternatives.join("|");
        let tokenizer = compile(&combined).map_err(|e| HighlightError::Pattern {
            pattern: combined.clone(),
            source: Box::new(e),
        })?;

        Ok(Self {
            patterns,
            fallthrough_start,
            shortcuts,
            tokenizer,
        })
    }

    /// End of the token starting at `pos`
    ///
    /// Always at least one character past `pos`. Once the combined
    /// tokenizer fails, `degraded` is set and later calls skip it.
    fn next_token(&self, text: &str, pos: usize, degraded: &mut bool) -> usize {
        let one_char = pos + text[pos..].chars().next().map_or(0, char::len_utf8);
        if !*degraded {
            match self.tokenizer.find_from_pos(text, pos) {
                Ok(Some(m)) if m.start() == pos && m.end() > pos => return m.end(),
                Ok(_) => return one_char,
                Err(e) => {
                    tracing::debug!(offset = pos, error = %e, "tokenizer failed, matching patterns one at a time");
                    *degraded = true;
                }
            }
        }
        self.pattern_token(&text[pos..]).map_or(one_char, |len| pos + len)
    }

    /// Length of the first non-empty match among the patterns, in order
    fn pattern_token(&self, rest: &str) -> Option<usize> {
        self.patterns.iter().find_map(|pattern| match pattern.match_len(rest) {
            Ok(len) => len.filter(|&len| len > 0),
            Err(e) => {
                tracing::debug!(pattern = %pattern.source(), error = %e, "pattern failed to run");
                None
            }
        })
    }

    /// Classify one token
    fn resolve(&self, token: &str) -> Resolution {
        let shortcut = token.chars().next().and_then(|c| self.shortcuts.get(&c));
        if let Some(&idx) = shortcut {
            return self.patterns[idx].resolve(token);
        }
        self.patterns[self.fallthrough_start..]
            .iter()
            .find_map(|p| p.match_token(token))
            .unwrap_or(Resolution::Styled(StyleTag::Plain))
    }

    /// Split an embedding token into before / embedded / after and lex each
    fn decorate_embedded(&self, job: &mut Job<'_>, token_start: usize, token: &str, lang: &str, span: Range<usize>) {
        let base = job.base + token_start;
        let registry = job.registry;
        let depth = job.depth + 1;
        let embedded = &token[span.clone()];

        append_decorations(&mut job.decorations, registry, depth, base, &token[..span.start], self);
        if !embedded.is_empty() {
            match registry.resolve(Some(lang), embedded) {
                Some(handler) => {
                    tracing::trace!(lang, offset = base + span.start, "lexing embedded source");
                    append_decorations(&mut job.decorations, registry, depth, base + span.start, embedded, handler);
                }
                None => {
                    tracing::warn!(lang, "no handler for embedded source");
                    job.decorations.push(base + span.start, StyleTag::Source);
                }
            }
        }
        append_decorations(&mut job.decorations, registry, depth, base + span.end, &token[span.end..], self);
    }
}

impl Lexer for SimpleLexer {
    fn decorate(&self, job: &mut Job<'_>) {
        let source = job.source;
        let mut cache: HashMap<&str, StyleTag> = HashMap::new();
        let mut pos = 0;
        let mut degraded = false;

        while pos < source.len() {
            let end = self.next_token(source, pos, &mut degraded);
            let token = &source[pos..end];

            let resolution = match cache.get(token) {
                Some(&style) => Resolution::Styled(style),
                None => match self.resolve(token) {
                    Resolution::Embedded { .. } if job.depth >= MAX_EMBED_DEPTH => {
                        Resolution::Styled(StyleTag::Source)
                    }
                    other => other,
                },
            };

            match resolution {
                Resolution::Styled(style) => {
                    cache.insert(token, style);
                    job.decorations.push(job.base + pos, style);
                }
                Resolution::Embedded { lang, span } => {
                    self.decorate_embedded(job, pos, token, &lang, span);
                }
            }
            pos = end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::PatternStyle;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, OnceLock};
    use std::time::{Duration, Instant};

    fn pat(style: impl Into<PatternStyle>, src: &str) -> StylePattern {
        StylePattern::new(style, src).unwrap()
    }

    fn decorations(lexer: &dyn Lexer, registry: &LangRegistry, text: &str) -> Vec<(usize, StyleTag)> {
        let mut job = Job::new(text, registry);
        lexer.decorate(&mut job);
        job.decorations.iter().map(|d| (d.offset, d.style)).collect()
    }

    fn word_lexer() -> SimpleLexer {
        SimpleLexer::new(
            vec![pat(StyleTag::Plain, r"\s+").with_shortcuts(" \t\n")],
            vec![
                pat(StyleTag::Keyword, r"(?:var|let)\b"),
                pat(StyleTag::Plain, r"[a-z_]\w*"),
                pat(StyleTag::Literal, r"\d+").with_shortcuts("0123456789"),
                pat(StyleTag::Punctuation, r"[^\s\w]+"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_simple_decorations() {
        let registry = LangRegistry::new();
        let lexer = word_lexer();
        assert_eq!(
            decorations(&lexer, &registry, "var x=1;"),
            vec![
                (0, StyleTag::Keyword),
                (3, StyleTag::Plain),
                (4, StyleTag::Plain),
                (5, StyleTag::Punctuation),
                (6, StyleTag::Literal),
                (7, StyleTag::Punctuation),
            ]
        );
    }

    #[test]
    fn test_empty_source() {
        let registry = LangRegistry::new();
        assert!(decorations(&word_lexer(), &registry, "").is_empty());
    }

    #[test]
    fn test_base_offset() {
        let registry = LangRegistry::new();
        let lexer = word_lexer();
        let mut job = Job::new("let y", &registry).with_base(10);
        lexer.decorate(&mut job);
        assert_eq!(job.decorations.as_slice()[0], Decoration { offset: 10, style: StyleTag::Keyword });
        assert!(job.decorations.iter().all(|d| d.offset >= 10));
    }

    #[test]
    fn test_missing_shortcut_rejected() {
        let err = SimpleLexer::new(vec![pat(StyleTag::Plain, r"\s+")], vec![]).err();
        assert!(matches!(err, Some(HighlightError::MissingShortcut(_))));
    }

    #[test]
    fn test_no_patterns_falls_back_to_plain() {
        let registry = LangRegistry::new();
        let lexer = SimpleLexer::new(vec![], vec![]).unwrap();
        assert_eq!(
            decorations(&lexer, &registry, "ab"),
            vec![(0, StyleTag::Plain), (1, StyleTag::Plain)]
        );
    }

    #[test]
    fn test_empty_pattern_still_progresses() {
        let registry = LangRegistry::new();
        let lexer = SimpleLexer::new(vec![], vec![pat(StyleTag::Comment, "")]).unwrap();
        // The empty alternative wins the tokenizer but each token is one char
        let decs = decorations(&lexer, &registry, "héllo");
        assert_eq!(decs.len(), 5);
        assert_eq!(decs[2].0, 3);
    }

    #[test]
    fn test_duplicate_sources_deduplicated() {
        let lexer = SimpleLexer::new(
            vec![],
            vec![pat(StyleTag::Keyword, "if"), pat(StyleTag::Plain, "if")],
        )
        .unwrap();
        assert_eq!(lexer.tokenizer.as_str(), "(?:if)|(?s:.)");
    }

    #[test]
    fn test_first_shortcut_wins() {
        let registry = LangRegistry::new();
        let lexer = SimpleLexer::new(
            vec![
                pat(StyleTag::String, r#""[^"]*""#).with_shortcuts("\""),
                pat(StyleTag::Comment, r#""[^"]*""#).with_shortcuts("\""),
            ],
            vec![],
        )
        .unwrap();
        assert_eq!(decorations(&lexer, &registry, r#""hi""#), vec![(0, StyleTag::String)]);
    }

    #[test]
    fn test_shortcut_skips_fallthrough() {
        let registry = LangRegistry::new();
        // The shortcut pattern never matches "#abc", the fallthrough would
        let lexer = SimpleLexer::new(
            vec![pat(StyleTag::Comment, "#!").with_shortcuts("#")],
            vec![pat(StyleTag::Keyword, "#[a-z]+")],
        )
        .unwrap();
        assert_eq!(decorations(&lexer, &registry, "#abc"), vec![(0, StyleTag::Comment)]);
    }

    #[test]
    fn test_repeated_token_same_style() {
        let registry = LangRegistry::new();
        let decs = decorations(&word_lexer(), &registry, "foo foo foo");
        let styles: Vec<_> = decs.iter().filter(|d| d.0 % 4 == 0).map(|d| d.1).collect();
        assert_eq!(styles, vec![StyleTag::Plain; 3]);
    }

    #[test]
    fn test_embedding_splits_token() {
        let mut registry = LangRegistry::new();
        registry.register_lexer(word_lexer(), &["js"]);
        let markup = SimpleLexer::new(
            vec![],
            vec![
                StylePattern::embed("js", r"(?i:<script\b[^>]*>([\s\S]*?)(</script\b[^>]*>))").unwrap(),
                pat(StyleTag::Tag, r"</?[a-z]+>"),
            ],
        )
        .unwrap();

        let text = "<script>var x=1;</script>";
        let decs = decorations(&markup, &registry, text);
        assert_eq!(decs.first(), Some(&(0, StyleTag::Tag)));
        assert!(decs.contains(&(8, StyleTag::Keyword)));
        assert!(decs.contains(&(14, StyleTag::Literal)));
        assert_eq!(decs.last(), Some(&(16, StyleTag::Tag)));
        assert!(decs.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_unresolvable_embedding_is_source() {
        let registry = LangRegistry::new();
        let lexer = SimpleLexer::new(
            vec![],
            vec![StylePattern::embed("nope", r"<%(.+?)%>").unwrap()],
        )
        .unwrap();
        assert_eq!(
            decorations(&lexer, &registry, "<%x%>"),
            vec![
                (0, StyleTag::Plain),
                (1, StyleTag::Plain),
                (2, StyleTag::Source),
                (3, StyleTag::Plain),
                (4, StyleTag::Plain),
            ]
        );
    }

    #[test]
    fn test_self_embedding_is_bounded() {
        let mut registry = LangRegistry::new();
        // Empty capture at the end of the token: "before" is the whole token
        let lexer = SimpleLexer::new(vec![], vec![StylePattern::embed("loop", r"x()").unwrap()]).unwrap();
        registry.register_lexer(lexer, &["loop"]);
        let handler = registry.get("loop").unwrap();
        assert_eq!(decorations(handler, &registry, "x"), vec![(0, StyleTag::Source)]);
    }

    #[test]
    fn test_closure_lexer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut registry = LangRegistry::new();
        registry.register_lexer(
            move |job: &mut Job<'_>| {
                counter.fetch_add(1, Ordering::SeqCst);
                job.decorations.push(job.base, StyleTag::NoCode);
            },
            &["raw"],
        );
        let handler = registry.get("raw").unwrap();
        assert_eq!(decorations(handler, &registry, "anything"), vec![(0, StyleTag::NoCode)]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_job_depth_counts_embedding_levels() {
        let depths = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&depths);
        let mut registry = LangRegistry::new();
        registry.register_lexer(
            move |job: &mut Job<'_>| {
                seen.lock().unwrap().push(job.depth());
                job.decorations.push(job.base, StyleTag::Keyword);
            },
            &["inner"],
        );
        let outer = SimpleLexer::new(vec![], vec![StylePattern::embed("inner", r"\[(\w+)\]").unwrap()]).unwrap();
        registry.register_lexer(outer, &["outer"]);

        let handler = registry.get("outer").unwrap();
        let mut job = Job::new("[ab]", &registry);
        assert_eq!(job.depth(), 0);
        handler.decorate(&mut job);
        assert_eq!(*depths.lock().unwrap(), vec![1]);
        assert!(job.decorations.iter().any(|d| d.offset == 1 && d.style == StyleTag::Keyword));
    }

    #[test]
    fn test_tokenizer_failure_matches_patterns_in_turn() {
        let registry = LangRegistry::new();
        // The first fallthrough pattern backtracks exponentially on a run of `a`
        let lexer = SimpleLexer::new(
            vec![pat(StyleTag::Plain, r"\s+").with_shortcuts(" ")],
            vec![
                pat(StyleTag::Keyword, r"(?:a(?=a)|a)*b"),
                pat(StyleTag::Literal, r"a+"),
                pat(StyleTag::Punctuation, r"[^\sa]+"),
            ],
        )
        .unwrap();
        let run = "a".repeat(64);
        let text = format!("{run} ab {run} ;");

        let started = Instant::now();
        let decs = decorations(&lexer, &registry, &text);
        assert!(started.elapsed() < Duration::from_secs(60));
        assert_eq!(
            decs,
            vec![
                (0, StyleTag::Literal),
                (64, StyleTag::Plain),
                (65, StyleTag::Keyword),
                (67, StyleTag::Plain),
                (68, StyleTag::Literal),
                (132, StyleTag::Plain),
                (133, StyleTag::Punctuation),
            ]
        );
    }

    #[test]
    fn test_tokenizer_failure_tiles_input() {
        let registry = LangRegistry::new();
        // Nothing but the failing pattern: every token falls back to one character
        let lexer = SimpleLexer::new(vec![], vec![pat(StyleTag::Keyword, r"(?:a(?=a)|a)*b")]).unwrap();
        let text = format!("{}é", "a".repeat(40));

        let started = Instant::now();
        let decs = decorations(&lexer, &registry, &text);
        assert!(started.elapsed() < Duration::from_secs(120));
        assert_eq!(decs.len(), 41);
        assert_eq!(decs[40], (40, StyleTag::Plain));
        assert!(decs.windows(2).all(|w| w[0].0 < w[1].0));
    }

    fn builtin_decorations(lang: &str, text: &str) -> Vec<(usize, StyleTag)> {
        let registry = builtins();
        decorations(registry.get(lang).unwrap(), registry, text)
    }

    #[test]
    fn test_huge_block_comment_is_one_token() {
        let text = format!("/*{}*/ x", "a\n".repeat(600_000));
        let decs = builtin_decorations("js", &text);
        assert_eq!(decs[..2].to_vec(), vec![(0, StyleTag::Comment), (text.len() - 2, StyleTag::Plain)]);
        assert_eq!(decs.len(), 3);

        let text = format!("/*{}*/ int", "x".repeat(1_250_000));
        let decs = builtin_decorations("c", &text);
        assert_eq!(decs[..2].to_vec(), vec![(0, StyleTag::Comment), (text.len() - 4, StyleTag::Plain)]);
    }

    #[test]
    fn test_huge_string_literal_is_one_token() {
        let text = format!("x = \"{}\"; y", "a".repeat(1_200_000));
        let close = text.len() - 3;
        let decs = builtin_decorations("py", &text);
        assert!(decs.contains(&(4, StyleTag::String)));
        assert!(decs.iter().all(|d| d.0 <= 4 || d.0 >= close));
        assert_eq!(decs.last(), Some(&(text.len() - 1, StyleTag::Plain)));

        let text = format!("s = '''{}'''", "b'\n".repeat(400_000));
        let decs = builtin_decorations("py", &text);
        assert_eq!(decs.last(), Some(&(4, StyleTag::String)));
    }

    #[test]
    fn test_runs() {
        let decs = Decorations::from(vec![
            Decoration { offset: 0, style: StyleTag::Keyword },
            Decoration { offset: 3, style: StyleTag::Plain },
        ]);
        assert_eq!(decs.runs(5), vec![(0..3, StyleTag::Keyword), (3..5, StyleTag::Plain)]);
    }

    fn builtins() -> &'static LangRegistry {
        static REGISTRY: OnceLock<LangRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| LangRegistry::with_builtins().unwrap())
    }

    fn check_tiling(text: &str, decs: &[(usize, StyleTag)]) -> std::result::Result<(), TestCaseError> {
        if text.is_empty() {
            prop_assert!(decs.is_empty());
            return Ok(());
        }
        prop_assert_eq!(decs[0].0, 0);
        for w in decs.windows(2) {
            prop_assert!(w[0].0 <= w[1].0, "offsets decrease: {:?}", w);
        }
        for d in decs {
            prop_assert!(d.0 < text.len());
            prop_assert!(text.is_char_boundary(d.0));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn default_code_tiles_input(text in "[ -~\\n\\té]{0,80}") {
            let registry = builtins();
            let handler = registry.get("default-code").unwrap();
            let decs = decorations(handler, registry, &text);
            check_tiling(&text, &decs)?;
        }

        #[test]
        fn default_markup_tiles_input(text in "(<[a-z]{1,6}( [a-z]+=\"[^\"<>]{0,6}\")?>|[ -~]{0,8}|</script>|<script>|<style>){0,10}") {
            let registry = builtins();
            let handler = registry.get("default-markup").unwrap();
            let decs = decorations(handler, registry, &text);
            check_tiling(&text, &decs)?;
        }
    }
}
