//! Highlighting service
//!
//! Ties the pieces together: hints pick the language and numbering,
//! extraction recovers plain source from markup, the registry's lexers
//! decorate it and the renderer turns the result back into markup.
//! Every entry point that returns rendered text runs behind an error
//! boundary, so one bad block degrades to escaped plain text.

use crate::config::Config;
use crate::error::{HighlightError, Result};
use crate::extract::{expand_tabs, extract_source};
use crate::hint::{ClassHint, Directive};
use crate::render::{escape_html, render, render_html, OutputFormat};
use crate::syntax::{Decorations, Job, LangRegistry};

/// One marked-up code block to highlight
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightRequest {
    pub markup: String,
    pub lang: Option<String>,
    pub line_numbers: Option<usize>,
}

impl HighlightRequest {
    pub fn new(markup: impl Into<String>) -> Self {
        Self { markup: markup.into(), ..Default::default() }
    }

    /// Builder: set the language
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Builder: number lines starting at `start`
    pub fn with_line_numbers(mut self, start: usize) -> Self {
        self.line_numbers = Some(start);
        self
    }

    /// Take language and numbering from a code block's class attribute
    pub fn with_classes(mut self, classes: &str) -> Self {
        let hint = ClassHint::parse(classes);
        self.lang = self.lang.or(hint.lang);
        self.line_numbers = self.line_numbers.or(hint.line_numbers);
        self
    }
}

/// Rendered result of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOutput {
    pub html: String,
    /// False when highlighting failed and `html` is escaped plain text
    pub styled: bool,
}

/// Registry plus settings
pub struct Highlighter {
    registry: LangRegistry,
    config: Config,
}

impl Highlighter {
    /// Create a highlighter with the built-in languages
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_registry(LangRegistry::with_builtins()?, config))
    }

    /// Create a highlighter over an existing registry
    pub fn with_registry(registry: LangRegistry, config: Config) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &LangRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut LangRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decorate plain `source` with the handler for `lang`
    ///
    /// Without a language, or with an unknown one, the configured default
    /// language and then the content decide.
    pub fn decorate(&self, source: &str, lang: Option<&str>) -> Result<Decorations> {
        let lang = lang.or(self.config.default_lang.as_deref());
        let handler = self.registry.resolve(lang, source).ok_or_else(|| {
            HighlightError::NoHandler(lang.unwrap_or(LangRegistry::default_language(source)).to_string())
        })?;
        let mut job = Job::new(source, &self.registry);
        handler.decorate(&mut job);
        Ok(job.decorations)
    }

    /// Highlight one request
    pub fn highlight(&self, request: &HighlightRequest) -> HighlightOutput {
        match self.try_highlight(request) {
            Ok(html) => HighlightOutput { html, styled: true },
            Err(e) => {
                tracing::warn!(lang = ?request.lang, error = %e, "highlighting failed, emitting plain text");
                let markup = Directive::parse(&request.markup).map_or(request.markup.as_str(), |d| d.rest);
                let source = expand_tabs(&extract_source(markup), self.config.tab_width);
                HighlightOutput { html: escape_html(&source), styled: false }
            }
        }
    }

    fn try_highlight(&self, request: &HighlightRequest) -> Result<String> {
        let (hint, markup) = match Directive::parse(&request.markup) {
            Some(directive) => (directive.hint, directive.rest),
            None => (ClassHint::default(), request.markup.as_str()),
        };
        let requested = ClassHint { lang: request.lang.clone(), line_numbers: request.line_numbers };
        let hint = requested.or(hint);
        let line_numbers = hint.line_numbers.or(self.config.line_numbers.then_some(1));

        let source = expand_tabs(&extract_source(markup), self.config.tab_width);
        let mut decorations = self.decorate(&source, hint.lang.as_deref())?;
        decorations.simplify(source.len());
        tracing::debug!(lang = ?hint.lang, bytes = source.len(), runs = decorations.len(), "highlighted block");
        Ok(render_html(&source, &decorations, line_numbers))
    }

    /// Highlight a marked-up code block into HTML
    ///
    /// On failure the escaped plain source comes back instead.
    pub fn pretty_print_one(&self, markup: &str, lang: Option<&str>, line_numbers: Option<usize>) -> String {
        let request = HighlightRequest {
            markup: markup.to_string(),
            lang: lang.map(String::from),
            line_numbers,
        };
        self.highlight(&request).html
    }

    /// Highlight plain source text, such as the contents of a file
    ///
    /// On failure the source comes back unstyled (escaped for HTML).
    pub fn render_source(
        &self,
        source: &str,
        lang: Option<&str>,
        format: OutputFormat,
        line_numbers: Option<usize>,
    ) -> String {
        let source = expand_tabs(source, self.config.tab_width);
        match self.decorate(&source, lang) {
            Ok(mut decorations) => {
                decorations.simplify(source.len());
                render(&source, &decorations, format, line_numbers)
            }
            Err(e) => {
                tracing::warn!(lang, error = %e, "highlighting failed, emitting plain text");
                render(&source, &Decorations::new(), format, line_numbers)
            }
        }
    }
}
