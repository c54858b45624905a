//! Recombination of source text and decorations
//!
//! Turns a decoration list back into styled output: HTML spans carrying
//! the short class names (optionally inside a numbered list, one item per
//! line) or ANSI escapes for a terminal.

use crate::syntax::{Decoration, Decorations, StyleTag, SGR_RESET};

/// Output format for rendered source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Html,
    Ansi,
}

impl Decorations {
    /// Normalize for rendering over a text of `len` bytes
    ///
    /// Drops decorations at or past `len` and runs that are empty because
    /// the next decoration starts at the same offset, then merges
    /// neighbouring runs that share a style.
    pub fn simplify(&mut self, len: usize) {
        let old = std::mem::take(self.inner_mut());
        let out = self.inner_mut();

        for d in old.into_iter().take_while(|d| d.offset < len) {
            match out.last_mut() {
                Some(last) if last.offset == d.offset => {
                    last.style = d.style;
                    if out.len() >= 2 && out[out.len() - 2].style == d.style {
                        out.pop();
                    }
                }
                Some(last) if last.style == d.style => {}
                _ => out.push(d),
            }
        }
    }
}

/// Escape text for inclusion in an HTML element
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Largest char boundary of `source` at or below `offset`
fn floor_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Styled pieces of `source`, with an unstyled head before the first
/// decoration
///
/// Offsets inside a character are moved back to its start, so every
/// byte of `source` lands in exactly one piece.
fn pieces<'s>(source: &'s str, decorations: &Decorations) -> Vec<(&'s str, Option<StyleTag>)> {
    let head_end = decorations
        .as_slice()
        .first()
        .map_or(source.len(), |d: &Decoration| floor_boundary(source, d.offset));

    let mut pieces = vec![(&source[..head_end], None)];
    for (range, style) in decorations.runs(source.len()) {
        let end = floor_boundary(source, range.end);
        let start = floor_boundary(source, range.start).min(end);
        pieces.push((&source[start..end], Some(style)));
    }
    pieces.retain(|(text, _)| !text.is_empty());
    pieces
}

/// HTML writer that keeps spans and list items balanced across lines
struct HtmlWriter {
    out: String,
    /// First line number, when lines are numbered
    start: Option<usize>,
    /// Index of the current line
    line: usize,
    li_open: bool,
}

impl HtmlWriter {
    fn new(start: Option<usize>) -> Self {
        let mut out = String::new();
        if let Some(n) = start {
            out.push_str(&format!("<ol class=\"linenums\" start=\"{}\">", n));
        }
        Self { out, start, line: 0, li_open: false }
    }

    fn open_line(&mut self) {
        if let (Some(start), false) = (self.start, self.li_open) {
            let class = (self.line + start.saturating_sub(1)) % 10;
            self.out.push_str(&format!("<li class=\"L{}\">", class));
            self.li_open = true;
        }
    }

    fn newline(&mut self) {
        if self.start.is_some() {
            if !self.li_open {
                self.open_line();
                self.out.push_str("&#160;");
            }
            self.out.push_str("</li>");
            self.li_open = false;
        } else {
            self.out.push('\n');
        }
        self.line += 1;
    }

    fn text(&mut self, text: &str, style: Option<StyleTag>) {
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.newline();
            }
            if segment.is_empty() {
                continue;
            }
            self.open_line();
            match style {
                Some(style) => {
                    self.out.push_str(&format!("<span class=\"{}\">", style.class_name()));
                    self.out.push_str(&escape_html(segment));
                    self.out.push_str("</span>");
                }
                None => self.out.push_str(&escape_html(segment)),
            }
        }
    }

    fn finish(mut self) -> String {
        if self.start.is_some() {
            if self.li_open {
                self.out.push_str("</li>");
            }
            self.out.push_str("</ol>");
        }
        self.out
    }
}

/// Render `source` as HTML spans
///
/// With `line_numbers`, each line becomes an item of an ordered list
/// starting at that number. Line breaks are never inside a span.
pub fn render_html(source: &str, decorations: &Decorations, line_numbers: Option<usize>) -> String {
    let mut writer = HtmlWriter::new(line_numbers);
    for (text, style) in pieces(source, decorations) {
        writer.text(text, style);
    }
    writer.finish()
}

/// Render `source` with ANSI colors from each style's palette entry
pub fn render_ansi(source: &str, decorations: &Decorations) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    for (text, style) in pieces(source, decorations) {
        let sgr = style.map(|s| s.default_style().sgr()).unwrap_or_default();
        if sgr.is_empty() {
            out.push_str(text);
            continue;
        }
        // Reset before each newline
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            if !line.is_empty() {
                out.push_str(&sgr);
                out.push_str(line);
                out.push_str(SGR_RESET);
            }
        }
    }
    out
}

/// Render in the requested format
pub fn render(source: &str, decorations: &Decorations, format: OutputFormat, line_numbers: Option<usize>) -> String {
    match format {
        OutputFormat::Html => render_html(source, decorations, line_numbers),
        OutputFormat::Ansi => render_ansi(source, decorations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decs(pairs: &[(usize, StyleTag)]) -> Decorations {
        Decorations::from(
            pairs
                .iter()
                .map(|&(offset, style)| Decoration { offset, style })
                .collect::<Vec<_>>(),
        )
    }

    fn pairs(decs: &Decorations) -> Vec<(usize, StyleTag)> {
        decs.iter().map(|d| (d.offset, d.style)).collect()
    }

    #[test]
    fn test_simplify_merges_same_style() {
        let mut d = decs(&[(0, StyleTag::Plain), (1, StyleTag::Plain), (2, StyleTag::Keyword), (4, StyleTag::Plain)]);
        d.simplify(6);
        assert_eq!(pairs(&d), vec![(0, StyleTag::Plain), (2, StyleTag::Keyword), (4, StyleTag::Plain)]);
    }

    #[test]
    fn test_simplify_drops_empty_runs() {
        let mut d = decs(&[(0, StyleTag::Plain), (2, StyleTag::Comment), (2, StyleTag::Keyword), (5, StyleTag::String)]);
        d.simplify(5);
        assert_eq!(pairs(&d), vec![(0, StyleTag::Plain), (2, StyleTag::Keyword)]);
    }

    #[test]
    fn test_simplify_merges_after_dropping() {
        let mut d = decs(&[(0, StyleTag::Plain), (1, StyleTag::Comment), (1, StyleTag::Plain)]);
        d.simplify(3);
        assert_eq!(pairs(&d), vec![(0, StyleTag::Plain)]);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b && c>d \"e\""), "a&lt;b &amp;&amp; c&gt;d \"e\"");
    }

    #[test]
    fn test_render_html() {
        let d = decs(&[(0, StyleTag::Keyword), (2, StyleTag::Plain), (4, StyleTag::Punctuation)]);
        assert_eq!(
            render_html("if x<", &d, None),
            "<span class=\"kwd\">if</span><span class=\"pln\"> x</span><span class=\"pun\">&lt;</span>"
        );
    }

    #[test]
    fn test_render_html_undecorated_head() {
        let d = decs(&[(2, StyleTag::Comment)]);
        assert_eq!(render_html("a //c", &d, None), "a <span class=\"com\">//c</span>");
        assert_eq!(render_html("a&b", &Decorations::new(), None), "a&amp;b");
    }

    #[test]
    fn test_render_html_line_numbers() {
        let d = decs(&[(0, StyleTag::Comment), (9, StyleTag::Plain)]);
        assert_eq!(
            render_html("/* a\nb */x\n", &d, Some(1)),
            "<ol class=\"linenums\" start=\"1\">\
             <li class=\"L0\"><span class=\"com\">/* a</span></li>\
             <li class=\"L1\"><span class=\"com\">b */</span><span class=\"pln\">x</span></li>\
             </ol>"
        );
    }

    #[test]
    fn test_render_html_line_numbers_offset_and_blank_lines() {
        let d = decs(&[(0, StyleTag::Plain)]);
        assert_eq!(
            render_html("a\n\nb", &d, Some(10)),
            "<ol class=\"linenums\" start=\"10\">\
             <li class=\"L9\"><span class=\"pln\">a</span></li>\
             <li class=\"L0\">&#160;</li>\
             <li class=\"L1\"><span class=\"pln\">b</span></li>\
             </ol>"
        );
    }

    #[test]
    fn test_render_html_leading_and_trailing_blank_lines() {
        assert_eq!(
            render_html("\nx\n\n", &Decorations::new(), Some(1)),
            "<ol class=\"linenums\" start=\"1\">\
             <li class=\"L0\">&#160;</li>\
             <li class=\"L1\">x</li>\
             <li class=\"L2\">&#160;</li>\
             </ol>"
        );
    }

    #[test]
    fn test_offsets_inside_a_character_keep_all_text() {
        // 1 falls inside the two-byte é
        let d = decs(&[(0, StyleTag::Keyword), (1, StyleTag::Plain)]);
        assert_eq!(render_html("éa", &d, None), "<span class=\"pln\">éa</span>");
        assert_eq!(render_ansi("éa", &d), "éa");

        let d = decs(&[(1, StyleTag::Comment), (3, StyleTag::Keyword)]);
        assert_eq!(render_html("éab", &d, None), "<span class=\"com\">éa</span><span class=\"kwd\">b</span>");
    }

    #[test]
    fn test_render_html_keeps_newlines_without_numbers() {
        let d = decs(&[(0, StyleTag::Comment)]);
        assert_eq!(
            render_html("a\nb", &d, None),
            "<span class=\"com\">a</span>\n<span class=\"com\">b</span>"
        );
    }

    #[test]
    fn test_render_ansi() {
        let d = decs(&[(0, StyleTag::Keyword), (2, StyleTag::Plain)]);
        let out = render_ansi("if x", &d);
        let kwd = StyleTag::Keyword.default_style().sgr();
        assert!(out.starts_with(&format!("{}if{}", kwd, SGR_RESET)));
        assert!(out.ends_with(" x"));
    }

    #[test]
    fn test_render_ansi_resets_per_line() {
        let d = decs(&[(0, StyleTag::Comment)]);
        let com = StyleTag::Comment.default_style().sgr();
        assert_eq!(render_ansi("a\nb", &d), format!("{com}a{SGR_RESET}\n{com}b{SGR_RESET}"));
    }

    #[test]
    fn test_render_out_of_range_decorations() {
        let d = decs(&[(0, StyleTag::Plain), (10, StyleTag::Keyword)]);
        assert_eq!(render("ab", &d, OutputFormat::Html, None), "<span class=\"pln\">ab</span>");
    }
}
