//! Source extraction from marked-up text
//!
//! Code blocks arrive as HTML: tags may already wrap parts of the text,
//! line breaks may be spelled `<br>`, and special characters are entity
//! encoded. Extraction recovers the plain source the lexers work on.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_width::UnicodeWidthChar;

/// Comments, tags and character references, in one pass so decoded text
/// is never scanned twice
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(<!--.*?-->)|(<br\b[^>]*>)|(</?[a-z!?][^>]*>)|&(#\d+|#x[0-9a-f]+|[a-z]+);").unwrap()
});

/// Plain source text of a marked-up code block
pub fn extract_source(markup: &str) -> String {
    let markup = markup.replace("\r\n", "\n");
    MARKUP
        .replace_all(&markup, |caps: &Captures<'_>| {
            if caps.get(2).is_some() {
                "\n".to_string()
            } else if let Some(entity) = caps.get(4) {
                decode_entity(entity.as_str()).map_or_else(|| caps[0].to_string(), String::from)
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Character for an entity name or numeric reference, without `&` and `;`
fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }
    match name.to_ascii_lowercase().as_str() {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

/// Replace tabs with spaces up to the next multiple of `width` columns
///
/// Columns are counted in display width and restart after each newline.
pub fn expand_tabs(text: &str, width: usize) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    let width = width.max(1);
    let mut out = String::with_capacity(text.len());
    let mut column = 0;

    for ch in text.chars() {
        match ch {
            '\t' => {
                let pad = width - column % width;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += ch.width().unwrap_or(0);
            }
        }
    }
    out
}
