//! JavaScript, CoffeeScript and regular expression literal definitions

use super::keywords;
use crate::error::Result;
use crate::syntax::lexer::SimpleLexer;
use crate::syntax::rules::StylePattern;
use crate::syntax::source::{source_decorator, SourceOptions};
use crate::syntax::tokens::StyleTag;

/// JavaScript and TypeScript
pub fn javascript_language() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions {
        keywords: keywords::javascript(),
        c_style_comments: true,
        regex_literals: 1,
        ..Default::default()
    })
}

/// CoffeeScript, with `###` block comments
pub fn coffee_language() -> Result<SimpleLexer> {
    source_decorator(&SourceOptions {
        keywords: keywords::COFFEE.to_string(),
        hash_comments: 3,
        c_style_comments: true,
        triple_quoted_strings: true,
        regex_literals: 1,
        ..Default::default()
    })
}

/// Body of a regular expression literal, styled as one string
pub fn regex_language() -> Result<SimpleLexer> {
    SimpleLexer::new(vec![], vec![StylePattern::new(StyleTag::String, r"[\s\S]+")?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::{Job, Lexer};
    use crate::syntax::registry::LangRegistry;

    fn runs(lexer: &dyn Lexer, text: &str) -> Vec<(String, StyleTag)> {
        let registry = LangRegistry::with_builtins().unwrap();
        let mut job = Job::new(text, &registry);
        lexer.decorate(&mut job);
        job.decorations
            .runs(text.len())
            .into_iter()
            .map(|(range, style)| (text[range].to_string(), style))
            .collect()
    }

    #[test]
    fn test_javascript() {
        let runs = runs(
            &javascript_language().unwrap(),
            "function f() { return /x+/.test(s) ? null : 1e3; } /* end */",
        );
        assert!(runs.contains(&("function".to_string(), StyleTag::Keyword)));
        assert!(runs.contains(&("return".to_string(), StyleTag::Keyword)));
        assert!(runs.contains(&("/x+/".to_string(), StyleTag::String)));
        assert!(runs.contains(&("null".to_string(), StyleTag::Keyword)));
        assert!(runs.contains(&("1e3".to_string(), StyleTag::Literal)));
        assert!(runs.contains(&("/* end */".to_string(), StyleTag::Comment)));
    }

    #[test]
    fn test_regex_at_start_of_text() {
        let runs = runs(&javascript_language().unwrap(), "/ab/g");
        assert_eq!(runs[0], ("/ab/".to_string(), StyleTag::String));
    }

    #[test]
    fn test_coffee_block_comment() {
        let runs = runs(&coffee_language().unwrap(), "###\nnote\n###\nx = yes");
        assert_eq!(runs[0], ("###\nnote\n###".to_string(), StyleTag::Comment));
        assert!(runs.contains(&("yes".to_string(), StyleTag::Keyword)));
    }

    #[test]
    fn test_regex_language() {
        let runs = runs(&regex_language().unwrap(), "/a\\/b/i");
        assert_eq!(runs, vec![("/a\\/b/i".to_string(), StyleTag::String)]);
    }
}
