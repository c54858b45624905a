//! Built-in language definitions
//!
//! This module provides lexers for common programming and markup
//! languages and registers them under their usual file extensions.

mod c;
mod css;
mod javascript;
pub mod keywords;
mod markup;
mod python;
mod rust;
mod script;

use std::sync::Arc;

use super::lexer::{Lexer, SimpleLexer};
use super::registry::{LangRegistry, DEFAULT_CODE, DEFAULT_MARKUP};
use crate::error::Result;

type Builder = fn() -> Result<SimpleLexer>;

/// Built-in languages and the keys each one is registered under
const LANGUAGES: &[(Builder, &[&str])] = &[
    (c::default_code, &[DEFAULT_CODE]),
    (markup::markup_language, &[DEFAULT_MARKUP, "htm", "html", "mxml", "xhtml", "xml", "xsl"]),
    (markup::tag_language, &["in.tag"]),
    (markup::unquoted_value_language, &["uq.val"]),
    (c::c_language, &["c", "cc", "cpp", "cxx", "cyc", "m"]),
    (c::json_language, &["json"]),
    (c::csharp_language, &["cs"]),
    (c::java_language, &["java"]),
    (script::shell_language, &["bash", "bsh", "csh", "sh"]),
    (python::python_language, &["cv", "py", "python"]),
    (script::perl_language, &["perl", "pl", "pm"]),
    (script::ruby_language, &["rb", "ruby"]),
    (javascript::javascript_language, &["javascript", "js", "ts", "typescript"]),
    (javascript::coffee_language, &["coffee"]),
    (rust::rust_language, &["rc", "rs", "rust"]),
    (javascript::regex_language, &["regex"]),
    (css::css_language, &["css"]),
    (css::css_keyword_language, &["css-kw"]),
    (css::css_string_language, &["css-str"]),
];

/// Register every built-in language with `registry`
pub fn register_all(registry: &mut LangRegistry) -> Result<()> {
    for (build, extensions) in LANGUAGES {
        let lexer: Arc<dyn Lexer> = Arc::new(build()?);
        registry.register(lexer, extensions);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtins_compile() {
        for (build, extensions) in LANGUAGES {
            assert!(build().is_ok(), "failed to build {:?}", extensions);
        }
    }

    #[test]
    fn test_no_duplicate_keys() {
        let mut registry = LangRegistry::new();
        register_all(&mut registry).unwrap();
        let total: usize = LANGUAGES.iter().map(|(_, exts)| exts.len()).sum();
        assert_eq!(registry.languages().len(), total);
    }
}
