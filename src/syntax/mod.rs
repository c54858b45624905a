//! Syntax and styling module
//!
//! This module provides the tokenizer infrastructure:
//! - Style tags and their terminal palette
//! - Style patterns and the combined-regex lexer engine
//! - The language handler registry and built-in languages

pub mod builtin;
mod lexer;
mod registry;
mod rules;
mod source;
mod style;
mod tokens;

pub use lexer::{Decoration, Decorations, Job, Lexer, SimpleLexer, MAX_EMBED_DEPTH};
pub use registry::{LangRegistry, DEFAULT_CODE, DEFAULT_MARKUP};
pub use rules::{PatternStyle, Resolution, StylePattern};
pub use source::{source_decorator, SourceOptions};
pub use style::{Color, Style, SGR_RESET};
pub use tokens::StyleTag;
