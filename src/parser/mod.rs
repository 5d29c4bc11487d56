//! Jack source code parser
//!
//! This module transforms Jack source text into a syntax tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: The compilation engine (tokens → tree) and its error type
//! - [`ast`]: Tree node, token kind and keyword definitions
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead, pulled from the
//! tokenizer on demand. The tree mirrors the grammar: one labelled interior
//! node per construct, one leaf per token.
//!
//! ```
//! use jack_analyzer::parser::Parser;
//!
//! let class = Parser::from_source("class Main { }").compile_class().unwrap();
//! assert_eq!(class.children().len(), 4);
//! ```

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use ast::{Keyword, Label, SourceLocation, SyntaxNode, TokenKind};
pub use expressions::{BINARY_OPS, UNARY_OPS};
pub use lexer::{LexError, Token, Tokenizer};
pub use parse::{ParseError, Parser, MAX_NESTING_DEPTH};

/// Parse one complete source text as a class
pub fn parse_class(source: &str) -> Result<SyntaxNode, ParseError> {
    Parser::from_source(source).compile_class()
}
