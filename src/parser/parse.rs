//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent compilation engine organized as:
//! - This module: Parser struct, token expectation helpers, and coordination
//! - `declarations`: class, class variables, subroutines, parameters, locals
//! - `statements`: `let`, `if`, `while`, `do`, `return`
//! - `expressions`: expressions, terms, subroutine calls, expression lists
//!
//! # Token discipline
//!
//! The parser holds exactly one token of state, `current`: the token the rule
//! in progress has seen but not yet turned into a leaf.  Every rule starts with
//! `current` on the first token of its construct and returns with `current` on
//! the first token after it.  The only lookahead beyond `current` is a
//! non-consuming [`Tokenizer::peek`] used by term disambiguation.

use crate::parser::ast::{Keyword, Label, SourceLocation, SyntaxNode, TokenKind};
use crate::parser::lexer::{LexError, Token, Tokenizer};
use log::debug;
use std::fmt;

/// Deepest nesting of terms and statement blocks accepted in one class
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The tokenizer could not produce the next token
    Lex(LexError),

    /// A rule required a specific token and found another
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    /// Input ended in the middle of a construct
    UnexpectedEndOfInput {
        expected: String,
        location: SourceLocation,
    },

    /// Terms or statement blocks nested past [`MAX_NESTING_DEPTH`]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::UnexpectedToken { location, .. }
            | ParseError::UnexpectedEndOfInput { location, .. }
            | ParseError::NestingTooDeep { location, .. } => *location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => write!(f, "{}", err),
            ParseError::UnexpectedToken {
                expected,
                found,
                location,
            } => write!(
                f,
                "Parse error at {}: expected {}, found {}",
                location, expected, found
            ),
            ParseError::UnexpectedEndOfInput { expected, location } => write!(
                f,
                "Parse error at {}: expected {}, found end of input",
                location, expected
            ),
            ParseError::NestingTooDeep { limit, location } => write!(
                f,
                "Parse error at {}: nesting deeper than {} levels",
                location, limit
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        match err {
            LexError::UnexpectedEndOfInput { location } => ParseError::UnexpectedEndOfInput {
                expected: "a token".to_string(),
                location,
            },
            other => ParseError::Lex(other),
        }
    }
}

/// Recursive descent compilation engine for one Jack class
pub struct Parser {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) current: Option<Token>,
    /// Guarded rules currently on the call stack
    depth: usize,
}

impl Parser {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            current: None,
            depth: 0,
        }
    }

    /// Convenience constructor over a source string
    pub fn from_source(source: &str) -> Self {
        Self::new(Tokenizer::new(source))
    }

    /// Parse the whole input as one class and return its tree.
    ///
    /// Fails if anything other than whitespace or comments follows the
    /// class's closing brace.
    pub fn compile_class(&mut self) -> Result<SyntaxNode, ParseError> {
        self.current = Some(self.tokenizer.advance().map_err(|err| match err {
            LexError::UnexpectedEndOfInput { location } => ParseError::UnexpectedEndOfInput {
                expected: "'class'".to_string(),
                location,
            },
            other => ParseError::Lex(other),
        })?);

        let class = self.parse_class()?;

        if let Some(token) = &self.current {
            return Err(self.unexpected("end of input", token));
        }
        debug!("parsed class with {} leaves", class.leaves().len());
        Ok(class)
    }

    /// True when every token has been consumed
    pub fn is_finished(&self) -> bool {
        self.current.is_none() && !self.tokenizer.has_more_tokens()
    }

    // ===== Helper methods =====

    /// Pull the next token into `current`, or clear it at end of input
    pub(crate) fn advance(&mut self) -> Result<(), ParseError> {
        self.current = if self.tokenizer.has_more_tokens() {
            Some(self.tokenizer.advance()?)
        } else {
            None
        };
        Ok(())
    }

    /// The current token, or an end-of-input error naming what was expected
    pub(crate) fn peek(&self, expected: &str) -> Result<&Token, ParseError> {
        self.current
            .as_ref()
            .ok_or_else(|| ParseError::UnexpectedEndOfInput {
                expected: expected.to_string(),
                location: self.tokenizer.location(),
            })
    }

    /// The token after `current`, without consuming anything
    pub(crate) fn peek_ahead(&self) -> Result<Option<Token>, ParseError> {
        Ok(self.tokenizer.peek()?)
    }

    pub(crate) fn check_symbol(&self, ch: char) -> bool {
        self.current.as_ref().is_some_and(|t| t.is_symbol(ch))
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.as_ref().is_some_and(|t| t.is_keyword(keyword))
    }

    /// Keyword of the current token, if it is one
    pub(crate) fn current_keyword(&self) -> Option<Keyword> {
        self.current.as_ref().and_then(Token::as_keyword)
    }

    pub(crate) fn unexpected(&self, expected: &str, found: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            location: found.location,
        }
    }

    /// Turn the current token into a leaf and advance past it
    pub(crate) fn take_leaf(&mut self, expected: &str) -> Result<SyntaxNode, ParseError> {
        let token = self.peek(expected)?.clone();
        self.advance()?;
        Ok(SyntaxNode::Leaf {
            kind: token.kind,
            text: token.text,
            location: token.location,
        })
    }

    /// Consume a token that satisfies `accept`, or fail naming `expected`
    pub(crate) fn expect_with(
        &mut self,
        expected: &str,
        accept: impl Fn(&Token) -> bool,
    ) -> Result<SyntaxNode, ParseError> {
        let token = self.peek(expected)?;
        if accept(token) {
            self.take_leaf(expected)
        } else {
            Err(self.unexpected(expected, token))
        }
    }

    pub(crate) fn expect_symbol(&mut self, ch: char) -> Result<SyntaxNode, ParseError> {
        self.expect_with(&format!("'{}'", ch), |t| t.is_symbol(ch))
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<SyntaxNode, ParseError> {
        self.expect_with(&format!("'{}'", keyword), |t| t.is_keyword(keyword))
    }

    pub(crate) fn expect_one_of(&mut self, keywords: &[Keyword]) -> Result<SyntaxNode, ParseError> {
        let expected = keywords
            .iter()
            .map(|k| format!("'{}'", k))
            .collect::<Vec<_>>()
            .join(" or ");
        self.expect_with(&expected, |t| keywords.iter().any(|k| t.is_keyword(*k)))
    }

    pub(crate) fn expect_identifier(&mut self, what: &str) -> Result<SyntaxNode, ParseError> {
        self.expect_with(what, |t| t.kind == TokenKind::Identifier)
    }

    /// `int`, `char`, `boolean` or a class name
    pub(crate) fn expect_type(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect_with("a type", |t| {
            t.kind == TokenKind::Identifier
                || matches!(
                    t.as_keyword(),
                    Some(Keyword::Int | Keyword::Char | Keyword::Boolean)
                )
        })
    }

    /// Run a recursive rule one level deeper, failing past the nesting limit
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            let location = match &self.current {
                Some(token) => token.location,
                None => self.tokenizer.location(),
            };
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                location,
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Wrap accumulated children into a finished node
    pub(crate) fn finish(label: Label, children: Vec<SyntaxNode>) -> SyntaxNode {
        SyntaxNode::node(label, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_class() {
        let mut parser = Parser::from_source("class Main { }");
        let class = parser.compile_class().unwrap();

        assert_eq!(
            class.to_string(),
            r#"class[keyword"class" identifier"Main" symbol"{" symbol"}"]"#
        );
        assert!(parser.is_finished());
    }

    #[test]
    fn test_empty_input() {
        let err = Parser::from_source("  // nothing\n").compile_class().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { ref expected, .. } if expected == "'class'"));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = Parser::from_source("class A { } class B { }")
            .compile_class()
            .unwrap_err();
        match err {
            ParseError::UnexpectedToken {
                expected,
                found,
                location,
            } => {
                assert_eq!(expected, "end of input");
                assert_eq!(found, "'class'");
                assert_eq!(location.offset, 12);
            }
            other => panic!("Expected unexpected token, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_class_keyword() {
        let err = Parser::from_source("Main { }").compile_class().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref expected, .. } if expected == "'class'"));
    }

    #[test]
    fn test_truncated_class() {
        let err = Parser::from_source("class Main {").compile_class().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn test_lex_errors_propagate() {
        let err = Parser::from_source("class Main { # }").compile_class().unwrap_err();
        assert!(matches!(
            err,
            ParseError::Lex(LexError::UnrecognizedCharacter { ch: '#', .. })
        ));
        assert_eq!(err.location().column, 14);
    }

    #[test]
    fn test_error_display() {
        let err = Parser::from_source("class 1").compile_class().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 7: expected a class name, found integer constant '1'"
        );
    }
}
