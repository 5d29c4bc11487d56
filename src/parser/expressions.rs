//! Expression parsing implementation
//!
//! Jack expressions have no operator precedence: an expression is a flat
//! sequence of terms separated by binary operators, and grouping is only
//! expressed with parentheses.
//!
//! # Grammar
//!
//! ```text
//! expression     ::= term (op term)*
//! term           ::= integerConstant | stringConstant | keywordConstant
//!                  | varName | varName '[' expression ']' | subroutineCall
//!                  | '(' expression ')' | unaryOp term
//! subroutineCall ::= subroutineName '(' expressionList ')'
//!                  | (className | varName) '.' subroutineName '(' expressionList ')'
//! expressionList ::= (expression (',' expression)*)?
//! op             ::= '+' | '-' | '*' | '/' | '&' | '|' | '<' | '>' | '='
//! unaryOp        ::= '-' | '~'
//! ```
//!
//! An identifier is ambiguous until the token after it is known, so
//! [`Parser::compile_term`] peeks one token past the current one before
//! committing to a variable, array access or call.

use crate::parser::ast::{Label, SyntaxNode, TokenKind};
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

/// Binary operators
pub const BINARY_OPS: &[char] = &['+', '-', '*', '/', '&', '|', '<', '>', '='];

/// Unary operators
pub const UNARY_OPS: &[char] = &['-', '~'];

fn is_one_of(token: &Token, ops: &[char]) -> bool {
    ops.iter().any(|op| token.is_symbol(*op))
}

impl Parser {
    /// Parse `term (op term)*`
    pub(crate) fn compile_expression(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = vec![self.compile_term()?];

        while self
            .current
            .as_ref()
            .is_some_and(|t| is_one_of(t, BINARY_OPS))
        {
            children.push(self.take_leaf("an operator")?);
            children.push(self.compile_term()?);
        }

        Ok(Parser::finish(Label::Expression, children))
    }

    /// Parse a single term
    pub(crate) fn compile_term(&mut self) -> Result<SyntaxNode, ParseError> {
        self.nested(Parser::parse_term)
    }

    fn parse_term(&mut self) -> Result<SyntaxNode, ParseError> {
        let token = self.peek("a term")?.clone();
        let mut children = Vec::new();

        match token.kind {
            TokenKind::IntegerConstant | TokenKind::StringConstant => {
                children.push(self.take_leaf("a term")?);
            }
            TokenKind::Keyword => match token.as_keyword() {
                Some(keyword) if keyword.is_constant() => {
                    children.push(self.take_leaf("a term")?);
                }
                _ => return Err(self.unexpected("a term", &token)),
            },
            TokenKind::Symbol if token.is_symbol('(') => {
                children.push(self.expect_symbol('(')?);
                children.push(self.compile_expression()?);
                children.push(self.expect_symbol(')')?);
            }
            TokenKind::Symbol if is_one_of(&token, UNARY_OPS) => {
                children.push(self.take_leaf("a unary operator")?);
                children.push(self.compile_term()?);
            }
            TokenKind::Symbol => return Err(self.unexpected("a term", &token)),
            TokenKind::Identifier => {
                let next = self.peek_ahead()?;
                let name = self.take_leaf("a name")?;

                match next {
                    Some(next) if next.is_symbol('(') || next.is_symbol('.') => {
                        self.compile_subroutine_call(name, &mut children)?;
                    }
                    Some(next) if next.is_symbol('[') => {
                        children.push(name);
                        children.push(self.expect_symbol('[')?);
                        children.push(self.compile_expression()?);
                        children.push(self.expect_symbol(']')?);
                    }
                    _ => children.push(name),
                }
            }
        }

        Ok(Parser::finish(Label::Term, children))
    }

    /// Parse the rest of a call whose first name has already been consumed.
    ///
    /// Appends `name ('.' name)? '(' expressionList ')'` to `children`.
    pub(crate) fn compile_subroutine_call(
        &mut self,
        name: SyntaxNode,
        children: &mut Vec<SyntaxNode>,
    ) -> Result<(), ParseError> {
        children.push(name);

        let token = self.peek("'(' or '.'")?;
        if token.is_symbol('.') {
            children.push(self.expect_symbol('.')?);
            children.push(self.expect_identifier("a subroutine name")?);
        } else if !token.is_symbol('(') {
            return Err(self.unexpected("'(' or '.'", token));
        }

        children.push(self.expect_symbol('(')?);
        children.push(self.compile_expression_list()?);
        children.push(self.expect_symbol(')')?);
        Ok(())
    }

    /// Parse call arguments up to, but not including, the closing `)`
    pub(crate) fn compile_expression_list(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = Vec::new();

        if !self.check_symbol(')') {
            children.push(self.compile_expression()?);
            while self.check_symbol(',') {
                children.push(self.expect_symbol(',')?);
                children.push(self.compile_expression()?);
            }
        }

        Ok(Parser::finish(Label::ExpressionList, children))
    }
}
