//! Statement parsing implementation
//!
//! This module handles parsing of all Jack statement types:
//!
//! - `let` assignments, optionally to an array element
//! - `if` with optional `else`, and `while`
//! - `do` subroutine calls
//! - `return` with optional value
//!
//! # Grammar
//!
//! ```text
//! statements ::= statement*
//! statement  ::= letStatement | ifStatement | whileStatement
//!              | doStatement | returnStatement
//! letStatement    ::= 'let' varName ('[' expression ']')? '=' expression ';'
//! ifStatement     ::= 'if' '(' expression ')' '{' statements '}'
//!                     ('else' '{' statements '}')?
//! whileStatement  ::= 'while' '(' expression ')' '{' statements '}'
//! doStatement     ::= 'do' subroutineCall ';'
//! returnStatement ::= 'return' expression? ';'
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{Keyword, Label, SyntaxNode};
use crate::parser::parse::{ParseError, Parser};

/// The five statement forms, keyed by their leading keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatementKind {
    Let,
    If,
    While,
    Do,
    Return,
}

impl StatementKind {
    pub(crate) fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Let => Some(StatementKind::Let),
            Keyword::If => Some(StatementKind::If),
            Keyword::While => Some(StatementKind::While),
            Keyword::Do => Some(StatementKind::Do),
            Keyword::Return => Some(StatementKind::Return),
            Keyword::Class
            | Keyword::Constructor
            | Keyword::Function
            | Keyword::Method
            | Keyword::Field
            | Keyword::Static
            | Keyword::Var
            | Keyword::Int
            | Keyword::Char
            | Keyword::Boolean
            | Keyword::Void
            | Keyword::True
            | Keyword::False
            | Keyword::Null
            | Keyword::This
            | Keyword::Else => None,
        }
    }
}

impl Parser {
    /// Parse statements until the current token does not start one
    pub(crate) fn compile_statements(&mut self) -> Result<SyntaxNode, ParseError> {
        self.nested(Parser::parse_statements)
    }

    fn parse_statements(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut statements = Vec::new();

        while let Some(kind) = self.current_keyword().and_then(StatementKind::from_keyword) {
            let statement = match kind {
                StatementKind::Let => self.compile_let()?,
                StatementKind::If => self.compile_if()?,
                StatementKind::While => self.compile_while()?,
                StatementKind::Do => self.compile_do()?,
                StatementKind::Return => self.compile_return()?,
            };
            statements.push(statement);
        }

        Ok(Parser::finish(Label::Statements, statements))
    }

    /// Parse let statement
    pub(crate) fn compile_let(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = vec![
            self.expect_keyword(Keyword::Let)?,
            self.expect_identifier("a variable name")?,
        ];

        if self.check_symbol('[') {
            children.push(self.expect_symbol('[')?);
            children.push(self.compile_expression()?);
            children.push(self.expect_symbol(']')?);
        }

        children.push(self.expect_symbol('=')?);
        children.push(self.compile_expression()?);
        children.push(self.expect_symbol(';')?);

        Ok(Parser::finish(Label::LetStatement, children))
    }

    /// Parse if statement
    pub(crate) fn compile_if(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::If)?];
        self.compile_condition_and_body(&mut children)?;

        if self.check_keyword(Keyword::Else) {
            children.push(self.expect_keyword(Keyword::Else)?);
            self.compile_block(&mut children)?;
        }

        Ok(Parser::finish(Label::IfStatement, children))
    }

    /// Parse while statement
    pub(crate) fn compile_while(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::While)?];
        self.compile_condition_and_body(&mut children)?;
        Ok(Parser::finish(Label::WhileStatement, children))
    }

    /// Parse do statement; the call is embedded without a term wrapper
    pub(crate) fn compile_do(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::Do)?];
        let name = self.expect_identifier("a subroutine name")?;
        self.compile_subroutine_call(name, &mut children)?;
        children.push(self.expect_symbol(';')?);
        Ok(Parser::finish(Label::DoStatement, children))
    }

    /// Parse return statement
    pub(crate) fn compile_return(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::Return)?];

        if !self.check_symbol(';') {
            children.push(self.compile_expression()?);
        }
        children.push(self.expect_symbol(';')?);

        Ok(Parser::finish(Label::ReturnStatement, children))
    }

    /// `'(' expression ')' '{' statements '}'`
    fn compile_condition_and_body(
        &mut self,
        children: &mut Vec<SyntaxNode>,
    ) -> Result<(), ParseError> {
        children.push(self.expect_symbol('(')?);
        children.push(self.compile_expression()?);
        children.push(self.expect_symbol(')')?);
        self.compile_block(children)
    }

    /// `'{' statements '}'`
    fn compile_block(&mut self, children: &mut Vec<SyntaxNode>) -> Result<(), ParseError> {
        children.push(self.expect_symbol('{')?);
        children.push(self.compile_statements()?);
        children.push(self.expect_symbol('}')?);
        Ok(())
    }
}
