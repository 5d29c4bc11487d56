//! Declaration parsing implementation
//!
//! This module handles the class-level and subroutine-level declarations:
//!
//! - The class itself: `class Name { ... }`
//! - Class variables: `static int count;`, `field Array a, b;`
//! - Subroutines: `constructor`, `function` and `method` declarations
//! - Parameter lists and subroutine bodies with their local `var` declarations
//!
//! # Grammar
//!
//! ```text
//! class          ::= 'class' className '{' classVarDec* subroutineDec* '}'
//! classVarDec    ::= ('static' | 'field') type varName (',' varName)* ';'
//! subroutineDec  ::= ('constructor' | 'function' | 'method') ('void' | type)
//!                    subroutineName '(' parameterList ')' subroutineBody
//! parameterList  ::= ((type varName) (',' type varName)*)?
//! subroutineBody ::= '{' varDec* statements '}'
//! varDec         ::= 'var' type varName (',' varName)* ';'
//! type           ::= 'int' | 'char' | 'boolean' | className
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{Keyword, Label, SyntaxNode, TokenKind};
use crate::parser::parse::{ParseError, Parser};
use log::trace;

/// What a keyword at class level introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClassMember {
    Variable,
    Subroutine,
}

impl ClassMember {
    pub(crate) fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Static | Keyword::Field => Some(ClassMember::Variable),
            Keyword::Constructor | Keyword::Function | Keyword::Method => {
                Some(ClassMember::Subroutine)
            }
            Keyword::Class
            | Keyword::Var
            | Keyword::Int
            | Keyword::Char
            | Keyword::Boolean
            | Keyword::Void
            | Keyword::True
            | Keyword::False
            | Keyword::Null
            | Keyword::This
            | Keyword::Let
            | Keyword::Do
            | Keyword::If
            | Keyword::Else
            | Keyword::While
            | Keyword::Return => None,
        }
    }
}

impl Parser {
    /// Parse `'class' name '{' classVarDec* subroutineDec* '}'`
    pub(crate) fn parse_class(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = vec![
            self.expect_keyword(Keyword::Class)?,
            self.expect_identifier("a class name")?,
            self.expect_symbol('{')?,
        ];

        let mut in_subroutines = false;
        while let Some(member) = self.current_keyword().and_then(ClassMember::from_keyword) {
            match member {
                ClassMember::Variable if in_subroutines => {
                    let token = self.peek("a subroutine declaration")?;
                    return Err(self.unexpected("a subroutine declaration or '}'", token));
                }
                ClassMember::Variable => children.push(self.compile_class_var_dec()?),
                ClassMember::Subroutine => {
                    in_subroutines = true;
                    children.push(self.compile_subroutine_dec()?);
                }
            }
        }

        children.push(self.expect_symbol('}')?);
        Ok(Parser::finish(Label::Class, children))
    }

    /// Parse `('static'|'field') type varName (',' varName)* ';'`
    pub(crate) fn compile_class_var_dec(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = vec![
            self.expect_one_of(&[Keyword::Static, Keyword::Field])?,
            self.expect_type()?,
        ];
        self.compile_var_names(&mut children)?;
        Ok(Parser::finish(Label::ClassVarDec, children))
    }

    /// Parse a subroutine declaration including its body
    pub(crate) fn compile_subroutine_dec(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = vec![self.expect_one_of(&[
            Keyword::Constructor,
            Keyword::Function,
            Keyword::Method,
        ])?];

        children.push(self.expect_with("'void' or a type", |t| {
            t.kind == TokenKind::Identifier
                || matches!(
                    t.as_keyword(),
                    Some(Keyword::Void | Keyword::Int | Keyword::Char | Keyword::Boolean)
                )
        })?);

        let name = self.expect_identifier("a subroutine name")?;
        trace!("subroutine {}", name.text().unwrap_or_default());
        children.push(name);

        children.push(self.expect_symbol('(')?);
        children.push(self.compile_parameter_list()?);
        children.push(self.expect_symbol(')')?);
        children.push(self.compile_subroutine_body()?);

        Ok(Parser::finish(Label::SubroutineDec, children))
    }

    /// Parse the parameters up to, but not including, the closing `)`
    pub(crate) fn compile_parameter_list(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = Vec::new();

        if !self.check_symbol(')') {
            children.push(self.expect_type()?);
            children.push(self.expect_identifier("a parameter name")?);

            while self.check_symbol(',') {
                children.push(self.expect_symbol(',')?);
                children.push(self.expect_type()?);
                children.push(self.expect_identifier("a parameter name")?);
            }
        }

        Ok(Parser::finish(Label::ParameterList, children))
    }

    /// Parse `'{' varDec* statements '}'`
    pub(crate) fn compile_subroutine_body(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = vec![self.expect_symbol('{')?];

        while self.check_keyword(Keyword::Var) {
            children.push(self.compile_var_dec()?);
        }

        children.push(self.compile_statements()?);
        children.push(self.expect_symbol('}')?);

        Ok(Parser::finish(Label::SubroutineBody, children))
    }

    /// Parse `'var' type varName (',' varName)* ';'`
    pub(crate) fn compile_var_dec(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::Var)?, self.expect_type()?];
        self.compile_var_names(&mut children)?;
        Ok(Parser::finish(Label::VarDec, children))
    }

    /// `varName (',' varName)* ';'` shared by both variable declarations
    fn compile_var_names(&mut self, children: &mut Vec<SyntaxNode>) -> Result<(), ParseError> {
        children.push(self.expect_identifier("a variable name")?);
        while self.check_symbol(',') {
            children.push(self.expect_symbol(',')?);
            children.push(self.expect_identifier("a variable name")?);
        }
        children.push(self.expect_symbol(';')?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::{ParseError, Parser};

    /// Position a parser on the first token of `source`
    fn parser_at(source: &str) -> Parser {
        let mut parser = Parser::from_source(source);
        parser.advance().unwrap();
        parser
    }

    #[test]
    fn test_class_var_dec() {
        let mut parser = parser_at("static boolean test;");
        let node = parser.compile_class_var_dec().unwrap();
        assert_eq!(
            node.to_string(),
            r#"classVarDec[keyword"static" keyword"boolean" identifier"test" symbol";"]"#
        );
        assert!(parser.is_finished());
    }

    #[test]
    fn test_class_var_dec_with_list() {
        let mut parser = parser_at("field Array a, b;");
        let node = parser.compile_class_var_dec().unwrap();
        assert_eq!(
            node.to_string(),
            r#"classVarDec[keyword"field" identifier"Array" identifier"a" symbol"," identifier"b" symbol";"]"#
        );
    }

    #[test]
    fn test_empty_parameter_list() {
        let mut parser = parser_at("function void main() { return; }");
        let node = parser.compile_subroutine_dec().unwrap();
        assert_eq!(
            node.to_string(),
            concat!(
                r#"subroutineDec[keyword"function" keyword"void" identifier"main" symbol"(" "#,
                r#"parameterList[] symbol")" subroutineBody[symbol"{" "#,
                r#"statements[returnStatement[keyword"return" symbol";"]] symbol"}"]]"#
            )
        );
    }

    #[test]
    fn test_parameter_list() {
        let mut parser = parser_at("int Ax, Square sq)");
        let node = parser.compile_parameter_list().unwrap();
        assert_eq!(
            node.to_string(),
            r#"parameterList[keyword"int" identifier"Ax" symbol"," identifier"Square" identifier"sq"]"#
        );
        assert!(parser.check_symbol(')'));
    }

    #[test]
    fn test_body_with_locals() {
        let mut parser = parser_at("{ var int i, j; var char c; }");
        let node = parser.compile_subroutine_body().unwrap();
        let children = node.children();
        assert_eq!(children.len(), 5);
        assert_eq!(
            children[1].to_string(),
            r#"varDec[keyword"var" keyword"int" identifier"i" symbol"," identifier"j" symbol";"]"#
        );
        assert_eq!(children[3].to_string(), "statements[]");
    }

    #[test]
    fn test_bad_type_rejected() {
        let mut parser = parser_at("static void x;");
        let err = parser.compile_class_var_dec().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref expected, ref found, .. }
            if expected == "a type" && found == "'void'"));
    }

    #[test]
    fn test_missing_semicolon() {
        let mut parser = parser_at("var int x let");
        let err = parser.compile_var_dec().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref expected, .. } if expected == "';'"));
    }

    #[test]
    fn test_field_after_subroutine_rejected() {
        let err = Parser::from_source("class A { function void f() { return; } field int x; }")
            .compile_class()
            .unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref found, .. } if found == "'field'"));
    }
}
