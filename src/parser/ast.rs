//! Syntax tree definitions for Jack classes
//!
//! The tree is a plain owned structure: every [`SyntaxNode::Node`] owns its
//! children in source order, and every [`SyntaxNode::Leaf`] is a copy of the
//! token that produced it.

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Byte offset from the start of the source
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Symbol,
    Identifier,
    IntegerConstant,
    StringConstant,
}

impl TokenKind {
    /// Tag name used by the XML formatter
    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerConstant => "integer constant",
            TokenKind::StringConstant => "string constant",
        };
        f.write_str(name)
    }
}

/// The 21 reserved words of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    pub const ALL: [Keyword; 21] = [
        Keyword::Class,
        Keyword::Constructor,
        Keyword::Function,
        Keyword::Method,
        Keyword::Field,
        Keyword::Static,
        Keyword::Var,
        Keyword::Int,
        Keyword::Char,
        Keyword::Boolean,
        Keyword::Void,
        Keyword::True,
        Keyword::False,
        Keyword::Null,
        Keyword::This,
        Keyword::Let,
        Keyword::Do,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Return,
    ];

    /// Look up a word; `None` means it is an ordinary identifier.
    pub fn from_word(word: &str) -> Option<Self> {
        let keyword = match word {
            "class" => Keyword::Class,
            "constructor" => Keyword::Constructor,
            "function" => Keyword::Function,
            "method" => Keyword::Method,
            "field" => Keyword::Field,
            "static" => Keyword::Static,
            "var" => Keyword::Var,
            "int" => Keyword::Int,
            "char" => Keyword::Char,
            "boolean" => Keyword::Boolean,
            "void" => Keyword::Void,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "this" => Keyword::This,
            "let" => Keyword::Let,
            "do" => Keyword::Do,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "return" => Keyword::Return,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }

    /// `true`, `false`, `null` and `this` may appear directly as a term
    pub fn is_constant(self) -> bool {
        matches!(
            self,
            Keyword::True | Keyword::False | Keyword::Null | Keyword::This
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammar construct named by an interior node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl Label {
    /// Tag name used by the XML formatter
    pub fn tag(self) -> &'static str {
        match self {
            Label::Class => "class",
            Label::ClassVarDec => "classVarDec",
            Label::SubroutineDec => "subroutineDec",
            Label::ParameterList => "parameterList",
            Label::SubroutineBody => "subroutineBody",
            Label::VarDec => "varDec",
            Label::Statements => "statements",
            Label::LetStatement => "letStatement",
            Label::IfStatement => "ifStatement",
            Label::WhileStatement => "whileStatement",
            Label::DoStatement => "doStatement",
            Label::ReturnStatement => "returnStatement",
            Label::Expression => "expression",
            Label::Term => "term",
            Label::ExpressionList => "expressionList",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A node of the parse tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// Named grammar construct; children are in source order
    Node {
        label: Label,
        children: Vec<SyntaxNode>,
    },
    /// A single token
    Leaf {
        kind: TokenKind,
        text: String,
        location: SourceLocation,
    },
}

impl SyntaxNode {
    pub fn node(label: Label, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Node { label, children }
    }

    /// Label of an interior node, `None` for leaves
    pub fn label(&self) -> Option<Label> {
        match self {
            SyntaxNode::Node { label, .. } => Some(*label),
            SyntaxNode::Leaf { .. } => None,
        }
    }

    /// Children of an interior node; leaves have none
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Node { children, .. } => children,
            SyntaxNode::Leaf { .. } => &[],
        }
    }

    /// Text of a leaf, `None` for interior nodes
    pub fn text(&self) -> Option<&str> {
        match self {
            SyntaxNode::Node { .. } => None,
            SyntaxNode::Leaf { text, .. } => Some(text),
        }
    }

    /// Location of the first token covered by this node
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            SyntaxNode::Leaf { location, .. } => Some(*location),
            SyntaxNode::Node { children, .. } => {
                children.iter().find_map(SyntaxNode::location)
            }
        }
    }

    /// All leaves in source order
    pub fn leaves(&self) -> Vec<&SyntaxNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a SyntaxNode>) {
        match self {
            SyntaxNode::Leaf { .. } => out.push(self),
            SyntaxNode::Node { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

/// Compact single-line form, e.g. `term[identifier"x"]`
impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxNode::Leaf { kind, text, .. } => {
                write!(f, "{}{:?}", kind.tag(), text)
            }
            SyntaxNode::Node { label, children } => {
                write!(f, "{}[", label.tag())?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", child)?;
                }
                f.write_str("]")
            }
        }
    }
}
