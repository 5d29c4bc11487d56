//! Tokenizer for Jack source code
//!
//! The [`Tokenizer`] keeps a single cursor over an in-memory copy of the
//! source.  Whitespace and comments are skipped lazily at the start of every
//! query, so there is no separate pre-pass; [`Tokenizer::peek`] scans from a
//! copy of the cursor and never moves the real one.

use super::ast::{Keyword, SourceLocation, TokenKind};
use log::trace;
use std::fmt;

/// Characters that form a one-character symbol token
pub const SYMBOLS: &[char] = &[
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|', '<', '>', '=', '~',
];

/// Largest value an integer constant may denote
pub const MAX_INT_CONSTANT: u16 = 32767;

/// A classified lexeme.
///
/// `text` is the literal source span; string constants have their quotes
/// removed and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    fn require(&self, expected: TokenKind) -> Result<(), LexError> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(LexError::KindMismatch {
                expected,
                found: self.kind,
                location: self.location,
            })
        }
    }

    pub fn keyword(&self) -> Result<Keyword, LexError> {
        self.require(TokenKind::Keyword)?;
        // Keyword tokens are only ever built from the reserved word table
        Keyword::from_word(&self.text).ok_or(LexError::KindMismatch {
            expected: TokenKind::Keyword,
            found: TokenKind::Identifier,
            location: self.location,
        })
    }

    pub fn symbol(&self) -> Result<char, LexError> {
        self.require(TokenKind::Symbol)?;
        self.text.chars().next().ok_or(LexError::KindMismatch {
            expected: TokenKind::Symbol,
            found: self.kind,
            location: self.location,
        })
    }

    pub fn identifier(&self) -> Result<&str, LexError> {
        self.require(TokenKind::Identifier)?;
        Ok(&self.text)
    }

    pub fn int_val(&self) -> Result<u16, LexError> {
        self.require(TokenKind::IntegerConstant)?;
        match self.text.parse::<u16>() {
            Ok(value) if value <= MAX_INT_CONSTANT => Ok(value),
            _ => Err(LexError::IntegerOutOfRange {
                text: self.text.clone(),
                location: self.location,
            }),
        }
    }

    pub fn string_val(&self) -> Result<&str, LexError> {
        self.require(TokenKind::StringConstant)?;
        Ok(&self.text)
    }

    /// True if this is the symbol `ch`
    pub fn is_symbol(&self, ch: char) -> bool {
        self.kind == TokenKind::Symbol && self.text.starts_with(ch) && self.text.len() == 1
    }

    /// True if this is the reserved word `keyword`
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword.as_str()
    }

    /// Keyword of a keyword token, `None` for every other kind
    pub fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => Keyword::from_word(&self.text),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Keyword | TokenKind::Symbol => write!(f, "'{}'", self.text),
            TokenKind::StringConstant => write!(f, "string constant \"{}\"", self.text),
            kind => write!(f, "{} '{}'", kind, self.text),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// `/*` without a closing `*/`; located at the opening `/*`
    UnterminatedComment { location: SourceLocation },

    /// `"` without a closing `"` on the same line; located at the opening quote
    UnterminatedString { location: SourceLocation },

    /// A character that cannot begin any token
    UnrecognizedCharacter { ch: char, location: SourceLocation },

    /// `advance` was called with no token left
    UnexpectedEndOfInput { location: SourceLocation },

    /// A typed accessor was used on a token of another kind
    KindMismatch {
        expected: TokenKind,
        found: TokenKind,
        location: SourceLocation,
    },

    /// Integer constant above 32767
    IntegerOutOfRange {
        text: String,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnterminatedComment { location }
            | LexError::UnterminatedString { location }
            | LexError::UnrecognizedCharacter { location, .. }
            | LexError::UnexpectedEndOfInput { location }
            | LexError::KindMismatch { location, .. }
            | LexError::IntegerOutOfRange { location, .. } => *location,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexer error at {}: ", self.location())?;
        match self {
            LexError::UnterminatedComment { .. } => write!(f, "unterminated block comment"),
            LexError::UnterminatedString { .. } => write!(f, "unterminated string constant"),
            LexError::UnrecognizedCharacter { ch, .. } => {
                write!(f, "unrecognized character {:?}", ch)
            }
            LexError::UnexpectedEndOfInput { .. } => write!(f, "unexpected end of input"),
            LexError::KindMismatch {
                expected, found, ..
            } => write!(f, "expected {}, found {}", expected, found),
            LexError::IntegerOutOfRange { text, .. } => write!(
                f,
                "integer constant {} exceeds {}",
                text, MAX_INT_CONSTANT
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// Cursor state; copied freely to scan ahead without committing
#[derive(Debug, Clone, Copy)]
struct Cursor {
    position: usize,
    offset: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.offset, self.line, self.column)
    }
}

/// Tokenizer for Jack source code
pub struct Tokenizer {
    input: Vec<char>,
    cursor: Cursor,
}

impl Tokenizer {
    /// Create a new tokenizer over a complete source text.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            cursor: Cursor {
                position: 0,
                offset: 0,
                line: 1,
                column: 1,
            },
        }
    }

    /// True if anything other than whitespace and comments remains.
    ///
    /// An unterminated block comment counts as remaining input so that the
    /// following [`advance`](Self::advance) reports it.
    pub fn has_more_tokens(&self) -> bool {
        let mut cursor = self.cursor;
        match self.skip_whitespace_and_comments(&mut cursor) {
            Ok(()) => !self.is_at_end(&cursor),
            Err(_) => true,
        }
    }

    /// Move past the next token and return it
    pub fn advance(&mut self) -> Result<Token, LexError> {
        let mut cursor = self.cursor;
        match self.scan(&mut cursor)? {
            Some(token) => {
                trace!("token {:?} {:?} at {}", token.kind, token.text, token.location);
                self.cursor = cursor;
                Ok(token)
            }
            None => Err(LexError::UnexpectedEndOfInput {
                location: cursor.location(),
            }),
        }
    }

    /// The token `advance` would return, without moving the cursor
    pub fn peek(&self) -> Result<Option<Token>, LexError> {
        let mut cursor = self.cursor;
        self.scan(&mut cursor)
    }

    /// Tokenize the rest of the input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while self.has_more_tokens() {
            tokens.push(self.advance()?);
        }
        Ok(tokens)
    }

    /// Location where the next token (or end of input) begins
    pub fn location(&self) -> SourceLocation {
        let mut cursor = self.cursor;
        match self.skip_whitespace_and_comments(&mut cursor) {
            Ok(()) => cursor.location(),
            Err(_) => self.cursor.location(),
        }
    }

    /// Skip trivia, then lex one token; `None` at end of input
    fn scan(&self, cursor: &mut Cursor) -> Result<Option<Token>, LexError> {
        self.skip_whitespace_and_comments(cursor)?;

        let Some(ch) = self.peek_char(cursor, 0) else {
            return Ok(None);
        };
        let loc = cursor.location();

        let token = if SYMBOLS.contains(&ch) {
            self.bump(cursor);
            Token::new(TokenKind::Symbol, ch, loc)
        } else if ch.is_ascii_alphabetic() || ch == '_' {
            self.identifier_or_keyword(cursor)
        } else if ch.is_ascii_digit() {
            self.integer_constant(cursor)
        } else if ch == '"' {
            self.string_constant(cursor)?
        } else {
            return Err(LexError::UnrecognizedCharacter { ch, location: loc });
        };

        Ok(Some(token))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&self, cursor: &mut Cursor) -> Token {
        let loc = cursor.location();
        let word = self.take_while(cursor, |c| c.is_ascii_alphanumeric() || c == '_');

        let kind = if Keyword::from_word(&word).is_some() {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, word, loc)
    }

    /// Parse a run of digits; range is checked by [`Token::int_val`]
    fn integer_constant(&self, cursor: &mut Cursor) -> Token {
        let loc = cursor.location();
        let digits = self.take_while(cursor, |c| c.is_ascii_digit());
        Token::new(TokenKind::IntegerConstant, digits, loc)
    }

    /// Parse string constant; no escape sequences, no line breaks
    fn string_constant(&self, cursor: &mut Cursor) -> Result<Token, LexError> {
        let loc = cursor.location();
        self.bump(cursor); // opening quote

        let mut text = String::new();
        while let Some(ch) = self.peek_char(cursor, 0) {
            match ch {
                '"' => {
                    self.bump(cursor);
                    return Ok(Token::new(TokenKind::StringConstant, text, loc));
                }
                '\n' | '\r' => break,
                _ => {
                    text.push(ch);
                    self.bump(cursor);
                }
            }
        }

        Err(LexError::UnterminatedString { location: loc })
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&self, cursor: &mut Cursor) -> Result<(), LexError> {
        loop {
            match self.peek_char(cursor, 0) {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.bump(cursor);
                }
                Some('/') => match self.peek_char(cursor, 1) {
                    Some('/') => self.skip_line_comment(cursor),
                    Some('*') => self.skip_block_comment(cursor)?,
                    _ => break,
                },
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&self, cursor: &mut Cursor) {
        while let Some(ch) = self.bump(cursor) {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip block comment; the first `*/` closes it
    fn skip_block_comment(&self, cursor: &mut Cursor) -> Result<(), LexError> {
        let start_loc = cursor.location();
        self.bump(cursor); // skip '/'
        self.bump(cursor); // skip '*'

        while !self.is_at_end(cursor) {
            if self.peek_char(cursor, 0) == Some('*') && self.peek_char(cursor, 1) == Some('/') {
                self.bump(cursor);
                self.bump(cursor);
                return Ok(());
            }
            self.bump(cursor);
        }

        Err(LexError::UnterminatedComment {
            location: start_loc,
        })
    }

    fn take_while(&self, cursor: &mut Cursor, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek_char(cursor, 0) {
            if !pred(ch) {
                break;
            }
            out.push(ch);
            self.bump(cursor);
        }
        out
    }

    fn peek_char(&self, cursor: &Cursor, n: usize) -> Option<char> {
        self.input.get(cursor.position + n).copied()
    }

    /// Advance the cursor by one character
    fn bump(&self, cursor: &mut Cursor) -> Option<char> {
        let ch = *self.input.get(cursor.position)?;
        cursor.position += 1;
        cursor.offset += ch.len_utf8();

        if ch == '\n' {
            cursor.line += 1;
            cursor.column = 1;
        } else {
            cursor.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self, cursor: &Cursor) -> bool {
        cursor.position >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
        Tokenizer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = kinds_and_texts("class Main { }");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Keyword, "class".to_string()),
                (TokenKind::Identifier, "Main".to_string()),
                (TokenKind::Symbol, "{".to_string()),
                (TokenKind::Symbol, "}".to_string()),
            ]
        );
    }

    #[test]
    fn test_every_symbol_is_one_token() {
        let source: String = SYMBOLS
            .iter()
            .filter(|c| **c != '/')
            .collect::<String>()
            + " /";
        let tokens = kinds_and_texts(&source);
        assert_eq!(tokens.len(), SYMBOLS.len());
        assert!(tokens.iter().all(|(kind, text)| *kind == TokenKind::Symbol
            && text.chars().count() == 1));
    }

    #[test]
    fn test_comments() {
        let tokens = kinds_and_texts(
            "/** doc */ let x; // trailing\n/* block\ncomment */ do y;",
        );
        let texts: Vec<&str> = tokens.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["let", "x", ";", "do", "y", ";"]);
    }

    #[test]
    fn test_block_comment_is_not_nested() {
        let tokens = kinds_and_texts("/* outer /* inner */ x");
        assert_eq!(tokens, vec![(TokenKind::Identifier, "x".to_string())]);
    }

    #[test]
    fn test_identifier_with_keyword_prefix() {
        let tokens = kinds_and_texts("classy _do do2 while");
        assert_eq!(tokens[0].0, TokenKind::Identifier);
        assert_eq!(tokens[1].0, TokenKind::Identifier);
        assert_eq!(tokens[2].0, TokenKind::Identifier);
        assert_eq!(tokens[3].0, TokenKind::Keyword);
    }

    #[test]
    fn test_minus_is_separate_from_literal() {
        let tokens = kinds_and_texts("-12");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Symbol, "-".to_string()),
                (TokenKind::IntegerConstant, "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_constant_keeps_spaces() {
        let tokens = kinds_and_texts(r#""  hello, world // not a comment ""#);
        assert_eq!(
            tokens,
            vec![(
                TokenKind::StringConstant,
                "  hello, world // not a comment ".to_string()
            )]
        );
    }

    #[test]
    fn test_integer_constant_accessors() {
        let mut tokenizer = Tokenizer::new("34182");
        let token = tokenizer.advance().unwrap();
        assert_eq!(token.kind, TokenKind::IntegerConstant);
        assert_eq!(token.text, "34182");
        assert!(!tokenizer.has_more_tokens());

        assert!(matches!(
            token.keyword(),
            Err(LexError::KindMismatch {
                expected: TokenKind::Keyword,
                found: TokenKind::IntegerConstant,
                ..
            })
        ));
        assert!(matches!(token.symbol(), Err(LexError::KindMismatch { .. })));
        assert!(matches!(token.identifier(), Err(LexError::KindMismatch { .. })));
        assert!(matches!(token.string_val(), Err(LexError::KindMismatch { .. })));
        assert!(matches!(token.int_val(), Err(LexError::IntegerOutOfRange { .. })));
    }

    #[test]
    fn test_typed_accessors() {
        let tokens = Tokenizer::new(r#"while ; count 32767 "s""#).tokenize().unwrap();
        assert_eq!(tokens[0].keyword().unwrap(), Keyword::While);
        assert_eq!(tokens[1].symbol().unwrap(), ';');
        assert_eq!(tokens[2].identifier().unwrap(), "count");
        assert_eq!(tokens[3].int_val().unwrap(), 32767);
        assert_eq!(tokens[4].string_val().unwrap(), "s");
    }

    #[test]
    fn test_unterminated_string() {
        let mut tokenizer = Tokenizer::new("let s = \"abc");
        for _ in 0..3 {
            tokenizer.advance().unwrap();
        }
        let err = tokenizer.advance().unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedString {
                location: SourceLocation::new(8, 1, 9)
            }
        );
    }

    #[test]
    fn test_string_may_not_span_lines() {
        let err = Tokenizer::new("\"abc\ndef\"").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { location } if location.offset == 0));
    }

    #[test]
    fn test_unterminated_comment() {
        let mut tokenizer = Tokenizer::new("x /* never closed");
        assert_eq!(tokenizer.advance().unwrap().text, "x");
        assert!(tokenizer.has_more_tokens());
        assert_eq!(
            tokenizer.advance().unwrap_err(),
            LexError::UnterminatedComment {
                location: SourceLocation::new(2, 1, 3)
            }
        );
    }

    #[test]
    fn test_unrecognized_character() {
        let err = Tokenizer::new("let x = 1 ^ 2;").tokenize().unwrap_err();
        assert!(matches!(
            err,
            LexError::UnrecognizedCharacter { ch: '^', location } if location.offset == 10
        ));
    }

    #[test]
    fn test_advance_past_end() {
        let mut tokenizer = Tokenizer::new("x   // done\n");
        tokenizer.advance().unwrap();
        assert!(!tokenizer.has_more_tokens());
        assert!(matches!(
            tokenizer.advance(),
            Err(LexError::UnexpectedEndOfInput { .. })
        ));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut tokenizer = Tokenizer::new("foo ( 1 )");
        assert_eq!(tokenizer.advance().unwrap().text, "foo");
        let peeked = tokenizer.peek().unwrap().unwrap();
        assert!(peeked.is_symbol('('));
        assert_eq!(tokenizer.peek().unwrap(), Some(peeked.clone()));
        assert_eq!(tokenizer.advance().unwrap(), peeked);
    }

    #[test]
    fn test_locations_track_lines() {
        let tokens = Tokenizer::new("class\n  Main {\n}").tokenize().unwrap();
        assert_eq!(tokens[1].location, SourceLocation::new(8, 2, 3));
        assert_eq!(tokens[3].location, SourceLocation::new(15, 3, 1));
    }

    #[test]
    fn test_byte_offsets_after_multibyte_text() {
        let tokens = Tokenizer::new("\"héllo\" x").tokenize().unwrap();
        assert_eq!(tokens[1].location.offset, 9);
        assert_eq!(tokens[1].location.column, 9);
    }
}
