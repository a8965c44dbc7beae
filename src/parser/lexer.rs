//! Lexer (tokenizer) for the Java-like source language
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Whitespace, `// line` comments and `/* block */` comments are skipped and
//! never produce tokens.

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Every kind of token the lexer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    IntLiteral,
    DoubleLiteral,
    StringLiteral,
    BoolLiteral, // true / false

    // Identifiers
    Ident,

    // Keywords
    Class,
    Public,
    Static,
    Int,
    Double,
    Boolean,
    StringType, // String
    Void,
    If,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,
    New,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Logical
    AndAnd, // &&
    OrOr,   // ||
    Bang,   // !

    // Assignment
    Eq, // =

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Semicolon, // ;
    Comma,     // ,
    Dot,       // .

    // End of file
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::IntLiteral => write!(f, "int literal"),
            TokenKind::DoubleLiteral => write!(f, "double literal"),
            TokenKind::StringLiteral => write!(f, "string literal"),
            TokenKind::BoolLiteral => write!(f, "boolean literal"),
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Class => write!(f, "'class'"),
            TokenKind::Public => write!(f, "'public'"),
            TokenKind::Static => write!(f, "'static'"),
            TokenKind::Int => write!(f, "'int'"),
            TokenKind::Double => write!(f, "'double'"),
            TokenKind::Boolean => write!(f, "'boolean'"),
            TokenKind::StringType => write!(f, "'String'"),
            TokenKind::Void => write!(f, "'void'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::For => write!(f, "'for'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::Break => write!(f, "'break'"),
            TokenKind::Continue => write!(f, "'continue'"),
            TokenKind::New => write!(f, "'new'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::AndAnd => write!(f, "'&&'"),
            TokenKind::OrOr => write!(f, "'||'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// A single token: its kind, the exact source text, and where it starts.
///
/// String literal text is the raw body between the quotes; every other kind
/// keeps its lexeme verbatim.
#[derive(Debug, Clone, PartialEq)]
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

    pub fn line(&self) -> usize {
        self.location.line
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::IntLiteral
            | TokenKind::DoubleLiteral
            | TokenKind::BoolLiteral => write!(f, "{} {}", self.kind, self.text),
            TokenKind::StringLiteral => write!(f, "string literal \"{}\"", self.text),
            TokenKind::Ident => write!(f, "identifier '{}'", self.text),
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl LexError {
    pub fn line(&self) -> usize {
        self.location.line
    }
}

fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        [
            ("class", TokenKind::Class),
            ("public", TokenKind::Public),
            ("static", TokenKind::Static),
            ("int", TokenKind::Int),
            ("double", TokenKind::Double),
            ("boolean", TokenKind::Boolean),
            ("String", TokenKind::StringType),
            ("void", TokenKind::Void),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("while", TokenKind::While),
            ("for", TokenKind::For),
            ("return", TokenKind::Return),
            ("break", TokenKind::Break),
            ("continue", TokenKind::Continue),
            ("new", TokenKind::New),
            ("true", TokenKind::BoolLiteral),
            ("false", TokenKind::BoolLiteral),
        ]
        .into_iter()
        .collect()
    })
}

/// Tokenize a whole source text. Shorthand for `Lexer::new(source).tokenize()`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Lexer for the source language
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        let kind = match ch {
            '"' => return self.string_literal(loc),
            '0'..='9' => return self.number_literal(ch, loc),
            c if is_ident_start(c) => return Ok(self.identifier_or_keyword(ch, loc)),

            '=' => self.either('=', TokenKind::EqEq, TokenKind::Eq),
            '!' => self.either('=', TokenKind::NotEq, TokenKind::Bang),
            '<' => self.either('=', TokenKind::Le, TokenKind::Lt),
            '>' => self.either('=', TokenKind::Ge, TokenKind::Gt),
            '&' | '|' => {
                if self.peek() == Some(ch) {
                    self.advance();
                    if ch == '&' {
                        TokenKind::AndAnd
                    } else {
                        TokenKind::OrOr
                    }
                } else {
                    return Err(LexError {
                        message: format!("Unexpected character: '{ch}' (did you mean '{ch}{ch}'?)"),
                        location: loc,
                    });
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,

            _ => {
                return Err(LexError {
                    message: format!("Unexpected character: '{}'", ch),
                    location: loc,
                })
            }
        };

        let text: String = self.input[self.offset_of(loc)..self.position].iter().collect();
        Ok(Token::new(kind, text, loc))
    }

    /// Two-character operator if `next` follows, otherwise the one-character form
    fn either(&mut self, next: char, long: TokenKind, short: TokenKind) -> TokenKind {
        if self.peek() == Some(next) {
            self.advance();
            long
        } else {
            short
        }
    }

    /// Parse string literal. The opening quote has been consumed.
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut body = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance(); // consume closing quote
                    return Ok(Token::new(TokenKind::StringLiteral, body, loc));
                }
                '\n' => break,
                '\\' => {
                    // Escapes are kept verbatim; only `\"` needs care so it
                    // does not end the literal.
                    body.push(ch);
                    self.advance();
                    match self.peek() {
                        Some('\n') | None => break,
                        Some(escaped) => {
                            body.push(escaped);
                            self.advance();
                        }
                    }
                }
                _ => {
                    body.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse numeric literal: digits, optionally followed by `.` and digits
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        let mut is_double = false;
        if self.peek() == Some('.') {
            is_double = true;
            num_str.push('.');
            self.advance();
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.malformed_number(&num_str, loc));
            }
            self.take_digits(&mut num_str);
            if self.peek() == Some('.') {
                return Err(self.malformed_number(&num_str, loc));
            }
        }

        // `12abc` is neither a number nor an identifier
        if self.peek().is_some_and(is_ident_part) {
            return Err(self.malformed_number(&num_str, loc));
        }

        if is_double {
            num_str
                .parse::<f64>()
                .map_err(|_| self.malformed_number(&num_str, loc))?;
            Ok(Token::new(TokenKind::DoubleLiteral, num_str, loc))
        } else {
            num_str
                .parse::<i64>()
                .map_err(|_| self.malformed_number(&num_str, loc))?;
            Ok(Token::new(TokenKind::IntLiteral, num_str, loc))
        }
    }

    fn take_digits(&mut self, buf: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                buf.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Malformed literal error. The rest of the run of letters, digits and
    /// dots is consumed so the message shows the whole lexeme (`1.0e5`).
    fn malformed_number(&mut self, text: &str, loc: SourceLocation) -> LexError {
        let mut lexeme = text.to_string();
        while let Some(ch) = self.peek().filter(|&c| is_ident_part(c) || c == '.') {
            lexeme.push(ch);
            self.advance();
        }
        LexError {
            message: format!("Malformed numeric literal: {}", lexeme),
            location: loc,
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if is_ident_part(ch) {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = keywords()
            .get(ident.as_str())
            .copied()
            .unwrap_or(TokenKind::Ident);
        Token::new(kind, ident, loc)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Input offset of a location on the current line
    fn offset_of(&self, loc: SourceLocation) -> usize {
        self.position - (self.column - loc.column)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("class A { void f() { return; } }").unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Class);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].text, "A");
        assert_eq!(tokens[2].kind, TokenKind::LBrace);
        assert_eq!(tokens[3].kind, TokenKind::Void);
        assert_eq!(tokens[4].text, "f");
        assert_eq!(tokens[5].kind, TokenKind::LParen);
        assert_eq!(tokens[6].kind, TokenKind::RParen);
        assert_eq!(tokens[7].kind, TokenKind::LBrace);
        assert_eq!(tokens[8].kind, TokenKind::Return);
        assert_eq!(tokens[9].kind, TokenKind::Semicolon);
        assert_eq!(tokens[10].kind, TokenKind::RBrace);
        assert_eq!(tokens[11].kind, TokenKind::RBrace);
        assert_eq!(tokens[12].kind, TokenKind::Eof);
        assert_eq!(tokens.len(), 13);
    }

    #[test]
    fn test_operators_longest_match() {
        assert_eq!(
            kinds("== = != ! <= < >= > && || + - * / %"),
            vec![
                TokenKind::EqEq,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Bang,
                TokenKind::Le,
                TokenKind::Lt,
                TokenKind::Ge,
                TokenKind::Gt,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
        // no whitespace between them either
        assert_eq!(
            kinds("a==b"),
            vec![TokenKind::Ident, TokenKind::EqEq, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("int x; // comment\nint y; /* block\ncomment */ int z;").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["int", "x", ";", "int", "y", ";", "int", "z", ";", ""]);
        assert_eq!(tokens[6].line(), 3);
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("42 10.0 3.25").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[0].text, "42");
        assert_eq!(tokens[1].kind, TokenKind::DoubleLiteral);
        assert_eq!(tokens[1].text, "10.0");
        assert_eq!(tokens[2].kind, TokenKind::DoubleLiteral);
    }

    #[test]
    fn test_minus_is_not_part_of_literal() {
        assert_eq!(
            kinds("-5"),
            vec![TokenKind::Minus, TokenKind::IntLiteral, TokenKind::Eof]
        );
    }

    #[test]
    fn test_malformed_numbers() {
        for source in ["1.2.3", "3.", "12abc", "99999999999999999999"] {
            let err = tokenize(source).unwrap_err();
            assert!(
                err.message.starts_with("Malformed numeric literal"),
                "{source}: {err}"
            );
        }
    }

    #[test]
    fn test_malformed_number_reports_whole_lexeme() {
        let cases = [
            ("x = 1.0e5;", "1.0e5"),
            ("1.2.3", "1.2.3"),
            ("12abc + 1", "12abc"),
            ("3.;", "3."),
        ];
        for (source, lexeme) in cases {
            let err = tokenize(source).unwrap_err();
            assert_eq!(
                err.message,
                format!("Malformed numeric literal: {lexeme}"),
                "{source}"
            );
        }
    }

    #[test]
    fn test_keywords_and_booleans() {
        assert_eq!(
            kinds("true false String boolean new static public"),
            vec![
                TokenKind::BoolLiteral,
                TokenKind::BoolLiteral,
                TokenKind::StringType,
                TokenKind::Boolean,
                TokenKind::New,
                TokenKind::Static,
                TokenKind::Public,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("classy")[0], TokenKind::Ident);
        assert_eq!(kinds("_tmp$1")[0], TokenKind::Ident);
    }

    #[test]
    fn test_string_literal_kept_raw() {
        let tokens = tokenize(r#""hello\n \"world\"""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, r#"hello\n \"world\""#);
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("x = 1;\ny = \"oops;\n").unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
        assert_eq!(err.line(), 2);

        assert!(tokenize("\"never closed").is_err());
    }

    #[test]
    fn test_invalid_characters() {
        let err = tokenize("a # b").unwrap_err();
        assert_eq!(err.message, "Unexpected character: '#'");
        assert_eq!(err.location, SourceLocation::new(1, 3));

        assert!(tokenize("a & b").is_err());
        assert!(tokenize("a | b").is_err());
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = tokenize("int x;\n/* no end").unwrap_err();
        assert_eq!(err.message, "Unterminated block comment");
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_locations() {
        let tokens = tokenize("a\n  bb == 3").unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 6));
        assert_eq!(tokens[2].text, "==");
        assert_eq!(tokens[3].location, SourceLocation::new(2, 9));
    }

    #[test]
    fn test_token_display() {
        let tokens = tokenize("x 5 \"s\" ;").unwrap();
        assert_eq!(tokens[0].to_string(), "identifier 'x'");
        assert_eq!(tokens[1].to_string(), "int literal 5");
        assert_eq!(tokens[2].to_string(), "string literal \"s\"");
        assert_eq!(tokens[3].to_string(), "';'");
        assert_eq!(tokens[4].to_string(), "end of file");
    }
}
