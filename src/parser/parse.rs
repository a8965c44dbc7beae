//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Parsing classes, methods, parameters and types
//! - `statements`: Parsing statements (if, while, for, etc.)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{tokenize, LexError, Token, TokenKind};
use thiserror::Error;

/// Deepest nesting of expressions and blocks the parser accepts
pub const MAX_DEPTH: usize = 100;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Parse error at line {}, column {}: expected {expected}, found {found}",
    .location.line,
    .location.column
)]
pub struct ParseError {
    /// What the grammar required at this point, for humans
    pub expected: String,
    /// The offending token, rendered for humans
    pub found: String,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn line(&self) -> usize {
        self.location.line
    }
}

/// Parse a token stream into a [`Program`].
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser for the source language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Return type of the method whose body is being parsed
    pub(crate) current_return: Option<Type>,
    /// Open expressions and blocks on the recursion path
    pub(crate) depth: usize,
}

impl Parser {
    /// Create a parser over an already lexed token stream. A missing trailing
    /// `Eof` token is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens
                .last()
                .map(|t| t.location)
                .unwrap_or(SourceLocation::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }
        Self {
            tokens,
            position: 0,
            current_return: None,
            depth: 0,
        }
    }

    /// Lex `source` and create a parser over its tokens
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        Ok(Self::new(tokenize(source)?))
    }

    /// Parse the entire program (top-level class declarations)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let class = self.parse_class_declaration()?;
            program.classes.push(class);
        }

        Ok(program)
    }

    /// Parse a lone expression that must span the whole token stream
    pub fn parse_standalone_expression(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        if !self.is_at_end() {
            return Err(self.error_here("end of expression"));
        }
        Ok(expr)
    }

    // ===== Helper methods =====

    pub(crate) fn is_type_keyword(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::Int | TokenKind::Double | TokenKind::Boolean | TokenKind::StringType
        )
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Error located at the current token
    /// Run one level of recursive descent, failing once [`MAX_DEPTH`] levels
    /// are open so that pathological input cannot exhaust the stack.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error_here(format!("nesting of at most {} levels", MAX_DEPTH)));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn error_here(&self, expected: impl Into<String>) -> ParseError {
        ParseError {
            expected: expected.into(),
            found: self.peek().to_string(),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        ctx: &str,
    ) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(format!("{kind} {ctx}")))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LParen, ctx)
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::RParen, ctx)
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LBrace, ctx)
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::RBrace, ctx)
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Semicolon, ctx)
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        if self.check(TokenKind::Ident) {
            Ok(self.advance().text.clone())
        } else {
            Err(self.error_here(format!("identifier {ctx}")))
        }
    }
}
