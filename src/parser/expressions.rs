//! Expression parsing implementation
//!
//! This module handles parsing of expressions using precedence climbing
//! for binary operators and recursive descent for other expression forms.
//!
//! # Supported Expressions
//!
//! - Literals: integers, doubles, booleans, strings
//! - Identifiers and variables
//! - Binary operators: arithmetic, comparison, logical
//! - Unary operators: `-`, `!`
//! - Postfix: `[]` array indexing, `()` method calls
//! - Array creation: `new int[n]`, `new int[]{1, 2, 3}`
//!
//! Assignment is not an expression; it is handled at statement level.
//!
//! # Precedence
//!
//! Loosest to tightest: `||`, `&&`, `== !=`, `< <= > >=`, `+ -`, `* / %`,
//! then prefix unary operators. All binary operators are left-associative.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

/// Binding strength of a binary operator token, loosest = 1
fn binary_operator(kind: TokenKind) -> Option<(BinOp, u8)> {
    let entry = match kind {
        TokenKind::OrOr => (BinOp::Or, 1),
        TokenKind::AndAnd => (BinOp::And, 2),
        TokenKind::EqEq => (BinOp::Eq, 3),
        TokenKind::NotEq => (BinOp::Ne, 3),
        TokenKind::Lt => (BinOp::Lt, 4),
        TokenKind::Le => (BinOp::Le, 4),
        TokenKind::Gt => (BinOp::Gt, 4),
        TokenKind::Ge => (BinOp::Ge, 4),
        TokenKind::Plus => (BinOp::Add, 5),
        TokenKind::Minus => (BinOp::Sub, 5),
        TokenKind::Star => (BinOp::Mul, 6),
        TokenKind::Slash => (BinOp::Div, 6),
        TokenKind::Percent => (BinOp::Mod, 6),
        _ => return None,
    };
    Some(entry)
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(|parser| parser.parse_binary(1))
    }

    /// Precedence climbing: parse operators binding at least as tight as
    /// `min_prec`. Recursing with `prec + 1` keeps operators left-associative.
    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some((op, prec)) = binary_operator(self.peek_kind()) {
            if prec < min_prec {
                break;
            }
            self.advance();
            let loc = self.previous_location();
            let right = self.parse_binary(prec + 1)?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse unary (! -)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        let op = if self.match_token(TokenKind::Bang) {
            UnOp::Not
        } else if self.match_token(TokenKind::Minus) {
            UnOp::Neg
        } else {
            return self.parse_postfix();
        };

        let operand = Box::new(self.nested(Self::parse_unary)?);
        Ok(Expr::Unary {
            op,
            operand,
            location: loc,
        })
    }

    /// Parse postfix ([] ())
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            let loc = self.current_location();

            if self.match_token(TokenKind::LBracket) {
                let index = Box::new(self.parse_expression()?);
                self.expect_token(TokenKind::RBracket, "after array index")?;
                expr = Expr::ArrayAccess {
                    array: Box::new(expr),
                    index,
                    location: loc,
                };
            } else if self.check(TokenKind::LParen) {
                // Method call; only a plain name can be called
                let (name, name_loc) = match expr {
                    Expr::Variable(name, name_loc) => (name, name_loc),
                    _ => {
                        return Err(self.error_here(
                            "';' or an operator (only a method name can be called)",
                        ))
                    }
                };
                self.advance();
                let args = self.parse_argument_list()?;
                self.expect_rparen("after method arguments")?;

                expr = Expr::Call {
                    name,
                    args,
                    location: name_loc,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse argument list: expr, expr, ...
    fn parse_argument_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }

    /// Parse primary (literals, variables, parenthesized expressions, `new`)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        match self.peek_kind() {
            TokenKind::IntLiteral => {
                let value = self
                    .peek()
                    .text
                    .parse::<i64>()
                    .map_err(|_| self.error_here("int literal in range"))?;
                self.advance();
                Ok(Expr::IntLiteral(value, loc))
            }
            TokenKind::DoubleLiteral => {
                let value = self
                    .peek()
                    .text
                    .parse::<f64>()
                    .map_err(|_| self.error_here("well-formed double literal"))?;
                self.advance();
                Ok(Expr::DoubleLiteral(value, loc))
            }
            TokenKind::BoolLiteral => {
                let value = self.advance().text == "true";
                Ok(Expr::BoolLiteral(value, loc))
            }
            TokenKind::StringLiteral => {
                let body = self.advance().text.clone();
                Ok(Expr::StringLiteral(body, loc))
            }
            TokenKind::Ident => {
                let name = self.advance().text.clone();
                Ok(Expr::Variable(name, loc))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                Ok(expr)
            }
            TokenKind::New => self.parse_new_array(),
            _ => Err(self.error_here("expression")),
        }
    }

    /// Parse `new T[size]` or `new T[]{e1, e2, ...}`
    fn parse_new_array(&mut self) -> Result<Expr, ParseError> {
        self.advance(); // consume 'new'
        let loc = self.previous_location();

        let element_type = match self.parse_base_type() {
            Some(BaseType::Void) => {
                return Err(ParseError {
                    expected: "a non-void array element type".to_string(),
                    found: self.previous().to_string(),
                    location: self.previous_location(),
                })
            }
            Some(base) => base,
            None => return Err(self.error_here("array element type after 'new'")),
        };

        self.expect_token(TokenKind::LBracket, "after array element type")?;

        if self.match_token(TokenKind::RBracket) {
            self.expect_lbrace("to open array initializer")?;
            let mut elements = Vec::new();
            if !self.check(TokenKind::RBrace) {
                loop {
                    elements.push(self.parse_expression()?);
                    if !self.match_token(TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect_rbrace("after array initializer")?;

            return Ok(Expr::NewArrayLiteral {
                element_type,
                elements,
                location: loc,
            });
        }

        let size = Box::new(self.parse_expression()?);
        self.expect_token(TokenKind::RBracket, "after array size")?;

        Ok(Expr::NewArray {
            element_type,
            size,
            location: loc,
        })
    }
}
