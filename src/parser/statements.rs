//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Variable declarations: `int x = 42;`, `int a = 1, b;`, `int[] v = new int[3];`
//! - Assignments: `x = e;`, `arr[i] = e;`
//! - Control flow: `if`, `while`, `for`
//! - Jump statements: `return`, `break`, `continue`
//! - Print statements: `System.out.println(e);`, `System.out.print(e);`
//! - Nested blocks: `{ ... }`
//! - Call statements: `f(a, b);`
//!
//! # Grammar
//!
//! ```text
//! statement ::= var_decl | if_stmt | while_stmt | for_stmt | return_stmt
//!             | break_stmt | continue_stmt | print_stmt | block
//!             | simple_stmt ";"
//! simple_stmt ::= (identifier | array_access) "=" expr | call
//! body      ::= block | statement
//! ```
//!
//! Every `body` is normalized into a [`Block`]: an unbraced single statement
//! becomes a one-statement block, so later stages never see the difference.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a brace-delimited block
    pub(crate) fn parse_block(
        &mut self,
        open_ctx: &str,
        close_ctx: &str,
    ) -> Result<Block, ParseError> {
        self.expect_lbrace(open_ctx)?;
        let location = self.previous_location();
        let statements = self.parse_block_statements()?;
        self.expect_rbrace(close_ctx)?;

        Ok(Block {
            statements,
            location,
        })
    }

    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            self.parse_statement_into(&mut statements)?;
        }

        Ok(statements)
    }

    /// Parse a body: either a braced block or a single statement wrapped
    /// into a one-element block (for if/else/while/for bodies)
    pub(crate) fn parse_body(&mut self, ctx: &str) -> Result<Block, ParseError> {
        if self.check(TokenKind::LBrace) {
            return self.parse_block(ctx, "after block");
        }

        let location = self.current_location();
        let mut statements = Vec::new();
        self.parse_statement_into(&mut statements)?;

        Ok(Block {
            statements,
            location,
        })
    }

    /// Parse one source statement, appending the resulting AST statements.
    /// A multi-name declaration (`int a, b;`) appends one `VarDecl` per name.
    pub(crate) fn parse_statement_into(&mut self, out: &mut Vec<Stmt>) -> Result<(), ParseError> {
        if self.is_type_keyword() {
            out.extend(self.parse_variable_declaration()?);
            return Ok(());
        }

        out.push(self.nested(Self::parse_statement)?);
        Ok(())
    }

    /// Parse a statement other than a variable declaration
    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        match self.peek_kind() {
            TokenKind::LBrace => {
                return Ok(Stmt::Block(
                    self.parse_block("to open block", "after block")?,
                ))
            }
            TokenKind::If => return self.parse_if_statement(),
            TokenKind::While => return self.parse_while_statement(),
            TokenKind::For => return self.parse_for_statement(),
            TokenKind::Return => return self.parse_return_statement(),
            TokenKind::Break => {
                self.advance();
                self.expect_semicolon("after 'break'")?;
                return Ok(Stmt::Break { location: loc });
            }
            TokenKind::Continue => {
                self.advance();
                self.expect_semicolon("after 'continue'")?;
                return Ok(Stmt::Continue { location: loc });
            }
            TokenKind::Ident if self.at_print_statement() => {
                return self.parse_print_statement();
            }
            _ => {}
        }

        let stmt = self.parse_simple_statement()?;
        let ctx = match stmt {
            Stmt::Assign { .. } => "after assignment",
            _ => "after method call",
        };
        self.expect_semicolon(ctx)?;
        Ok(stmt)
    }

    /// Parse an assignment or a call statement, without the trailing `;`.
    /// Used for plain statements and for the `for` init/update clauses.
    pub(crate) fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        let expr = self.parse_expression()?;

        if self.check(TokenKind::Eq) {
            if !expr.is_assignable() {
                return Err(ParseError {
                    expected: "variable or array element before '='".to_string(),
                    found: "'='".to_string(),
                    location: self.current_location(),
                });
            }
            let eq_loc = self.current_location();
            self.advance();
            let value = self.parse_expression()?;
            return Ok(Stmt::Assign {
                target: expr,
                value,
                location: eq_loc,
            });
        }

        if matches!(expr, Expr::Call { .. }) {
            return Ok(Stmt::ExprStmt {
                expr,
                location: loc,
            });
        }

        Err(self.error_here("'=' or a method call statement"))
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'return'
        let loc = self.previous_location();

        let expr = if self.check(TokenKind::Semicolon) {
            None
        } else {
            if self.current_return.is_some_and(|t| t.is_void()) {
                return Err(self.error_here("';' after 'return' in a void method"));
            }
            Some(self.parse_expression()?)
        };

        self.expect_semicolon("after return")?;

        Ok(Stmt::Return {
            expr,
            location: loc,
        })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'if'
        let loc = self.previous_location();

        self.expect_lparen("after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let then_branch = self.parse_body("to open if body")?;

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(self.parse_body("to open else body")?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'while'
        let loc = self.previous_location();

        self.expect_lparen("after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after while condition")?;

        let body = self.parse_body("to open while body")?;

        Ok(Stmt::While {
            condition,
            body,
            location: loc,
        })
    }

    /// Parse for statement. Each of the three clauses may be empty, the two
    /// semicolons may not.
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'for'
        let loc = self.previous_location();

        self.expect_lparen("after 'for'")?;

        // Init (optional)
        let init = if self.check(TokenKind::Semicolon) {
            None
        } else if self.is_type_keyword() {
            Some(Box::new(self.parse_single_declarator()?))
        } else {
            Some(Box::new(self.parse_simple_statement()?))
        };
        self.expect_semicolon("after for init")?;

        // Condition (optional)
        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_semicolon("after for condition")?;

        // Update (optional)
        let update = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_simple_statement()?))
        };
        self.expect_rparen("after for clauses")?;

        let body = self.parse_body("to open for body")?;

        Ok(Stmt::For {
            init,
            condition,
            update,
            body,
            location: loc,
        })
    }

    /// Parse variable declaration: type name [= init] {, name [= init]} ;
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let var_type = self.parse_type(false)?;
        let mut decls = Vec::new();

        loop {
            decls.push(self.parse_declarator(var_type)?);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        self.expect_semicolon("after variable declaration")?;
        Ok(decls)
    }

    /// Parse the one-name declaration of a `for` init clause (no `;`)
    fn parse_single_declarator(&mut self) -> Result<Stmt, ParseError> {
        let var_type = self.parse_type(false)?;
        self.parse_declarator(var_type)
    }

    fn parse_declarator(&mut self, var_type: Type) -> Result<Stmt, ParseError> {
        let name = self.expect_identifier("for variable name")?;
        let loc = self.previous_location();

        let init = if self.match_token(TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Stmt::VarDecl {
            name,
            var_type,
            init,
            location: loc,
        })
    }

    /// `System` `.` `out` `.` ...
    fn at_print_statement(&self) -> bool {
        let text_at = |n: usize| self.peek_ahead(n).map(|t| t.text.as_str());
        text_at(0) == Some("System")
            && text_at(1) == Some(".")
            && text_at(2) == Some("out")
            && text_at(3) == Some(".")
    }

    /// Parse `System.out.println(expr);` or `System.out.print(expr);`
    fn parse_print_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        // System . out .
        for _ in 0..4 {
            self.advance();
        }

        let newline = match self.peek().text.as_str() {
            "println" if self.check(TokenKind::Ident) => true,
            "print" if self.check(TokenKind::Ident) => false,
            _ => return Err(self.error_here("'println' or 'print' after 'System.out.'")),
        };
        self.advance();

        self.expect_lparen("after print method")?;
        let expr = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_rparen("after print argument")?;
        self.expect_semicolon("after print statement")?;

        Ok(Stmt::Print {
            expr,
            newline,
            location: loc,
        })
    }
}
