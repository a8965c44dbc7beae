//! Source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported language
//!
//! A small Java-like teaching language:
//! - Classes holding methods; `public` and `static` modifiers
//! - Types: `int`, `double`, `boolean`, `String`, `void`, one-dimensional arrays
//! - Statements: declarations, assignments, `if`/`else`, `while`, `for`,
//!   `return`, `break`, `continue`, method calls, `System.out.println`/`print`
//! - Expressions: arithmetic, relational, logical, unary `-`/`!`, calls,
//!   array access and array creation
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;
