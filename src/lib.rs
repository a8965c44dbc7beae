//! # Introduction
//!
//! canonjava reads programs written in a small Java-like teaching language and
//! re-emits them in one fixed, deterministic layout, whatever the formatting
//! of the input.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Printer → Canonical text
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST.
//! 2. [`printer`]: walks the AST and lays it out canonically; also hosts the
//!    line-width lint.
//! 3. [`pipeline`]: runs the stages in order and unifies their errors as
//!    [`CompileError`].
//!
//! ```
//! let text = canonjava::canonicalize("class A { int f(int a, int b) { return a + b; } }")?;
//! assert_eq!(
//!     text,
//!     "public class A {\n    int f(int a,int b) {\n        return a + b;\n    }\n}\n"
//! );
//! # Ok::<(), canonjava::CompileError>(())
//! ```
//!
//! ## Supported language
//!
//! Types: `int`, `double`, `boolean`, `String`, `void`, one-dimensional arrays.
//! Control flow: `if/else`, `while`, `for`, `break`, `continue`, `return`.
//! Output: `System.out.println` and `System.out.print`.

pub mod parser;
pub mod pipeline;
pub mod printer;

pub use parser::ast::Program;
pub use parser::lexer::{tokenize, LexError, Token, TokenKind};
pub use parser::parse::{parse, ParseError};
pub use pipeline::{canonicalize, canonicalize_with, parse_source, Canonical, CompileError};
pub use printer::{print, print_expr, PrinterConfig};
