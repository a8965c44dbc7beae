//! Stage-by-stage driver: source → tokens → AST → canonical text
//!
//! Each stage aborts the compilation unit on its first error; there is no
//! recovery and no partial result.

use crate::parser::ast::{Program, SourceLocation};
use crate::parser::lexer::{tokenize, LexError};
use crate::parser::parse::{parse, ParseError};
use crate::printer::width::{check_line_width, WidthWarning};
use crate::printer::{print, PrinterConfig};
use thiserror::Error;
use tracing::debug;

/// Any error that stops a compilation unit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CompileError {
    pub fn location(&self) -> SourceLocation {
        match self {
            CompileError::Lex(err) => err.location,
            CompileError::Parse(err) => err.location,
        }
    }

    /// 1-based line the error was reported on
    pub fn line(&self) -> usize {
        self.location().line
    }
}

/// Canonical text together with the lint findings on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
    pub text: String,
    pub warnings: Vec<WidthWarning>,
}

/// Lex and parse `source` into a [`Program`].
pub fn parse_source(source: &str) -> Result<Program, CompileError> {
    let tokens = tokenize(source)?;
    debug!(tokens = tokens.len(), "lexed source");

    let program = parse(tokens)?;
    debug!(
        classes = program.classes.len(),
        methods = program.method_count(),
        "parsed program"
    );

    Ok(program)
}

/// Reformat `source` into canonical text.
pub fn canonicalize(source: &str) -> Result<String, CompileError> {
    let program = parse_source(source)?;
    let text = print(&program);
    debug!(lines = text.lines().count(), "printed canonical text");
    Ok(text)
}

/// Reformat `source` and lint the result against `config`.
pub fn canonicalize_with(source: &str, config: &PrinterConfig) -> Result<Canonical, CompileError> {
    let text = canonicalize(source)?;
    let warnings = check_line_width(&text, config.max_line_width);
    if !warnings.is_empty() {
        debug!(
            count = warnings.len(),
            max = config.max_line_width,
            "canonical text has long lines"
        );
    }
    Ok(Canonical { text, warnings })
}
