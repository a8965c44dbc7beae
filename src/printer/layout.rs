//! Canonical line breaking and indentation
//!
//! The printer hands [`Layout`] flat text; `Layout` decides where lines end
//! and how deep they are indented:
//!
//! - `;` ends the line it is on.
//! - `{` is preceded by one space (unless it starts the line) and ends the line.
//! - `}` ends the line it is on.
//! - A line is indented four spaces per depth. Depth drops before a line that
//!   starts with `}` and grows after a line that ends with `{`.
//!
//! Depth follows whole lines, not individual braces: `2,3,5,7,11}` closes the
//! array initializer opened on the line above but does not start with `}`, so
//! the depth it opened stays open. Characters inside string literals are
//! plain text.

const INDENT: &str = "    ";

/// Line-oriented writer producing the canonical layout
#[derive(Debug, Default)]
pub struct Layout {
    lines: Vec<String>,
    current: String,
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append flat text
    pub fn push_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.push_char(ch);
        }
    }

    fn push_char(&mut self, ch: char) {
        if self.in_string {
            self.current.push(ch);
            if self.escaped {
                self.escaped = false;
            } else if ch == '\\' {
                self.escaped = true;
            } else if ch == '"' {
                self.in_string = false;
            }
            return;
        }

        match ch {
            '"' => {
                self.in_string = true;
                self.current.push(ch);
            }
            ';' | '}' => {
                self.trim_current();
                self.current.push(ch);
                self.end_line();
            }
            '{' => {
                self.trim_current();
                if !self.current.trim_start().is_empty() {
                    self.current.push(' ');
                }
                self.current.push('{');
                self.end_line();
            }
            _ => self.current.push(ch),
        }
    }

    fn trim_current(&mut self) {
        let len = self.current.trim_end().len();
        self.current.truncate(len);
    }

    fn end_line(&mut self) {
        let line = self.current.trim();
        if !line.is_empty() {
            if line.starts_with('}') {
                self.depth = self.depth.saturating_sub(1);
            }
            self.lines.push(format!("{}{}", INDENT.repeat(self.depth), line));
            if line.ends_with('{') {
                self.depth += 1;
            }
        }
        self.current.clear();
    }

    /// Flush any pending text and return the laid-out lines, each terminated
    /// by `\n`
    pub fn finish(mut self) -> String {
        self.end_line();
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
