//! Line-width lint over canonical output
//!
//! The canonical layout never wraps long lines. This lint reports them so the
//! caller can surface a warning; the printed text is left untouched.

use std::fmt;

/// A canonical line longer than the configured maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthWarning {
    /// 1-based line number in the printed text
    pub line: usize,
    /// Width of the line in characters
    pub width: usize,
    pub max: usize,
}

impl fmt::Display for WidthWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "line {} is {} characters wide (limit {})",
            self.line, self.width, self.max
        )
    }
}

/// Report every line of `text` wider than `max` characters.
pub fn check_line_width(text: &str, max: usize) -> Vec<WidthWarning> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let width = line.chars().count();
            (width > max).then_some(WidthWarning {
                line: i + 1,
                width,
                max,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_long_lines_only() {
        let text = "short\n1234567890\nok\n12345678901\n";
        let warnings = check_line_width(text, 10);
        assert_eq!(
            warnings,
            vec![WidthWarning {
                line: 4,
                width: 11,
                max: 10
            }]
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(check_line_width("\"máximo\"", 8).is_empty());
        assert_eq!(check_line_width("\"máximo\"", 7).len(), 1);
    }

    #[test]
    fn test_message() {
        let warning = WidthWarning {
            line: 3,
            width: 120,
            max: 100,
        };
        assert_eq!(
            warning.to_string(),
            "line 3 is 120 characters wide (limit 100)"
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(check_line_width("", 0).is_empty());
    }
}
