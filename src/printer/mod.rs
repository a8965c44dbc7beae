//! Canonical source printer
//!
//! Walks a [`Program`] and renders it in the one fixed layout the tool emits,
//! independent of how the input was formatted.
//!
//! Rendering happens in two steps. The walker produces flat text for each
//! statement, joining tokens with the glue rule below, and hands it to
//! [`layout::Layout`], which breaks lines and indents them.
//!
//! # Glue rule
//!
//! Tokens are separated by one space, except that no space is placed next to
//! `(`, `)` or `,` and none before `;`:
//!
//! ```text
//! if(n <= 1)    sumar(10,20)    b = a -((a / b)* b);    f(x)+ 1
//! ```
//!
//! # Parentheses
//!
//! Operands of binary and unary operators are wrapped when they are binary
//! expressions or array accesses (see [`needs_parens`]). A unary operator
//! also wraps a unary operand, so `-(-x)` never prints as `--x`. Every other
//! operand prints bare.

pub mod layout;
pub mod width;

use crate::parser::ast::*;
use layout::Layout;

/// Default upper bound for the line-width lint
pub const DEFAULT_MAX_LINE_WIDTH: usize = 100;

/// Printer settings
///
/// The canonical layout itself is fixed; the settings only drive the
/// diagnostics reported alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Lines longer than this are reported by [`width::check_line_width`]
    pub max_line_width: usize,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
        }
    }
}

/// Render a whole program in canonical form.
pub fn print(program: &Program) -> String {
    let mut printer = Printer::new();
    for class in &program.classes {
        printer.print_class(class);
    }
    printer.finish()
}

/// Render a single expression as flat text, without line breaking.
pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::IntLiteral(value, _) => value.to_string(),
        Expr::DoubleLiteral(value, _) => format_double(*value),
        Expr::BoolLiteral(value, _) => value.to_string(),
        Expr::StringLiteral(body, _) => format!("\"{}\"", body),
        Expr::Variable(name, _) => name.clone(),
        Expr::ArrayAccess { array, index, .. } => {
            format!("{}[{}]", postfix_operand(array), print_expr(index))
        }
        Expr::Call { name, args, .. } => format!("{}({})", name, format_list(args)),
        Expr::NewArray {
            element_type, size, ..
        } => format!("new {}[{}]", element_type.keyword(), print_expr(size)),
        Expr::NewArrayLiteral {
            element_type,
            elements,
            ..
        } => format!(
            "new {}[] {{{}}}",
            element_type.keyword(),
            format_list(elements)
        ),
        Expr::Binary {
            op, left, right, ..
        } => glue(&[&operand(left), op.symbol(), &operand(right)]),
        Expr::Unary { op, operand: inner, .. } => {
            format!("{}{}", op.symbol(), unary_operand(inner))
        }
    }
}

/// True when an operator operand must be wrapped in parentheses.
///
/// Binary expressions and array accesses are wrapped wherever they appear as
/// the operand of a binary or unary operator; literals, variables, calls and
/// array creations are not.
pub fn needs_parens(expr: &Expr) -> bool {
    matches!(expr, Expr::Binary { .. } | Expr::ArrayAccess { .. })
}

/// Format a type the way it is written in a declaration, e.g. `int[]`
pub fn format_type(ty: &Type) -> String {
    if ty.is_array {
        format!("{}[]", ty.base.keyword())
    } else {
        ty.base.keyword().to_string()
    }
}

/// A unary operand that is itself unary is wrapped too: `--x` is a decrement
fn unary_operand(expr: &Expr) -> String {
    match expr {
        Expr::Unary { .. } => format!("({})", print_expr(expr)),
        _ => operand(expr),
    }
}

fn operand(expr: &Expr) -> String {
    let text = print_expr(expr);
    if needs_parens(expr) {
        format!("({})", text)
    } else {
        text
    }
}

/// The indexed expression of an array access binds tighter than any operator
fn postfix_operand(expr: &Expr) -> String {
    let text = print_expr(expr);
    match expr {
        Expr::Binary { .. } | Expr::Unary { .. } => format!("({})", text),
        _ => text,
    }
}

fn format_list(exprs: &[Expr]) -> String {
    exprs.iter().map(print_expr).collect::<Vec<_>>().join(",")
}

/// Doubles always carry a fractional part and never use exponent notation
fn format_double(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Join tokens with single spaces, leaving out the space next to `(`, `)`
/// and `,` and before `;`
fn glue(parts: &[&str]) -> String {
    let mut out = String::new();
    for part in parts.iter().filter(|p| !p.is_empty()) {
        let tight = match (out.chars().last(), part.chars().next()) {
            (None, _) => true,
            (Some(prev), Some(next)) => {
                matches!(prev, '(' | ')' | ',') || matches!(next, '(' | ')' | ',' | ';')
            }
            (Some(_), None) => true,
        };
        if !tight {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}

/// Statement walker feeding flat text into a [`Layout`]
struct Printer {
    layout: Layout,
}

impl Printer {
    fn new() -> Self {
        Self {
            layout: Layout::new(),
        }
    }

    fn finish(self) -> String {
        self.layout.finish()
    }

    fn emit(&mut self, text: &str) {
        self.layout.push_str(text);
    }

    fn print_class(&mut self, class: &ClassDecl) {
        self.emit(&glue(&["public", "class", &class.name]));
        self.emit("{");
        for method in &class.methods {
            self.print_method(method);
        }
        self.emit("}");
    }

    fn print_method(&mut self, method: &MethodDecl) {
        let params = method
            .params
            .iter()
            .map(|p| glue(&[&format_type(&p.param_type), &p.name]))
            .collect::<Vec<_>>()
            .join(",");

        let header = glue(&[
            if method.modifiers.is_public { "public" } else { "" },
            if method.modifiers.is_static { "static" } else { "" },
            &format_type(&method.return_type),
            &format!("{}({})", method.name, params),
        ]);

        self.emit(&header);
        self.emit("{");
        // The method's own braces enclose the body statements directly
        for stmt in &method.body.statements {
            self.print_statement(stmt);
        }
        self.emit("}");
    }

    fn print_block(&mut self, block: &Block) {
        self.emit("{");
        for stmt in &block.statements {
            self.print_statement(stmt);
        }
        self.emit("}");
    }

    /// Header, then the body block inside the statement's own braces
    fn print_body(&mut self, header: &str, body: &Block) {
        self.emit(header);
        self.emit("{");
        self.print_block(body);
        self.emit("}");
    }

    fn print_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.print_body(&format!("if({})", print_expr(condition)), then_branch);
                if let Some(else_branch) = else_branch {
                    self.print_body("else", else_branch);
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                self.print_body(&format!("while({})", print_expr(condition)), body);
            }
            Stmt::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                self.emit("for(");
                if let Some(init) = init {
                    self.print_clause(init);
                }
                self.emit(";");
                if let Some(condition) = condition {
                    self.emit(&print_expr(condition));
                }
                self.emit(";");
                if let Some(update) = update {
                    self.print_clause(update);
                }
                self.print_body(")", body);
            }
            Stmt::Block(block) => self.print_block(block),
            simple => {
                if let Some(text) = simple_statement(simple) {
                    self.emit(&text);
                    self.emit(";");
                }
            }
        }
    }

    /// A `for` init or update clause, without its terminator
    fn print_clause(&mut self, stmt: &Stmt) {
        match simple_statement(stmt) {
            Some(text) => self.emit(&text),
            None => self.print_statement(stmt),
        }
    }
}

/// Flat text of a statement that fits on one line, without its `;`
fn simple_statement(stmt: &Stmt) -> Option<String> {
    let text = match stmt {
        Stmt::VarDecl {
            name,
            var_type,
            init,
            ..
        } => {
            let decl = glue(&[&format_type(var_type), name]);
            match init {
                Some(init) => glue(&[&decl, "=", &print_expr(init)]),
                None => decl,
            }
        }
        Stmt::Assign { target, value, .. } => {
            glue(&[&print_expr(target), "=", &print_expr(value)])
        }
        Stmt::Return { expr, .. } => match expr {
            Some(expr) => glue(&["return", &print_expr(expr)]),
            None => "return".to_string(),
        },
        Stmt::Break { .. } => "break".to_string(),
        Stmt::Continue { .. } => "continue".to_string(),
        Stmt::ExprStmt { expr, .. } => print_expr(expr),
        Stmt::Print { expr, newline, .. } => {
            let method = if *newline { "println" } else { "print" };
            let arg = expr.as_ref().map(print_expr).unwrap_or_default();
            format!("System.out.{}({})", method, arg)
        }
        Stmt::If { .. } | Stmt::While { .. } | Stmt::For { .. } | Stmt::Block(_) => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn canonical(source: &str) -> String {
        let program = Parser::from_source(source)
            .expect("lexing failed")
            .parse_program()
            .expect("parsing failed");
        print(&program)
    }

    fn expr(source: &str) -> Expr {
        Parser::from_source(source)
            .expect("lexing failed")
            .parse_standalone_expression()
            .expect("parsing failed")
    }

    fn in_main(body: &str) -> String {
        canonical(&format!("class A {{ static void main() {{ {} }} }}", body))
    }

    #[test]
    fn test_binary_operands_are_wrapped() {
        assert_eq!(print_expr(&expr("a - (a / b) * b")), "a -((a / b)* b)");
        assert_eq!(print_expr(&expr("arr[i] > max")), "(arr[i])> max");
        assert_eq!(print_expr(&expr("sum + arr[i]")), "sum +(arr[i])");
        assert_eq!(print_expr(&expr("a + b + c")), "(a + b)+ c");
        assert_eq!(print_expr(&expr("n * factorial(n - 1)")), "n * factorial(n - 1)");
    }

    #[test]
    fn test_unary_operands() {
        assert_eq!(print_expr(&expr("-x")), "-x");
        assert_eq!(print_expr(&expr("-(a + b)")), "-(a + b)");
        assert_eq!(print_expr(&expr("!done && x")), "!done && x");
        assert_eq!(print_expr(&expr("-arr[0]")), "-(arr[0])");
    }

    #[test]
    fn test_nested_unary_is_wrapped() {
        for (source, printed) in [
            ("- -x", "-(-x)"),
            ("-(-1)", "-(-1)"),
            ("!!done", "!(!done)"),
            ("-!-x", "-(!(-x))"),
        ] {
            let original = expr(source);
            let text = print_expr(&original);
            assert_eq!(text, printed);
            assert_eq!(print_expr(&expr(&text)), text);
            assert!(matches!(
                expr(&text),
                Expr::Unary { ref operand, .. } if matches!(**operand, Expr::Unary { .. })
            ));
        }
        assert_eq!(print_expr(&expr("a - -b")), "a - -b");
        assert!(in_main("x = - -1;").contains("        x = -(-1);\n"));
    }

    #[test]
    fn test_call_and_literal_forms() {
        assert_eq!(print_expr(&expr("sumar(10, 20)")), "sumar(10,20)");
        assert_eq!(print_expr(&expr("f()")), "f()");
        assert_eq!(print_expr(&expr("f(x) + 1")), "f(x)+ 1");
        assert_eq!(print_expr(&expr("10.0")), "10.0");
        assert_eq!(print_expr(&expr("2.50")), "2.5");
        assert_eq!(print_expr(&expr("true || false")), "true || false");
        assert_eq!(print_expr(&expr("\"a, b\"")), "\"a, b\"");
        assert_eq!(print_expr(&expr("new int[n + 1]")), "new int[n + 1]");
        assert_eq!(print_expr(&expr("new int[] { 1, 2 }")), "new int[] {1,2}");
    }

    #[test]
    fn test_indexed_expression_keeps_grouping() {
        let grouped = expr("(a + b)[0]");
        let text = print_expr(&grouped);
        assert_eq!(text, "(a + b)[0]");
        assert!(matches!(
            expr(&text),
            Expr::ArrayAccess { ref array, .. } if matches!(**array, Expr::Binary { .. })
        ));
    }

    #[test]
    fn test_needs_parens() {
        assert!(needs_parens(&expr("a + b")));
        assert!(needs_parens(&expr("a[0]")));
        assert!(!needs_parens(&expr("a")));
        assert!(!needs_parens(&expr("f(a)")));
        assert!(!needs_parens(&expr("-a")));
        assert!(!needs_parens(&expr("3")));
    }

    #[test]
    fn test_format_type() {
        assert_eq!(format_type(&Type::new(BaseType::Int)), "int");
        assert_eq!(format_type(&Type::new(BaseType::String).with_array()), "String[]");
    }

    #[test]
    fn test_double_never_uses_exponent() {
        assert_eq!(format_double(1e21), "1000000000000000000000.0");
        assert_eq!(format_double(0.5), "0.5");
    }

    #[test]
    fn test_method_header_and_body() {
        assert_eq!(
            canonical("class S { public static int sumar(int a, int b) { return a + b; } }"),
            "public class S {\n    public static int sumar(int a,int b) {\n        return a + b;\n    }\n}\n"
        );
    }

    #[test]
    fn test_modifiers_print_in_canonical_order() {
        assert_eq!(
            canonical("class S { static public void f() { } int g() { return 1; } }"),
            "public class S {\n    public static void f() {\n    }\n    int g() {\n        return 1;\n    }\n}\n"
        );
    }

    #[test]
    fn test_if_body_is_nested_once() {
        let expected = "public class A {\n    static void main() {\n        if(c) {\n            {\n                return;\n            }\n        }\n    }\n}\n";
        assert_eq!(in_main("if (c) return;"), expected);
        assert_eq!(in_main("if (c) { return; }"), expected);
    }

    #[test]
    fn test_else_starts_new_line() {
        let expected = "public class A {\n    static void main() {\n        if(x < 0) {\n            {\n                y = 1;\n            }\n        }\n        else {\n            {\n                y = 2;\n            }\n        }\n    }\n}\n";
        assert_eq!(in_main("if (x < 0) y = 1; else { y = 2; }"), expected);
    }

    #[test]
    fn test_for_header_is_split() {
        let expected = "public class A {\n    static void main() {\n        for(int i = 0;\n        i < 5;\n        i = i + 1) {\n            {\n                f(i);\n            }\n        }\n    }\n}\n";
        assert_eq!(in_main("for(int i=0;i<5;i=i+1) f(i);"), expected);
    }

    #[test]
    fn test_for_with_empty_clauses() {
        let expected = "public class A {\n    static void main() {\n        for(;\n        ;\n        ) {\n            {\n                break;\n            }\n        }\n    }\n}\n";
        assert_eq!(in_main("for (;;) { break; }"), expected);
    }

    #[test]
    fn test_array_literal_layout() {
        let expected = "public class A {\n    static void main() {\n        int[] p = new int[] {\n            2,3,5}\n            ;\n            f(p);\n        }\n    }\n";
        assert_eq!(in_main("int[] p = new int[]{2, 3, 5}; f(p);"), expected);
    }

    #[test]
    fn test_print_statements() {
        let expected = "public class A {\n    static void main() {\n        System.out.println(\"x = \" + x);\n        System.out.print(x);\n        System.out.println();\n    }\n}\n";
        assert_eq!(
            in_main("System.out.println(\"x = \" + x); System.out.print(x); System.out.println();"),
            expected
        );
    }

    #[test]
    fn test_string_with_braces_is_not_broken() {
        let expected = "public class A {\n    static void main() {\n        System.out.println(\"{;}\");\n    }\n}\n";
        assert_eq!(in_main("System.out.println(\"{;}\");"), expected);
    }

    #[test]
    fn test_empty_program_prints_nothing() {
        assert_eq!(print(&Program::new()), "");
    }

    #[test]
    fn test_printer_is_total_on_built_trees() {
        let loc = SourceLocation::new(1, 1);
        let program = Program {
            classes: vec![ClassDecl {
                name: "T".to_string(),
                methods: vec![MethodDecl {
                    name: "f".to_string(),
                    modifiers: Modifiers::default(),
                    return_type: Type::new(BaseType::Void),
                    params: Vec::new(),
                    body: Block {
                        statements: vec![Stmt::For {
                            init: Some(Box::new(Stmt::Block(Block {
                                statements: Vec::new(),
                                location: loc,
                            }))),
                            condition: None,
                            update: None,
                            body: Block {
                                statements: Vec::new(),
                                location: loc,
                            },
                            location: loc,
                        }],
                        location: loc,
                    },
                    location: loc,
                }],
                location: loc,
            }],
        };
        let text = print(&program);
        assert!(text.starts_with("public class T {\n    void f() {\n        for("));
        assert!(text.ends_with("}\n"));
    }
}
