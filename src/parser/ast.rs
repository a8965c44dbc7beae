// AST (Abstract Syntax Tree) definitions for the Java-like teaching language

use serde::Serialize;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Base types supported by the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BaseType {
    Int,
    Double,
    Boolean,
    String,
    Void,
}

impl BaseType {
    pub fn keyword(self) -> &'static str {
        match self {
            BaseType::Int => "int",
            BaseType::Double => "double",
            BaseType::Boolean => "boolean",
            BaseType::String => "String",
            BaseType::Void => "void",
        }
    }
}

/// Type representation: a base type with at most one array dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Type {
    pub base: BaseType,
    pub is_array: bool,
}

impl Type {
    pub fn new(base: BaseType) -> Self {
        Type {
            base,
            is_array: false,
        }
    }

    pub fn with_array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn is_void(&self) -> bool {
        self.base == BaseType::Void && !self.is_array
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnOp {
    Neg, // -x
    Not, // !x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

/// Method modifiers. Printed in the fixed order `public static`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Modifiers {
    pub is_public: bool,
    pub is_static: bool,
}

/// Method parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub param_type: Type,
}

/// Brace-delimited statement list. Every if/else/while/for/method body is a
/// `Block`, even when the source wrote a single unbraced statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub location: SourceLocation,
}

/// Method declaration inside a class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDecl {
    pub name: String,
    pub modifiers: Modifiers,
    pub return_type: Type,
    pub params: Vec<Param>,
    pub body: Block,
    pub location: SourceLocation,
}

/// Class declaration: a named container of methods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDecl {
    pub name: String,
    pub methods: Vec<MethodDecl>,
    pub location: SourceLocation,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    VarDecl {
        name: String,
        var_type: Type,
        init: Option<Expr>,
        location: SourceLocation,
    },
    /// `target = value;` where target is a Variable or ArrayAccess
    Assign {
        target: Expr,
        value: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Block,
        location: SourceLocation,
    },
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        update: Option<Box<Stmt>>,
        body: Block,
        location: SourceLocation,
    },
    Return {
        expr: Option<Expr>,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
    /// A call evaluated for its side effect
    ExprStmt {
        expr: Expr,
        location: SourceLocation,
    },
    /// `System.out.println(expr)` (or `print` when `newline` is false)
    Print {
        expr: Option<Expr>,
        newline: bool,
        location: SourceLocation,
    },
    Block(Block),
}

impl Stmt {
    /// Get the source location of this statement
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::VarDecl { location, .. } => location,
            Stmt::Assign { location, .. } => location,
            Stmt::If { location, .. } => location,
            Stmt::While { location, .. } => location,
            Stmt::For { location, .. } => location,
            Stmt::Return { location, .. } => location,
            Stmt::Break { location } => location,
            Stmt::Continue { location } => location,
            Stmt::ExprStmt { location, .. } => location,
            Stmt::Print { location, .. } => location,
            Stmt::Block(block) => &block.location,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    IntLiteral(i64, SourceLocation),
    DoubleLiteral(f64, SourceLocation),
    BoolLiteral(bool, SourceLocation),
    /// Raw literal body, without the surrounding quotes
    StringLiteral(String, SourceLocation),
    Variable(String, SourceLocation),
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
        location: SourceLocation,
    },
    Call {
        name: String,
        args: Vec<Expr>,
        location: SourceLocation,
    },
    /// `new T[size]`
    NewArray {
        element_type: BaseType,
        size: Box<Expr>,
        location: SourceLocation,
    },
    /// `new T[]{e1, e2, ...}`
    NewArrayLiteral {
        element_type: BaseType,
        elements: Vec<Expr>,
        location: SourceLocation,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            Expr::IntLiteral(_, loc) => loc,
            Expr::DoubleLiteral(_, loc) => loc,
            Expr::BoolLiteral(_, loc) => loc,
            Expr::StringLiteral(_, loc) => loc,
            Expr::Variable(_, loc) => loc,
            Expr::ArrayAccess { location, .. } => location,
            Expr::Call { location, .. } => location,
            Expr::NewArray { location, .. } => location,
            Expr::NewArrayLiteral { location, .. } => location,
            Expr::Binary { location, .. } => location,
            Expr::Unary { location, .. } => location,
        }
    }

    /// Fixed length of an array literal (`new int[]{2, 3, 5}` has length 3).
    /// `None` for every other expression, including `new int[n]`, whose size
    /// is only known at run time.
    pub fn array_len(&self) -> Option<usize> {
        match self {
            Expr::NewArrayLiteral { elements, .. } => Some(elements.len()),
            _ => None,
        }
    }

    /// Whether this expression may appear on the left of `=`
    pub fn is_assignable(&self) -> bool {
        matches!(self, Expr::Variable(..) | Expr::ArrayAccess { .. })
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub classes: Vec<ClassDecl>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Total number of methods across all classes
    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}
