// AST (Abstract Syntax Tree) definitions for the tracing interpreter

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Literal constants as written in the source
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal {
        value: Literal,
        location: SourceLocation,
    },
    Identifier {
        name: String,
        location: SourceLocation,
    },
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    /// `range(n)`; the parser only builds this as the iterable of a `for`
    RangeCall {
        arg: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Literal { location, .. }
            | Expr::Identifier { location, .. }
            | Expr::BinaryOp { location, .. }
            | Expr::RangeCall { location, .. } => *location,
        }
    }

    /// Names of the variables this expression reads, in order of first appearance
    pub fn referenced_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut Vec<String>) {
        match self {
            Expr::Literal { .. } => {}
            Expr::Identifier { name, .. } => {
                if !names.iter().any(|n| n == name) {
                    names.push(name.clone());
                }
            }
            Expr::BinaryOp { left, right, .. } => {
                left.collect_names(names);
                right.collect_names(names);
            }
            Expr::RangeCall { arg, .. } => arg.collect_names(names),
        }
    }
}

/// Pretty-prints the expression back to source form (used in step narration)
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value, .. } => match value {
                Literal::Int(n) => write!(f, "{}", n),
                Literal::Float(x) => write!(f, "{:?}", x),
                Literal::Str(s) => write!(f, "\"{}\"", s),
                Literal::Bool(true) => write!(f, "True"),
                Literal::Bool(false) => write!(f, "False"),
            },
            Expr::Identifier { name, .. } => write!(f, "{}", name),
            Expr::BinaryOp {
                op, left, right, ..
            } => {
                write_operand(f, left, *op, false)?;
                write!(f, " {} ", op)?;
                write_operand(f, right, *op, true)
            }
            Expr::RangeCall { arg, .. } => write!(f, "range({})", arg),
        }
    }
}

fn precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Mul | BinOp::Div => 3,
        BinOp::Add | BinOp::Sub => 2,
        _ => 1,
    }
}

// Parenthesize operands that would otherwise re-associate differently
fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, parent: BinOp, is_right: bool) -> fmt::Result {
    if let Expr::BinaryOp { op, .. } = operand {
        let (inner, outer) = (precedence(*op), precedence(parent));
        if inner < outer || (is_right && inner == outer) {
            return write!(f, "({})", operand);
        }
    }
    write!(f, "{}", operand)
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign {
        name: String,
        value: Expr,
        location: SourceLocation,
    },
    Print {
        args: Vec<Expr>,
        location: SourceLocation,
    },
    If {
        branches: Vec<IfBranch>,
        else_branch: Option<ElseBranch>,
        location: SourceLocation,
    },
    For {
        var: String,
        range: Expr,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    Pass {
        location: SourceLocation,
    },
}

impl Stmt {
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::Assign { location, .. }
            | Stmt::Print { location, .. }
            | Stmt::If { location, .. }
            | Stmt::For { location, .. }
            | Stmt::Pass { location } => *location,
        }
    }
}

/// One `if` / `elif` arm
#[derive(Debug, Clone, PartialEq)]
pub struct IfBranch {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    /// Location of the `if`/`elif` keyword
    pub location: SourceLocation,
}

/// The trailing `else` arm
#[derive(Debug, Clone, PartialEq)]
pub struct ElseBranch {
    pub body: Vec<Stmt>,
    pub location: SourceLocation,
}

/// A parsed program: top-level statements in source order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program {
            statements: Vec::new(),
        }
    }
}
