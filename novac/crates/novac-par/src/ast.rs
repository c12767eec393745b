//! AST node and type definitions for the Nova language.
//!
//! The tree is an exclusive-ownership structure: parents own children,
//! nothing is shared. The parser builds it; semantic analysis mutates
//! only the `ty` annotation slot on expressions; code generation reads
//! it.

use novac_util::Span;
use std::fmt;

/// A Nova type.
///
/// The six primitive types are plain enum variants, so they are shared
/// process-lifetime constants by construction. Equality is structural:
/// two arrays are equal iff their element types and sizes are equal, two
/// function types iff return type and ordered parameter lists are equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    /// 32-bit signed integer
    Int,
    /// 32-bit float
    Float,
    /// Byte string, emitted as `char*`
    String,
    /// Boolean, emitted as C `int`
    Bool,
    /// No value
    Void,
    /// Poison type assigned where analysis failed; suppresses cascading
    /// diagnostics downstream
    Error,
    /// Fixed-size array `elem[N]`; the parser only produces one
    /// dimension, but nesting is representable
    Array(Box<Type>, usize),
    /// Function type: ordered parameter types and return type
    Fn(Vec<Type>, Box<Type>),
}

impl Type {
    /// True for `int` and `float`, the arithmetic operand types.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    /// True for the poison type.
    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::Error => write!(f, "error"),
            Type::Array(elem, size) => write!(f, "{}[{}]", elem, size),
            Type::Fn(params, ret) => {
                write!(f, "{}(", ret)?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ")")
            },
        }
    }
}

/// AST root: an ordered list of top-level items.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

/// Top-level item: function declarations and free-standing statements
/// may interleave.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Function definition
    Fn(FnItem),
    /// Free-standing statement
    Stmt(Stmt),
}

/// Function item
#[derive(Debug, Clone, PartialEq)]
pub struct FnItem {
    pub ret_ty: Type,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
    pub span: Span,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: Type,
    pub name: String,
    pub span: Span,
}

/// Brace-delimited statement sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Block(Block),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
    Print(PrintStmt),
    Expr(ExprStmt),
}

/// Variable declaration with optional initializer.
///
/// The field is `declared_ty`, not `ty`: the latter name is reserved for
/// the inferred annotation on expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub declared_ty: Type,
    pub name: String,
    pub init: Option<Expr>,
    pub span: Span,
}

/// If statement with optional else branch
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

/// While loop
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Box<Stmt>,
}

/// For-loop initializer: either a declaration or a bare expression.
/// The generator pattern-matches this instead of inspecting a generic
/// statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    VarDecl(VarDeclStmt),
    Expr(Expr),
}

/// C-style for loop; all three header slots are optional
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub cond: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Box<Stmt>,
}

/// Return statement with optional value
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

/// Print statement
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expr: Expr,
}

/// Expression statement
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
}

/// Expression node: kind, source position, and the type annotation slot
/// filled in by semantic analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// `None` before analysis (except literals, which are preset);
    /// `Some` everywhere after, `Type::Error` where analysis failed.
    pub ty: Option<Type>,
}

impl Expr {
    /// Build an expression node. Literal kinds get their primitive type
    /// preset; everything else starts untyped.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        let ty = match kind {
            ExprKind::IntLit(_) => Some(Type::Int),
            ExprKind::FloatLit(_) => Some(Type::Float),
            ExprKind::StringLit(_) => Some(Type::String),
            ExprKind::BoolLit(_) => Some(Type::Bool),
            _ => None,
        };
        Self { kind, span, ty }
    }

    /// The annotated type, if analysis has run.
    pub fn ty(&self) -> Option<&Type> {
        self.ty.as_ref()
    }

    /// True for expressions that may appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        matches!(self.kind, ExprKind::Variable(_) | ExprKind::Index(_, _))
    }
}

/// Expression variants
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Integer literal; the accepted range is exactly `i64`
    IntLit(i64),
    /// Float literal (IEEE-754 binary32)
    FloatLit(f32),
    /// String literal: raw bytes between the quotes, escape sequences
    /// not decoded, passed through verbatim to the emitted C
    StringLit(String),
    /// Boolean literal
    BoolLit(bool),
    /// Variable reference
    Variable(String),
    /// Array element access `arr[idx]`
    Index(Box<Expr>, Box<Expr>),
    /// Binary operation; `BinOp::Assign` is produced only by the
    /// assignment rule and its left operand is assignable
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Prefix unary operation
    Unary(UnOp, Box<Expr>),
    /// Function call on a named callee
    Call(String, Vec<Expr>),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Assign,
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinOp {
    /// The operator's C spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Assign => "=",
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
        }
    }

    /// `+ - * / %`
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem
        )
    }

    /// `== != < <= > >=`
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }

    /// `&& ||`
    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

impl UnOp {
    /// The operator's C spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}
