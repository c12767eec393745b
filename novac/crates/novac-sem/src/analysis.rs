//! The semantic analysis pass.
//!
//! One function per node family, pattern-matching on the tagged AST
//! variants. The pass carries two pieces of state: the symbol table and
//! the return type of the function being analysed (`None` at top level).
//!
//! The poison type keeps cascades quiet: once a sub-expression has been
//! assigned `Type::Error`, rules involving it yield their usual result
//! type without reporting again.

use crate::scope::SymbolTable;
use novac_par::{
    BinOp, Block, Expr, ExprKind, FnItem, ForInit, Item, Program, Stmt, Type, UnOp, VarDeclStmt,
};
use novac_util::{Handler, Span};

/// The assignability relation: same type, or widening from `int` to
/// `float`. The poison type is assignable in both directions so that a
/// failed sub-expression does not produce a second diagnostic.
fn is_assignable(target: &Type, value: &Type) -> bool {
    if target.is_error() || value.is_error() {
        return true;
    }
    if target == value {
        return true;
    }
    matches!((target, value), (Type::Float, Type::Int))
}

/// Semantic analyser for the Nova language.
///
/// Call [`analyze`](SemanticAnalyzer::analyze) once per program; the
/// only mutation it performs on the tree is filling each expression's
/// `ty` slot.
pub struct SemanticAnalyzer<'a> {
    /// Lexically nested name bindings.
    symbols: SymbolTable,

    /// Return type of the function being analysed; `None` outside one.
    current_ret_ty: Option<Type>,

    /// Diagnostic sink shared with the rest of the pipeline.
    handler: &'a Handler,
}

impl<'a> SemanticAnalyzer<'a> {
    /// Create an analyser reporting into `handler`.
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            symbols: SymbolTable::new(),
            current_ret_ty: None,
            handler,
        }
    }

    /// Analyse a whole program, item by item, in order.
    pub fn analyze(&mut self, program: &mut Program) {
        for item in &mut program.items {
            match item {
                Item::Fn(func) => self.analyze_fn(func),
                Item::Stmt(stmt) => self.analyze_stmt(stmt),
            }
        }
    }

    /// Declare the function in the enclosing scope, then analyse its
    /// body in a fresh scope holding the parameters, with the declared
    /// return type installed for `return` checking.
    fn analyze_fn(&mut self, func: &mut FnItem) {
        if self.symbols.is_defined_in_current_scope(&func.name) {
            self.error(format!("Function '{}' already defined", func.name), func.span);
            return;
        }

        let param_tys: Vec<Type> = func.params.iter().map(|p| p.ty.clone()).collect();
        let fn_ty = Type::Fn(param_tys, Box::new(func.ret_ty.clone()));
        self.symbols.define(&*func.name, fn_ty, true);

        self.symbols.enter_scope();
        let prev_ret = self.current_ret_ty.replace(func.ret_ty.clone());

        for param in &func.params {
            self.symbols.define(&*param.name, param.ty.clone(), false);
        }
        self.analyze_block(&mut func.body);

        self.current_ret_ty = prev_ret;
        self.symbols.exit_scope();
    }

    fn analyze_stmt(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => self.analyze_var_decl(decl),
            Stmt::Block(block) => self.analyze_block(block),
            Stmt::If(stmt) => {
                let cond_ty = self.analyze_expr(&mut stmt.cond);
                if cond_ty != Type::Bool && !cond_ty.is_error() {
                    self.error("If condition must be boolean", stmt.cond.span);
                }
                self.analyze_stmt(&mut stmt.then_branch);
                if let Some(else_branch) = &mut stmt.else_branch {
                    self.analyze_stmt(else_branch);
                }
            },
            Stmt::While(stmt) => {
                let cond_ty = self.analyze_expr(&mut stmt.cond);
                if cond_ty != Type::Bool && !cond_ty.is_error() {
                    self.error("While condition must be boolean", stmt.cond.span);
                }
                self.analyze_stmt(&mut stmt.body);
            },
            Stmt::For(stmt) => {
                // The whole header shares one scope with the body.
                self.symbols.enter_scope();

                match &mut stmt.init {
                    Some(ForInit::VarDecl(decl)) => self.analyze_var_decl(decl),
                    Some(ForInit::Expr(expr)) => {
                        self.analyze_expr(expr);
                    },
                    None => {},
                }
                if let Some(cond) = &mut stmt.cond {
                    let cond_ty = self.analyze_expr(cond);
                    if cond_ty != Type::Bool && !cond_ty.is_error() {
                        self.error("For condition must be boolean", cond.span);
                    }
                }
                if let Some(update) = &mut stmt.update {
                    self.analyze_expr(update);
                }
                self.analyze_stmt(&mut stmt.body);

                self.symbols.exit_scope();
            },
            Stmt::Return(stmt) => {
                let Some(ret_ty) = self.current_ret_ty.clone() else {
                    self.error("Return statement outside function", stmt.span);
                    return;
                };
                match &mut stmt.value {
                    Some(value) => {
                        let value_ty = self.analyze_expr(value);
                        if !is_assignable(&ret_ty, &value_ty) {
                            self.error("Return type mismatch", value.span);
                        }
                    },
                    None => {
                        if ret_ty != Type::Void {
                            self.error("Non-void function must return a value", stmt.span);
                        }
                    },
                }
            },
            Stmt::Print(stmt) => {
                let ty = self.analyze_expr(&mut stmt.expr);
                let printable = matches!(
                    ty,
                    Type::Int | Type::Float | Type::String | Type::Bool | Type::Error
                );
                if !printable {
                    self.error(
                        format!("Cannot print value of type {}", ty),
                        stmt.expr.span,
                    );
                }
            },
            Stmt::Expr(stmt) => {
                self.analyze_expr(&mut stmt.expr);
            },
        }
    }

    fn analyze_block(&mut self, block: &mut Block) {
        self.symbols.enter_scope();
        for stmt in &mut block.stmts {
            self.analyze_stmt(stmt);
        }
        self.symbols.exit_scope();
    }

    fn analyze_var_decl(&mut self, decl: &mut VarDeclStmt) {
        if self.symbols.is_defined_in_current_scope(&decl.name) {
            self.error(
                format!("Variable '{}' already defined in this scope", decl.name),
                decl.span,
            );
            return;
        }

        if let Some(init) = &mut decl.init {
            let init_ty = self.analyze_expr(init);
            if !is_assignable(&decl.declared_ty, &init_ty) {
                self.error("Type mismatch in variable initialization", init.span);
            }
        }

        self.symbols.define(&*decl.name, decl.declared_ty.clone(), false);
    }

    /// Analyse an expression, fill its `ty` slot, and return the type.
    fn analyze_expr(&mut self, expr: &mut Expr) -> Type {
        let span = expr.span;
        let ty = match &mut expr.kind {
            ExprKind::IntLit(_) => Type::Int,
            ExprKind::FloatLit(_) => Type::Float,
            ExprKind::StringLit(_) => Type::String,
            ExprKind::BoolLit(_) => Type::Bool,

            ExprKind::Variable(name) => match self.symbols.resolve(name) {
                Some(symbol) => symbol.ty.clone(),
                None => {
                    self.handler
                        .error(format!("Undefined variable: {}", name), span);
                    Type::Error
                },
            },

            ExprKind::Index(object, index) => {
                let object_ty = self.analyze_expr(object);
                let index_ty = self.analyze_expr(index);

                match object_ty {
                    Type::Array(elem, _) => {
                        if index_ty != Type::Int && !index_ty.is_error() {
                            self.handler.error("Array index must be integer", index.span);
                        }
                        *elem
                    },
                    Type::Error => Type::Error,
                    _ => {
                        self.handler
                            .error("Array access on non-array type", object.span);
                        Type::Error
                    },
                }
            },

            ExprKind::Binary(op, left, right) => {
                let op = *op;
                if op == BinOp::Assign && !left.is_assignable() {
                    self.handler.error("Invalid assignment target", span);
                }
                let left_ty = self.analyze_expr(left);
                let right_ty = self.analyze_expr(right);
                self.check_binary_op(op, &left_ty, &right_ty, span)
            },

            ExprKind::Unary(op, operand) => {
                let op = *op;
                let operand_ty = self.analyze_expr(operand);
                self.check_unary_op(op, &operand_ty, span)
            },

            ExprKind::Call(name, args) => {
                let Some(symbol) = self.symbols.resolve(name).cloned() else {
                    self.handler
                        .error(format!("Undefined function: {}", name), span);
                    expr.ty = Some(Type::Error);
                    return Type::Error;
                };
                if !symbol.is_function {
                    self.handler
                        .error(format!("{} is not a function", name), span);
                    expr.ty = Some(Type::Error);
                    return Type::Error;
                }

                match symbol.ty {
                    Type::Fn(param_tys, ret_ty) => {
                        if args.len() != param_tys.len() {
                            self.handler
                                .error("Function argument count mismatch", span);
                            Type::Error
                        } else {
                            for (arg, param_ty) in args.iter_mut().zip(&param_tys) {
                                let arg_ty = self.analyze_expr(arg);
                                if !is_assignable(param_ty, &arg_ty) {
                                    self.handler.error("Argument type mismatch", arg.span);
                                }
                            }
                            *ret_ty
                        }
                    },
                    // A symbol flagged is_function always carries a Fn type.
                    _ => Type::Error,
                }
            },
        };

        expr.ty = Some(ty.clone());
        ty
    }

    /// Typing rules for binary operators.
    fn check_binary_op(&mut self, op: BinOp, left: &Type, right: &Type, span: Span) -> Type {
        if op == BinOp::Assign {
            if !is_assignable(left, right) {
                self.error("Type mismatch in assignment", span);
                return Type::Error;
            }
            return left.clone();
        }

        if op.is_arithmetic() {
            if left.is_error() || right.is_error() {
                return Type::Error;
            }
            if !left.is_numeric() || !right.is_numeric() {
                self.error(format!("Numeric operands required for {}", op.as_str()), span);
                return Type::Error;
            }
            if *left == Type::Float || *right == Type::Float {
                return Type::Float;
            }
            return Type::Int;
        }

        if op.is_comparison() {
            if left.is_error() || right.is_error() {
                return Type::Bool;
            }
            if !(left.is_numeric() && right.is_numeric()) && left != right {
                self.error("Type mismatch in comparison", span);
                return Type::Error;
            }
            return Type::Bool;
        }

        // Logical && and ||
        if left.is_error() || right.is_error() {
            return Type::Bool;
        }
        if *left != Type::Bool || *right != Type::Bool {
            self.error(format!("Boolean operands required for {}", op.as_str()), span);
            return Type::Error;
        }
        Type::Bool
    }

    /// Typing rules for unary operators.
    fn check_unary_op(&mut self, op: UnOp, operand: &Type, span: Span) -> Type {
        match op {
            UnOp::Neg => {
                if operand.is_error() {
                    return Type::Error;
                }
                if !operand.is_numeric() {
                    self.error("Numeric operand required for unary -", span);
                    return Type::Error;
                }
                operand.clone()
            },
            UnOp::Not => {
                if operand.is_error() {
                    return Type::Bool;
                }
                if *operand != Type::Bool {
                    self.error("Boolean operand required for !", span);
                    return Type::Error;
                }
                Type::Bool
            },
        }
    }

    fn error(&self, message: impl Into<String>, span: Span) {
        self.handler.error(message, span);
    }
}
