//! novac-gen - C code generation for the Nova compiler.
//!
//! Walks the analysed AST and writes a single self-contained C
//! translation unit into a string buffer. Generation is deterministic:
//! the same tree always produces byte-identical output. Binary and unary
//! expressions are always parenthesised, so source grouping survives
//! without re-deriving precedence on the C side.

mod error;

pub use error::{CodeGenError, Result};

use novac_par::{
    Block, Expr, ExprKind, FnItem, ForInit, Item, Program, Stmt, Type, VarDeclStmt,
};

/// Map a Nova type to its C spelling in type-name position.
///
/// Arrays decay to a pointer to the element type here; declarations use
/// the `elem name[N]` form instead (see `emit_var_decl`).
fn c_type(ty: &Type) -> String {
    match ty {
        Type::Int => "int".to_string(),
        Type::Float => "float".to_string(),
        Type::String => "char*".to_string(),
        Type::Bool => "int".to_string(),
        Type::Void => "void".to_string(),
        Type::Array(elem, _) => format!("{}*", c_type(elem)),
        // Never produced in declaration position by the parser.
        Type::Fn(_, _) | Type::Error => "void*".to_string(),
    }
}

/// C code generator.
///
/// # Example
///
/// ```
/// use novac_gen::CodeGenerator;
/// use novac_par::Program;
///
/// let program = Program { items: vec![] };
/// let mut gen = CodeGenerator::new();
/// gen.generate(&program).unwrap();
/// assert!(gen.output().starts_with("#include <stdio.h>"));
/// ```
pub struct CodeGenerator {
    /// Accumulated C source text.
    out: String,

    /// Current indent depth, 4 spaces per level.
    indent: usize,
}

impl CodeGenerator {
    /// Create a generator with an empty output buffer.
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    /// The generated C source.
    pub fn output(&self) -> &str {
        &self.out
    }

    /// Emit the preamble and every top-level item, in order, separated
    /// by blank lines.
    pub fn generate(&mut self, program: &Program) -> Result<()> {
        self.write_line("#include <stdio.h>");
        self.write_line("#include <stdlib.h>");
        self.write_line("#include <string.h>");
        self.write_line("");

        for item in &program.items {
            match item {
                Item::Fn(func) => self.emit_fn(func)?,
                Item::Stmt(stmt) => self.emit_stmt(stmt)?,
            }
            self.write_line("");
        }

        Ok(())
    }

    fn emit_fn(&mut self, func: &FnItem) -> Result<()> {
        // `main` is always emitted as `int main`, whatever was declared.
        if func.name == "main" {
            self.write("int main(");
        } else {
            self.write(&format!("{} {}(", c_type(&func.ret_ty), func.name));
        }

        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&format!("{} {}", c_type(&param.ty), param.name));
        }

        self.write(") {\n");
        self.indent += 1;

        self.emit_block(&func.body)?;

        if func.name == "main" && func.ret_ty == Type::Void {
            self.write_line("return 0;");
        }

        self.indent -= 1;
        self.write_line("}");

        Ok(())
    }

    /// Emit a block's statements. Braces come from the surrounding
    /// construct, not from the block itself.
    fn emit_block(&mut self, block: &Block) -> Result<()> {
        for stmt in &block.stmts {
            self.emit_stmt(stmt)?;
        }
        Ok(())
    }

    fn emit_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::VarDecl(decl) => {
                self.write_indent();
                self.emit_var_decl(decl)?;
                self.write(";\n");
            },

            Stmt::Block(block) => self.emit_block(block)?,

            Stmt::If(stmt) => {
                self.write_indent();
                self.write("if (");
                self.emit_expr(&stmt.cond)?;
                self.write(") {\n");

                self.indent += 1;
                self.emit_stmt(&stmt.then_branch)?;
                self.indent -= 1;

                if let Some(else_branch) = &stmt.else_branch {
                    self.write_line("} else {");
                    self.indent += 1;
                    self.emit_stmt(else_branch)?;
                    self.indent -= 1;
                }

                self.write_line("}");
            },

            Stmt::While(stmt) => {
                self.write_indent();
                self.write("while (");
                self.emit_expr(&stmt.cond)?;
                self.write(") {\n");

                self.indent += 1;
                self.emit_stmt(&stmt.body)?;
                self.indent -= 1;

                self.write_line("}");
            },

            Stmt::For(stmt) => {
                self.write_indent();
                self.write("for (");

                match &stmt.init {
                    Some(ForInit::VarDecl(decl)) => {
                        // Header declarations use the plain type-name
                        // form, with no implicit string default.
                        self.write(&format!("{} {}", c_type(&decl.declared_ty), decl.name));
                        if let Some(init) = &decl.init {
                            self.write(" = ");
                            self.emit_expr(init)?;
                        }
                    },
                    Some(ForInit::Expr(expr)) => self.emit_expr(expr)?,
                    None => {},
                }
                self.write("; ");

                if let Some(cond) = &stmt.cond {
                    self.emit_expr(cond)?;
                }
                self.write("; ");

                if let Some(update) = &stmt.update {
                    self.emit_expr(update)?;
                }
                self.write(") {\n");

                self.indent += 1;
                self.emit_stmt(&stmt.body)?;
                self.indent -= 1;

                self.write_line("}");
            },

            Stmt::Return(stmt) => {
                self.write_indent();
                self.write("return");
                if let Some(value) = &stmt.value {
                    self.write(" ");
                    self.emit_expr(value)?;
                }
                self.write(";\n");
            },

            Stmt::Print(stmt) => {
                self.write_indent();
                let ty = stmt.expr.ty().ok_or(CodeGenError::MissingType)?.clone();
                match ty {
                    Type::Int => {
                        self.write("printf(\"%d\\n\", ");
                        self.emit_expr(&stmt.expr)?;
                        self.write(");\n");
                    },
                    Type::Float => {
                        self.write("printf(\"%f\\n\", ");
                        self.emit_expr(&stmt.expr)?;
                        self.write(");\n");
                    },
                    Type::String => {
                        self.write("printf(\"%s\\n\", ");
                        self.emit_expr(&stmt.expr)?;
                        self.write(");\n");
                    },
                    Type::Bool => {
                        self.write("printf(\"%s\\n\", (");
                        self.emit_expr(&stmt.expr)?;
                        self.write(") ? \"true\" : \"false\");\n");
                    },
                    other => return Err(CodeGenError::UnprintableType(other.to_string())),
                }
            },

            Stmt::Expr(stmt) => {
                self.write_indent();
                self.emit_expr(&stmt.expr)?;
                self.write(";\n");
            },
        }

        Ok(())
    }

    /// Declaration statement core, without the trailing `;`.
    fn emit_var_decl(&mut self, decl: &VarDeclStmt) -> Result<()> {
        match &decl.declared_ty {
            Type::Array(elem, size) => {
                self.write(&format!("{} {}[{}]", c_type(elem), decl.name, size));
            },
            ty => {
                self.write(&format!("{} {}", c_type(ty), decl.name));
            },
        }

        if let Some(init) = &decl.init {
            self.write(" = ");
            self.emit_expr(init)?;
        } else if decl.declared_ty == Type::String {
            self.write(" = NULL");
        }

        Ok(())
    }

    fn emit_expr(&mut self, expr: &Expr) -> Result<()> {
        match &expr.kind {
            ExprKind::IntLit(value) => self.write(&value.to_string()),

            // Debug formatting keeps a decimal point or exponent, so
            // the C literal stays a floating literal.
            ExprKind::FloatLit(value) => self.write(&format!("{:?}", value)),

            ExprKind::StringLit(value) => self.write(&format!("\"{}\"", value)),

            ExprKind::BoolLit(value) => self.write(if *value { "1" } else { "0" }),

            ExprKind::Variable(name) => self.write(name),

            ExprKind::Index(object, index) => {
                self.emit_expr(object)?;
                self.write("[");
                self.emit_expr(index)?;
                self.write("]");
            },

            ExprKind::Binary(op, left, right) => {
                self.write("(");
                self.emit_expr(left)?;
                self.write(&format!(" {} ", op.as_str()));
                self.emit_expr(right)?;
                self.write(")");
            },

            ExprKind::Unary(op, operand) => {
                self.write("(");
                self.write(op.as_str());
                self.emit_expr(operand)?;
                self.write(")");
            },

            ExprKind::Call(name, args) => {
                self.write(&format!("{}(", name));
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expr(arg)?;
                }
                self.write(")");
            },
        }

        Ok(())
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    fn write_line(&mut self, text: &str) {
        self.write_indent();
        self.out.push_str(text);
        self.out.push('\n');
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
