//! Statement parsing.
//!
//! A statement is dispatched on its first token: a type keyword starts a
//! variable declaration, `{` a block, and the control-flow keywords their
//! respective forms; anything else is an expression statement.

use crate::{
    Block, ExprStmt, ForInit, ForStmt, IfStmt, Parser, PrintStmt, ReturnStmt, Stmt, VarDeclStmt,
    WhileStmt,
};
use novac_lex::TokenKind;

impl<'a> Parser<'a> {
    /// statement := varDecl | block | if | while | for | return | print | exprStmt
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        if matches!(
            self.current.kind,
            TokenKind::Int | TokenKind::Float | TokenKind::String | TokenKind::Bool
        ) {
            return self.parse_var_declaration().map(Stmt::VarDecl);
        }

        if self.eat(TokenKind::LBrace) {
            return Some(Stmt::Block(self.parse_block()));
        }

        match self.current.kind {
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Print => self.parse_print_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// varDecl := type IDENT ('=' expression)? ';'
    pub(crate) fn parse_var_declaration(&mut self) -> Option<VarDeclStmt> {
        let declared_ty = self.parse_type();

        if !self.check(TokenKind::Ident) {
            self.error("Expected variable name");
            return None;
        }
        let span = self.current.span;
        let name = self.current.lexeme.clone();
        self.advance();

        let init = if self.eat(TokenKind::Eq) {
            self.parse_expression()
        } else {
            None
        };

        self.expect(TokenKind::Semicolon, "Expected ';'");

        Some(VarDeclStmt {
            declared_ty,
            name,
            init,
            span,
        })
    }

    /// block := '{' statement* '}'
    ///
    /// The opening brace has already been consumed by the caller. The
    /// loop stops at `}`, end of input, or after any reported error.
    pub(crate) fn parse_block(&mut self) -> Block {
        let mut stmts = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                stmts.push(stmt);
            }
            if self.handler.has_errors() {
                break;
            }
        }

        self.expect(TokenKind::RBrace, "Expected '}'");

        Block { stmts }
    }

    /// if := 'if' '(' expression ')' statement ('else' statement)?
    fn parse_if_statement(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::If, "Expected 'if'");
        self.expect(TokenKind::LParen, "Expected '('");

        let cond = self.parse_expression()?;

        self.expect(TokenKind::RParen, "Expected ')'");

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.eat(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Some(Stmt::If(IfStmt {
            cond,
            then_branch,
            else_branch,
        }))
    }

    /// while := 'while' '(' expression ')' statement
    fn parse_while_statement(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::While, "Expected 'while'");
        self.expect(TokenKind::LParen, "Expected '('");

        let cond = self.parse_expression()?;

        self.expect(TokenKind::RParen, "Expected ')'");

        let body = Box::new(self.parse_statement()?);

        Some(Stmt::While(WhileStmt { cond, body }))
    }

    /// for := 'for' '(' (varDecl | exprStmt | ';') expression? ';' expression? ')' statement
    ///
    /// An empty init is written as a leading `;`; condition and update
    /// are optional.
    fn parse_for_statement(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::For, "Expected 'for'");
        self.expect(TokenKind::LParen, "Expected '('");

        let init = if self.eat(TokenKind::Semicolon) {
            None
        } else if matches!(
            self.current.kind,
            TokenKind::Int | TokenKind::Float | TokenKind::String | TokenKind::Bool
        ) {
            Some(ForInit::VarDecl(self.parse_var_declaration()?))
        } else {
            let expr = self.parse_expression()?;
            self.expect(TokenKind::Semicolon, "Expected ';'");
            Some(ForInit::Expr(expr))
        };

        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "Expected ';'");

        let update = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RParen, "Expected ')'");

        let body = Box::new(self.parse_statement()?);

        Some(Stmt::For(ForStmt {
            init,
            cond,
            update,
            body,
        }))
    }

    /// return := 'return' expression? ';'
    fn parse_return_statement(&mut self) -> Option<Stmt> {
        let span = self.current.span;
        self.expect(TokenKind::Return, "Expected 'return'");

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            self.parse_expression()
        };

        self.expect(TokenKind::Semicolon, "Expected ';'");

        Some(Stmt::Return(ReturnStmt { value, span }))
    }

    /// print := 'print' '(' expression ')' ';'
    fn parse_print_statement(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::Print, "Expected 'print'");
        self.expect(TokenKind::LParen, "Expected '('");

        let expr = self.parse_expression()?;

        self.expect(TokenKind::RParen, "Expected ')'");
        self.expect(TokenKind::Semicolon, "Expected ';'");

        Some(Stmt::Print(PrintStmt { expr }))
    }

    /// exprStmt := expression ';'
    ///
    /// When the expression fails, tokens are skipped up to the next `;`
    /// so the statement boundary is re-synchronised.
    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let expr = self.parse_expression();

        if expr.is_none() {
            while !self.check(TokenKind::Semicolon) && !self.check(TokenKind::Eof) {
                self.advance();
            }
        }

        self.expect(TokenKind::Semicolon, "Expected ';'");

        expr.map(|expr| Stmt::Expr(ExprStmt { expr }))
    }
}
