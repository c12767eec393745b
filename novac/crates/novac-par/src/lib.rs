//! novac-par - Parser for the Nova language.
//!
//! Recursive descent with a single token of lookahead (`current`),
//! combined with a precedence cascade for expressions:
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 1 | `=` | Right |
//! | 2 | `\|\|` | Left |
//! | 3 | `&&` | Left |
//! | 4 | `==`, `!=` | Left |
//! | 5 | `<`, `<=`, `>`, `>=` | Left |
//! | 6 | `+`, `-` | Left |
//! | 7 | `*`, `/`, `%` | Left |
//! | 8 | `!`, `-` (prefix) | Right |
//! | 9 | call `()`, index `[]` (postfix) | Left |
//!
//! Parse functions report into the shared [`Handler`] and return
//! `Option` so a failed sub-parse propagates as `None`; the top-level
//! loop stops after the first reported error.

pub mod ast;
mod expr;
mod stmt;
mod types;

pub use ast::{
    BinOp, Block, Expr, ExprKind, FnItem, ForInit, ForStmt, IfStmt, Item, Param, PrintStmt,
    Program, ReturnStmt, Stmt, Type, UnOp, VarDeclStmt, WhileStmt, ExprStmt,
};

use novac_lex::{Lexer, Token, TokenKind};
use novac_util::Handler;

/// Parser for the Nova language.
///
/// The parser pulls tokens from the lexer on demand and primes itself
/// with the first token at construction.
///
/// # Example
///
/// ```
/// use novac_lex::Lexer;
/// use novac_par::Parser;
/// use novac_util::Handler;
///
/// let handler = Handler::new();
/// let mut parser = Parser::new(Lexer::new("int x = 1;"), &handler);
/// let program = parser.parse();
/// assert!(!handler.has_errors());
/// assert_eq!(program.items.len(), 1);
/// ```
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    /// Create a parser over `lexer`, pulling the first token.
    pub fn new(mut lexer: Lexer<'a>, handler: &'a Handler) -> Self {
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            handler,
        }
    }

    /// Parse a whole program.
    pub fn parse(&mut self) -> Program {
        self.parse_program()
    }

    /// program := (function | statement)* EOF
    ///
    /// Functions and free-standing statements may interleave. The loop
    /// stops at end of input, at a lexical error token (reported here),
    /// or after any parse error.
    fn parse_program(&mut self) -> Program {
        let mut items = Vec::new();

        loop {
            if self.check(TokenKind::Eof) {
                break;
            }
            if self.check(TokenKind::Error) {
                self.report_error_token();
                break;
            }

            let item = if self.check(TokenKind::Function) {
                self.parse_function().map(Item::Fn)
            } else {
                self.parse_statement().map(Item::Stmt)
            };

            if let Some(item) = item {
                items.push(item);
            }
            if self.handler.has_errors() {
                break;
            }
        }

        Program { items }
    }

    /// function := 'function' type IDENT '(' params? ')' block
    fn parse_function(&mut self) -> Option<FnItem> {
        let span = self.current.span;
        self.expect(TokenKind::Function, "Expected 'function'");

        let ret_ty = self.parse_type();

        if !self.check(TokenKind::Ident) {
            self.error("Expected function name");
            return None;
        }
        let name = self.current.lexeme.clone();
        self.advance();

        self.expect(TokenKind::LParen, "Expected '('");

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let ty = self.parse_type();

                if !self.check(TokenKind::Ident) {
                    self.error("Expected parameter name");
                    return None;
                }
                let param_span = self.current.span;
                let param_name = self.current.lexeme.clone();
                self.advance();

                params.push(Param {
                    ty,
                    name: param_name,
                    span: param_span,
                });

                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen, "Expected ')'");
        self.expect(TokenKind::LBrace, "Expected '{'");

        let body = self.parse_block();

        Some(FnItem {
            ret_ty,
            name,
            params,
            body,
            span,
        })
    }

    // =========================================================================
    // TOKEN HELPERS
    // =========================================================================

    /// Pull the next token from the lexer.
    pub(crate) fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// True if the current token has the given kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or report `message` at the
    /// current position. Parsing continues either way.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        self.error(message);
        false
    }

    /// Report an error at the current token's position.
    pub(crate) fn error(&self, message: impl Into<String>) {
        self.handler.error(message, self.current.span);
    }

    /// Report a lexical error token: a single-character lexeme is a
    /// stray byte, anything longer is already a message.
    fn report_error_token(&mut self) {
        let message = if self.current.lexeme.chars().count() == 1 {
            format!("Unexpected character '{}'", self.current.lexeme)
        } else {
            self.current.lexeme.clone()
        };
        self.handler.error(message, self.current.span);
    }
}
