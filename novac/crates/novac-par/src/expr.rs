//! Expression parsing.
//!
//! A precedence cascade with one function per level, lowest binding
//! first. All binary operators are left-associative except assignment,
//! which recurses to the right; prefix `!`/`-` bind tighter than any
//! infix operator, and the postfix forms (call, index) bind tighter
//! still.

use crate::{BinOp, Expr, ExprKind, Parser, UnOp};
use novac_lex::TokenKind;

impl<'a> Parser<'a> {
    /// expression := assignment
    pub(crate) fn parse_expression(&mut self) -> Option<Expr> {
        self.parse_assignment()
    }

    /// assignment := logicalOr ('=' assignment)?   -- right-assoc
    ///
    /// Assignment is an expression: a `Binary` node with `BinOp::Assign`.
    /// The analyser validates that the left side is assignable.
    fn parse_assignment(&mut self) -> Option<Expr> {
        let expr = self.parse_logical_or()?;

        if self.check(TokenKind::Eq) {
            let span = self.current.span;
            self.advance();
            let value = self.parse_assignment()?;
            return Some(Expr::new(
                ExprKind::Binary(BinOp::Assign, Box::new(expr), Box::new(value)),
                span,
            ));
        }

        Some(expr)
    }

    /// logicalOr := logicalAnd ('||' logicalAnd)*
    fn parse_logical_or(&mut self) -> Option<Expr> {
        let mut expr = self.parse_logical_and()?;

        while self.check(TokenKind::OrOr) {
            let span = self.current.span;
            self.advance();
            let right = self.parse_logical_and()?;
            expr = Expr::new(
                ExprKind::Binary(BinOp::Or, Box::new(expr), Box::new(right)),
                span,
            );
        }

        Some(expr)
    }

    /// logicalAnd := equality ('&&' equality)*
    fn parse_logical_and(&mut self) -> Option<Expr> {
        let mut expr = self.parse_equality()?;

        while self.check(TokenKind::AndAnd) {
            let span = self.current.span;
            self.advance();
            let right = self.parse_equality()?;
            expr = Expr::new(
                ExprKind::Binary(BinOp::And, Box::new(expr), Box::new(right)),
                span,
            );
        }

        Some(expr)
    }

    /// equality := comparison (('=='|'!=') comparison)*
    fn parse_equality(&mut self) -> Option<Expr> {
        let mut expr = self.parse_comparison()?;

        loop {
            let op = match self.current.kind {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            let span = self.current.span;
            self.advance();
            let right = self.parse_comparison()?;
            expr = Expr::new(ExprKind::Binary(op, Box::new(expr), Box::new(right)), span);
        }

        Some(expr)
    }

    /// comparison := addition (('<'|'<='|'>'|'>=') addition)*
    fn parse_comparison(&mut self) -> Option<Expr> {
        let mut expr = self.parse_addition()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::LtEq => BinOp::Le,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::GtEq => BinOp::Ge,
                _ => break,
            };
            let span = self.current.span;
            self.advance();
            let right = self.parse_addition()?;
            expr = Expr::new(ExprKind::Binary(op, Box::new(expr), Box::new(right)), span);
        }

        Some(expr)
    }

    /// addition := multiplication (('+'|'-') multiplication)*
    fn parse_addition(&mut self) -> Option<Expr> {
        let mut expr = self.parse_multiplication()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let span = self.current.span;
            self.advance();
            let right = self.parse_multiplication()?;
            expr = Expr::new(ExprKind::Binary(op, Box::new(expr), Box::new(right)), span);
        }

        Some(expr)
    }

    /// multiplication := unary (('*'|'/'|'%') unary)*
    fn parse_multiplication(&mut self) -> Option<Expr> {
        let mut expr = self.parse_unary()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Rem,
                _ => break,
            };
            let span = self.current.span;
            self.advance();
            let right = self.parse_unary()?;
            expr = Expr::new(ExprKind::Binary(op, Box::new(expr), Box::new(right)), span);
        }

        Some(expr)
    }

    /// unary := ('!'|'-') unary | postfix
    fn parse_unary(&mut self) -> Option<Expr> {
        let op = match self.current.kind {
            TokenKind::Not => UnOp::Not,
            TokenKind::Minus => UnOp::Neg,
            _ => return self.parse_postfix(),
        };
        let span = self.current.span;
        self.advance();

        let operand = self.parse_unary()?;
        Some(Expr::new(
            ExprKind::Unary(op, Box::new(operand)),
            span,
        ))
    }

    /// postfix := primary ( '[' expression ']' | '(' args? ')' )*
    ///
    /// A call is only valid on a bare identifier; the `Variable` node is
    /// rewritten into a `Call` here. Any other callee is an error.
    fn parse_postfix(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.eat(TokenKind::LBracket) {
                let index = self.parse_expression()?;
                self.expect(TokenKind::RBracket, "Expected ']'");

                let span = expr.span;
                expr = Expr::new(
                    ExprKind::Index(Box::new(expr), Box::new(index)),
                    span,
                );
            } else if self.eat(TokenKind::LParen) {
                let mut args = Vec::new();
                if !self.check(TokenKind::RParen) {
                    loop {
                        if let Some(arg) = self.parse_expression() {
                            args.push(arg);
                        }
                        if !self.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RParen, "Expected ')'");

                let Expr { kind, span, ty } = expr;
                expr = match kind {
                    ExprKind::Variable(name) => {
                        Expr::new(ExprKind::Call(name, args), span)
                    },
                    kind => {
                        self.error("Function call must be on identifier");
                        Expr { kind, span, ty }
                    },
                };
            } else {
                break;
            }
        }

        Some(expr)
    }

    /// primary := INT_LIT | FLOAT_LIT | STRING_LIT | 'true' | 'false'
    ///          | IDENT | '(' expression ')'
    fn parse_primary(&mut self) -> Option<Expr> {
        let span = self.current.span;

        match self.current.kind {
            TokenKind::IntLit => {
                let value = match self.current.lexeme.parse::<i64>() {
                    Ok(value) => value,
                    Err(_) => {
                        self.error("Integer literal out of range");
                        self.advance();
                        return None;
                    },
                };
                self.advance();
                Some(Expr::new(ExprKind::IntLit(value), span))
            },
            TokenKind::FloatLit => {
                let value = match self.current.lexeme.parse::<f32>() {
                    Ok(value) => value,
                    Err(_) => {
                        self.error("Invalid float literal");
                        self.advance();
                        return None;
                    },
                };
                self.advance();
                Some(Expr::new(ExprKind::FloatLit(value), span))
            },
            TokenKind::StringLit => {
                let value = self.current.lexeme.clone();
                self.advance();
                Some(Expr::new(ExprKind::StringLit(value), span))
            },
            TokenKind::True => {
                self.advance();
                Some(Expr::new(ExprKind::BoolLit(true), span))
            },
            TokenKind::False => {
                self.advance();
                Some(Expr::new(ExprKind::BoolLit(false), span))
            },
            TokenKind::Ident => {
                let name = self.current.lexeme.clone();
                self.advance();
                Some(Expr::new(ExprKind::Variable(name), span))
            },
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression();
                self.expect(TokenKind::RParen, "Expected ')'");
                expr
            },
            _ => {
                self.error("Expected expression");
                self.advance();
                None
            },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use novac_lex::Lexer;
    use novac_util::{Handler, Span};

    /// Helper to parse a single expression
    fn parse_expr_source(source: &str) -> (Option<Expr>, Handler) {
        let handler = Handler::new();
        let expr = {
            let mut parser = Parser::new(Lexer::new(source), &handler);
            parser.parse_expression()
        };
        (expr, handler)
    }

    fn parse_expr(source: &str) -> Expr {
        let (expr, handler) = parse_expr_source(source);
        assert!(
            !handler.has_errors(),
            "unexpected errors: {:?}",
            handler.diagnostics()
        );
        expr.expect("expected an expression")
    }

    /// Helper to check expression shape
    fn assert_is_binary(expr: &Expr, op: BinOp) {
        match &expr.kind {
            ExprKind::Binary(found, _, _) => {
                assert_eq!(*found, op, "Expected operator {:?}", op)
            },
            other => panic!("Expected Binary expression, got {:?}", other),
        }
    }

    fn binary_parts(expr: &Expr) -> (&Expr, &Expr) {
        match &expr.kind {
            ExprKind::Binary(_, left, right) => (left, right),
            other => panic!("Expected Binary expression, got {:?}", other),
        }
    }

    // =========================================================================
    // LITERAL TESTS
    // =========================================================================

    #[test]
    fn test_parse_int_literal() {
        let expr = parse_expr("42");
        assert!(matches!(expr.kind, ExprKind::IntLit(42)));
        assert_eq!(expr.ty, Some(crate::Type::Int));
    }

    #[test]
    fn test_parse_float_literal() {
        let expr = parse_expr("3.14");
        match expr.kind {
            ExprKind::FloatLit(f) => assert!((f - 3.14).abs() < 0.001),
            other => panic!("Expected float literal, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_string_literal_keeps_escapes() {
        let expr = parse_expr(r#""a\tb""#);
        match expr.kind {
            ExprKind::StringLit(s) => assert_eq!(s, r"a\tb"),
            other => panic!("Expected string literal, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bool_literals() {
        assert!(matches!(parse_expr("true").kind, ExprKind::BoolLit(true)));
        assert!(matches!(parse_expr("false").kind, ExprKind::BoolLit(false)));
    }

    #[test]
    fn test_int_literal_i64_range() {
        let expr = parse_expr("9223372036854775807");
        assert!(matches!(expr.kind, ExprKind::IntLit(i64::MAX)));

        let (expr, handler) = parse_expr_source("9223372036854775808");
        assert!(expr.is_none());
        assert_eq!(
            handler.diagnostics()[0].message,
            "Integer literal out of range"
        );
    }

    // =========================================================================
    // PRECEDENCE AND ASSOCIATIVITY TESTS
    // =========================================================================

    #[test]
    fn test_precedence_mul_over_add() {
        // 2 + 3 * 4 parses as 2 + (3 * 4)
        let expr = parse_expr("2 + 3 * 4");
        assert_is_binary(&expr, BinOp::Add);
        let (_, right) = binary_parts(&expr);
        assert_is_binary(right, BinOp::Mul);
    }

    #[test]
    fn test_precedence_comparison_over_logical() {
        // a && b == c || d parses as (a && (b == c)) || d
        let expr = parse_expr("a && b == c || d");
        assert_is_binary(&expr, BinOp::Or);
        let (left, _) = binary_parts(&expr);
        assert_is_binary(left, BinOp::And);
        let (_, and_right) = binary_parts(left);
        assert_is_binary(and_right, BinOp::Eq);
    }

    #[test]
    fn test_left_associativity() {
        // a - b - c parses as (a - b) - c
        let expr = parse_expr("a - b - c");
        assert_is_binary(&expr, BinOp::Sub);
        let (left, _) = binary_parts(&expr);
        assert_is_binary(left, BinOp::Sub);
    }

    #[test]
    fn test_assignment_is_right_associative() {
        // a = b = c parses as a = (b = c)
        let expr = parse_expr("a = b = c");
        assert_is_binary(&expr, BinOp::Assign);
        let (left, right) = binary_parts(&expr);
        assert!(matches!(left.kind, ExprKind::Variable(_)));
        assert_is_binary(right, BinOp::Assign);
    }

    #[test]
    fn test_parentheses_override_precedence() {
        // (2 + 3) * 4 keeps the addition on the left
        let expr = parse_expr("(2 + 3) * 4");
        assert_is_binary(&expr, BinOp::Mul);
        let (left, _) = binary_parts(&expr);
        assert_is_binary(left, BinOp::Add);
    }

    #[test]
    fn test_unary_chains_are_right_associative() {
        // !!x parses as !(!x)
        let expr = parse_expr("!!x");
        match expr.kind {
            ExprKind::Unary(UnOp::Not, inner) => {
                assert!(matches!(inner.kind, ExprKind::Unary(UnOp::Not, _)));
            },
            other => panic!("Expected unary, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        // -a + b parses as (-a) + b
        let expr = parse_expr("-a + b");
        assert_is_binary(&expr, BinOp::Add);
        let (left, _) = binary_parts(&expr);
        assert!(matches!(left.kind, ExprKind::Unary(UnOp::Neg, _)));
    }

    #[test]
    fn test_modulo() {
        let expr = parse_expr("a % 2");
        assert_is_binary(&expr, BinOp::Rem);
    }

    // =========================================================================
    // POSTFIX TESTS
    // =========================================================================

    #[test]
    fn test_call_expression() {
        let expr = parse_expr("f(1, x)");
        match expr.kind {
            ExprKind::Call(name, args) => {
                assert_eq!(name, "f");
                assert_eq!(args.len(), 2);
            },
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_call_without_args() {
        let expr = parse_expr("f()");
        match expr.kind {
            ExprKind::Call(_, args) => assert!(args.is_empty()),
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_index_expression() {
        let expr = parse_expr("xs[i + 1]");
        match expr.kind {
            ExprKind::Index(object, index) => {
                assert!(matches!(object.kind, ExprKind::Variable(_)));
                assert_is_binary(&index, BinOp::Add);
            },
            other => panic!("Expected index, got {:?}", other),
        }
    }

    #[test]
    fn test_postfix_chains_left_to_right() {
        // f(0)[1] calls then indexes
        let expr = parse_expr("f(0)[1]");
        match expr.kind {
            ExprKind::Index(object, _) => {
                assert!(matches!(object.kind, ExprKind::Call(_, _)));
            },
            other => panic!("Expected index, got {:?}", other),
        }
    }

    #[test]
    fn test_postfix_binds_tighter_than_unary() {
        // -f(1) parses as -(f(1))
        let expr = parse_expr("-f(1)");
        match expr.kind {
            ExprKind::Unary(UnOp::Neg, inner) => {
                assert!(matches!(inner.kind, ExprKind::Call(_, _)));
            },
            other => panic!("Expected unary, got {:?}", other),
        }
    }

    #[test]
    fn test_call_on_non_identifier_is_error() {
        let (_, handler) = parse_expr_source("xs[0](1)");
        assert!(handler.has_errors());
        assert_eq!(
            handler.diagnostics()[0].message,
            "Function call must be on identifier"
        );
    }

    // =========================================================================
    // ERROR TESTS
    // =========================================================================

    #[test]
    fn test_missing_expression() {
        let (expr, handler) = parse_expr_source(";");
        assert!(expr.is_none());
        assert_eq!(handler.diagnostics()[0].message, "Expected expression");
        assert_eq!(handler.diagnostics()[0].span, Span::new(1, 1));
    }

    #[test]
    fn test_missing_closing_paren() {
        let (_, handler) = parse_expr_source("(1 + 2");
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics()[0].message, "Expected ')'");
    }

    #[test]
    fn test_missing_closing_bracket() {
        let (_, handler) = parse_expr_source("xs[1");
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics()[0].message, "Expected ']'");
    }

    #[test]
    fn test_dangling_operator() {
        let (expr, handler) = parse_expr_source("1 +");
        assert!(expr.is_none());
        assert_eq!(handler.diagnostics()[0].message, "Expected expression");
    }
}
