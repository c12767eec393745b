//! Type parsing.
//!
//! type := ('int'|'float'|'string'|'bool'|'void') ('[' INT_LIT ']')?

use crate::{Parser, Type};
use novac_lex::TokenKind;

impl<'a> Parser<'a> {
    /// Parse a type annotation. Reports and returns [`Type::Error`] when
    /// no type keyword is present, so the caller can keep scanning.
    pub(crate) fn parse_type(&mut self) -> Type {
        let base = if self.eat(TokenKind::Int) {
            Type::Int
        } else if self.eat(TokenKind::Float) {
            Type::Float
        } else if self.eat(TokenKind::String) {
            Type::String
        } else if self.eat(TokenKind::Bool) {
            Type::Bool
        } else if self.eat(TokenKind::Void) {
            Type::Void
        } else {
            self.error("Expected type");
            return Type::Error;
        };

        if self.eat(TokenKind::LBracket) {
            if !self.check(TokenKind::IntLit) {
                self.error("Expected array size");
                return Type::Error;
            }
            let size = match self.current.lexeme.parse::<usize>() {
                Ok(size) => size,
                Err(_) => {
                    self.error("Array size out of range");
                    self.advance();
                    self.expect(TokenKind::RBracket, "Expected ']'");
                    return Type::Error;
                },
            };
            self.advance();
            self.expect(TokenKind::RBracket, "Expected ']'");
            return Type::Array(Box::new(base), size);
        }

        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;
    use novac_lex::Lexer;
    use novac_util::Handler;

    fn parse_type_source(source: &str) -> (Type, Handler) {
        let handler = Handler::new();
        let ty = {
            let mut parser = Parser::new(Lexer::new(source), &handler);
            parser.parse_type()
        };
        (ty, handler)
    }

    #[test]
    fn test_primitive_types() {
        for (src, expected) in [
            ("int", Type::Int),
            ("float", Type::Float),
            ("string", Type::String),
            ("bool", Type::Bool),
            ("void", Type::Void),
        ] {
            let (ty, handler) = parse_type_source(src);
            assert!(!handler.has_errors());
            assert_eq!(ty, expected);
        }
    }

    #[test]
    fn test_array_type() {
        let (ty, handler) = parse_type_source("int[10]");
        assert!(!handler.has_errors());
        assert_eq!(ty, Type::Array(Box::new(Type::Int), 10));
    }

    #[test]
    fn test_zero_length_array_is_accepted() {
        let (ty, handler) = parse_type_source("float[0]");
        assert!(!handler.has_errors());
        assert_eq!(ty, Type::Array(Box::new(Type::Float), 0));
    }

    #[test]
    fn test_missing_type_keyword() {
        let (ty, handler) = parse_type_source("x");
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics()[0].message, "Expected type");
        assert_eq!(ty, Type::Error);
    }

    #[test]
    fn test_missing_array_size() {
        let (ty, handler) = parse_type_source("int[]");
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics()[0].message, "Expected array size");
        assert_eq!(ty, Type::Error);
    }

    #[test]
    fn test_array_size_out_of_range() {
        let (ty, handler) = parse_type_source("int[99999999999999999999999]");
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics()[0].message, "Array size out of range");
        assert_eq!(ty, Type::Error);
    }

    #[test]
    fn test_missing_closing_bracket() {
        let (_, handler) = parse_type_source("int[3;");
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics()[0].message, "Expected ']'");
    }
}
