//! Core lexer implementation.
//!
//! Direct-coded scanner: each token family has its own method and
//! [`Lexer::next_token`] dispatches on the first character after skipping
//! whitespace and `//` line comments.

use novac_util::Span;

use crate::cursor::Cursor;
use crate::token::{keyword, Token, TokenKind};

/// Lexer for the Nova language.
///
/// Produces one token per call to [`next_token`](Lexer::next_token);
/// after the input is exhausted every further call returns an `Eof`
/// token at the final position. The lexer never reports diagnostics and
/// never panics: lexical problems become `Error` tokens whose lexeme is
/// either the offending byte or a message (`Unterminated string`).
///
/// # Example
///
/// ```
/// use novac_lex::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("int x = 42;");
/// assert_eq!(lexer.next_token().kind, TokenKind::Int);
/// assert_eq!(lexer.next_token().kind, TokenKind::Ident);
/// assert_eq!(lexer.next_token().kind, TokenKind::Eq);
/// assert_eq!(lexer.next_token().kind, TokenKind::IntLit);
/// assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
/// assert_eq!(lexer.next_token().kind, TokenKind::Eof);
/// ```
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Returns the next token from the source code.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let span = self.cursor.span();
        let start = self.cursor.position();

        if self.cursor.is_at_end() {
            return Token::eof(span);
        }

        match self.cursor.current_char() {
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_identifier(start, span),
            c if c.is_ascii_digit() => self.lex_number(start, span),
            '"' => self.lex_string(span),
            '=' => self.lex_two_char('=', TokenKind::Eq, TokenKind::EqEq, start, span),
            '!' => self.lex_two_char('=', TokenKind::Not, TokenKind::NotEq, start, span),
            '<' => self.lex_two_char('=', TokenKind::Lt, TokenKind::LtEq, start, span),
            '>' => self.lex_two_char('=', TokenKind::Gt, TokenKind::GtEq, start, span),
            '&' => self.lex_doubled('&', TokenKind::AndAnd, start, span),
            '|' => self.lex_doubled('|', TokenKind::OrOr, start, span),
            '+' => self.lex_single(TokenKind::Plus, start, span),
            '-' => self.lex_single(TokenKind::Minus, start, span),
            '*' => self.lex_single(TokenKind::Star, start, span),
            '/' => self.lex_single(TokenKind::Slash, start, span),
            '%' => self.lex_single(TokenKind::Percent, start, span),
            '(' => self.lex_single(TokenKind::LParen, start, span),
            ')' => self.lex_single(TokenKind::RParen, start, span),
            '{' => self.lex_single(TokenKind::LBrace, start, span),
            '}' => self.lex_single(TokenKind::RBrace, start, span),
            '[' => self.lex_single(TokenKind::LBracket, start, span),
            ']' => self.lex_single(TokenKind::RBracket, start, span),
            ';' => self.lex_single(TokenKind::Semicolon, start, span),
            ',' => self.lex_single(TokenKind::Comma, start, span),
            '.' => self.lex_single(TokenKind::Dot, start, span),
            c => {
                self.cursor.advance();
                Token::new(TokenKind::Error, c.to_string(), span)
            },
        }
    }

    /// Skip ASCII whitespace and `//` line comments. Comment and
    /// whitespace runs may alternate; all of them are consumed before
    /// the next token starts.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            let c = self.cursor.current_char();
            if c.is_ascii_whitespace() && !self.cursor.is_at_end() {
                self.cursor.advance();
            } else if c == '/' && self.cursor.peek_next() == '/' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Lex an identifier or keyword: `[A-Za-z_][A-Za-z0-9_]*`.
    fn lex_identifier(&mut self, start: usize, span: Span) -> Token {
        loop {
            let c = self.cursor.current_char();
            if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start);
        let kind = keyword(text).unwrap_or(TokenKind::Ident);
        Token::new(kind, text, span)
    }

    /// Lex an integer or float literal.
    ///
    /// A digit run, optionally followed by `.` and another digit run.
    /// A `.` without a following digit is left for the next token.
    fn lex_number(&mut self, start: usize, span: Span) -> Token {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut kind = TokenKind::IntLit;
        if self.cursor.current_char() == '.' && self.cursor.peek_next().is_ascii_digit() {
            kind = TokenKind::FloatLit;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        Token::new(kind, self.cursor.slice_from(start), span)
    }

    /// Lex a string literal.
    ///
    /// The lexeme is the raw byte content between the quotes; a
    /// backslash escapes the following byte unconditionally and both
    /// bytes are kept verbatim so the emitted C literal reproduces them.
    /// Only end of input before the closing quote is an error.
    fn lex_string(&mut self, span: Span) -> Token {
        self.cursor.advance();
        let start = self.cursor.position();

        loop {
            if self.cursor.is_at_end() {
                return Token::new(TokenKind::Error, "Unterminated string", span);
            }
            match self.cursor.current_char() {
                '"' => break,
                '\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_at_end() {
                        self.cursor.advance();
                    }
                },
                _ => self.cursor.advance(),
            }
        }

        let content = self.cursor.slice_from(start).to_string();
        self.cursor.advance();
        Token::new(TokenKind::StringLit, content, span)
    }

    /// Lex a single-character token.
    fn lex_single(&mut self, kind: TokenKind, start: usize, span: Span) -> Token {
        self.cursor.advance();
        Token::new(kind, self.cursor.slice_from(start), span)
    }

    /// Lex an operator that may be followed by `follow` to form a
    /// two-character token (`=`/`==`, `!`/`!=`, `<`/`<=`, `>`/`>=`).
    fn lex_two_char(
        &mut self,
        follow: char,
        single: TokenKind,
        double: TokenKind,
        start: usize,
        span: Span,
    ) -> Token {
        self.cursor.advance();
        let kind = if self.cursor.current_char() == follow {
            self.cursor.advance();
            double
        } else {
            single
        };
        Token::new(kind, self.cursor.slice_from(start), span)
    }

    /// Lex `&&` or `||`; a lone `&` or `|` is an error token carrying
    /// the stray character.
    fn lex_doubled(&mut self, c: char, kind: TokenKind, start: usize, span: Span) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == c {
            self.cursor.advance();
            Token::new(kind, self.cursor.slice_from(start), span)
        } else {
            Token::new(TokenKind::Error, c.to_string(), span)
        }
    }
}

/// Iterate tokens up to (but not including) `Eof`.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
