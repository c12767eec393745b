//! novac-lex - Lexical analyzer for the Nova language.
//!
//! The lexer transforms source text into a stream of tokens, produced on
//! demand via [`Lexer::next_token`]. It is total: any finite input yields
//! a finite token sequence ending in [`TokenKind::Eof`]. Lexical problems
//! never abort the scan; they surface as [`TokenKind::Error`] tokens and
//! the parser decides what to do with them.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{keyword, Token, TokenKind};
