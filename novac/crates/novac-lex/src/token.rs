//! Token definitions for the Nova language.

use novac_util::Span;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// The kind of a lexical token.
///
/// Keywords cannot be used as identifiers; the lexer resolves them via
/// [`keyword`] after scanning an identifier-shaped lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Integer literal, e.g. `42`
    IntLit,
    /// Floating point literal, e.g. `3.14`
    FloatLit,
    /// String literal; the lexeme holds the raw bytes between the quotes
    StringLit,
    /// `true`
    True,
    /// `false`
    False,

    // Type keywords
    /// `int`
    Int,
    /// `float`
    Float,
    /// `string`
    String,
    /// `bool`
    Bool,
    /// `void`
    Void,

    // Keywords
    /// `function`
    Function,
    /// `return`
    Return,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `for`
    For,
    /// `print`
    Print,

    /// Identifier (variable, function, or parameter name)
    Ident,

    // Operators
    /// `=`
    Eq,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Not,

    // Punctuation
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,

    // Meta
    /// End of input
    Eof,
    /// Invalid input; the lexeme carries the offending byte or a message
    Error,
}

/// A lexical token: kind, raw lexeme, and source position.
///
/// For string literals the lexeme is the raw byte content between the
/// quotes with escape sequences preserved, not decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Raw source text of the token
    pub lexeme: String,
    /// Position of the token's first character
    pub span: Span,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Create an end-of-input token at the given position
    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }
}

/// Look up the keyword table; returns the keyword kind for reserved
/// words, `None` for ordinary identifiers.
///
/// # Examples
///
/// ```
/// use novac_lex::{keyword, TokenKind};
///
/// assert_eq!(keyword("while"), Some(TokenKind::While));
/// assert_eq!(keyword("whale"), None);
/// ```
pub fn keyword(ident: &str) -> Option<TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();

    let table = KEYWORDS.get_or_init(|| {
        let mut map = FxHashMap::default();
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("string", TokenKind::String);
        map.insert("bool", TokenKind::Bool);
        map.insert("void", TokenKind::Void);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("function", TokenKind::Function);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("print", TokenKind::Print);
        map
    });

    table.get(ident).copied()
}
