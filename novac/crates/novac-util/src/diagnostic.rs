//! Diagnostic module - Error reporting infrastructure.
//!
//! Diagnostics are collected in a per-compilation [`Handler`] that every
//! stage borrows. A stage may keep working after reporting (to find more
//! problems), but the driver aborts the pipeline at the next stage
//! boundary whenever the handler holds errors.
//!
//! # Examples
//!
//! ```
//! use novac_util::{Handler, Span};
//!
//! let handler = Handler::new();
//! handler.error("unexpected token", Span::new(1, 4));
//!
//! if handler.has_errors() {
//!     eprintln!("compilation failed with {} errors", handler.error_count());
//! }
//! ```

use crate::Span;
use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// An error that prevents compilation
    Error,
    /// A warning that doesn't prevent compilation
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "Error"),
            Level::Warning => write!(f, "Warning"),
        }
    }
}

/// A diagnostic message with severity and location
///
/// Rendered as `Error at line L, column C: MSG`; the position part is
/// elided when the span is [`Span::DUMMY`].
///
/// # Examples
///
/// ```
/// use novac_util::{Diagnostic, Span};
///
/// let diag = Diagnostic::error("Undefined variable: y", Span::new(1, 30));
/// assert_eq!(format!("{}", diag), "Error at line 1, column 30: Undefined variable: y");
///
/// let diag = Diagnostic::error("Type mismatch in assignment", Span::DUMMY);
/// assert_eq!(format!("{}", diag), "Error: Type mismatch in assignment");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic severity level
    pub level: Level,
    /// Main diagnostic message
    pub message: String,
    /// Source location
    pub span: Span,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span.is_dummy() {
            write!(f, "{}: {}", self.level, self.message)
        } else {
            write!(f, "{} at {}: {}", self.level, self.span, self.message)
        }
    }
}

/// Handler for collecting and querying diagnostics
///
/// Reporting methods take `&self` so the handler can be shared by the
/// lexer, parser, and analyser within one compilation without juggling
/// mutable borrows. The handler is clearable for reuse.
pub struct Handler {
    /// Collected diagnostics, in discovery order
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new handler
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Report an error at the given location
    ///
    /// # Examples
    ///
    /// ```
    /// use novac_util::{Handler, Span};
    ///
    /// let handler = Handler::new();
    /// handler.error("Expected ';'", Span::new(2, 12));
    /// assert!(handler.has_errors());
    /// ```
    pub fn error(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::error(message, span));
    }

    /// Report a warning at the given location
    pub fn warning(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::warning(message, span));
    }

    /// Emit a pre-built diagnostic
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Get all diagnostics, in the order they were reported
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Clear all diagnostics so the handler can be reused
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
