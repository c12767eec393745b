//! Error types for C code generation.
//!
//! Both variants indicate a pipeline bug rather than a user error: a
//! well-typed tree from a clean analysis can always be emitted. They are
//! surfaced as errors instead of panics so the driver can report them.

use thiserror::Error;

/// Error type for C code generation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeGenError {
    /// An expression reached the generator without a type annotation
    #[error("Expression has no type annotation; semantic analysis must run first")]
    MissingType,

    /// A print statement carried a type with no printf mapping
    #[error("Cannot emit print for a value of type '{0}'")]
    UnprintableType(String),
}

/// Result type alias for code generation operations
pub type Result<T> = std::result::Result<T, CodeGenError>;
