//! novac-sem - Semantic analysis for the Nova language.
//!
//! The analyser walks the parsed tree once, resolving names against a
//! lexically nested symbol table, checking the typing rules, and filling
//! in the `ty` annotation slot on every expression it reaches. It never
//! changes the shape of the tree.
//!
//! After an analysis that reported no diagnostics, every reachable
//! expression carries a type that is not the poison type.

pub mod analysis;
pub mod scope;

pub use analysis::SemanticAnalyzer;
pub use scope::{Symbol, SymbolTable};
