//! Lexically nested name resolution.
//!
//! Scopes form a stack of maps: `enter_scope` pushes, `exit_scope` pops,
//! and lookup walks inside-out from the innermost scope to the global
//! one. The global scope is never popped.

use indexmap::IndexMap;
use novac_par::Type;

/// A named entity: a variable, parameter, or function.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub is_function: bool,
}

/// Stack of lexical scopes.
///
/// # Example
///
/// ```
/// use novac_par::Type;
/// use novac_sem::SymbolTable;
///
/// let mut table = SymbolTable::new();
/// table.define("x", Type::Int, false);
/// table.enter_scope();
/// assert!(table.resolve("x").is_some());
/// assert!(!table.is_defined_in_current_scope("x"));
/// table.exit_scope();
/// ```
pub struct SymbolTable {
    /// Innermost scope last. Index 0 is the global scope.
    scopes: Vec<IndexMap<String, Symbol>>,
}

impl SymbolTable {
    /// Create a table holding only the global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![IndexMap::new()],
        }
    }

    /// Push a fresh scope.
    pub fn enter_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    /// Pop the current scope. The global scope stays put.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Insert (or overwrite) a symbol in the current scope. Callers
    /// gate redefinition on `is_defined_in_current_scope` first.
    pub fn define(&mut self, name: impl Into<String>, ty: Type, is_function: bool) {
        let name = name.into();
        let symbol = Symbol {
            name: name.clone(),
            ty,
            is_function,
        };
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, symbol);
        }
    }

    /// Inside-out lookup: current scope first, then enclosing scopes up
    /// to the global one.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Membership test limited to the current scope.
    pub fn is_defined_in_current_scope(&self, name: &str) -> bool {
        self.scopes
            .last()
            .map(|scope| scope.contains_key(name))
            .unwrap_or(false)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
