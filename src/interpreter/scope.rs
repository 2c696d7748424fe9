use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{error::RuntimeError, interpreter::{evaluator::core::EvalResult, value::Value}};

/// Shared handle to a scope.
///
/// The root scope lives for the whole program; a fresh child scope is
/// created for every function invocation and dropped when the invocation
/// returns. Children hold the only mutable access to their own bindings;
/// the parent link is a shared, read-only back-reference.
pub type ScopeRef = Rc<RefCell<Scope>>;

/// A mapping from names to values with a parent link.
///
/// Name resolution walks the parent chain up to the root, which implements
/// lexical scoping: a function invocation's scope chains to the scope that
/// was active when the function was defined, not to the caller's scope.
pub struct Scope {
    symbols: HashMap<String, Value>,
    parent:  Option<ScopeRef>,
}

impl std::fmt::Debug for Scope {
    /// Prints only the locally bound names. Scopes and functions reference
    /// each other, so a derived impl would recurse forever.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
         .field("symbols", &self.list_names())
         .field("has_parent", &self.parent.is_some())
         .finish()
    }
}

impl Scope {
    /// Creates the root scope, the only scope without a parent.
    #[must_use]
    pub fn root() -> ScopeRef {
        Rc::new(RefCell::new(Self { symbols: HashMap::new(), parent: None }))
    }

    /// Creates a child scope chained to `parent`.
    #[must_use]
    pub fn child(parent: &ScopeRef) -> ScopeRef {
        Rc::new(RefCell::new(Self { symbols: HashMap::new(),
                                    parent:  Some(Rc::clone(parent)), }))
    }

    /// Binds `name` to `value` in this scope only. Rebinding an existing
    /// name overwrites it; ancestor scopes are never modified.
    pub fn add_binding(&mut self, name: impl Into<String>, value: Value) {
        self.symbols.insert(name.into(), value);
    }

    /// Resolves `name` in this scope or the nearest ancestor that binds it.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnboundSymbol`] if no scope in the chain
    /// binds the name.
    pub fn resolve(&self, name: &str) -> EvalResult<Value> {
        if let Some(value) = self.symbols.get(name) {
            return Ok(value.clone());
        }

        match &self.parent {
            Some(parent) => parent.borrow().resolve(name),
            None => Err(RuntimeError::UnboundSymbol { name: name.to_string() }),
        }
    }

    /// Returns the names bound locally in this scope, in no particular
    /// order. Used by the REPL's `?vars` listing.
    #[must_use]
    pub fn list_names(&self) -> Vec<String> {
        self.symbols.keys().cloned().collect()
    }
}
