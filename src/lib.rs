//! # rebolito
//!
//! rebolito is a minimal, homoiconic, prefix-notation scripting language
//! in the Rebol family. Source text tokenizes directly into a flat, typed
//! token sequence that *is* the program; evaluation consumes that sequence
//! left to right, with each operator choosing how many further tokens to
//! consume. User-defined functions and control-flow forms are built with
//! the same mechanism.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::collections::HashSet;

use crate::interpreter::{
    evaluator::{bootstrap, core::{eval_sequence, Ast}},
    scope::{Scope, ScopeRef},
    tokenizer::tokenize,
    value::Value,
};

/// Provides unified error types for tokenization and evaluation.
///
/// This module defines all errors that can be raised while turning source
/// text into tokens or while evaluating them. It standardizes error
/// reporting with detailed messages for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (tokenizer, evaluator).
/// - Supports integration with standard error handling traits and
///   reporting utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together the tokenizer, the value model, the scope
/// chain, the evaluation engine, and the built-in library to provide a
/// complete runtime for Rebolito source.
///
/// # Responsibilities
/// - Coordinates all core components: tokenizer, scopes, evaluator, and
///   built-ins.
/// - Provides entry points for tokenizing and evaluating user code.
pub mod interpreter;
/// The interactive read-loop.
///
/// Implements the prompt, line continuation for unfinished blocks, and the
/// introspection commands (`help`, `?vars`, `?`, `load`, `save`, `quit`).
/// The REPL consumes the core only through [`Interpreter::eval_source`],
/// [`Interpreter::resolve`], and [`Interpreter::list_names`].
pub mod repl;

/// A ready-to-use interpreter: the root scope with all built-ins and the
/// prelude installed, plus the side-table distinguishing core bindings
/// from user bindings.
pub struct Interpreter {
    global:     ScopeRef,
    core_names: HashSet<String>,
}

impl Interpreter {
    /// Creates an interpreter with a freshly bootstrapped root scope.
    #[must_use]
    pub fn new() -> Self {
        let global = Scope::root();
        bootstrap::install(&global);
        let core_names = global.borrow().list_names().into_iter().collect();

        Self { global, core_names }
    }

    /// Tokenizes `source` and fully drains the resulting sequence against
    /// the root scope.
    ///
    /// Returns the last produced value, or `None` when the source produced
    /// nothing (callers conventionally print the textual `NIL` for that).
    /// An error aborts the current evaluation only: bindings committed
    /// before the failure stay bound, and the interpreter remains usable.
    ///
    /// # Errors
    /// Returns tokenizer or runtime errors boxed as
    /// `Box<dyn std::error::Error>`.
    ///
    /// # Example
    /// ```
    /// use rebolito::Interpreter;
    ///
    /// let rebolito = Interpreter::new();
    /// let result = rebolito.eval_source("+ 1 2").unwrap().unwrap();
    /// assert_eq!(result.to_string(), "3");
    /// ```
    pub fn eval_source(&self, source: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
        let mut ast: Ast = tokenize(source)?.into();
        let result = eval_sequence(&mut ast, &self.global)?;

        Ok(result)
    }

    /// Resolves `name` in the root scope.
    ///
    /// # Errors
    /// Returns [`error::RuntimeError::UnboundSymbol`] when the name is not
    /// bound.
    pub fn resolve(&self, name: &str) -> Result<Value, error::RuntimeError> {
        self.global.borrow().resolve(name)
    }

    /// Returns the names bound in the root scope, in no particular order.
    #[must_use]
    pub fn list_names(&self) -> Vec<String> {
        self.global.borrow().list_names()
    }

    /// Returns `true` when `name` was registered by the built-in
    /// bootstrap rather than by user code.
    #[must_use]
    pub fn is_core(&self, name: &str) -> bool {
        self.core_names.contains(name)
    }

    /// Returns the user-created bindings (everything the bootstrap did not
    /// register), sorted by name. Consumed by the REPL's `save` command.
    #[must_use]
    pub fn user_bindings(&self) -> Vec<(String, Value)> {
        let mut bindings: Vec<(String, Value)> =
            self.global
                .borrow()
                .list_names()
                .into_iter()
                .filter(|name| !self.is_core(name))
                .filter_map(|name| {
                    let value = self.global.borrow().resolve(&name).ok()?;
                    Some((name, value))
                })
                .collect();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));

        bindings
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates `source` in a fresh interpreter and returns the final value.
///
/// This is the one-shot convenience entry; keep an [`Interpreter`] around
/// instead when bindings should persist between evaluations.
///
/// # Errors
/// Returns an error if tokenization or evaluation fails.
///
/// # Examples
/// ```
/// use rebolito::evaluate;
///
/// // The last produced value is returned.
/// let value = evaluate("x: 3 * x x").unwrap().unwrap();
/// assert_eq!(value.to_string(), "9");
///
/// // Unbound symbols are an error.
/// assert!(evaluate("y").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    Interpreter::new().eval_source(source)
}
