use std::{cell::RefCell, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{builtin::Builtin, core::EvalResult},
        scope::ScopeRef,
    },
};

/// Shared handle to a block's underlying ordered sequence.
///
/// Blocks are the language's only compound literal and double as deferred
/// code, so every binding of a block aliases the same sequence: `push` and
/// friends mutate in place and the change is visible through all bindings.
pub type BlockRef = Rc<RefCell<Vec<Value>>>;

/// Represents a value in the interpreter.
///
/// A `Value` is produced directly by the tokenizer and consumed by the
/// evaluator; the same variants serve as literal data and as AST nodes.
#[derive(Debug, Clone)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// An identifier such as `foo` or `zero?`.
    Symbol(String),
    /// A string literal with the surrounding quotes stripped. Escaped
    /// quotes inside the text are kept verbatim; no unescape pass is run.
    String(String),
    /// Produced from `<symbol>:`; binds the following evaluated value to
    /// the wrapped name.
    Assignment(String),
    /// Produced from `:<symbol>`; resolves the wrapped name without
    /// invoking the result, even when it is a function.
    Retrieve(String),
    /// An ordered, mutable sequence of values.
    Block(BlockRef),
    /// A function; see [`Function`].
    Function(Rc<Function>),
}

/// Represents a function value.
#[derive(Debug)]
pub enum Function {
    /// The bare `fun` token as produced by the tokenizer. The evaluator
    /// fills in parameters and body when the token is reached.
    Declaration,
    /// A user-defined function: a parameters block, a body block, and the
    /// scope that was active when `fun` was evaluated. Invocations chain
    /// their local scope to that defining scope, which is what makes
    /// closures work.
    User {
        /// Block of parameter symbols, in binding order.
        parameters: BlockRef,
        /// Block of body tokens; never mutated, copied per invocation.
        body: BlockRef,
        /// The lexical scope captured at definition time.
        scope: ScopeRef,
    },
    /// A built-in function, identified by its registry tag.
    Native(Builtin),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b))
            | (Self::String(a), Self::String(b))
            | (Self::Assignment(a), Self::Assignment(b))
            | (Self::Retrieve(a), Self::Retrieve(b)) => a == b,
            (Self::Block(a), Self::Block(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            },
            (Self::Function(a), Self::Function(b)) => match (a.as_ref(), b.as_ref()) {
                (Function::Native(x), Function::Native(y)) => x == y,
                _ => Rc::ptr_eq(a, b),
            },
            _ => false,
        }
    }
}

impl Value {
    /// Wraps a vector of values into a fresh block.
    #[must_use]
    pub fn block(elements: Vec<Self>) -> Self {
        Self::Block(Rc::new(RefCell::new(elements)))
    }

    /// Returns a fresh empty block, the language's `false` value.
    #[must_use]
    pub fn empty_block() -> Self {
        Self::block(Vec::new())
    }

    /// Returns the language's `true` value, the symbol `true`.
    #[must_use]
    pub fn truth() -> Self {
        Self::Symbol("true".to_string())
    }

    /// Applies the truthiness rule: a block is false exactly when it is
    /// empty; every other value is true.
    ///
    /// # Example
    /// ```
    /// use rebolito::interpreter::value::Value;
    ///
    /// assert!(Value::Number(0.0).is_truthy());
    /// assert!(!Value::empty_block().is_truthy());
    /// assert!(Value::block(vec![Value::Number(1.0)]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Block(elements) => !elements.borrow().is_empty(),
            _ => true,
        }
    }

    /// Converts the value to an `f64`, or returns an error if it is not a
    /// number.
    ///
    /// # Parameters
    /// - `operator`: Name of the operator requesting the conversion, used
    ///   in the error message.
    pub fn as_number(&self, operator: &str) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { operator: operator.to_string() }),
        }
    }

    /// Returns the block handle, or an error if the value is not a block.
    ///
    /// # Parameters
    /// - `operator`: Name of the operator requesting the conversion, used
    ///   in the error message.
    pub fn as_block(&self, operator: &str) -> EvalResult<BlockRef> {
        match self {
            Self::Block(elements) => Ok(Rc::clone(elements)),
            _ => Err(RuntimeError::ExpectedBlock { operator: operator.to_string() }),
        }
    }

    /// Copies the value so that no block storage is shared with the
    /// original. Function bodies are evaluated against such a copy, because
    /// evaluation drains its token sequence destructively and the stored
    /// definition must stay replayable.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        match self {
            Self::Block(elements) => {
                let copied = elements.borrow().iter().map(Self::deep_clone).collect();
                Self::Block(Rc::new(RefCell::new(copied)))
            },
            other => other.clone(),
        }
    }

    /// Returns the variant name, as shown by the REPL's `?` command.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::Symbol(_) => "Symbol",
            Self::String(_) => "String",
            Self::Assignment(_) => "Assignment",
            Self::Retrieve(_) => "RetrieveValue",
            Self::Block(_) => "Block",
            Self::Function(_) => "Function",
        }
    }

    /// Renders the value for `println`: strings print their bare text
    /// without quotes, blocks print their elements' bare texts
    /// concatenated, everything else prints as source.
    #[must_use]
    pub fn display_bare(&self) -> String {
        match self {
            Self::String(text) => text.clone(),
            Self::Block(elements) => {
                elements.borrow().iter().map(Self::display_bare).collect()
            },
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    /// Renders the value back to parseable source text. The REPL's `save`
    /// command depends on this round trip.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Symbol(name) => write!(f, "{name}"),
            Self::String(text) => write!(f, "\"{text}\""),
            Self::Assignment(name) => write!(f, "{name}:"),
            Self::Retrieve(name) => write!(f, ":{name}"),
            Self::Block(elements) => {
                write!(f, "[")?;

                for (index, element) in elements.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }

                    write!(f, "{element}")?;
                }

                write!(f, "]")
            },
            Self::Function(function) => write!(f, "{function}"),
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Declaration => write!(f, "fun"),
            Self::User { parameters, body, .. } => {
                write!(f, "fun {} {}", Value::Block(Rc::clone(parameters)), Value::Block(Rc::clone(body)))
            },
            Self::Native(_) => write!(f, "[built-in function]"),
        }
    }
}
