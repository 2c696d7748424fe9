use std::{collections::VecDeque, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        scope::{Scope, ScopeRef},
        value::{BlockRef, Function, Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A live token sequence under evaluation.
///
/// The sequence is drained from the front; passing it by exclusive
/// reference into every evaluation call is what realizes per-operator
/// arity: an operator that wants N arguments calls [`eval_next`] N more
/// times against the same remaining sequence, and each call consumes
/// however many tokens that argument expression needs.
pub type Ast = VecDeque<Value>;

/// Removes the leading token from `ast` and evaluates it.
///
/// Dispatch rules:
/// - Numbers, strings, and blocks are self-evaluating. A block is returned
///   as data, not run; consumers like `if` evaluate it explicitly.
/// - An assignment evaluates one following expression, binds the result in
///   the current scope, and yields the bound value, so assignments can
///   appear mid-expression.
/// - A retrieval resolves its name without invoking the result, which is
///   the language's quoting mechanism for passing functions as data.
/// - A bare `fun` consumes the next two tokens, which must be block
///   literals, and yields a function capturing the current scope.
/// - A symbol resolves its name; a function binding is invoked against the
///   same remaining sequence, any other binding is yielded unchanged.
///
/// # Errors
/// Returns [`RuntimeError::UnexpectedEnd`] when the sequence is empty, or
/// whatever error the dispatched evaluation raises.
pub fn eval_next(ast: &mut Ast, scope: &ScopeRef) -> EvalResult<Value> {
    let token = ast.pop_front().ok_or(RuntimeError::UnexpectedEnd)?;

    match token {
        Value::Number(_) | Value::String(_) | Value::Block(_) => Ok(token),
        Value::Assignment(name) => {
            let value = eval_next(ast, scope)?;
            scope.borrow_mut().add_binding(name, value.clone());
            Ok(value)
        },
        Value::Retrieve(name) => scope.borrow().resolve(&name),
        Value::Function(function) => {
            if matches!(function.as_ref(), Function::Declaration) {
                declare_function(ast, scope)
            } else {
                Ok(Value::Function(function))
            }
        },
        Value::Symbol(name) => {
            let binding = scope.borrow().resolve(&name)?;
            match binding {
                Value::Function(function) => invoke(&function, ast, scope),
                other => Ok(other),
            }
        },
    }
}

/// Evaluates a sequence until it is exhausted and returns the last value,
/// or `None` when the sequence was empty to begin with.
pub fn eval_sequence(ast: &mut Ast, scope: &ScopeRef) -> EvalResult<Option<Value>> {
    let mut result = None;

    while !ast.is_empty() {
        result = Some(eval_next(ast, scope)?);
    }

    Ok(result)
}

/// Evaluates the contents of a block against `scope` and returns the last
/// value, or an empty block for an empty input. Evaluation drains a deep
/// copy, so the block literal stays replayable.
pub fn eval_block(block: &BlockRef, scope: &ScopeRef) -> EvalResult<Value> {
    let mut ast: Ast = block.borrow().iter().map(Value::deep_clone).collect();

    Ok(eval_sequence(&mut ast, scope)?.unwrap_or_else(Value::empty_block))
}

/// Builds a user function from a bare `fun` token: the next two raw tokens
/// must be block literals holding the parameters and the body. The current
/// scope is captured as the function's defining scope.
fn declare_function(ast: &mut Ast, scope: &ScopeRef) -> EvalResult<Value> {
    if !matches!(ast.front(), Some(Value::Block(_))) || !matches!(ast.get(1), Some(Value::Block(_)))
    {
        return Err(RuntimeError::MalformedFunction);
    }

    match (ast.pop_front(), ast.pop_front()) {
        (Some(Value::Block(parameters)), Some(Value::Block(body))) => {
            Ok(Value::Function(Rc::new(Function::User { parameters,
                                                        body,
                                                        scope: Rc::clone(scope) })))
        },
        _ => Err(RuntimeError::MalformedFunction),
    }
}

/// Invokes a function against the remaining caller sequence.
///
/// For user functions: a fresh scope is chained to the function's defining
/// scope (not the caller's), one expression is consumed and bound per
/// parameter, and a copy of the body is evaluated until exhausted. The
/// arguments are evaluated against the new scope, so earlier parameters
/// are visible to the expressions computing later ones. Natives read their
/// arguments directly through the same consuming protocol.
pub fn invoke(function: &Rc<Function>, ast: &mut Ast, scope: &ScopeRef) -> EvalResult<Value> {
    match function.as_ref() {
        Function::Declaration => Err(RuntimeError::MalformedFunction),
        Function::Native(builtin) => builtin.invoke(ast, scope),
        Function::User { parameters, body, scope: defining } => {
            let function_scope = Scope::child(defining);

            let parameter_names = parameter_names(parameters)?;
            for name in parameter_names {
                let argument = eval_next(ast, &function_scope)?;
                function_scope.borrow_mut().add_binding(name, argument);
            }

            eval_block(body, &function_scope)
        },
    }
}

/// Extracts the parameter names from a parameters block, which must
/// contain only symbols.
fn parameter_names(parameters: &BlockRef) -> EvalResult<Vec<String>> {
    parameters.borrow()
              .iter()
              .map(|parameter| match parameter {
                  Value::Symbol(name) => Ok(name.clone()),
                  _ => Err(RuntimeError::MalformedFunction),
              })
              .collect()
}
