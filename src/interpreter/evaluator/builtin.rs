use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{eval_block, eval_next, Ast, EvalResult},
        scope::ScopeRef,
        value::{Function, Value},
    },
};

/// Identifies a built-in function.
///
/// Built-ins are plain data: a `Function::Native` carries one of these
/// tags, and [`Builtin::invoke`] dispatches on it. They follow the same
/// call protocol as user functions, reading their arguments by consuming
/// expressions from the caller's remaining token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `+` — adds two numbers.
    Add,
    /// `-` — subtracts two numbers.
    Subtract,
    /// `*` — multiplies two numbers.
    Multiply,
    /// `/` — divides two numbers.
    Divide,
    /// `%` — remainder of two numbers.
    Remainder,
    /// `=` — structural equality; yields `true` or `false`.
    Equal,
    /// `if` — selects a branch by truthiness; evaluates it only when it is
    /// a block.
    If,
    /// `head` — first element of a block.
    Head,
    /// `tail` — a new block of all but the first element.
    Tail,
    /// `push` — appends an element in place, yields the block.
    Push,
    /// `pop` — removes the last element in place and yields it.
    Pop,
    /// `shift` — removes the first element in place and yields it.
    Shift,
    /// `unshift` — prepends an element in place, yields the block.
    Unshift,
    /// `println` — prints one evaluated value.
    Println,
    /// `quit` — terminates the process.
    Quit,
}

/// The registry mapping built-in names to their native implementations.
/// Walked once at construction time to populate the root scope.
const REGISTRY: &[(&str, Builtin)] = &[("+", Builtin::Add),
                                       ("-", Builtin::Subtract),
                                       ("*", Builtin::Multiply),
                                       ("/", Builtin::Divide),
                                       ("%", Builtin::Remainder),
                                       ("=", Builtin::Equal),
                                       ("if", Builtin::If),
                                       ("head", Builtin::Head),
                                       ("tail", Builtin::Tail),
                                       ("push", Builtin::Push),
                                       ("pop", Builtin::Pop),
                                       ("shift", Builtin::Shift),
                                       ("unshift", Builtin::Unshift),
                                       ("println", Builtin::Println),
                                       ("quit", Builtin::Quit)];

impl Builtin {
    /// Binds every registered built-in into `scope`.
    pub fn register(scope: &ScopeRef) {
        for (name, builtin) in REGISTRY {
            scope.borrow_mut()
                 .add_binding(*name, Value::Function(Rc::new(Function::Native(*builtin))));
        }
    }

    /// Returns the name the built-in is registered under, for error
    /// messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::Equal => "=",
            Self::If => "if",
            Self::Head => "head",
            Self::Tail => "tail",
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Shift => "shift",
            Self::Unshift => "unshift",
            Self::Println => "println",
            Self::Quit => "quit",
        }
    }

    /// Runs the built-in, consuming its arguments from the caller's
    /// remaining token sequence.
    ///
    /// # Errors
    /// Type and arity failures surface as [`RuntimeError`]; argument
    /// expressions propagate their own errors.
    pub fn invoke(self, ast: &mut Ast, scope: &ScopeRef) -> EvalResult<Value> {
        match self {
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Remainder => {
                self.arithmetic(ast, scope)
            },
            Self::Equal => {
                let left = eval_next(ast, scope)?;
                let right = eval_next(ast, scope)?;

                if left == right {
                    Ok(Value::truth())
                } else {
                    Ok(Value::empty_block())
                }
            },
            Self::If => {
                let condition = eval_next(ast, scope)?;
                let then_branch = eval_next(ast, scope)?;
                let else_branch = eval_next(ast, scope)?;

                let chosen = if condition.is_truthy() { then_branch } else { else_branch };
                match chosen {
                    Value::Block(block) => eval_block(&block, scope),
                    other => Ok(other),
                }
            },
            Self::Head => {
                let block = eval_next(ast, scope)?.as_block(self.name())?;
                let first = block.borrow().first().cloned();

                first.ok_or_else(|| RuntimeError::EmptyBlock { operator: self.name().to_string() })
            },
            Self::Tail => {
                let block = eval_next(ast, scope)?.as_block(self.name())?;
                let rest: Vec<Value> = block.borrow().iter().skip(1).cloned().collect();

                Ok(Value::block(rest))
            },
            Self::Push | Self::Unshift => {
                let target = eval_next(ast, scope)?;
                let block = target.as_block(self.name())?;
                let element = eval_next(ast, scope)?;

                if self == Self::Push {
                    block.borrow_mut().push(element);
                } else {
                    block.borrow_mut().insert(0, element);
                }

                Ok(target)
            },
            Self::Pop | Self::Shift => {
                let block = eval_next(ast, scope)?.as_block(self.name())?;
                let mut elements = block.borrow_mut();

                if elements.is_empty() {
                    return Err(RuntimeError::EmptyBlock { operator: self.name().to_string() });
                }

                if self == Self::Pop {
                    Ok(elements.pop().unwrap_or_else(Value::empty_block))
                } else {
                    Ok(elements.remove(0))
                }
            },
            Self::Println => {
                let value = eval_next(ast, scope)?;
                println!("{}", value.display_bare());

                Ok(Value::empty_block())
            },
            Self::Quit => {
                println!("bye bye!");
                std::process::exit(0)
            },
        }
    }

    /// Reads two evaluated number operands and applies the arithmetic
    /// operator. Operands may be arbitrarily complex sub-expressions; each
    /// read consumes as many tokens as the expression needs.
    fn arithmetic(self, ast: &mut Ast, scope: &ScopeRef) -> EvalResult<Value> {
        let left = eval_next(ast, scope)?.as_number(self.name())?;
        let right = eval_next(ast, scope)?.as_number(self.name())?;

        let result = match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
            Self::Remainder => left % right,
            _ => unreachable!(),
        };

        Ok(Value::Number(result))
    }
}
