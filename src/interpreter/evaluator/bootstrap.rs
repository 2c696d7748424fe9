use crate::interpreter::{
    evaluator::{
        builtin::Builtin,
        core::{eval_sequence, Ast},
    },
    scope::ScopeRef,
    tokenizer::tokenize,
    value::Value,
};

/// The part of the core library written in Rebolito itself.
///
/// `unless`, `and`, and `not` are ordinary user functions built on the
/// native `if`: control-flow forms and user code share one mechanism.
/// Laziness falls out of blocks being self-evaluating data.
const PRELUDE: &str = r"
unless: fun [cond then else][
  if cond else then
]
and: fun [a b][
  if a [
    temp: b
    if temp temp false
  ] [[]]
]
not: fun [x][
  if x [false] [true]
]
inc: fun [x][+ x 1]
dec: fun [x][- x 1]
zero?: fun [x][if = 0 x true [[]]]
";

/// Populates the root scope: the `true` and `false` values, every native
/// built-in, and the Rebolito-source prelude.
///
/// # Panics
/// Panics if the prelude fails to tokenize or evaluate, which is a bug in
/// this crate rather than a user error.
pub fn install(global: &ScopeRef) {
    global.borrow_mut().add_binding("true", Value::truth());
    global.borrow_mut().add_binding("false", Value::empty_block());
    Builtin::register(global);

    let tokens =
        tokenize(PRELUDE).unwrap_or_else(|error| panic!("prelude failed to tokenize: {error}"));
    let mut ast: Ast = tokens.into();
    eval_sequence(&mut ast, global).unwrap_or_else(|error| {
                                       panic!("prelude failed to evaluate: {error}")
                                   });
}
