/// The token-consuming evaluation protocol.
///
/// This module implements the central `eval_next` operation that removes
/// the leading token from a live sequence and dispatches on its variant,
/// together with the function invocation protocol.
///
/// # Responsibilities
/// - Dispatches every token variant: literals self-evaluate, assignments
///   bind, retrievals quote, symbols resolve and possibly invoke.
/// - Implements invocation: a child scope of the defining scope, one
///   consumed expression per parameter, and evaluation of a fresh copy of
///   the body.
pub mod core;
/// The built-in function registry.
///
/// Declares the `Builtin` tag enum, its name registry, and the native
/// implementations of arithmetic, equality, `if`, and the block operators.
///
/// # Responsibilities
/// - Maps built-in names to native implementations at construction time.
/// - Implements the consuming argument protocol for every native, which is
///   how `if` achieves lazy branch evaluation.
pub mod builtin;
/// The Rebolito-source prelude.
///
/// Installs `true` and `false`, registers the natives, and evaluates the
/// bootstrap source that defines `unless`, `and`, `not`, `inc`, `dec`, and
/// `zero?` as ordinary user functions.
pub mod bootstrap;
