/// Converts raw source text into a token sequence.
///
/// The tokenizer applies an ordered rule table of anchored patterns and
/// resolves bracket nesting with an explicit stack of open blocks, so the
/// produced sequence contains structurally nested `Block` values.
pub mod tokenizer;
/// Defines the `Value` enum, the unit of both literal data and code.
///
/// Rebolito is homoiconic: the token sequence produced by the tokenizer is
/// the program, and every token is a `Value`. This module also defines
/// structural equality, the truthiness rule, and the source round-trip
/// rendering.
pub mod value;
/// Implements the lexical scope chain.
///
/// A scope maps names to values and links to one parent; resolution walks
/// the chain to the root. Function invocations chain to the defining
/// scope, which implements closures.
pub mod scope;
/// The token-consuming evaluation engine and the built-in library.
pub mod evaluator;
