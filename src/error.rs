/// Tokenizer errors.
///
/// Defines all error types that can occur while turning source text into a
/// token sequence. Tokenizer errors include unmatched input, stray block
/// closers, and blocks left open at the end of the source.
pub mod tokenize_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include unbound symbols, malformed function declarations, type
/// mismatches, and operations on empty blocks.
pub mod runtime_error;

pub use runtime_error::RuntimeError;
pub use tokenize_error::TokenizeError;
