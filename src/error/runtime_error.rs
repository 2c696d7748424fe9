#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can be raised during evaluation.
pub enum RuntimeError {
    /// A symbol was resolved that is bound neither in the current scope nor
    /// in any ancestor scope.
    UnboundSymbol {
        /// The name of the symbol.
        name: String,
    },
    /// A `fun` declaration was not immediately followed by a parameters
    /// block and a body block.
    MalformedFunction,
    /// An operator received a non-numeric operand.
    ExpectedNumber {
        /// The name of the operator that rejected the operand.
        operator: String,
    },
    /// An operator received a non-block operand.
    ExpectedBlock {
        /// The name of the operator that rejected the operand.
        operator: String,
    },
    /// An operator that needs at least one element was applied to an empty
    /// block.
    EmptyBlock {
        /// The name of the operator.
        operator: String,
    },
    /// The token sequence ended while an expression was still being read.
    UnexpectedEnd,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnboundSymbol { name } => write!(f, "Symbol '{name}' is unbound."),
            Self::MalformedFunction => {
                write!(f, "A function declaration must be followed by two blocks.")
            },
            Self::ExpectedNumber { operator } => {
                write!(f, "'{operator}' expected a number operand.")
            },
            Self::ExpectedBlock { operator } => {
                write!(f, "'{operator}' expected a block operand.")
            },
            Self::EmptyBlock { operator } => {
                write!(f, "'{operator}' was applied to an empty block.")
            },
            Self::UnexpectedEnd => {
                write!(f, "Unexpected end of input while reading an expression.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
