#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during tokenization.
pub enum TokenizeError {
    /// No tokenizer rule matched at the current position.
    NoRuleMatch {
        /// The unconsumed remainder of the source, starting at the position
        /// where matching failed.
        remaining: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Encountered a `]` while no block was open.
    UnmatchedBlockClose {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The source ended while one or more blocks were still open.
    ///
    /// The REPL treats this error as its line-continuation signal and keeps
    /// reading input instead of reporting it.
    UnterminatedBlock {
        /// How many blocks were still open when the source ended.
        depth: usize,
    },
}

impl std::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRuleMatch { remaining, line } => {
                let snippet = remaining.lines().next().unwrap_or("");
                write!(f, "Tokenizer error on line {line}: no rule matches '{snippet}'.")
            },
            Self::UnmatchedBlockClose { line } => {
                write!(f, "Tokenizer error on line {line}: ']' without a matching '['.")
            },
            Self::UnterminatedBlock { depth } => {
                write!(f, "Tokenizer error: source ended with {depth} unclosed block(s).")
            },
        }
    }
}

impl std::error::Error for TokenizeError {}
