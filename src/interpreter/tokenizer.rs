use std::{cell::RefCell, rc::Rc, sync::OnceLock};

use regex::Regex;

use crate::{
    error::TokenizeError,
    interpreter::value::{Function, Value},
};

/// The tokenizer rules, in priority order. At every position the first
/// rule whose anchored pattern matches wins.
#[derive(Debug, Clone, Copy)]
enum Rule {
    Whitespace,
    String,
    BlockOpen,
    BlockClose,
    Number,
    Assignment,
    Retrieve,
    Identifier,
}

/// Identifier character class: letters, digits, and `% - _ ? < > ! @ # & /
/// = + * . ( )`. The leading character is unrestricted.
const IDENT: &str = r"[A-Za-z0-9%\-_?<>!@#&/=+*.()]+";

fn rules() -> &'static [(Regex, Rule)] {
    static RULES: OnceLock<Vec<(Regex, Rule)>> = OnceLock::new();

    RULES.get_or_init(|| {
             let assignment = format!("^{IDENT}:");
             let retrieve = format!("^:{IDENT}");
             let identifier = format!("^{IDENT}");
             let table: [(&str, Rule); 8] = [(r"^\s+", Rule::Whitespace),
                                             (r#"^"([^"\\]|\\.)*""#, Rule::String),
                                             (r"^\[", Rule::BlockOpen),
                                             (r"^\]", Rule::BlockClose),
                                             (r"^-?\d+(\.\d+)?", Rule::Number),
                                             (&assignment, Rule::Assignment),
                                             (&retrieve, Rule::Retrieve),
                                             (&identifier, Rule::Identifier)];

             table.into_iter()
                  .map(|(pattern, rule)| {
                      let regex = Regex::new(pattern).unwrap_or_else(|e| {
                                      panic!("invalid tokenizer rule {pattern:?}: {e}")
                                  });
                      (regex, rule)
                  })
                  .collect()
         })
}

/// Converts source text into a flat, front-to-back ordered token sequence.
///
/// Bracket nesting is resolved here: `[` opens a block on an explicit
/// stack, `]` closes the innermost open block and appends it as a single
/// token one level up, so blocks nest to arbitrary depth. All other tokens
/// are appended to whichever sequence is current at the moment they are
/// produced.
///
/// # Errors
/// - [`TokenizeError::NoRuleMatch`] if no rule matches at some position.
/// - [`TokenizeError::UnmatchedBlockClose`] for a `]` with no open block.
/// - [`TokenizeError::UnterminatedBlock`] if the source ends with open
///   blocks; the REPL uses this as its line-continuation signal.
///
/// # Example
/// ```
/// use rebolito::interpreter::{tokenizer::tokenize, value::Value};
///
/// let tokens = tokenize("foo: 10").unwrap();
/// assert_eq!(tokens,
///            vec![Value::Assignment("foo".to_string()), Value::Number(10.0)]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Value>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut block_stack: Vec<Vec<Value>> = Vec::new();
    let mut rest = source;
    let mut line = 1;

    'scan: while !rest.is_empty() {
        for (pattern, rule) in rules() {
            let Some(matched) = pattern.find(rest) else {
                continue;
            };
            let text = matched.as_str();

            match rule {
                Rule::Whitespace => {},
                Rule::BlockOpen => block_stack.push(Vec::new()),
                Rule::BlockClose => {
                    let Some(closed) = block_stack.pop() else {
                        return Err(TokenizeError::UnmatchedBlockClose { line });
                    };
                    emit(Value::Block(Rc::new(RefCell::new(closed))),
                         &mut tokens,
                         &mut block_stack);
                },
                Rule::String => {
                    let inner = text[1..text.len() - 1].to_string();
                    emit(Value::String(inner), &mut tokens, &mut block_stack);
                },
                Rule::Number => {
                    let number = text.parse()
                                     .map_err(|_| TokenizeError::NoRuleMatch { remaining:
                                                                                   rest.to_string(),
                                                                               line })?;
                    emit(Value::Number(number), &mut tokens, &mut block_stack);
                },
                Rule::Assignment => {
                    let name = text[..text.len() - 1].to_string();
                    emit(Value::Assignment(name), &mut tokens, &mut block_stack);
                },
                Rule::Retrieve => {
                    let name = text[1..].to_string();
                    emit(Value::Retrieve(name), &mut tokens, &mut block_stack);
                },
                Rule::Identifier => {
                    let token = if text == "fun" {
                        Value::Function(Rc::new(Function::Declaration))
                    } else {
                        Value::Symbol(text.to_string())
                    };
                    emit(token, &mut tokens, &mut block_stack);
                },
            }

            line += text.matches('\n').count();
            rest = &rest[text.len()..];
            continue 'scan;
        }

        return Err(TokenizeError::NoRuleMatch { remaining: rest.to_string(), line });
    }

    if !block_stack.is_empty() {
        return Err(TokenizeError::UnterminatedBlock { depth: block_stack.len() });
    }

    Ok(tokens)
}

/// Appends a token to the innermost open block, or to the top-level
/// sequence when no block is open.
fn emit(token: Value, tokens: &mut Vec<Value>, block_stack: &mut Vec<Vec<Value>>) {
    if let Some(open) = block_stack.last_mut() {
        open.push(token);
    } else {
        tokens.push(token);
    }
}
