use std::fs;

use clap::Parser;
use rebolito::{repl, Interpreter};

/// rebolito is a minimal, homoiconic, prefix-notation scripting language
/// in the Rebol family.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate the given source text instead of reading a script.
    #[arg(short = 'e', long = "eval", value_name = "SOURCE")]
    expression: Option<String>,

    /// Path to a Rebolito script to run. Starts the REPL when omitted.
    script: Option<String>,
}

fn main() {
    let args = Args::parse();
    let interpreter = Interpreter::new();

    let source = match (args.expression, args.script) {
        (Some(expression), _) => Some(expression),
        (None, Some(path)) => Some(fs::read_to_string(&path).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{path}'. Perhaps this file does not exist?");
            std::process::exit(1);
        })),
        (None, None) => None,
    };

    if let Some(source) = source {
        match interpreter.eval_source(&source) {
            Ok(Some(value)) => println!("==> {value}"),
            Ok(None) => println!("==> NIL"),
            Err(error) => {
                eprintln!("{error}");
                std::process::exit(1);
            },
        }
    } else if let Err(error) = repl::run(&interpreter) {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
