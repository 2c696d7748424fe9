use std::fs;

use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{error::TokenizeError, Interpreter};

/// Runs the interactive read-loop until `quit` or end of input.
///
/// Each line is appended to a buffer and the whole buffer is evaluated;
/// when tokenization reports an unterminated block the buffer is kept and
/// the prompt switches to `.. ` so the block can be finished on following
/// lines. Any other error is reported and the buffer is discarded — an
/// error never terminates the loop, and bindings committed before a
/// failure stay bound.
///
/// # Errors
/// Returns an error only when the line editor itself fails.
pub fn run(interpreter: &Interpreter) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = DefaultEditor::new()?;
    println!("REBOLito version {}", env!("CARGO_PKG_VERSION"));

    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() { ">> " } else { ".. " };

        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
            Err(error) => return Err(Box::new(error)),
        };
        let _ = editor.add_history_entry(&line);

        if buffer.is_empty() && run_command(interpreter, line.trim()) {
            continue;
        }

        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(&line);

        match interpreter.eval_source(&buffer) {
            Ok(Some(value)) => {
                println!("==> {value}");
                buffer.clear();
            },
            Ok(None) => {
                println!("==> NIL");
                buffer.clear();
            },
            Err(error) => {
                if is_unterminated_block(error.as_ref()) {
                    // Keep the buffer; the block continues on the next line.
                    continue;
                }
                println!("** {error}");
                buffer.clear();
            },
        }
    }
}

/// Handles the REPL introspection commands. Returns `true` when the line
/// was a command and has been handled.
///
/// The commands consume the core only through `eval_source`, `resolve`,
/// `list_names`, and `is_core`.
fn run_command(interpreter: &Interpreter, line: &str) -> bool {
    if line == "help" {
        print_help();
        return true;
    }

    if line == "?vars" {
        print_vars(interpreter);
        return true;
    }

    if let Some(name) = line.strip_prefix("? ") {
        print_symbol_info(interpreter, name.trim());
        return true;
    }

    if let Some(path) = line.strip_prefix("load ") {
        load(interpreter, path.trim());
        return true;
    }

    if let Some(path) = line.strip_prefix("save ") {
        if let Err(error) = save(interpreter, path.trim()) {
            println!("** {error}");
        }
        return true;
    }

    false
}

fn print_help() {
    println!(" REPL COMMANDS");
    println!("{}", "-".repeat(60));
    println!(" ?vars          Lists all symbols in scope");
    println!(" ? <symbol>     Display information about symbol binding");
    println!(" load <path>    Load Rebolito script");
    println!(" save <path>    Save environment to file path");
    println!(" quit           Exit REPL");
    println!("{}", "-".repeat(60));
}

fn print_vars(interpreter: &Interpreter) {
    println!("SYMBOLS IN CURRENT SCOPE:");
    println!();

    let mut names = interpreter.list_names();
    names.sort();

    for row in names.chunks(3) {
        for name in row {
            print!("{:<25}", format!(" {name}"));
        }
        println!();
    }
    println!();
}

fn print_symbol_info(interpreter: &Interpreter, name: &str) {
    match interpreter.resolve(name) {
        Ok(binding) => {
            println!();
            println!(" SYMBOL : {name}");
            println!(" TYPE   : {}", binding.type_name());
            println!(" CORE   : {}", interpreter.is_core(name));
            println!(" VALUE  : {binding}");
            println!();
        },
        Err(error) => println!("** {error}"),
    }
}

fn load(interpreter: &Interpreter, path: &str) {
    let Ok(source) = fs::read_to_string(path) else {
        println!("** '{path}' is not a valid file path");
        return;
    };

    match interpreter.eval_source(&source) {
        Ok(_) => println!("\n{path} loaded!"),
        Err(error) => println!("** {error}"),
    }
}

/// Serializes every user binding as `name: value` source text. The file
/// round-trips through `load` because `Value`'s display form is parseable.
fn save(interpreter: &Interpreter, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let bindings = interpreter.user_bindings();

    if bindings.is_empty() {
        println!(" << NOTHING TO SAVE HERE >> ");
        return Ok(());
    }

    let mut source = format!("\" Rebolito environment, version {} \"\n\n",
                             env!("CARGO_PKG_VERSION"));
    for (name, value) in bindings {
        source.push_str(&format!("{name}: {value}\n\n"));
    }

    fs::write(path, source)?;
    Ok(())
}

fn is_unterminated_block(error: &(dyn std::error::Error + 'static)) -> bool {
    matches!(error.downcast_ref::<TokenizeError>(),
             Some(TokenizeError::UnterminatedBlock { .. }))
}
