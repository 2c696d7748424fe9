use rebolito::{
    error::{RuntimeError, TokenizeError},
    evaluate,
    interpreter::{
        tokenizer::tokenize,
        value::{Function, Value},
    },
    Interpreter,
};

fn eval_all(source: &str) -> Interpreter {
    let interpreter = Interpreter::new();
    if let Err(e) = interpreter.eval_source(source) {
        panic!("Script failed: {e}");
    }
    interpreter
}

fn resolve(interpreter: &Interpreter, name: &str) -> Value {
    interpreter.resolve(name)
               .unwrap_or_else(|e| panic!("Symbol '{name}' missing: {e}"))
}

fn number(interpreter: &Interpreter, name: &str) -> f64 {
    match resolve(interpreter, name) {
        Value::Number(n) => n,
        other => panic!("Symbol '{name}' is not a number: {other}"),
    }
}

#[test]
fn numbers_tokenize() {
    assert_eq!(tokenize("123").unwrap(), vec![Value::Number(123.0)]);
    assert_eq!(tokenize("1.5").unwrap(), vec![Value::Number(1.5)]);
    assert_eq!(tokenize("-0.20").unwrap(), vec![Value::Number(-0.20)]);
}

#[test]
fn symbols_tokenize_with_all_allowed_characters() {
    let tokens = tokenize("foo-bar_7?<>!@#&/=+.").unwrap();
    assert_eq!(tokens, vec![Value::Symbol("foo-bar_7?<>!@#&/=+.".to_string())]);
}

#[test]
fn strings_tokenize_and_keep_escapes_verbatim() {
    assert_eq!(tokenize("\"foo bar quux\"").unwrap(),
               vec![Value::String("foo bar quux".to_string())]);

    // Escaped quotes are matched but never unescaped.
    assert_eq!(tokenize(r#""foo \"bar\"""#).unwrap(),
               vec![Value::String(r#"foo \"bar\""#.to_string())]);
}

#[test]
fn a_source_chunk_tokenizes_front_to_back() {
    let tokens = tokenize("  \n 1 foo -1\n b.c.d \"quux\" \n").unwrap();

    assert_eq!(tokens,
               vec![Value::Number(1.0),
                    Value::Symbol("foo".to_string()),
                    Value::Number(-1.0),
                    Value::Symbol("b.c.d".to_string()),
                    Value::String("quux".to_string())]);
}

#[test]
fn assignments_tokenize_to_a_wrapped_symbol() {
    let tokens = tokenize("foo: 10").unwrap();
    assert_eq!(tokens, vec![Value::Assignment("foo".to_string()), Value::Number(10.0)]);
}

#[test]
fn retrievals_tokenize_to_a_wrapped_symbol() {
    let tokens = tokenize(":foo").unwrap();
    assert_eq!(tokens, vec![Value::Retrieve("foo".to_string())]);
}

#[test]
fn blocks_tokenize_with_their_contents() {
    let tokens = tokenize("[foo bar 2]").unwrap();

    assert_eq!(tokens,
               vec![Value::block(vec![Value::Symbol("foo".to_string()),
                                      Value::Symbol("bar".to_string()),
                                      Value::Number(2.0)])]);

    assert_eq!(tokenize("[]").unwrap(), vec![Value::empty_block()]);
    assert_eq!(tokenize("[\n  \"This is a test\"\n]").unwrap(),
               vec![Value::block(vec![Value::String("This is a test".to_string())])]);
}

#[test]
fn blocks_nest_to_arbitrary_depth() {
    let tokens = tokenize("[1 [2]]").unwrap();
    let expected = Value::block(vec![Value::Number(1.0),
                                     Value::block(vec![Value::Number(2.0)])]);
    assert_eq!(tokens, vec![expected]);

    let deep = tokenize("[1 [2 [3]]]").unwrap();
    let expected = Value::block(vec![
        Value::Number(1.0),
        Value::block(vec![Value::Number(2.0), Value::block(vec![Value::Number(3.0)])]),
    ]);
    assert_eq!(deep, vec![expected]);
}

#[test]
fn fun_tokenizes_to_a_function_declaration() {
    let tokens = tokenize("fun [] [\n 0 \n]").unwrap();

    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[0],
                     Value::Function(f) if matches!(f.as_ref(), Function::Declaration)));
    assert!(matches!(tokens[1], Value::Block(_)));
    assert!(matches!(tokens[2], Value::Block(_)));
}

#[test]
fn tokenizer_rejects_unknown_characters() {
    assert!(matches!(tokenize("foo; bar"),
                     Err(TokenizeError::NoRuleMatch { line: 1, .. })));
}

#[test]
fn tokenizer_reports_block_mismatches() {
    assert!(matches!(tokenize("]"), Err(TokenizeError::UnmatchedBlockClose { line: 1 })));
    assert!(matches!(tokenize("[1 [2"), Err(TokenizeError::UnterminatedBlock { depth: 2 })));
}

#[test]
fn assignment_binds_in_the_global_scope() {
    let rebolito = eval_all("foo: 10");
    assert_eq!(resolve(&rebolito, "foo"), Value::Number(10.0));
}

#[test]
fn function_definition_carries_both_blocks() {
    let rebolito = eval_all("foo: fun [][bar]");

    match resolve(&rebolito, "foo") {
        Value::Function(f) => assert!(matches!(f.as_ref(), Function::User { .. })),
        other => panic!("Expected a function, found {other}"),
    }
}

#[test]
fn malformed_function_definition_is_an_error() {
    let rebolito = Interpreter::new();
    let error = rebolito.eval_source("f: fun 1 2").unwrap_err();
    assert_eq!(error.to_string(), RuntimeError::MalformedFunction.to_string());
}

#[test]
fn function_invocation_consumes_arguments() {
    let rebolito = eval_all("identity: fun [x][x]\nfoo: identity 4");
    assert_eq!(resolve(&rebolito, "foo"), Value::Number(4.0));
}

#[test]
fn arithmetic_operators() {
    let rebolito = eval_all("x: + 1 2    \"<-- a comment -->\"     y: + 1 -5\n\
                             p: - - - 10 8 3 -2 [ ... doing several (yes a comment) ]\n\
                             z: * 3 5                               w: / 12 3\n\
                             xXx: % 15 3\n\
                             xXy: % 16 3");

    assert_eq!(number(&rebolito, "x"), 3.0);
    assert_eq!(number(&rebolito, "y"), -4.0);
    assert_eq!(number(&rebolito, "p"), 1.0);
    assert_eq!(number(&rebolito, "z"), 15.0);
    assert_eq!(number(&rebolito, "w"), 4.0);
    assert_eq!(number(&rebolito, "xXx"), 0.0);
    assert_eq!(number(&rebolito, "xXy"), 1.0);
}

#[test]
fn arithmetic_on_non_numbers_is_an_error() {
    let rebolito = Interpreter::new();
    assert!(rebolito.eval_source("+ [] 1").is_err());
    assert!(rebolito.eval_source("* \"three\" 2").is_err());
}

#[test]
fn closures_capture_the_defining_scope() {
    let rebolito = eval_all("x: 3\ny: fun [z][* x z]\nq: y 2");
    assert_eq!(number(&rebolito, "q"), 6.0);
}

#[test]
fn parameters_do_not_leak_into_the_global_scope() {
    let rebolito = eval_all("f: fun [hidden][hidden]\nr: f 1");
    assert!(rebolito.resolve("hidden").is_err());
    assert_eq!(number(&rebolito, "r"), 1.0);
}

#[test]
fn function_bodies_are_replayable() {
    let rebolito = eval_all("f: fun [x][+ x 1]\na: f 1\nb: f 2");
    assert_eq!(number(&rebolito, "a"), 2.0);
    assert_eq!(number(&rebolito, "b"), 3.0);
}

#[test]
fn if_selects_by_truthiness() {
    let rebolito = eval_all("x:  if \"foo\" 2 3\n\
                             y:  if [] 1 2\n\
                             xx: if \"foo\" [+ 1 2] [quit]\n\
                             yy: if [quit foo bar] [111] [quit]\n\
                             xxx: if = 1 1 \"true\" \"false\"\n\
                             yyy: if = 1 2 \"true\" \"false\"");

    assert_eq!(number(&rebolito, "x"), 2.0);
    assert_eq!(number(&rebolito, "y"), 2.0);
    // Block branches are evaluated; unselected branches never run.
    assert_eq!(number(&rebolito, "xx"), 3.0);
    // A non-empty block is true as data, without being evaluated.
    assert_eq!(number(&rebolito, "yy"), 111.0);
    assert_eq!(resolve(&rebolito, "xxx"), Value::String("true".to_string()));
    assert_eq!(resolve(&rebolito, "yyy"), Value::String("false".to_string()));
}

#[test]
fn boolean_forms_from_the_prelude() {
    let rebolito = eval_all("t: true\nf: false\n\
                             n: not t\nn2: not f\n\
                             x: if and 1 1 \"true\" \"false\"\n\
                             y: and 1 2\n\
                             x2: if and 1 false \"true\" \"falseX\"\n\
                             y2: and false 2\n\
                             y3: and 2 false");

    assert_eq!(resolve(&rebolito, "n"), Value::empty_block());
    assert_eq!(resolve(&rebolito, "n2"), Value::Symbol("true".to_string()));
    assert_eq!(resolve(&rebolito, "x"), Value::String("true".to_string()));
    assert_eq!(number(&rebolito, "y"), 2.0);
    assert_eq!(resolve(&rebolito, "x2"), Value::String("falseX".to_string()));
    assert_eq!(resolve(&rebolito, "y2"), Value::empty_block());
    assert_eq!(resolve(&rebolito, "y3"), Value::empty_block());
}

#[test]
fn unless_swaps_the_branches() {
    let rebolito = eval_all("x: unless \"foo\"\n   2\n   3");
    assert_eq!(number(&rebolito, "x"), 3.0);
}

#[test]
fn prelude_helpers() {
    let rebolito = eval_all("a: inc 1\nb: dec 5\nc: zero? 0\nd: zero? 3");

    assert_eq!(number(&rebolito, "a"), 2.0);
    assert_eq!(number(&rebolito, "b"), 4.0);
    assert_eq!(resolve(&rebolito, "c"), Value::Symbol("true".to_string()));
    assert_eq!(resolve(&rebolito, "d"), Value::empty_block());
}

#[test]
fn head_and_tail() {
    let rebolito = eval_all("x: [1 2 3 4]\nh: head x\nt: tail x");

    assert_eq!(resolve(&rebolito, "h"), Value::Number(1.0));
    assert_eq!(resolve(&rebolito, "t"),
               Value::block(vec![Value::Number(2.0), Value::Number(3.0), Value::Number(4.0)]));
    // tail does not mutate its target.
    assert_eq!(resolve(&rebolito, "x"),
               Value::block(vec![Value::Number(1.0),
                                 Value::Number(2.0),
                                 Value::Number(3.0),
                                 Value::Number(4.0)]));
}

#[test]
fn head_of_an_empty_block_is_an_error() {
    let rebolito = Interpreter::new();
    assert!(rebolito.eval_source("head []").is_err());
    assert!(rebolito.eval_source("pop []").is_err());
    assert!(rebolito.eval_source("shift []").is_err());
}

#[test]
fn push_pop_shift_and_unshift() {
    let rebolito = eval_all("x: [2]\npush x 3\nunshift x 1\nunshift x 0\ny: shift x\n\
                             z: []\npush z pop x");

    assert_eq!(resolve(&rebolito, "x"),
               Value::block(vec![Value::Number(1.0), Value::Number(2.0)]));
    assert_eq!(resolve(&rebolito, "y"), Value::Number(0.0));
    assert_eq!(resolve(&rebolito, "z"), Value::block(vec![Value::Number(3.0)]));
}

#[test]
fn block_mutation_is_visible_through_every_binding() {
    let rebolito = eval_all("x: [1]\ny: x\npush x 2");
    assert_eq!(resolve(&rebolito, "y"),
               Value::block(vec![Value::Number(1.0), Value::Number(2.0)]));
}

#[test]
fn retrieve_passes_functions_as_data() {
    let rebolito = eval_all("x: fun [][ \"foo\" ]\ny: :x\nz: y\n\
                             x2: fun [][ :x ]\ny2: x2\nz2: y2");

    assert!(matches!(resolve(&rebolito, "y"), Value::Function(_)));
    assert_eq!(resolve(&rebolito, "z"), Value::String("foo".to_string()));
    assert!(matches!(resolve(&rebolito, "y2"), Value::Function(_)));
    assert_eq!(resolve(&rebolito, "z2"), Value::String("foo".to_string()));
}

#[test]
fn resolving_a_literal_binding_is_idempotent() {
    let rebolito = eval_all("x: 42");

    let first = rebolito.eval_source("x").unwrap().unwrap();
    let second = rebolito.eval_source("x").unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(resolve(&rebolito, "x"), Value::Number(42.0));
}

#[test]
fn unbound_symbols_are_an_error() {
    let rebolito = Interpreter::new();
    let error = rebolito.eval_source("nope").unwrap_err();
    assert_eq!(error.to_string(),
               RuntimeError::UnboundSymbol { name: "nope".to_string() }.to_string());
}

#[test]
fn errors_keep_previously_committed_bindings() {
    let rebolito = Interpreter::new();
    assert!(rebolito.eval_source("a: 1\nb: + a nope").is_err());

    // 'a' was committed before the failure and stays bound.
    assert_eq!(rebolito.resolve("a").unwrap(), Value::Number(1.0));
    assert!(rebolito.resolve("b").is_err());
}

#[test]
fn assignments_yield_their_value_mid_expression() {
    let rebolito = eval_all("x: + y: 2 3");
    assert_eq!(number(&rebolito, "x"), 5.0);
    assert_eq!(number(&rebolito, "y"), 2.0);
}

#[test]
fn empty_source_produces_nothing() {
    assert!(evaluate("").unwrap().is_none());
    assert!(evaluate("   \n  ").unwrap().is_none());
}

#[test]
fn core_bindings_are_flagged() {
    let rebolito = eval_all("mine: 1");

    assert!(rebolito.is_core("if"));
    assert!(rebolito.is_core("unless"));
    assert!(!rebolito.is_core("mine"));
    assert_eq!(rebolito.user_bindings(),
               vec![("mine".to_string(), Value::Number(1.0))]);
}

#[test]
fn values_render_back_to_source() {
    let rebolito = eval_all("x: [1 [2] \"s\" foo]\nf: fun [a][+ a 1]");

    assert_eq!(resolve(&rebolito, "x").to_string(), "[1 [2] \"s\" foo]");
    assert_eq!(resolve(&rebolito, "f").to_string(), "fun [a] [+ a 1]");
    assert_eq!(resolve(&rebolito, "if").to_string(), "[built-in function]");
}

#[test]
fn saved_environments_round_trip() {
    let rebolito = eval_all("double: fun [x][* x 2]\nn: double 21");

    // Re-evaluate the serialized form of every user binding.
    let mut source = String::new();
    for (name, value) in rebolito.user_bindings() {
        source.push_str(&format!("{name}: {value}\n"));
    }

    let restored = eval_all(&source);
    assert_eq!(number(&restored, "n"), 42.0);
    let result = restored.eval_source("double 3").unwrap().unwrap();
    assert_eq!(result, Value::Number(6.0));
}

#[test]
fn recursion_through_the_prelude() {
    let rebolito = eval_all("counter: [1 2 3]\n\
                             drain: fun [][\n\
                               if counter [\n\
                                 shift counter\n\
                                 drain\n\
                               ] \"done\"\n\
                             ]\n\
                             r: drain");

    assert_eq!(resolve(&rebolito, "r"), Value::String("done".to_string()));
    assert_eq!(resolve(&rebolito, "counter"), Value::empty_block());
}
