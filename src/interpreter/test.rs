use super::{Interpreter, RuntimeError, Value};
use crate::parser::{parse, tokenize_string, Program};

fn program(input: &str) -> Program {
    let tokens = tokenize_string(input).expect("input should tokenize");
    parse(&tokens).expect("input should parse")
}

/// Runs `input` and returns the result together with everything it printed.
fn run(input: &str) -> (Result<Value, RuntimeError>, String) {
    let mut interpreter = Interpreter::new(Vec::new());
    let result = interpreter.run(&program(input));
    let output = String::from_utf8(interpreter.into_output()).expect("output is utf-8");
    (result, output)
}

fn assert_returns(input: &str, expected: Value) {
    let (result, _) = run(input);
    match result {
        Ok(value) => assert_eq!(value, expected, "while running \"{input}\""),
        Err(err) => panic!("\"{input}\" failed: {err}"),
    }
}

fn assert_prints(input: &str, expected: &str) {
    let (result, output) = run(input);
    assert!(result.is_ok(), "\"{input}\" failed: {result:?}");
    assert_eq!(output, expected, "while running \"{input}\"");
}

#[test]
fn test_return_values() {
    assert_returns("return 42;", Value::Integer(42));
    assert_returns("return 'text';", "text".into());
    assert_returns("return true;", true.into());
    assert_returns("return;", Value::Integer(0));
    assert_returns("print 1;", Value::Integer(0));
    assert_returns("", Value::Integer(0));
}

#[test]
fn test_let_binding() {
    assert_returns("let x = 7; return x;", Value::Integer(7));
    assert_returns("let x = 2; let y = x * 3; return y - x;", Value::Integer(4));
}

#[test]
fn test_first_return_wins() {
    let (result, output) = run("print 1; return 2; print 3; return 4;");
    assert_eq!(result.unwrap(), Value::Integer(2));
    assert_eq!(output, "1\n");
    // statements after the return are never evaluated
    assert_returns("return 1; return y;", Value::Integer(1));
    assert_returns("return 1; let x = 1 / 0;", Value::Integer(1));
}

#[test]
fn test_right_associative_evaluation() {
    assert_returns("return 1 + 2 * 3;", Value::Integer(7));
    assert_returns("return 2 * 3 + 1;", Value::Integer(8));
    assert_returns("return 8 - 4 - 2;", Value::Integer(6));
    assert_returns("return 100 / 10 / 5;", Value::Integer(50));
}

#[test]
fn test_integer_division_truncates() {
    assert_returns("return 7 / 2;", Value::Integer(3));
    assert_returns("return 0 - 7 / 2;", Value::Integer(-3));
}

#[test]
fn test_string_concatenation() {
    assert_prints("print \"x\" + 1;", "x1\n");
    assert_prints("print 1 + \"x\";", "1x\n");
    assert_prints("print 'is ' + true;", "is true\n");
    assert_prints("print false + 'y';", "falsey\n");
    assert_prints("print 'a' + 1 + 2;", "a3\n");
    assert_prints("print 1 + 2 + 'a';", "12a\n");
}

#[test]
fn test_print_display_forms() {
    assert_prints("print true;", "true\n");
    assert_prints("print false and true;", "false\n");
    assert_prints("print true or false;", "true\n");
    assert_prints("print 0 - 5;", "-5\n");
    assert_prints("print;", "\n");
    assert_prints("let s = \"verbatim \\n\"; print s;", "verbatim \\n\n");
}

#[test]
fn test_redefinition_fails() {
    let (result, _) = run("let x = 1; let x = 2; return x;");
    assert!(matches!(result, Err(RuntimeError::AlreadyDefined { ref name, .. }) if name == "x"));
}

#[test]
fn test_undefined_variable_fails() {
    let (result, _) = run("return y;");
    assert!(matches!(result, Err(RuntimeError::NotDefined { ref name, .. }) if name == "y"));
}

#[test]
fn test_division_by_zero() {
    let (result, output) = run("print 'before'; return 1 / 0;");
    assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })));
    assert_eq!(output, "before\n");
}

#[test]
fn test_type_mismatches() {
    for input in [
        "return 1 - 'a';",
        "return 'a' * 2;",
        "return true / 1;",
        "return true + 1;",
        "return 1 and true;",
        "return true or 'yes';",
    ] {
        let (result, _) = run(input);
        assert!(
            matches!(result, Err(RuntimeError::TypeMismatch { .. })),
            "\"{input}\" should be a type mismatch, got {result:?}"
        );
    }
}

#[test]
fn test_logical_operators_do_not_short_circuit() {
    let (result, _) = run("return false and y;");
    assert!(matches!(result, Err(RuntimeError::NotDefined { .. })));
    let (result, _) = run("return true or 1;");
    assert!(matches!(result, Err(RuntimeError::TypeMismatch { .. })));
}

#[test]
fn test_integer_overflow_is_reported() {
    let (result, _) = run("return 9223372036854775807 + 1;");
    assert!(matches!(result, Err(RuntimeError::Overflow { .. })));
    let (result, _) = run("return 4611686018427387904 * 2;");
    assert!(matches!(result, Err(RuntimeError::Overflow { .. })));
    assert_returns(
        "return 4611686018427387903 * 2;",
        Value::Integer(9223372036854775806),
    );
}

#[test]
fn test_error_messages() {
    let (result, _) = run("let x = 1;\nlet x = 2;");
    assert_eq!(
        result.unwrap_err().to_string(),
        "variable already defined: x at line 2, column 5"
    );
    let (result, _) = run("return 1 - 'a';");
    assert_eq!(
        result.unwrap_err().to_string(),
        "type mismatch: cannot apply `-` to integer and string at line 1, column 10"
    );
    let (result, _) = run("return 4 / 0;");
    assert_eq!(
        result.unwrap_err().to_string(),
        "division by zero at line 1, column 10"
    );
}

#[test]
fn test_environment_persists_across_executions() {
    let mut interpreter = Interpreter::new(Vec::new());
    assert_eq!(interpreter.execute(&program("let x = 1;")).unwrap(), None);
    assert_eq!(
        interpreter.execute(&program("return x + 1;")).unwrap(),
        Some(Value::Integer(2))
    );
    assert!(matches!(
        interpreter.execute(&program("let x = 5;")),
        Err(RuntimeError::AlreadyDefined { .. })
    ));
    assert_eq!(interpreter.environment().len(), 1);
    assert_eq!(interpreter.environment().lookup("x"), Some(&Value::Integer(1)));
}

#[test]
fn test_long_operator_chains() {
    let source = format!("return {}1;", "1 + ".repeat(10_000));
    assert_returns(&source, Value::Integer(10_001));

    let source = format!("print {}false;", "true and ".repeat(10_000));
    assert_prints(&source, "false\n");

    // 2 - (2 - (... - 2)) alternates between 2 and 0 from the inside out
    let source = format!("return {}2;", "2 - ".repeat(10_000));
    assert_returns(&source, Value::Integer(2));

    let source = format!("return {}1 / 0;", "1 + ".repeat(10_000));
    let (result, _) = run(&source);
    assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })));
}
