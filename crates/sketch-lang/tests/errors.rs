mod common;

use common::expect_error;
use sketch_core::error::format_error;

#[test]
fn test_unbound_symbol_errors_name_the_symbol() {
    let err = expect_error("missing");
    assert!(err.to_string().contains("`missing` is undefined"));
}

#[test]
fn test_arity_errors_name_the_function() {
    let err = expect_error("(nth (list 1 2))");
    let message = err.to_string();
    assert!(message.contains("nth"), "got: {}", message);
}

#[test]
fn test_division_by_zero_is_an_error() {
    expect_error("(/ 1 0)");
    expect_error("(modulo 1 0)");
}

#[test]
fn test_equality_on_functions_is_a_type_error() {
    let err = expect_error("(= (fn (x) x) (fn (y) y))");
    assert!(err.to_string().contains("not defined"), "got: {}", err);
}

#[test]
fn test_equality_across_types_is_false() {
    common::run_tests(&[common::TestCase {
        name: "int and string are unequal, not an error",
        input: "(= 1 \"1\")",
        expected: "false",
    }]);
}

// The chain of function-frame environments at the point of failure becomes
// the printed call stack, deepest frame first.
#[test]
fn test_errors_carry_the_enclosing_function_frames() {
    let err = expect_error(
        "(do (def outer (fn (x) (let ((inner (fn (y) (boom y)))) (inner x)))) (outer 1))",
    );
    let names: Vec<&str> = err.stack().iter().map(|f| f.function.as_str()).collect();
    assert_eq!(names, vec!["inner", "outer"]);
}

#[test]
fn test_format_error_prints_the_call_stack_deepest_last() {
    let err = expect_error(
        "(do (def outer (fn (x) (let ((inner (fn (y) (boom y)))) (inner x)))) (outer 1))",
    );
    let lines = format_error(&err);
    assert!(lines.iter().any(|line| line == "Call stack:"));
    let outer_pos = lines.iter().position(|l| l.contains("outer")).unwrap();
    let inner_pos = lines.iter().position(|l| l.contains("inner")).unwrap();
    assert!(outer_pos < inner_pos, "deepest frame should print last");
}
