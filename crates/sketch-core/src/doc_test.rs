//! Docstring tests: a function's tests live in its docstring, below a line
//! reading `Examples:`. Lines starting with `>` are evaluated and their
//! printed result is compared to the following line starting with `->`.
//!
//! ```text
//! (defn plus
//!   "Adds two numbers.
//!
//!   Examples:
//!   > (plus 1 1)
//!   -> 2"
//!   (a b)
//!   (+ a b))
//! ```

use std::fs;
use std::path::Path;

use crate::ast::Value;
use crate::builtins::root_env;
use crate::env::{child_ref, EnvRef};
use crate::error::SketchError;
use crate::eval::eval;
use crate::reader::read;
use crate::value_format::format_value;

/// Evaluates a file and runs the docstring tests of every function it
/// defined. Testing a file requires evaluating it, so side effects happen.
pub fn test_file(path: &Path) -> Result<(), SketchError> {
    let source = fs::read_to_string(path)?;

    let env = root_env()?;
    // Evaluate in a child env so only the file's own bindings are scanned.
    let child = child_ref(env);
    if !source.trim().is_empty() {
        let ast = read(&format!("(do {})", source))?;
        eval(ast, child.clone())?;
    }

    let mut bindings = child.read().unwrap().local_bindings();
    bindings.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (name, value) in bindings {
        let Value::Lambda(lambda) = &value else {
            continue;
        };
        let Some(doc) = &lambda.doc else {
            continue;
        };
        run_docstring_examples(&name, doc, &child)?;
    }
    Ok(())
}

fn run_docstring_examples(name: &str, doc: &str, env: &EnvRef) -> Result<(), SketchError> {
    let mut in_examples = false;
    let mut input = String::new();
    for line in doc.lines() {
        let line = line.trim();
        if line == "Examples:" {
            println!("Running docstring tests for {}", name);
            in_examples = true;
            continue;
        }
        if !in_examples {
            continue;
        }

        if let Some(rest) = line.strip_prefix('>') {
            input = rest.trim().to_string();
            continue;
        }

        let Some(expected) = line.strip_prefix("->") else {
            continue;
        };
        let expected = expected.trim();

        let ast = read(&input)?;
        let actual = eval(ast, env.clone())?;
        let actual = format_value(&actual);
        if actual != expected {
            return Err(SketchError::runtime(format!(
                "error running '{}' test: expected {} to eval to {}, got {}",
                name, input, expected, actual
            )));
        }
        input.clear();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_examples() {
        let doc = "Adds one.\n\n  Examples:\n  > (+ 1 1)\n  -> 2\n  > (+ 2 2)\n  -> 4";
        let env = root_env().unwrap();
        run_docstring_examples("add1", doc, &env).unwrap();
    }

    #[test]
    fn failing_example_reports_expected_and_actual() {
        let doc = "Examples:\n> (+ 1 1)\n-> 3";
        let env = root_env().unwrap();
        let err = run_docstring_examples("add1", doc, &env).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expected (+ 1 1) to eval to 3, got 2"), "got: {}", message);
    }

    #[test]
    fn lines_outside_examples_section_are_ignored() {
        let doc = "> (this is prose, not a test)\n-> gibberish";
        let env = root_env().unwrap();
        run_docstring_examples("f", doc, &env).unwrap();
    }
}
