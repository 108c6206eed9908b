//! The Sketch language runtime: tokenizer, reader, trampoline evaluator,
//! macros, modules and the bundled standard library.
//!
//! Source text flows tokenizer → reader → AST `Value` → `eval` → result
//! `Value` → printer. The CLI crate drives the entry points below.

pub mod ast;
pub mod builtins;
pub mod doc_test;
pub mod env;
pub mod error;
pub mod eval;
pub mod hash_map;
pub mod list;
pub mod macros;
pub mod modules;
pub mod prelude;
pub mod pretty_print;
pub mod reader;
pub mod repl;
pub mod stdlib;
pub mod tokenizer;
pub mod validation;
pub mod value_format;

use std::fs;
use std::path::Path;

pub use ast::Value;
use builtins::root_env;
use env::EnvRef;
pub use error::SketchError;

/// Evaluates a source string in a fresh root environment. Multiple
/// top-level forms are allowed; the last one's value is returned.
pub fn eval_source(source: &str) -> Result<Value, SketchError> {
    let env = root_env()?;
    let ast = reader::read(&format!("(do {})", source))?;
    eval::eval(ast, env)
}

/// Evaluates a file's top-level expressions in order, as if wrapped in
/// `do`.
pub fn run_file(path: &Path) -> Result<(), SketchError> {
    let source = fs::read_to_string(path)?;
    if source.trim().is_empty() {
        return Ok(());
    }
    let env = root_env()?;
    let ast = reader::read(&format!("(do {})", source))?;
    eval::eval(ast, env)?;
    Ok(())
}

/// One read-eval-print step. Returns `None` for comment-only input, so the
/// REPL prints nothing for it.
pub fn rep(line: &str, env: &EnvRef) -> Result<Option<String>, SketchError> {
    let ast = match reader::read(line) {
        Err(SketchError::ReadComment) => return Ok(None),
        other => other?,
    };
    let value = eval::eval(ast, env.clone())?;
    Ok(Some(value_format::format_value(&value)))
}
