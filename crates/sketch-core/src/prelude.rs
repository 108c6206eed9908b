//! The part of the standard library written in Sketch itself, evaluated
//! into every root environment after the native builtins are installed.

use crate::env::EnvRef;
use crate::error::SketchError;
use crate::eval::eval;
use crate::reader::read;

const PRELUDE: &str = r#"
(defmacro defn (fn (name & args)
  (quasiquote (def (unquote name) (fn (splice-unquote args))))))

(defmacro cond (fn (& clauses)
  (if (empty? clauses)
    nil
    (quasiquote (if (unquote (first (first clauses)))
      (unquote (first (rest (first clauses))))
      (cond (splice-unquote (rest clauses))))))))

(defn not
  "Inverts truthiness.

  Examples:
  > (not true)
  -> false
  > (not nil)
  -> true"
  (x)
  (if x false true))

(defn second (elements) (first (rest elements)))

(defn inc (n) (+ n 1))

(defn dec (n) (- n 1))

(defn reduce
  "Folds a list with its first element as the initial accumulator.

  Examples:
  > (reduce + (list 1 2 3 4))
  -> 10"
  (f elements)
  (fold-left f (first elements) (rest elements)))
"#;

pub fn install(env: &EnvRef) -> Result<(), SketchError> {
    let ast = read(&format!("(do {})", PRELUDE))?;
    eval(ast, env.clone())?;
    Ok(())
}
