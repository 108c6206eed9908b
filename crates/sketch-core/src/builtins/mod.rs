//! Sketch's builtin functions: host-implemented callables bound into every
//! root environment. The table here is an extension point; new builtins
//! register through `def_builtin!`.

use crate::env::{new_ref, Env, EnvRef};
use crate::error::SketchError;

mod collections;
mod core;
mod hash_map;
mod math;

/// Defines a native function in an environment. The closure receives the
/// already-evaluated arguments; arity is checked before it runs.
#[macro_export]
macro_rules! def_builtin {
    ($env:expr, $name:expr, $arity:expr, |$args:ident| $body:block) => {
        $env.define_builtin(
            $name,
            $crate::ast::Value::builtin(
                $name,
                $arity,
                move |$args: &[$crate::ast::Value]| -> Result<$crate::ast::Value, $crate::error::SketchError> {
                    $body
                },
            ),
        );
    };
    ($env:expr, $name:expr, $arity:expr, |$args:ident| $body:expr) => {
        $env.define_builtin(
            $name,
            $crate::ast::Value::builtin(
                $name,
                $arity,
                move |$args: &[$crate::ast::Value]| -> Result<$crate::ast::Value, $crate::error::SketchError> {
                    $body
                },
            ),
        );
    };
}

pub use def_builtin;

pub fn err<T>(msg: impl Into<String>) -> Result<T, SketchError> {
    Err(SketchError::runtime(msg))
}

/// A fresh root environment: all builtins plus the bundled prelude. Every
/// evaluation context (the REPL, `run`, each imported module) starts from
/// one of these.
pub fn root_env() -> Result<EnvRef, SketchError> {
    let mut env = Env::default();
    core::install(&mut env);
    math::install(&mut env);
    collections::install(&mut env);
    hash_map::install(&mut env);
    let env = new_ref(env);
    crate::prelude::install(&env)?;
    Ok(env)
}
