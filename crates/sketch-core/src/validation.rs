//! Arity and type checks shared by the builtins and the special forms.
//! Error messages name the function, the expected shape and the offending
//! argument's position, e.g. "the function nth expects the 2nd argument `x`
//! to be type int, got type symbol".

use std::sync::Arc;

use crate::ast::{Lambda, Value};
use crate::error::SketchError;
use crate::hash_map::SketchMap;
use crate::list::List;
use crate::value_format::format_value;

pub fn n_args(fn_name: &str, n: usize, args: &[Value]) -> Result<(), SketchError> {
    if args.len() != n {
        return Err(SketchError::arity(format!(
            "the function {} expects {} arguments, but got {}",
            fn_name,
            n,
            args.len()
        )));
    }
    Ok(())
}

pub fn n_int_args(fn_name: &str, n: usize, args: &[Value]) -> Result<Vec<i64>, SketchError> {
    n_args(fn_name, n, args)?;
    args.iter()
        .enumerate()
        .map(|(i, arg)| int_arg(fn_name, arg, i))
        .collect()
}

pub fn int_arg(fn_name: &str, arg: &Value, position: usize) -> Result<i64, SketchError> {
    match arg {
        Value::Int(n) => Ok(*n),
        other => Err(arg_type_error(fn_name, other, "int", position)),
    }
}

pub fn string_arg<'a>(
    fn_name: &str,
    arg: &'a Value,
    position: usize,
) -> Result<&'a str, SketchError> {
    match arg {
        Value::String(s) => Ok(s),
        other => Err(arg_type_error(fn_name, other, "string", position)),
    }
}

pub fn symbol_arg<'a>(
    fn_name: &str,
    arg: &'a Value,
    position: usize,
) -> Result<&'a str, SketchError> {
    match arg {
        Value::Symbol(s) => Ok(s),
        other => Err(arg_type_error(fn_name, other, "symbol", position)),
    }
}

pub fn list_arg<'a>(
    fn_name: &str,
    arg: &'a Value,
    position: usize,
) -> Result<&'a List, SketchError> {
    match arg {
        Value::List(items) => Ok(items),
        other => Err(arg_type_error(fn_name, other, "list", position)),
    }
}

pub fn hash_map_arg<'a>(
    fn_name: &str,
    arg: &'a Value,
    position: usize,
) -> Result<&'a SketchMap, SketchError> {
    match arg {
        Value::HashMap(map) => Ok(map),
        other => Err(arg_type_error(fn_name, other, "hashmap", position)),
    }
}

/// Accepts either function shape; returns the value itself so callers can
/// hand it to `apply_function`.
pub fn function_arg<'a>(
    fn_name: &str,
    arg: &'a Value,
    position: usize,
) -> Result<&'a Value, SketchError> {
    match arg {
        Value::Func(_) | Value::Lambda(_) => Ok(arg),
        other => Err(arg_type_error(fn_name, other, "function", position)),
    }
}

pub fn lambda_arg(fn_name: &str, arg: &Value, position: usize) -> Result<Arc<Lambda>, SketchError> {
    match arg {
        Value::Lambda(lambda) => Ok(lambda.clone()),
        other => Err(arg_type_error(fn_name, other, "function", position)),
    }
}

fn arg_type_error(fn_name: &str, arg: &Value, expected: &str, position: usize) -> SketchError {
    SketchError::type_mismatch_msg(format!(
        "the function {} expects the {} argument `{}` to be type {}, got type {}",
        fn_name,
        to_ordinal(position + 1),
        format_value(arg),
        expected,
        arg.type_name()
    ))
}

/// 1 -> 1st, 2 -> 2nd, 11 -> 11th, and so on.
pub fn to_ordinal(n: usize) -> String {
    let suffix = match n % 100 {
        11 | 12 | 13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals() {
        assert_eq!(to_ordinal(1), "1st");
        assert_eq!(to_ordinal(2), "2nd");
        assert_eq!(to_ordinal(3), "3rd");
        assert_eq!(to_ordinal(4), "4th");
        assert_eq!(to_ordinal(11), "11th");
        assert_eq!(to_ordinal(12), "12th");
        assert_eq!(to_ordinal(21), "21st");
        assert_eq!(to_ordinal(112), "112th");
    }

    #[test]
    fn type_error_names_the_position() {
        let err = int_arg("nth", &Value::symbol("x"), 1).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("2nd"), "got: {}", message);
        assert!(message.contains("nth"), "got: {}", message);
    }
}
