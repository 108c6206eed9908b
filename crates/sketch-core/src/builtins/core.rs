use crate::ast::{values_equal, Arity, Value};
use crate::def_builtin;
use crate::env::Env;
use crate::error::SketchError;
use crate::eval::apply_function;
use crate::list::List;
use crate::validation::{function_arg, int_arg, list_arg, n_args, string_arg};
use crate::value_format::format_value;

pub(crate) fn install(env: &mut Env) {
    def_builtin!(env, "prn", Arity::AtLeast(0), |args| {
        let parts: Vec<String> = args.iter().map(format_value).collect();
        println!("{}", parts.join(" "));
        Ok(Value::Nil)
    });

    def_builtin!(env, "list", Arity::AtLeast(0), |args| {
        Ok(Value::list(args.to_vec()))
    });

    def_builtin!(env, "list?", Arity::Exactly(1), |args| {
        Ok(Value::Bool(matches!(args[0], Value::List(_))))
    });

    def_builtin!(env, "empty?", Arity::Exactly(1), |args| {
        let items = list_arg("empty?", &args[0], 0)?;
        Ok(Value::Bool(items.is_empty()))
    });

    def_builtin!(env, "count", Arity::Exactly(1), |args| {
        // Counting an int yields 0 rather than an error; the bundled queue
        // code relies on count being total on its inputs.
        if let Value::Int(_) = args[0] {
            return Ok(Value::Int(0));
        }
        let items = list_arg("count", &args[0], 0)?;
        Ok(Value::Int(items.len() as i64))
    });

    def_builtin!(env, "length", Arity::Exactly(1), |args| {
        match &args[0] {
            Value::List(items) => Ok(Value::Int(items.len() as i64)),
            Value::String(s) => Ok(Value::Int(s.chars().count() as i64)),
            other => err_type("length", "list and string", other),
        }
    });

    def_builtin!(env, "nth", Arity::Exactly(2), |args| {
        let items = list_arg("nth", &args[0], 0)?;
        let index = int_arg("nth", &args[1], 1)?;
        if index < 0 || index as usize >= items.len() {
            return Err(SketchError::runtime(format!(
                "nth: index out of range - {}, with length {}, {}",
                index,
                items.len(),
                format_value(&args[0])
            )));
        }
        Ok(items.get(index as usize).cloned().expect("bounds checked"))
    });

    def_builtin!(env, "first", Arity::Exactly(1), |args| {
        match &args[0] {
            Value::Nil => Ok(Value::Nil),
            Value::List(items) => Ok(items.first()),
            Value::String(s) => Ok(match s.chars().next() {
                Some(ch) => Value::String(ch.to_string()),
                None => Value::Nil,
            }),
            other => err_type("first", "list", other),
        }
    });

    def_builtin!(env, "rest", Arity::Exactly(1), |args| {
        match &args[0] {
            Value::Nil => Ok(Value::empty_list()),
            Value::List(items) => Ok(Value::List(items.rest())),
            Value::String(s) => {
                let mut chars = s.chars();
                match chars.next() {
                    Some(_) if !chars.as_str().is_empty() => {
                        Ok(Value::String(chars.as_str().to_string()))
                    }
                    _ => Ok(Value::empty_list()),
                }
            }
            other => err_type("rest", "list", other),
        }
    });

    def_builtin!(env, "cons", Arity::Exactly(2), |args| {
        let items = list_arg("cons", &args[1], 1)?;
        Ok(Value::List(items.cons(args[0].clone())))
    });

    def_builtin!(env, "concat", Arity::AtLeast(0), |args| {
        let mut all = Vec::new();
        for arg in args {
            let items = list_arg("concat", arg, 0)?;
            all.extend(items.iter().cloned());
        }
        Ok(Value::list(all))
    });

    def_builtin!(env, "=", Arity::Exactly(2), |args| {
        Ok(Value::Bool(values_equal(&args[0], &args[1])?))
    });

    def_builtin!(env, "and", Arity::AtLeast(1), |args| {
        Ok(Value::Bool(args.iter().all(Value::is_truthy)))
    });

    def_builtin!(env, "or", Arity::AtLeast(1), |args| {
        Ok(Value::Bool(args.iter().any(Value::is_truthy)))
    });

    def_builtin!(env, "int", Arity::Exactly(1), |args| {
        match &args[0] {
            Value::Int(n) => Ok(Value::Int(*n)),
            Value::String(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
                SketchError::runtime(format!("int: can't parse {:?} as an integer", s))
            }),
            other => Err(SketchError::type_mismatch_msg(format!(
                "int: unable to convert type {} to an int",
                other.type_name()
            ))),
        }
    });

    def_builtin!(env, "string-to-list", Arity::Exactly(1), |args| {
        let s = string_arg("string-to-list", &args[0], 0)?;
        let chars: List = s.chars().map(|ch| Value::String(ch.to_string())).collect();
        Ok(Value::List(chars))
    });

    def_builtin!(env, "read-string", Arity::Exactly(1), |args| {
        let s = string_arg("read-string", &args[0], 0)?;
        crate::reader::read(s)
    });

    def_builtin!(env, "slurp", Arity::Exactly(1), |args| {
        let filename = string_arg("slurp", &args[0], 0)?;
        let data = std::fs::read_to_string(filename)
            .map_err(|err| SketchError::io(format!("slurp: can't read {}: {}", filename, err)))?;
        Ok(Value::String(data))
    });

    def_builtin!(env, "apply", Arity::Exactly(2), |args| {
        n_args("apply", 2, args)?;
        let function = function_arg("apply", &args[0], 0)?;
        let call_args = list_arg("apply", &args[1], 1)?;
        apply_function(function, &call_args.to_vec())
    });
}

fn err_type(fn_name: &str, expected: &str, got: &Value) -> Result<Value, SketchError> {
    Err(SketchError::type_mismatch_msg(format!(
        "{} called with type {}, only supports {}",
        fn_name,
        got.type_name(),
        expected
    )))
}
