use crate::ast::{Arity, Value};
use crate::def_builtin;
use crate::env::Env;
use crate::error::SketchError;
use crate::validation::n_int_args;

pub(crate) fn install(env: &mut Env) {
    // `+` is polymorphic: it sums ints and concatenates strings.
    def_builtin!(env, "+", Arity::AtLeast(1), |args| {
        match &args[0] {
            Value::Int(first) => {
                let mut sum = *first;
                for arg in &args[1..] {
                    let Value::Int(n) = arg else {
                        return Err(SketchError::type_mismatch_msg(
                            "addition between different types",
                        ));
                    };
                    sum += n;
                }
                Ok(Value::Int(sum))
            }
            Value::String(first) => {
                let mut joined = first.clone();
                for arg in &args[1..] {
                    let Value::String(s) = arg else {
                        return Err(SketchError::type_mismatch_msg(
                            "addition between different types",
                        ));
                    };
                    joined.push_str(s);
                }
                Ok(Value::String(joined))
            }
            other => Err(SketchError::type_mismatch_msg(format!(
                "unsupported first arg to +: type {}",
                other.type_name()
            ))),
        }
    });

    def_builtin!(env, "-", Arity::Exactly(2), |args| {
        let numbers = n_int_args("-", 2, args)?;
        Ok(Value::Int(numbers[0] - numbers[1]))
    });

    def_builtin!(env, "*", Arity::Exactly(2), |args| {
        let numbers = n_int_args("*", 2, args)?;
        Ok(Value::Int(numbers[0] * numbers[1]))
    });

    def_builtin!(env, "/", Arity::Exactly(2), |args| {
        let numbers = n_int_args("/", 2, args)?;
        numbers[0]
            .checked_div(numbers[1])
            .map(Value::Int)
            .ok_or_else(|| SketchError::runtime("/: division by zero"))
    });

    def_builtin!(env, "modulo", Arity::Exactly(2), |args| {
        let numbers = n_int_args("modulo", 2, args)?;
        numbers[0]
            .checked_rem(numbers[1])
            .map(Value::Int)
            .ok_or_else(|| SketchError::runtime("modulo: division by zero"))
    });

    def_builtin!(env, "<", Arity::Exactly(2), |args| {
        let numbers = n_int_args("<", 2, args)?;
        Ok(Value::Bool(numbers[0] < numbers[1]))
    });

    def_builtin!(env, "<=", Arity::Exactly(2), |args| {
        let numbers = n_int_args("<=", 2, args)?;
        Ok(Value::Bool(numbers[0] <= numbers[1]))
    });

    def_builtin!(env, ">", Arity::Exactly(2), |args| {
        let numbers = n_int_args(">", 2, args)?;
        Ok(Value::Bool(numbers[0] > numbers[1]))
    });

    def_builtin!(env, ">=", Arity::Exactly(2), |args| {
        let numbers = n_int_args(">=", 2, args)?;
        Ok(Value::Bool(numbers[0] >= numbers[1]))
    });
}
