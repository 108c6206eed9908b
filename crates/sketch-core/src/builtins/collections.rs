use crate::ast::{Arity, Value};
use crate::def_builtin;
use crate::env::Env;
use crate::eval::apply_function;
use crate::validation::{function_arg, list_arg, n_args};

// map and filter run the supplied function sequentially, left to right.
// Evaluation order is observable whenever the function has side effects, so
// it is part of the contract.
pub(crate) fn install(env: &mut Env) {
    def_builtin!(env, "map", Arity::Exactly(2), |args| {
        let function = function_arg("map", &args[0], 0)?;
        let items = list_arg("map", &args[1], 1)?;

        let mut mapped = Vec::with_capacity(items.len());
        for item in items {
            mapped.push(apply_function(function, &[item.clone()])?);
        }
        Ok(Value::list(mapped))
    });

    def_builtin!(env, "filter", Arity::Exactly(2), |args| {
        let function = function_arg("filter", &args[0], 0)?;
        let items = list_arg("filter", &args[1], 1)?;

        let mut kept = Vec::new();
        for item in items {
            if apply_function(function, &[item.clone()])?.is_truthy() {
                kept.push(item.clone());
            }
        }
        Ok(Value::list(kept))
    });

    def_builtin!(env, "fold-left", Arity::Exactly(3), |args| {
        n_args("fold-left", 3, args)?;
        let function = function_arg("fold-left", &args[0], 0)?;
        let items = list_arg("fold-left", &args[2], 2)?;

        let mut accumulator = args[1].clone();
        for item in items {
            accumulator = apply_function(function, &[accumulator, item.clone()])?;
        }
        Ok(accumulator)
    });
}
