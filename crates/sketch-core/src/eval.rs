//! The tree-walking evaluator.
//!
//! `eval` is a single trampoline loop: special forms that end in an
//! evaluation hand back a new (ast, env) pair instead of recursing, and
//! calls to interpreted functions swap in the function's body and a fresh
//! frame. Host-stack depth therefore stays constant across tail calls,
//! which is what lets `(count-to 1000000)` terminate.

use std::sync::Arc;

use crate::ast::{Lambda, Module, Value};
use crate::env::{call_stack, child_ref, function_frame, EnvRef};
use crate::error::SketchError;
use crate::hash_map::SketchMap;
use crate::list::List;
use crate::macros::{macro_expand, quasiquote};
use crate::modules::import_module;
use crate::validation::{list_arg, n_args, string_arg, symbol_arg, to_ordinal};
use crate::value_format::format_value;

pub fn eval(mut ast: Value, mut env: EnvRef) -> Result<Value, SketchError> {
    loop {
        // Non-list fast path. Empty lists evaluate to themselves.
        match &ast {
            Value::List(items) => {
                if items.is_empty() {
                    return Ok(ast);
                }
            }
            _ => return eval_ast(&ast, &env),
        }

        // Macros rewrite source before anything else sees it. If the
        // expansion is no longer a non-empty list, evaluate it as an atom.
        let expanded = macro_expand(ast, &env)?;
        let still_a_call = matches!(&expanded, Value::List(items) if !items.is_empty());
        if !still_a_call {
            return match &expanded {
                Value::List(_) => Ok(expanded),
                _ => eval_ast(&expanded, &env),
            };
        }
        ast = expanded;

        let items = ast.as_list().expect("ast is a list here").clone();
        let head = items.first();

        if let Some(operator) = head.as_symbol() {
            let args = items.rest().to_vec();
            match operator {
                // Tail-call optimised forms: update (ast, env) and loop.
                "let" => {
                    let (new_ast, new_env) = eval_let(&args, &env)?;
                    ast = new_ast;
                    env = new_env;
                    continue;
                }
                "if" => {
                    ast = eval_if(&args, &env)?;
                    continue;
                }
                "do" => {
                    ast = eval_do(&args, &env)?;
                    continue;
                }
                "quasiquote" => {
                    n_args("quasiquote", 1, &args)?;
                    ast = quasiquote(&args[0]);
                    continue;
                }
                "eval" => {
                    n_args("eval", 1, &args)?;
                    // Evaluate the argument to get an AST value, then run
                    // that value through the trampoline.
                    ast = eval(args[0].clone(), env.clone())?;
                    continue;
                }

                // The remaining special forms return a final value.
                "fn" => return eval_fn(&args, &env),
                "def" => return eval_def(&args, &env),
                "quote" => {
                    n_args("quote", 1, &args)?;
                    return Ok(args[0].clone());
                }
                "quasiquoteexpand" => {
                    n_args("quasiquoteexpand", 1, &args)?;
                    return Ok(quasiquote(&args[0]));
                }
                "defmacro" => return eval_defmacro(&args, &env),
                "macroexpand" => {
                    n_args("macroexpand", 1, &args)?;
                    return macro_expand(args[0].clone(), &env);
                }
                "import" => return eval_import(&args, &env),
                "export-as" => return eval_export_as(&args, &env),
                "module-lookup" => return eval_module_lookup(&args, &env),
                _ => {}
            }
        }

        // Apply phase: evaluate every element, call the head as a function
        // with the rest as arguments. Evaluating arguments up front makes
        // the language eager.
        let evaluated = eval_ast(&ast, &env)?;
        let Value::List(evaluated_items) = evaluated else {
            return Err(SketchError::runtime("list did not evaluate to a list"));
        };
        let function = evaluated_items.first();
        let call_args = evaluated_items.rest().to_vec();

        match function {
            Value::Func(native) => {
                return native
                    .call(&call_args)
                    .map_err(|err| err.with_stack(call_stack(&env)));
            }
            Value::Lambda(lambda) => {
                let frame_name = head
                    .as_symbol()
                    .map(str::to_string)
                    .or_else(|| lambda.name.clone())
                    .unwrap_or_else(|| "#<function>".to_string());
                let frame =
                    function_frame(&frame_name, lambda.env.clone(), &lambda.params, &call_args)
                        .map_err(|err| err.with_stack(call_stack(&env)))?;
                if lambda.tail_call_optimized {
                    ast = lambda.body.clone();
                    env = frame;
                    continue;
                }
                return eval(lambda.body.clone(), frame);
            }
            other => {
                return Err(SketchError::type_mismatch_msg(format!(
                    "Error evaluating list {}. I expected the first item in the list to be a function, but it's a {}.",
                    format_value(&Value::List(evaluated_items.clone())),
                    other.type_name()
                ))
                .with_stack(call_stack(&env)));
            }
        }
    }
}

/// Evaluation rules for everything that isn't a special form or an
/// application: symbols resolve in the environment, list items evaluate
/// left to right, hash-map values evaluate with keys left verbatim, and
/// every other value evaluates to itself.
pub fn eval_ast(ast: &Value, env: &EnvRef) -> Result<Value, SketchError> {
    match ast {
        Value::Symbol(name) => env.read().unwrap().get(name).ok_or_else(|| {
            SketchError::unbound_symbol(format!("`{}` is undefined", name))
                .with_stack(call_stack(env))
        }),
        Value::List(items) => {
            let evaluated = items
                .iter()
                .map(|item| eval(item.clone(), env.clone()))
                .collect::<Result<List, _>>()?;
            Ok(Value::List(evaluated))
        }
        Value::HashMap(map) => {
            let mut evaluated = SketchMap::new();
            for (key, value) in map.iter() {
                evaluated = evaluated.set(key.clone(), eval(value.clone(), env.clone())?);
            }
            Ok(Value::HashMap(evaluated))
        }
        other => Ok(other.clone()),
    }
}

/// Calls a function from host code, outside the trampoline. Builtins that
/// take functions (`map`, `apply`, …) and the macro expander go through
/// this.
pub fn apply_function(func: &Value, args: &[Value]) -> Result<Value, SketchError> {
    match func {
        Value::Func(native) => native.call(args),
        Value::Lambda(lambda) => {
            let name = lambda.name.clone().unwrap_or_else(|| "#<function>".into());
            let frame = function_frame(&name, lambda.env.clone(), &lambda.params, args)?;
            eval(lambda.body.clone(), frame)
        }
        other => Err(SketchError::type_mismatch_msg(format!(
            "expected a function, got {}",
            other.type_name()
        ))),
    }
}

/// `(let ((sym expr) …) body)` — evaluates each binding in a new child
/// environment, in order, so later bindings see earlier ones, then hands
/// the body back to the trampoline.
fn eval_let(args: &[Value], env: &EnvRef) -> Result<(Value, EnvRef), SketchError> {
    n_args("let", 2, args)?;
    let bindings = list_arg("let", &args[0], 0)?;

    let child = child_ref(env.clone());
    for (i, item) in bindings.iter().enumerate() {
        let pair = item.as_list().ok_or_else(|| {
            SketchError::type_mismatch_msg(format!(
                "let: the {} binding list item isn't a list, got {}",
                to_ordinal(i + 1),
                item.type_name()
            ))
        })?;
        if pair.len() != 2 {
            return Err(SketchError::type_mismatch_msg(format!(
                "let: the {} binding list item doesn't contain two items",
                to_ordinal(i + 1)
            )));
        }
        let key = pair.first();
        let key = key.as_symbol().ok_or_else(|| {
            SketchError::type_mismatch_msg(format!(
                "let: the {} binding list item's first arg isn't a symbol",
                to_ordinal(i + 1)
            ))
        })?;
        let value = eval(pair.rest().first(), child.clone())?;
        child.write().unwrap().set(key, value);
    }

    Ok((args[1].clone(), child))
}

/// `(if cond then else?)` — returns the branch to evaluate. A missing else
/// branch evaluates to nil.
fn eval_if(args: &[Value], env: &EnvRef) -> Result<Value, SketchError> {
    if args.len() != 2 && args.len() != 3 {
        return Err(SketchError::arity(format!(
            "if statements must have two or three arguments, got {}",
            args.len()
        )));
    }
    let condition = eval(args[0].clone(), env.clone())?;
    if condition.is_truthy() {
        return Ok(args[1].clone());
    }
    if args.len() == 3 {
        return Ok(args[2].clone());
    }
    Ok(Value::Nil)
}

/// `(do e1 … en)` — evaluates all but the last form for effect and hands
/// the last back to the trampoline.
fn eval_do(args: &[Value], env: &EnvRef) -> Result<Value, SketchError> {
    let Some((last, init)) = args.split_last() else {
        return Err(SketchError::arity("do expects at least one argument"));
    };
    for arg in init {
        eval(arg.clone(), env.clone())?;
    }
    Ok(last.clone())
}

/// `(fn params body)` or `(fn docstring params body)` — constructs an
/// interpreted function closing over the current environment.
fn eval_fn(args: &[Value], env: &EnvRef) -> Result<Value, SketchError> {
    if args.len() != 2 && args.len() != 3 {
        return Err(SketchError::arity(format!(
            "fn statements must have two or three arguments, got {}",
            args.len()
        )));
    }

    let has_docstring = args.len() == 3;
    let (doc, args) = if has_docstring {
        match &args[0] {
            Value::String(doc) => (Some(doc.clone()), &args[1..]),
            other => {
                return Err(SketchError::type_mismatch_msg(format!(
                    "if a fn expression has three arguments, the 1st should be a docstring with type string, got {}",
                    other.type_name()
                )))
            }
        }
    } else {
        (None, args)
    };

    let param_list = match &args[0] {
        Value::List(items) => items,
        other => {
            let position = if has_docstring { "2nd" } else { "1st" };
            return Err(SketchError::type_mismatch_msg(format!(
                "fn statements must have a list as the {} arg, got {}",
                position,
                other.type_name()
            )));
        }
    };

    let mut params = Vec::with_capacity(param_list.len());
    for (i, param) in param_list.iter().enumerate() {
        let Some(name) = param.as_symbol() else {
            return Err(SketchError::type_mismatch_msg(format!(
                "fn statements must have a list of symbols as the parameter list; parameter {} (`{}`) has type {}",
                i,
                format_value(param),
                param.type_name()
            )));
        };
        params.push(name.to_string());
    }

    Ok(Value::Lambda(Arc::new(Lambda {
        params,
        body: args[1].clone(),
        env: env.clone(),
        doc,
        name: None,
        is_macro: false,
        tail_call_optimized: true,
    })))
}

/// `(def name expr)` — evaluates `expr` and binds it in the current
/// environment. Anonymous functions pick up the bound name for call-stack
/// reports.
fn eval_def(args: &[Value], env: &EnvRef) -> Result<Value, SketchError> {
    n_args("def", 2, args)?;
    let key = symbol_arg("def", &args[0], 0)?;
    let mut value = eval(args[1].clone(), env.clone())?;
    if let Value::Lambda(lambda) = &value {
        if lambda.name.is_none() {
            let mut named = (**lambda).clone();
            named.name = Some(key.to_string());
            value = Value::Lambda(Arc::new(named));
        }
    }
    env.write().unwrap().set(key, value.clone());
    Ok(value)
}

/// `(defmacro name expr)` — like `def`, but the value must be an
/// interpreted function, which is flagged as a macro.
fn eval_defmacro(args: &[Value], env: &EnvRef) -> Result<Value, SketchError> {
    n_args("defmacro", 2, args)?;
    let key = symbol_arg("defmacro", &args[0], 0)?;
    let value = eval(args[1].clone(), env.clone())?;
    let lambda = crate::validation::lambda_arg("defmacro", &value, 1)?;
    let mut macro_fn = (*lambda).clone();
    macro_fn.is_macro = true;
    if macro_fn.name.is_none() {
        macro_fn.name = Some(key.to_string());
    }
    let value = Value::Lambda(Arc::new(macro_fn));
    env.write().unwrap().set(key, value.clone());
    Ok(value)
}

/// `(import "path")` — loads a module and binds it under its default name.
fn eval_import(args: &[Value], env: &EnvRef) -> Result<Value, SketchError> {
    n_args("import", 1, args)?;
    let path = string_arg("import", &args[0], 0)?;
    let module = import_module(path)?;
    let Value::Module(data) = &module else {
        return Err(SketchError::module("import did not produce a module"));
    };
    env.write().unwrap().set(&data.default_name, module.clone());
    Ok(module)
}

/// `(export-as name (sym …))` — captures the current environment as a
/// module. Every exported symbol must already be defined.
fn eval_export_as(args: &[Value], env: &EnvRef) -> Result<Value, SketchError> {
    n_args("export-as", 2, args)?;
    let default_name = symbol_arg("export-as", &args[0], 0)?;
    let export_list = list_arg("export-as", &args[1], 1)?;

    let mut exports = Vec::with_capacity(export_list.len());
    for (i, item) in export_list.iter().enumerate() {
        let Some(name) = item.as_symbol() else {
            return Err(SketchError::type_mismatch_msg(format!(
                "export-as expects the second argument to be a list of symbols to export, but the {} item is type {}",
                to_ordinal(i + 1),
                item.type_name()
            )));
        };
        if env.read().unwrap().get(name).is_none() {
            return Err(SketchError::module(format!(
                "cannot export `{}`: it is not defined",
                name
            )));
        }
        exports.push(name.to_string());
    }

    Ok(Value::Module(Arc::new(Module {
        env: env.clone(),
        exports,
        default_name: default_name.to_string(),
        source: String::new(),
    })))
}

/// `(module-lookup module-name value-name)` — the form dotted symbols
/// expand to.
fn eval_module_lookup(args: &[Value], env: &EnvRef) -> Result<Value, SketchError> {
    n_args("module-lookup", 2, args)?;
    let module_name = symbol_arg("module-lookup", &args[0], 0)?;
    let value_name = symbol_arg("module-lookup", &args[1], 1)?;

    let module = env
        .read()
        .unwrap()
        .get(module_name)
        .ok_or_else(|| SketchError::unbound_symbol(format!("`{}` is undefined", module_name)))?;
    let Value::Module(data) = &module else {
        return Err(SketchError::type_mismatch_msg(format!(
            "module-lookup: {} isn't a module, got {}",
            module_name,
            module.type_name()
        )));
    };

    let result = data.env.read().unwrap().get(value_name).ok_or_else(|| {
        SketchError::module(format!(
            "module {} has no value named `{}`",
            module_name, value_name
        ))
    });
    result
}
