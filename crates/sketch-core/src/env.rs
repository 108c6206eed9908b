use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ast::Value;
use crate::error::{SketchError, StackFrame};
use crate::list::List;

pub type EnvRef = Arc<RwLock<Env>>;

/// A lexical scope: a mapping from symbol names to values, plus a link to
/// the enclosing scope. Environments form a tree rooted at the global
/// environment; children hold a reference to their outer environment, the
/// outer environment does not know its children.
#[derive(Clone, Default)]
pub struct Env {
    data: HashMap<String, Value>,
    outer: Option<EnvRef>,
    function_frame: bool,
    function_name: Option<String>,
}

impl Env {
    pub fn new_child(outer: EnvRef) -> Self {
        Self {
            data: HashMap::new(),
            outer: Some(outer),
            function_frame: false,
            function_name: None,
        }
    }

    /// Writes a binding into this environment only.
    pub fn set(&mut self, key: &str, value: Value) {
        self.data.insert(key.to_string(), value);
    }

    pub fn define_builtin(&mut self, key: &str, value: Value) {
        self.set(key, value);
    }

    /// Looks `key` up through the chain of environments.
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.data.get(key) {
            return Some(value.clone());
        }
        if let Some(ref outer) = self.outer {
            return outer.read().unwrap().get(key);
        }
        None
    }

    pub fn contains_local(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn outer_ref(&self) -> Option<EnvRef> {
        self.outer.clone()
    }

    pub fn is_function_frame(&self) -> bool {
        self.function_frame
    }

    pub fn function_name(&self) -> Option<&str> {
        self.function_name.as_deref()
    }

    pub fn local_bindings(&self) -> Vec<(String, Value)> {
        self.data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

pub fn new_ref(env: Env) -> EnvRef {
    Arc::new(RwLock::new(env))
}

pub fn child_ref(outer: EnvRef) -> EnvRef {
    new_ref(Env::new_child(outer))
}

/// Builds the environment a function call runs in: a child of the
/// function's captured environment with the arguments bound to the
/// parameter names.
///
/// A `&` in the parameter list marks the rest parameter: exactly one
/// collector symbol must follow it, and any remaining arguments are bound
/// to it as a list. Without `&`, arity must match exactly.
pub fn function_frame(
    name: &str,
    parent: EnvRef,
    parameters: &[String],
    arguments: &[Value],
) -> Result<EnvRef, SketchError> {
    let mut env = Env {
        data: HashMap::new(),
        outer: Some(parent),
        function_frame: true,
        function_name: Some(name.to_string()),
    };

    match parameters.iter().position(|param| param == "&") {
        None => {
            if parameters.len() != arguments.len() {
                return Err(SketchError::arity(format!(
                    "the function {} expects {} arguments, but got {}",
                    name,
                    parameters.len(),
                    arguments.len()
                )));
            }
        }
        Some(marker) => {
            let collectors = &parameters[marker + 1..];
            match collectors.len() {
                1 => {}
                0 => {
                    return Err(SketchError::arity(
                        "variadic arguments: no collector specified",
                    ))
                }
                _ => {
                    return Err(SketchError::arity(
                        "variadic arguments: you can only specify one collector argument",
                    ))
                }
            }
            if arguments.len() < marker {
                return Err(SketchError::arity(format!(
                    "the function {} expects at least {} arguments, but got {}",
                    name,
                    marker,
                    arguments.len()
                )));
            }
        }
    }

    for (i, param) in parameters.iter().enumerate() {
        if param == "&" {
            let rest: List = arguments[i..].iter().cloned().collect();
            env.set(&parameters[i + 1], Value::List(rest));
            return Ok(new_ref(env));
        }
        env.set(param, arguments[i].clone());
    }
    Ok(new_ref(env))
}

/// Collects the names of the function frames enclosing `env`, deepest
/// first. This is the call stack printed with an error.
pub fn call_stack(env: &EnvRef) -> Vec<StackFrame> {
    let mut frames = Vec::new();
    let mut current = Some(env.clone());
    while let Some(e) = current {
        let guard = e.read().unwrap();
        if guard.is_function_frame() {
            frames.push(StackFrame {
                function: guard.function_name().unwrap_or("#<function>").to_string(),
            });
        }
        current = guard.outer_ref();
    }
    frames
}
