use std::fmt;
use std::sync::Arc;

use crate::env::EnvRef;
use crate::error::SketchError;
use crate::hash_map::SketchMap;
use crate::list::List;

/// A runtime value. The reader produces `Value`s and the evaluator consumes
/// and produces them — Sketch uses the same representation for source code
/// and for data, which is what makes `quote`, `eval` and macros possible.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    String(String),
    Symbol(String),
    /// A source comment. Carried through the reader for the formatter's
    /// sake; stripped before evaluation.
    Comment(String),
    List(List),
    HashMap(SketchMap),
    Func(Arc<NativeFn>),
    Lambda(Arc<Lambda>),
    Module(Arc<Module>),
}

/// An interpreted function: a body AST, a parameter list (which may contain
/// the rest-marker `&`), and the environment it closed over.
#[derive(Clone)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Value,
    pub env: EnvRef,
    pub doc: Option<String>,
    pub name: Option<String>,
    pub is_macro: bool,
    /// Interpreted functions run through the evaluator's trampoline rather
    /// than via host recursion.
    pub tail_call_optimized: bool,
}

/// A module: an environment captured by `export-as`, the names it exports,
/// and the default name it binds to on `import`.
pub struct Module {
    pub env: EnvRef,
    pub exports: Vec<String>,
    pub default_name: String,
    pub source: String,
}

/// A builtin's argument-count contract. Sketch's builtins either take a
/// fixed number of arguments or are variadic with a floor, so those are the
/// only two cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    /// Checks an argument count against the contract; the error names the
    /// function so it reads like every other validation failure.
    pub fn check(&self, fn_name: &str, count: usize) -> Result<(), SketchError> {
        let ok = match self {
            Arity::Exactly(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
        };
        if ok {
            return Ok(());
        }
        let wanted = match self {
            Arity::Exactly(n) => n.to_string(),
            Arity::AtLeast(n) => format!("at least {}", n),
        };
        Err(SketchError::arity(format!(
            "the function {} expects {} arguments, but got {}",
            fn_name, wanted, count
        )))
    }
}

/// A host-implemented function: its bound name, its argument-count
/// contract, and the closure that does the work. Every native function is
/// named, so arity failures can always say which function they came from.
pub struct NativeFn {
    name: String,
    arity: Arity,
    func: Box<dyn Fn(&[Value]) -> Result<Value, SketchError> + Send + Sync>,
}

impl NativeFn {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, SketchError> {
        self.arity.check(&self.name, args.len())?;
        (self.func)(args)
    }
}

impl Value {
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(List::from(items))
    }

    pub fn empty_list() -> Self {
        Value::List(List::new())
    }

    /// Wraps a host closure as a callable value. This is the only way to
    /// construct a `NativeFn`; `def_builtin!` goes through it.
    pub fn builtin(
        name: impl Into<String>,
        arity: Arity,
        func: impl Fn(&[Value]) -> Result<Value, SketchError> + Send + Sync + 'static,
    ) -> Self {
        Value::Func(Arc::new(NativeFn {
            name: name.into(),
            arity,
            func: Box::new(func),
        }))
    }

    /// A human readable name for the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "int",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Comment(_) => "comment",
            Value::List(_) => "list",
            Value::HashMap(_) => "hashmap",
            Value::Func(_) | Value::Lambda(_) => "function",
            Value::Module(_) => "module",
        }
    }

    /// Exactly two values are falsy: `nil` and `false`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Structural equality as exposed by the `=` builtin. Values of different
/// types are unequal. Functions, modules, hash maps and comments have no
/// defined equality; comparing two of them is a type error rather than an
/// identity check.
pub fn values_equal(a: &Value, b: &Value) -> Result<bool, SketchError> {
    match (a, b) {
        (Value::Nil, Value::Nil) => Ok(true),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::Int(x), Value::Int(y)) => Ok(x == y),
        (Value::String(x), Value::String(y)) => Ok(x == y),
        (Value::Symbol(x), Value::Symbol(y)) => Ok(x == y),
        (Value::List(x), Value::List(y)) => {
            if x.len() != y.len() {
                return Ok(false);
            }
            for (item_a, item_b) in x.iter().zip(y.iter()) {
                if !values_equal(item_a, item_b)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Value::Func(_) | Value::Lambda(_), Value::Func(_) | Value::Lambda(_))
        | (Value::Module(_), Value::Module(_))
        | (Value::HashMap(_), Value::HashMap(_))
        | (Value::Comment(_), Value::Comment(_)) => Err(SketchError::type_mismatch_msg(format!(
            "= is not defined for type {}",
            a.type_name()
        ))),
        _ => Ok(false),
    }
}

// PartialEq compares data structurally; functions and modules compare by
// pointer identity. The `=` builtin goes through `values_equal` instead,
// which rejects those comparisons.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Comment(a), Value::Comment(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::HashMap(a), Value::HashMap(b)) => a == b,
            (Value::Func(a), Value::Func(b)) => Arc::ptr_eq(a, b),
            (Value::Lambda(a), Value::Lambda(b)) => Arc::ptr_eq(a, b),
            (Value::Module(a), Value::Module(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Debug goes through the printer so test failures show Sketch syntax.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::value_format::format_value(self))
    }
}
