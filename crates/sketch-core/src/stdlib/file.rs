use std::fs;

use crate::ast::{Arity, Value};
use crate::def_builtin;
use crate::env::Env;
use crate::error::SketchError;
use crate::list::List;
use crate::validation::string_arg;

pub fn install(env: &mut Env) -> Vec<String> {
    def_builtin!(env, "read-all", Arity::Exactly(1), |args| {
        let filename = string_arg("read-all", &args[0], 0)?;
        let data = fs::read_to_string(filename).map_err(|err| {
            SketchError::io(format!("read-all: can't read {}: {}", filename, err))
        })?;
        Ok(Value::String(data))
    });

    def_builtin!(env, "read-lines", Arity::Exactly(1), |args| {
        let filename = string_arg("read-lines", &args[0], 0)?;
        let data = fs::read_to_string(filename).map_err(|err| {
            SketchError::io(format!("read-lines: can't read {}: {}", filename, err))
        })?;
        let lines: List = data
            .lines()
            .map(|line| Value::String(line.to_string()))
            .collect();
        Ok(Value::List(lines))
    });

    vec!["read-all".to_string(), "read-lines".to_string()]
}

pub const SOURCE: &str = "";
