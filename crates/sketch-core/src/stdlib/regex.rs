use regex::Regex;

use crate::ast::{Arity, Value};
use crate::def_builtin;
use crate::env::Env;
use crate::error::SketchError;
use crate::validation::string_arg;

pub fn install(env: &mut Env) -> Vec<String> {
    // Returns every match as a list of (whole-match capture-group…) lists.
    def_builtin!(env, "find", Arity::Exactly(2), |args| {
        let pattern = string_arg("find", &args[0], 0)?;
        let text = string_arg("find", &args[1], 1)?;

        let re = Regex::new(pattern)
            .map_err(|err| SketchError::runtime(format!("find: invalid pattern: {}", err)))?;

        let matches: Vec<Value> = re
            .captures_iter(text)
            .map(|captures| {
                let groups: Vec<Value> = captures
                    .iter()
                    .map(|group| {
                        Value::String(group.map(|m| m.as_str()).unwrap_or("").to_string())
                    })
                    .collect();
                Value::list(groups)
            })
            .collect();
        Ok(Value::list(matches))
    });

    vec!["find".to_string()]
}

pub const SOURCE: &str = "";
