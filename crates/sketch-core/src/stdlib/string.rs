use crate::ast::{Arity, Value};
use crate::def_builtin;
use crate::env::Env;
use crate::list::List;
use crate::validation::string_arg;

pub fn install(env: &mut Env) -> Vec<String> {
    def_builtin!(env, "split", Arity::Exactly(2), |args| {
        let s = string_arg("split", &args[0], 0)?;
        let separator = string_arg("split", &args[1], 1)?;
        let parts: List = if separator.is_empty() {
            s.chars().map(|ch| Value::String(ch.to_string())).collect()
        } else {
            s.split(separator)
                .map(|part| Value::String(part.to_string()))
                .collect()
        };
        Ok(Value::List(parts))
    });

    def_builtin!(env, "fields", Arity::Exactly(1), |args| {
        let s = string_arg("fields", &args[0], 0)?;
        let fields: List = s
            .split_whitespace()
            .map(|field| Value::String(field.to_string()))
            .collect();
        Ok(Value::List(fields))
    });

    vec!["split".to_string(), "fields".to_string()]
}

pub const SOURCE: &str = r#"
(defn
  join
  "Returns a new string made by concatenating the items in 'elements',
    placing 'separator' between each one."
  (elements separator)
  (cond
    ((empty? elements) "")
    ((empty? (rest elements)) (first elements))
    ("else" (+ (first elements) separator (join (rest elements) separator)))))

(export-as string (join))
"#;
