use crate::ast::{Arity, Value};
use crate::def_builtin;
use crate::env::Env;
use crate::hash_map::Key;
use crate::validation::hash_map_arg;

pub(crate) fn install(env: &mut Env) {
    def_builtin!(env, "hashmap-set", Arity::Exactly(3), |args| {
        let map = hash_map_arg("hashmap-set", &args[0], 0)?;
        let key = Key::from_value(&args[1])?;
        Ok(Value::HashMap(map.set(key, args[2].clone())))
    });

    def_builtin!(env, "hashmap-get", Arity::Exactly(2), |args| {
        let map = hash_map_arg("hashmap-get", &args[0], 0)?;
        let key = Key::from_value(&args[1])?;
        Ok(map.get(&key).cloned().unwrap_or(Value::Nil))
    });

    def_builtin!(env, "hashmap-keys", Arity::Exactly(1), |args| {
        let map = hash_map_arg("hashmap-keys", &args[0], 0)?;
        Ok(Value::list(map.keys().map(Key::to_value).collect()))
    });

    def_builtin!(env, "hashmap-values", Arity::Exactly(1), |args| {
        let map = hash_map_arg("hashmap-values", &args[0], 0)?;
        Ok(Value::list(map.iter().map(|(_, v)| v.clone()).collect()))
    });
}
