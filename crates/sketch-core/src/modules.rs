//! The module loader. Registered standard-library modules are looked up by
//! name first; anything else is treated as a path resolved against the
//! module search path. Each import evaluates the module's source in a fresh
//! root environment.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::ast::{Module, Value};
use crate::builtins::root_env;
use crate::env::Env;
use crate::error::SketchError;
use crate::eval::eval;
use crate::reader::read;
use crate::stdlib;

/// A standard-library module implemented (at least partly) in the host:
/// a set of native bindings plus optional bundled Sketch source.
pub struct RegisteredModule {
    pub name: &'static str,
    pub install: fn(&mut Env) -> Vec<String>,
    pub source: &'static str,
}

static REGISTERED_MODULES: &[RegisteredModule] = &[
    RegisteredModule {
        name: "string",
        install: stdlib::string::install,
        source: stdlib::string::SOURCE,
    },
    RegisteredModule {
        name: "file",
        install: stdlib::file::install,
        source: stdlib::file::SOURCE,
    },
    RegisteredModule {
        name: "regex",
        install: stdlib::regex::install,
        source: stdlib::regex::SOURCE,
    },
    RegisteredModule {
        name: "queue",
        install: stdlib::queue::install,
        source: stdlib::queue::SOURCE,
    },
];

static SEARCH_PATHS: Lazy<RwLock<Option<Vec<PathBuf>>>> = Lazy::new(|| RwLock::new(None));

/// Overrides the module search path. When unset, the `SKETCH_PATH`
/// environment variable (colon-separated) is consulted, falling back to the
/// current directory.
pub fn set_search_paths(paths: Vec<PathBuf>) {
    *SEARCH_PATHS.write().unwrap() = Some(paths);
}

pub fn search_paths() -> Vec<PathBuf> {
    if let Some(paths) = SEARCH_PATHS.read().unwrap().as_ref() {
        return paths.clone();
    }
    match std::env::var("SKETCH_PATH") {
        Ok(joined) => joined
            .split(':')
            .filter(|part| !part.is_empty())
            .map(PathBuf::from)
            .collect(),
        Err(_) => vec![PathBuf::from(".")],
    }
}

pub fn import_module(path: &str) -> Result<Value, SketchError> {
    if let Some(registered) = REGISTERED_MODULES.iter().find(|m| m.name == path) {
        return load_registered_module(registered);
    }
    import_from_file(path)
}

fn load_registered_module(registered: &RegisteredModule) -> Result<Value, SketchError> {
    let env = root_env()?;
    let host_exports = {
        let mut guard = env.write().unwrap();
        (registered.install)(&mut guard)
    };

    if registered.source.trim().is_empty() {
        return Ok(Value::Module(Arc::new(Module {
            env,
            exports: host_exports,
            default_name: registered.name.to_string(),
            source: registered.name.to_string(),
        })));
    }

    let module = eval_module_source(registered.source, registered.name, env)?;
    let Value::Module(data) = &module else {
        return Err(export_as_error(registered.name));
    };
    let mut exports = data.exports.clone();
    exports.extend(host_exports);
    Ok(Value::Module(Arc::new(Module {
        env: data.env.clone(),
        exports,
        default_name: data.default_name.clone(),
        source: registered.name.to_string(),
    })))
}

fn import_from_file(path: &str) -> Result<Value, SketchError> {
    let mut tried = Vec::new();
    for dir in search_paths() {
        let candidate = dir.join(path);
        if candidate.is_file() {
            let source = fs::read_to_string(&candidate).map_err(|err| {
                SketchError::io(format!("import: can't read {}: {}", candidate.display(), err))
            })?;
            let env = root_env()?;
            let module = eval_module_source(&source, path, env)?;
            if !matches!(module, Value::Module(_)) {
                return Err(export_as_error(path));
            }
            return Ok(module);
        }
        tried.push(candidate);
    }
    Err(SketchError::module(format!(
        "import: could not find module {} (searched {})",
        path,
        tried
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )))
}

fn eval_module_source(
    source: &str,
    name: &str,
    env: crate::env::EnvRef,
) -> Result<Value, SketchError> {
    let ast = read(&format!("(do {})", source))?;
    match eval(ast, env) {
        Ok(value) => Ok(value),
        Err(SketchError::ReadComment) => Err(export_as_error(name)),
        Err(err) => Err(err),
    }
}

fn export_as_error(name: &str) -> SketchError {
    SketchError::module(format!(
        "to be importable, {} must end in an `export-as` statement",
        name
    ))
}
