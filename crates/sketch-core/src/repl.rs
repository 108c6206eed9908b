use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::builtins::root_env;
use crate::error::{format_error, SketchError};
use crate::rep;

/// The interactive read-eval-print loop. Each line is read, evaluated in a
/// shared root environment and printed; comment-only lines print nothing;
/// errors print and the loop continues.
pub fn run() -> Result<(), SketchError> {
    let env = root_env()?;

    let mut editor =
        DefaultEditor::new().map_err(|err| SketchError::io(err.to_string()))?;
    let history_path = history_file();
    if let Some(path) = &history_path {
        // A missing history file on first launch is fine.
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("user> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                match rep(&line, &env) {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {}
                    Err(err) => {
                        for line in format_error(&err) {
                            eprintln!("{}", line);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(SketchError::io(err.to_string())),
        }
    }

    if let Some(path) = &history_path {
        let _ = editor.save_history(path);
    }
    Ok(())
}

fn history_file() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".sketch_history"))
}
