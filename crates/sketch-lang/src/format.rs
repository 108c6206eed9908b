use std::fs;
use std::process::ExitCode;

use sketch_core::pretty_print::pretty_print_top_level_do;
use sketch_core::reader::read_with_comments;

/// `sketch format [-w] <file>…` — prints each file's canonical formatting
/// to stdout, or rewrites the files in place with `-w`.
pub fn run(args: &[String]) -> ExitCode {
    let mut write = false;
    let mut files = Vec::new();
    for arg in args {
        match arg.as_str() {
            "-w" | "--write" => write = true,
            other => files.push(other),
        }
    }

    if files.is_empty() {
        eprintln!("format expects at least one file argument");
        return ExitCode::from(2);
    }

    for filename in files {
        let source = match fs::read_to_string(filename) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("format: can't read {}: {}", filename, err);
                return ExitCode::FAILURE;
            }
        };

        let ast = match read_with_comments(&format!("(do {})", source)) {
            Ok(ast) => ast,
            Err(err) => {
                eprintln!("format: {}: {}", filename, err);
                return ExitCode::FAILURE;
            }
        };

        let formatted = pretty_print_top_level_do(&ast);

        if write {
            if let Err(err) = fs::write(filename, format!("{}\n", formatted)) {
                eprintln!("format: can't write {}: {}", filename, err);
                return ExitCode::FAILURE;
            }
        } else {
            println!("{}", formatted);
        }
    }
    ExitCode::SUCCESS
}
