use std::env;
use std::path::Path;
use std::process::ExitCode;

mod format;

use sketch_core::error::{format_error, SketchError};
use sketch_core::{doc_test, repl, run_file};

fn print_usage() {
    println!("The Sketch programming language interpreter");
    println!();
    println!("Sketch is a Lisp which aims to be beginner friendly, simple, and syntactically");
    println!("consistent.");
    println!();
    println!("Usage:");
    println!("  sketch run <file.skt>        Run a Sketch program");
    println!("  sketch repl                  Launch the interactive REPL");
    println!("  sketch test <file.skt>       Run a file's docstring tests");
    println!("  sketch format [-w] <file>... Print (or, with -w, rewrite) formatted files");
    println!();
    println!("Options:");
    println!("  -h, --help    Show this help");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("run") => run_command(&args[1..]),
        Some("repl") => repl_command(),
        Some("test") => test_command(&args[1..]),
        Some("format") => format::run(&args[1..]),
        Some("-h") | Some("--help") | None => {
            print_usage();
            ExitCode::SUCCESS
        }
        Some(other) => {
            eprintln!("unknown command: {}", other);
            print_usage();
            ExitCode::from(2)
        }
    }
}

fn run_command(args: &[String]) -> ExitCode {
    let [file] = args else {
        eprintln!("run expects exactly one file argument");
        return ExitCode::from(2);
    };
    match run_file(Path::new(file)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

fn repl_command() -> ExitCode {
    match repl::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

fn test_command(args: &[String]) -> ExitCode {
    let [file] = args else {
        eprintln!("test expects exactly one file argument");
        return ExitCode::from(2);
    };
    match doc_test::test_file(Path::new(file)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

fn report_error(err: &SketchError) -> ExitCode {
    for line in format_error(err) {
        eprintln!("{}", line);
    }
    ExitCode::FAILURE
}
