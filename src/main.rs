use clap::{App, Arg};
use rustyline::error::ReadlineError;
use std::path::Path;
use tinylisp::io::{LineReader, ReplInput};
use tinylisp::{default_env, prelude, run, run_file, EnvRef, Error, ErrorKind, Expression, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = App::new("tinylisp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interpreter for a minimal Scheme-like language")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Files to run; anything that is not a file is evaluated and displayed")
                .takes_value(true)
                .multiple_values(true),
        )
        .arg(
            Arg::new("no-prelude")
                .long("no-prelude")
                .help("Do not load the library procedures"),
        )
        .arg(
            Arg::new("self-test")
                .long("self-test")
                .help("Run the built-in test suite and exit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .multiple_occurrences(true)
                .help("Increase logging verbosity (overrides RUST_LOG)"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    let env = default_env();

    let self_test = matches.is_present("self-test");

    if self_test || !matches.is_present("no-prelude") {
        if let Err(e) = prelude::load(&env) {
            report_error(&e);
            std::process::exit(1);
        }
    }

    if self_test {
        exit_on_error(run("(run-tests)", &env));
        println!();
        tracing::info!("self test passed");
        return;
    }

    match matches.values_of("input") {
        None => repl(&env),
        Some(inputs) => {
            for input in inputs {
                exit_on_error(run_input(input, &env));
            }
        }
    }
}

fn init_logging(verbosity: u64) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_input(input: &str, env: &EnvRef) -> Result<Expression> {
    if Path::new(input).is_file() {
        tracing::info!(file = input, "running file");
        run_file(input, env)
    } else {
        run(&format!("(display {})", input), env)
    }
}

fn repl(env: &EnvRef) {
    let mut input = ReplInput::new(env);
    loop {
        let source = match input.read_balanced() {
            Ok(source) => source,
            Err(e) if is_end_of_input(&e) => break,
            Err(e) => {
                report_error(&e);
                break;
            }
        };

        if source.trim().is_empty() {
            continue;
        }

        match run(&format!("(display {})", source), env) {
            Ok(_) => {}
            Err(e) if e.is_quit() => std::process::exit(0),
            Err(e) => report_error(&e),
        }
    }
}

fn is_end_of_input(e: &Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::ReadlineError(ReadlineError::Eof)
            | ErrorKind::ReadlineError(ReadlineError::Interrupted)
    )
}

fn exit_on_error(result: Result<Expression>) {
    match result {
        Ok(_) => {}
        Err(e) if e.is_quit() => std::process::exit(0),
        Err(e) => {
            report_error(&e);
            std::process::exit(1);
        }
    }
}

fn report_error(e: &Error) {
    eprintln!("{}", e);
}
