pub mod builtins;
pub mod completer;
pub mod environment;
mod envref;
pub mod errors;
pub mod expression;
pub mod interpreter;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod prelude;
pub mod symbol;
pub mod syntax;

#[cfg(test)]
mod tests;

pub use environment::{default_env, EnvRef};
pub use errors::{Error, ErrorKind, Result};
pub use expression::Expression;
pub use interpreter::{eval, eval_sequence};

use std::fs;
use std::path::Path;

/// Tokenize, parse and evaluate `source` in `env`, returning the value of the
/// last top-level form. The first error aborts the remaining forms.
pub fn run(source: &str, env: &EnvRef) -> Result<Expression> {
    let program = parser::read(source);
    let mut result = Expression::nil();
    for form in program.try_as_list()? {
        tracing::debug!(form = %form.short_repr(), "eval top-level form");
        result = eval(form, env)?;
    }
    Ok(result)
}

pub fn run_file(path: impl AsRef<Path>, env: &EnvRef) -> Result<Expression> {
    let source = fs::read_to_string(path)?;
    run(&source, env)
}

/// A fresh root environment with the library procedures and `run-tests`
/// defined.
pub fn prelude_env() -> Result<EnvRef> {
    let env = default_env();
    prelude::load(&env)?;
    Ok(env)
}
