mod special_forms;

use crate::environment::EnvRef;
use crate::errors::Result;
use crate::{prelude_env, Expression};

fn run<T: AsRef<str>>(src: T) -> Result<Expression> {
    let env = prelude_env()?;
    run_in_env(src, &env)
}

fn run_in_env<T: AsRef<str>>(src: T, env: &EnvRef) -> Result<Expression> {
    crate::run(src.as_ref(), env)
}

fn atom(s: &str) -> Expression {
    Expression::atom(s)
}

fn read_one(src: &str) -> Expression {
    crate::parser::read(src).try_as_list().unwrap()[0].clone()
}
