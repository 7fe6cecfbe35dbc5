use crate::environment::EnvRef;
use crate::errors::*;
use crate::expression::{Closure, Expression};
use crate::syntax::{self, cond_to_if};

/// simple recursive evaluator; deep recursion in the evaluated program
/// consumes the native stack
pub fn eval(expr: &Expression, env: &EnvRef) -> Result<Expression> {
    match expr {
        Expression::Atom(name) => Ok(env.lookup(name)),
        Expression::Closure(_) | Expression::Builtin(_) => Ok(expr.clone()),
        Expression::List(list) => match list.first() {
            Some(Expression::Atom(s)) => match &**s {
                syntax::LAMBDA => lambda(list, env),
                syntax::DEFINE => define(list, env),
                syntax::IF => if_form(list, env),
                syntax::QUOTE => Ok(quote(list)),
                syntax::COND => eval(&cond_to_if(&list[1..])?, env),
                syntax::BEGIN => eval_sequence(&list[1..], env),
                _ => apply_form(list, env).map_err(|e| e.with_context(expr.clone())),
            },
            _ => apply_form(list, env).map_err(|e| e.with_context(expr.clone())),
        },
    }
}

/// Evaluate all expressions in order and return the value of the last one,
/// or `()` if there are none.
pub fn eval_sequence(exprs: &[Expression], env: &EnvRef) -> Result<Expression> {
    let mut result = Expression::nil();
    for expr in exprs {
        result = eval(expr, env)?;
    }
    Ok(result)
}

pub fn apply(proc: Expression, args: Vec<Expression>) -> Result<Expression> {
    match proc {
        Expression::Builtin(op) => op.call(args),
        Expression::Closure(c) => apply_closure(&c, args),
        other => Err(ErrorKind::NotAProcedure(other.short_repr()).into()),
    }
}

pub fn apply_closure(closure: &Closure, args: Vec<Expression>) -> Result<Expression> {
    if closure.params().len() != args.len() {
        return Err(ErrorKind::ArgumentError(format!(
            "{} expects {} arguments but got {}",
            Expression::Closure(closure.clone()).short_repr(),
            closure.params().len(),
            args.len()
        ))
        .into());
    }

    let name = closure.name().map(|n| n.name()).unwrap_or("<lambda>");
    tracing::trace!(procedure = name, nargs = args.len(), "apply closure");

    let local_env = closure
        .env()
        .extend(closure.params().iter().cloned().zip(args));
    eval_sequence(closure.body(), &local_env)
}

fn apply_form(list: &[Expression], env: &EnvRef) -> Result<Expression> {
    let (operator, operands) = match list.split_first() {
        Some(split) => split,
        None => return Err(ErrorKind::NotAProcedure("()".to_string()).into()),
    };

    let proc = eval(operator, env)?;
    let args = operands
        .iter()
        .map(|arg| eval(arg, env))
        .collect::<Result<_>>()?;
    apply(proc, args)
}

fn lambda(list: &[Expression], env: &EnvRef) -> Result<Expression> {
    let params = match list.get(1) {
        Some(Expression::List(params)) => params,
        _ => return Err(malformed(list, "expected (lambda (params...) body...)")),
    };
    Closure::build(params, &list[2..], env).map(Expression::Closure)
}

fn define(list: &[Expression], env: &EnvRef) -> Result<Expression> {
    match list.get(1) {
        // (define (name params...) body...)
        Some(Expression::List(signature)) => match signature.split_first() {
            Some((Expression::Atom(name), params)) => {
                let proc = Closure::build(params, &list[2..], env)?;
                Ok(env.define(&**name, proc.into()))
            }
            _ => Err(malformed(list, "expected (define (name params...) body...)")),
        },
        Some(Expression::Atom(name)) if list.len() == 3 => {
            let value = eval(&list[2], env)?;
            Ok(env.define(&**name, value))
        }
        _ => Err(malformed(list, "expected (define name value)")),
    }
}

fn if_form(list: &[Expression], env: &EnvRef) -> Result<Expression> {
    let (cond, then, otherwise) = match list {
        [_, cond, then] => (cond, then, None),
        [_, cond, then, otherwise] => (cond, then, Some(otherwise)),
        _ => return Err(malformed(list, "expected (if predicate consequent [alternative])")),
    };

    if eval(cond, env)?.truthiness()? {
        eval(then, env)
    } else {
        match otherwise {
            Some(x) => eval(x, env),
            None => Ok(Expression::nil()),
        }
    }
}

fn quote(list: &[Expression]) -> Expression {
    match list {
        [_, x] => x.clone(),
        _ => Expression::from_vec(list[1..].to_vec()),
    }
}

fn malformed(list: &[Expression], expected: &str) -> Error {
    ErrorKind::SyntaxError(format!(
        "{}: {}",
        Expression::from_vec(list.to_vec()).short_repr(),
        expected
    ))
    .into()
}
