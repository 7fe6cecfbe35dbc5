use crate::errors::*;
use crate::expression::Expression;
use std::iter::once;

pub const LAMBDA: &str = "lambda";
pub const DEFINE: &str = "define";
pub const IF: &str = "if";
pub const QUOTE: &str = "quote";
pub const COND: &str = "cond";
pub const BEGIN: &str = "begin";
pub const ELSE: &str = "else";

/// `(begin x...)`
pub fn sequence_to_expr(body: &[Expression]) -> Expression {
    once(Expression::atom(BEGIN))
        .chain(body.iter().cloned())
        .collect()
}

/// Rewrite the clauses of a `cond` form into nested `if`s.
///
/// `(cond (p1 a...) (p2 b...) (else c...))` becomes
/// `(if p1 (begin a...) (if p2 (begin b...) (begin c...)))`.
/// Running out of clauses without an `else` yields `#f`.
pub fn cond_to_if(clauses: &[Expression]) -> Result<Expression> {
    let (first, rest) = match clauses.split_first() {
        None => return Ok(Expression::from(false)),
        Some(split) => split,
    };

    let (predicate, actions) = match first {
        Expression::List(clause) if !clause.is_empty() => (&clause[0], &clause[1..]),
        _ => {
            return Err(ErrorKind::SyntaxError(format!(
                "invalid cond clause: {}",
                first.short_repr()
            ))
            .into())
        }
    };

    if predicate.is_named_atom(ELSE) {
        Ok(sequence_to_expr(actions))
    } else {
        Ok(Expression::from_vec(vec![
            Expression::atom(IF),
            predicate.clone(),
            sequence_to_expr(actions),
            cond_to_if(rest)?,
        ]))
    }
}
