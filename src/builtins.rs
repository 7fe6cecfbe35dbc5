use crate::errors::*;
use crate::expression::Expression;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::io::{self, Write};

/// The procedures the root environment provides by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BuiltinOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    IsEq,
    Display,
    Print,
    Format,
    Raise,
    IsLambda,
    Quit,
}

const ALL_OPS: [BuiltinOp; 11] = [
    BuiltinOp::Add,
    BuiltinOp::Subtract,
    BuiltinOp::Multiply,
    BuiltinOp::Divide,
    BuiltinOp::IsEq,
    BuiltinOp::Display,
    BuiltinOp::Print,
    BuiltinOp::Format,
    BuiltinOp::Raise,
    BuiltinOp::IsLambda,
    BuiltinOp::Quit,
];

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, BuiltinOp> =
        ALL_OPS.iter().map(|&op| (op.name(), op)).collect();
}

impl BuiltinOp {
    pub fn name(self) -> &'static str {
        use BuiltinOp::*;
        match self {
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            IsEq => "eq?",
            Display => "display",
            Print => "print",
            Format => "format",
            Raise => "error",
            IsLambda => "lambda?",
            Quit => "quit",
        }
    }

    pub fn call(self, args: Vec<Expression>) -> Result<Expression> {
        use BuiltinOp::*;
        tracing::trace!(builtin = self.name(), nargs = args.len(), "call builtin");
        match self {
            Add => native_fold(&args, 0, i64::checked_add),
            Subtract => native_unifold(&args, i64::checked_sub),
            Multiply => native_fold(&args, 1, i64::checked_mul),
            Divide => native_divide(&args),
            IsEq => native_binary(self, &args, |a, b| a == b),
            Display => {
                let s = format_all(&args);
                println!("{}", s);
                Ok(s.into())
            }
            Print => {
                let s = format_all(&args);
                print!("{}", s);
                io::stdout().flush()?;
                Ok(s.into())
            }
            Format => Ok(format_all(&args).into()),
            Raise => {
                let msg = format_all(&args);
                tracing::debug!(error = %msg, "user error raised");
                Err(ErrorKind::UserError(msg).into())
            }
            IsLambda => match args.as_slice() {
                [x] => Ok(x.is_closure().into()),
                _ => Err(arity_error(self, "exactly 1", args.len())),
            },
            Quit => Err(ErrorKind::Quit.into()),
        }
    }
}

pub fn lookup(name: &str) -> Option<BuiltinOp> {
    BUILTINS.get(name).copied()
}

pub fn names() -> impl Iterator<Item = &'static str> {
    ALL_OPS.iter().map(|op| op.name())
}

/// Render each argument and concatenate without separator.
pub fn format_all(args: &[Expression]) -> String {
    args.iter().map(|x| x.to_string()).collect()
}

/// Read the integer at the start of an atom's text: an optional sign followed
/// by decimal digits. Text without leading digits counts as 0.
pub fn to_integer(x: &Expression) -> Result<i64> {
    let text = match x {
        Expression::Atom(a) => a.trim_start(),
        _ => {
            return Err(ErrorKind::TypeError(format!(
                "expected a number but found {}",
                x.short_repr()
            ))
            .into())
        }
    };

    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    // accumulate towards the sign so that i64::MIN is reachable
    let mut acc: i64 = 0;
    for d in digits.chars().map_while(|ch| ch.to_digit(10)) {
        let d = d as i64;
        acc = acc
            .checked_mul(10)
            .and_then(|acc| {
                if negative {
                    acc.checked_sub(d)
                } else {
                    acc.checked_add(d)
                }
            })
            .ok_or(ErrorKind::Overflow)?;
    }

    Ok(acc)
}

fn arity_error(op: BuiltinOp, expected: &str, got: usize) -> Error {
    ErrorKind::ArgumentError(format!(
        "{} takes {} arguments but got {}",
        op.name(),
        expected,
        got
    ))
    .into()
}

/// apply a bivariate function to all arguments in sequence
fn native_fold<F: Fn(i64, i64) -> Option<i64>>(
    args: &[Expression],
    mut acc: i64,
    func: F,
) -> Result<Expression> {
    for b in args {
        acc = func(acc, to_integer(b)?).ok_or(ErrorKind::Overflow)?;
    }
    Ok(acc.into())
}

/// apply a bivariate function to all arguments in sequence, seeding the
/// accumulator with the first argument. (- 5 2) -> 3, (- 5) -> 5, (-) -> 0
fn native_unifold<F: Fn(i64, i64) -> Option<i64>>(
    args: &[Expression],
    func: F,
) -> Result<Expression> {
    match args.split_first() {
        None => Ok(Expression::from(0i64)),
        Some((first, rest)) => native_fold(rest, to_integer(first)?, func),
    }
}

fn native_divide(args: &[Expression]) -> Result<Expression> {
    match args {
        [a, b] => {
            let (a, b) = (to_integer(a)?, to_integer(b)?);
            if b == 0 {
                return Err(ErrorKind::DivisionByZero.into());
            }
            a.checked_div(b)
                .map(Expression::from)
                .ok_or_else(|| ErrorKind::Overflow.into())
        }
        _ => Err(arity_error(BuiltinOp::Divide, "exactly 2", args.len())),
    }
}

fn native_binary<F>(op: BuiltinOp, args: &[Expression], func: F) -> Result<Expression>
where
    F: Fn(&Expression, &Expression) -> bool,
{
    match args {
        [a, b] => Ok(func(a, b).into()),
        _ => Err(arity_error(op, "exactly 2", args.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BuiltinOp::*;

    fn atoms(xs: &[&str]) -> Vec<Expression> {
        xs.iter().map(|&x| Expression::atom(x)).collect()
    }

    fn call(op: BuiltinOp, xs: &[&str]) -> Result<Expression> {
        op.call(atoms(xs))
    }

    #[test]
    fn name_table() {
        for op in ALL_OPS.iter() {
            assert_eq!(lookup(op.name()), Some(*op));
        }
        assert_eq!(lookup("car"), None);
        assert_eq!(names().count(), ALL_OPS.len());
    }

    #[test]
    fn integer_coercion() {
        assert_eq!(to_integer(&"42".into()).unwrap(), 42);
        assert_eq!(to_integer(&"-17".into()).unwrap(), -17);
        assert_eq!(to_integer(&"+3".into()).unwrap(), 3);
        assert_eq!(to_integer(&"12abc".into()).unwrap(), 12);
        assert_eq!(to_integer(&"abc".into()).unwrap(), 0);
        assert_eq!(to_integer(&"#t".into()).unwrap(), 0);
        assert!(to_integer(&Expression::nil()).is_err());
        assert!(matches!(
            to_integer(&"99999999999999999999".into()).unwrap_err().kind(),
            ErrorKind::Overflow
        ));
    }

    #[test]
    fn integer_coercion_covers_full_i64_range() {
        assert_eq!(to_integer(&"-9223372036854775808".into()).unwrap(), i64::MIN);
        assert_eq!(to_integer(&"9223372036854775807".into()).unwrap(), i64::MAX);
        assert!(matches!(
            to_integer(&"9223372036854775808".into()).unwrap_err().kind(),
            ErrorKind::Overflow
        ));
        assert!(matches!(
            to_integer(&"-9223372036854775809".into()).unwrap_err().kind(),
            ErrorKind::Overflow
        ));
        assert_eq!(
            call(Subtract, &["-9223372036854775808"]).unwrap(),
            "-9223372036854775808".into()
        );
    }

    #[test]
    fn arithmetic() {
        assert_eq!(call(Add, &[]).unwrap(), "0".into());
        assert_eq!(call(Add, &["1", "2", "3"]).unwrap(), "6".into());
        assert_eq!(call(Subtract, &[]).unwrap(), "0".into());
        assert_eq!(call(Subtract, &["5"]).unwrap(), "5".into());
        assert_eq!(call(Subtract, &["10", "3", "2"]).unwrap(), "5".into());
        assert_eq!(call(Multiply, &[]).unwrap(), "1".into());
        assert_eq!(call(Multiply, &["2", "3", "4"]).unwrap(), "24".into());
        assert_eq!(call(Divide, &["7", "2"]).unwrap(), "3".into());
        assert_eq!(call(Divide, &["-7", "2"]).unwrap(), "-3".into());
    }

    #[test]
    fn arithmetic_errors() {
        assert!(matches!(
            call(Divide, &["1", "0"]).unwrap_err().kind(),
            ErrorKind::DivisionByZero
        ));
        assert!(matches!(
            call(Divide, &["1", "2", "3"]).unwrap_err().kind(),
            ErrorKind::ArgumentError(_)
        ));
        assert!(matches!(
            call(Multiply, &["9223372036854775807", "2"]).unwrap_err().kind(),
            ErrorKind::Overflow
        ));
        assert!(matches!(
            Add.call(vec![Expression::nil()]).unwrap_err().kind(),
            ErrorKind::TypeError(_)
        ));
    }

    #[test]
    fn equality() {
        assert_eq!(call(IsEq, &["a", "a"]).unwrap(), "#t".into());
        assert_eq!(call(IsEq, &["1", "2"]).unwrap(), "#f".into());
        let l1: Expression = atoms(&["a", "b"]).into();
        let l2: Expression = atoms(&["a", "b"]).into();
        assert_eq!(IsEq.call(vec![l1, l2]).unwrap(), "#t".into());
        assert!(call(IsEq, &["a"]).is_err());
    }

    #[test]
    fn formatting() {
        let nested = Expression::from_vec(vec!["x".into(), Expression::from_vec(atoms(&["y", "z"]))]);
        assert_eq!(
            Format.call(vec!["a".into(), nested, "b".into()]).unwrap(),
            "a(x (y z))b".into()
        );
        assert_eq!(call(Format, &[]).unwrap(), "".into());
        assert_eq!(call(Display, &["hello"]).unwrap(), "hello".into());
        assert_eq!(call(Print, &["."]).unwrap(), ".".into());
    }

    #[test]
    fn user_error_carries_rendered_message() {
        match call(Raise, &["no such method -- ", "foo"]).unwrap_err().kind() {
            ErrorKind::UserError(msg) => assert_eq!(msg, "no such method -- foo"),
            k => panic!("unexpected error {:?}", k),
        }
    }

    #[test]
    fn lambda_predicate_and_quit() {
        assert_eq!(call(IsLambda, &["x"]).unwrap(), "#f".into());
        assert!(call(Quit, &[]).unwrap_err().is_quit());
    }
}
