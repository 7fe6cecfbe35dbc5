use crate::builtins::BuiltinOp;
use crate::environment::{EnvRef, EnvWeak};
use crate::errors::*;
use crate::symbol::Symbol;
use std::iter::FromIterator;

#[cfg(feature = "thread-safe")]
pub use std::sync::{Arc as Ref, Weak};

#[cfg(not(feature = "thread-safe"))]
pub use std::rc::{Rc as Ref, Weak};

/// Both the syntax tree and the runtime values.
///
/// The parser only ever produces `Atom`s and `List`s. Evaluation adds
/// closures and builtin operations. Numbers and booleans stay atoms; their
/// text is interpreted by whoever consumes them.
#[derive(Clone)]
pub enum Expression {
    Atom(Ref<str>),
    List(Ref<Vec<Expression>>),
    Closure(Closure),
    Builtin(BuiltinOp),
}

pub const TRUE: &str = "#t";
pub const FALSE: &str = "#f";

impl Expression {
    pub fn atom<T: AsRef<str>>(s: T) -> Self {
        Expression::Atom(Ref::from(s.as_ref()))
    }

    /// the empty list; also what forms without a meaningful value return
    pub fn nil() -> Self {
        Expression::List(Ref::new(vec![]))
    }

    pub fn from_vec(l: Vec<Expression>) -> Self {
        Expression::List(Ref::new(l))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Expression::List(l) if l.is_empty())
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Expression::Atom(_))
    }

    pub fn is_closure(&self) -> bool {
        matches!(self, Expression::Closure(_))
    }

    pub fn is_named_atom<T: AsRef<str>>(&self, name: T) -> bool {
        match self {
            Expression::Atom(a) => &**a == name.as_ref(),
            _ => false,
        }
    }

    /// Only `#t` and `#f` carry a truth value.
    pub fn truthiness(&self) -> Result<bool> {
        match self {
            Expression::Atom(a) if &**a == TRUE => Ok(true),
            Expression::Atom(a) if &**a == FALSE => Ok(false),
            _ => Err(ErrorKind::TypeError(format!(
                "expected #t or #f but found {}",
                self.short_repr()
            ))
            .into()),
        }
    }

    pub fn try_as_atom(&self) -> Result<&str> {
        match self {
            Expression::Atom(a) => Ok(&**a),
            _ => Err(ErrorKind::TypeError(format!("expected atom: {}", self.short_repr())).into()),
        }
    }

    pub fn try_as_list(&self) -> Result<&[Expression]> {
        match self {
            Expression::List(l) => Ok(l.as_slice()),
            _ => Err(ErrorKind::TypeError(format!("expected list: {}", self.short_repr())).into()),
        }
    }

    pub fn short_repr(&self) -> String {
        match self {
            Expression::Closure(c) => match c.name() {
                Some(name) => format!("<procedure {}>", name),
                None => "<procedure>".to_string(),
            },
            _ => self.to_string(),
        }
    }
}

impl std::fmt::Debug for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Expression::Atom(a) => write!(f, "{:?}", a),
            Expression::List(l) => f.debug_list().entries(l.iter()).finish(),
            Expression::Closure(c) => write!(f, "{:?}", c),
            Expression::Builtin(op) => write!(f, "{:?}", op),
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Expression::Atom(a) => write!(f, "{}", a),
            Expression::List(l) => write_seq(f, l),
            Expression::Closure(c) => {
                write!(f, "(lambda (")?;
                for (i, p) in c.params().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ")")?;
                for x in c.body().iter() {
                    write!(f, " {}", x)?;
                }
                write!(f, ")")
            }
            Expression::Builtin(op) => write!(f, "#<builtin {}>", op.name()),
        }
    }
}

fn write_seq(f: &mut std::fmt::Formatter, items: &[Expression]) -> std::fmt::Result {
    write!(f, "(")?;
    for (i, x) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", x)?;
    }
    write!(f, ")")
}

impl From<&str> for Expression {
    fn from(s: &str) -> Self {
        Expression::atom(s)
    }
}

impl From<String> for Expression {
    fn from(s: String) -> Self {
        Expression::Atom(Ref::from(s))
    }
}

impl From<i64> for Expression {
    fn from(i: i64) -> Self {
        Expression::from(i.to_string())
    }
}

impl From<bool> for Expression {
    fn from(b: bool) -> Self {
        if b {
            Expression::atom(TRUE)
        } else {
            Expression::atom(FALSE)
        }
    }
}

impl From<Vec<Expression>> for Expression {
    fn from(l: Vec<Expression>) -> Self {
        Expression::from_vec(l)
    }
}

impl From<Closure> for Expression {
    fn from(c: Closure) -> Self {
        Expression::Closure(c)
    }
}

impl From<BuiltinOp> for Expression {
    fn from(op: BuiltinOp) -> Self {
        Expression::Builtin(op)
    }
}

impl FromIterator<Expression> for Expression {
    fn from_iter<I: IntoIterator<Item = Expression>>(iter: I) -> Self {
        Expression::from_vec(iter.into_iter().collect())
    }
}

/// Atoms compare by text and lists by structure. Closures are equal only to
/// themselves.
impl std::cmp::PartialEq for Expression {
    fn eq(&self, rhs: &Self) -> bool {
        use Expression::*;
        match (self, rhs) {
            (Atom(a), Atom(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Closure(a), Closure(b)) => a.eqv(b),
            (Builtin(a), Builtin(b)) => a == b,
            _ => false,
        }
    }
}

/// A user-defined procedure: parameter names, body forms and the environment
/// the `lambda` was evaluated in.
///
/// `E` is `EnvRef` for closure values. Environments keep closures that
/// captured the environment itself as `Closure<EnvWeak>` so that recursive
/// definitions don't form reference cycles.
#[derive(Clone)]
pub struct Closure<E = EnvRef> {
    name: Option<Symbol>,
    params: Ref<Vec<Symbol>>,
    body: Ref<Vec<Expression>>,
    env: E,
}

impl<E> Closure<E> {
    pub fn name(&self) -> Option<&Symbol> {
        self.name.as_ref()
    }

    pub fn rename(mut self, name: Symbol) -> Self {
        if self.name.is_none() {
            self.name = Some(name);
        }
        self
    }

    pub fn params(&self) -> &[Symbol] {
        &self.params
    }

    pub fn body(&self) -> &[Expression] {
        &self.body
    }

    pub fn env(&self) -> &E {
        &self.env
    }
}

impl Closure<EnvRef> {
    pub fn new(params: Vec<Symbol>, body: Vec<Expression>, env: EnvRef) -> Self {
        Closure {
            name: None,
            params: Ref::new(params),
            body: Ref::new(body),
            env,
        }
    }

    /// Build a closure from the unevaluated parameter list and body of a
    /// `lambda` or `define` form.
    pub fn build(params: &[Expression], body: &[Expression], env: &EnvRef) -> Result<Self> {
        let params = params
            .iter()
            .map(|p| match p {
                Expression::Atom(a) => Ok(Symbol::new(&**a)),
                _ => Err(ErrorKind::SyntaxError(format!(
                    "invalid parameter: {}",
                    p.short_repr()
                ))
                .into()),
            })
            .collect::<Result<_>>()?;
        Ok(Closure::new(params, body.to_vec(), env.clone()))
    }

    pub fn eqv(&self, other: &Self) -> bool {
        Ref::ptr_eq(&self.body, &other.body)
            && Ref::ptr_eq(&self.params, &other.params)
            && self.env.ptr_eq(&other.env)
    }

    pub fn downgrade(&self) -> Closure<EnvWeak> {
        Closure {
            name: self.name.clone(),
            params: self.params.clone(),
            body: self.body.clone(),
            env: self.env.downgrade(),
        }
    }
}

impl Closure<EnvWeak> {
    pub fn upgrade(&self) -> Option<Closure<EnvRef>> {
        Some(Closure {
            name: self.name.clone(),
            params: self.params.clone(),
            body: self.body.clone(),
            env: self.env.upgrade()?,
        })
    }
}

impl<E> std::fmt::Debug for Closure<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("body", &self.body)
            .finish()
    }
}
