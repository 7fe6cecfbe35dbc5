use crate::expression::Expression;
use rustyline::error::ReadlineError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum ErrorKind {
    ArgumentError(String),
    DivisionByZero,
    NotAProcedure(String),
    Overflow,
    Quit,
    SyntaxError(String),
    TypeError(String),
    UserError(String),

    IoError(std::io::Error),
    ReadlineError(ReadlineError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorKind::*;
        match self {
            ArgumentError(msg) => write!(f, "Argument Error: {}", msg),
            DivisionByZero => write!(f, "Division by zero"),
            NotAProcedure(what) => write!(f, "No such function: {}", what),
            Overflow => write!(f, "Integer overflow"),
            Quit => write!(f, "Quit"),
            SyntaxError(msg) => write!(f, "Syntax Error: {}", msg),
            TypeError(msg) => write!(f, "Type Error: {}", msg),
            UserError(msg) => write!(f, "{}", msg),
            IoError(e) => write!(f, "IO Error: {}", e),
            ReadlineError(e) => write!(f, "Readline Error: {}", e),
        }
    }
}

// the expressions that were being evaluated when the error surfaced,
// innermost first
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    context: Vec<Expression>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Error {
            kind,
            context: vec![],
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn context(&self) -> &[Expression] {
        &self.context
    }

    pub fn is_quit(&self) -> bool {
        matches!(self.kind, ErrorKind::Quit)
    }

    pub fn with_context(mut self, expr: Expression) -> Self {
        self.context.push(expr);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if !self.context.is_empty() {
            writeln!(f, "Context:")?;
        }
        for x in self.context.iter().rev() {
            let mut sr = x.short_repr();
            if sr.chars().count() > 75 {
                sr = sr.chars().take(70).collect::<String>() + " ...";
            }
            writeln!(f, "    {}", sr)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(ioe: std::io::Error) -> Self {
        Error::new(ErrorKind::IoError(ioe))
    }
}

impl From<ReadlineError> for Error {
    fn from(rle: ReadlineError) -> Self {
        Error::new(ErrorKind::ReadlineError(rle))
    }
}
