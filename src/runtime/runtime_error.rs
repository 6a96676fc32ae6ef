use std::{error::Error, fmt};

/// What went wrong while executing a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    UndefinedVariable(String),
    /// `right` is `None` for unary operators.
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: Option<&'static str>,
    },
    NotIndexable {
        container: &'static str,
    },
    BadKeyType {
        container: &'static str,
        key: &'static str,
    },
    NotCallable {
        callee: &'static str,
    },
    /// A native returned an error; `message` is rendered as is.
    Native {
        name: String,
        message: String,
    },
    DivisionByZero,
    StackUnderflow,
    ScopeUnderflow,
    InvalidLiteral(usize),
    InvalidSymbol(usize),
    InvalidFunction(usize),
    CallDepthExceeded(usize),
    WrongArity {
        name: String,
        expected: usize,
        got: usize,
    },
    Io(String),
}

impl RuntimeErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeErrorKind::UndefinedVariable(_) => "E1001",
            RuntimeErrorKind::TypeMismatch { .. } => "E1002",
            RuntimeErrorKind::NotIndexable { .. } => "E1003",
            RuntimeErrorKind::BadKeyType { .. } => "E1004",
            RuntimeErrorKind::NotCallable { .. } => "E1005",
            RuntimeErrorKind::Native { .. } => "E1006",
            RuntimeErrorKind::DivisionByZero => "E1007",
            RuntimeErrorKind::StackUnderflow => "E1008",
            RuntimeErrorKind::ScopeUnderflow => "E1009",
            RuntimeErrorKind::InvalidLiteral(_)
            | RuntimeErrorKind::InvalidSymbol(_)
            | RuntimeErrorKind::InvalidFunction(_) => "E1010",
            RuntimeErrorKind::CallDepthExceeded(_) => "E1011",
            RuntimeErrorKind::WrongArity { .. } => "E1012",
            RuntimeErrorKind::Io(_) => "E1013",
        }
    }
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeErrorKind::UndefinedVariable(name) => {
                write!(f, "undefined variable `{}`", name)
            }
            RuntimeErrorKind::TypeMismatch {
                op,
                left,
                right: Some(right),
            } => write!(f, "unsupported operand types for {}: {} and {}", op, left, right),
            RuntimeErrorKind::TypeMismatch {
                op,
                left,
                right: None,
            } => write!(f, "unsupported operand type for {}: {}", op, left),
            RuntimeErrorKind::NotIndexable { container } => {
                write!(f, "cannot index into a value of type {}", container)
            }
            RuntimeErrorKind::BadKeyType { container, key } => {
                write!(f, "{} cannot be indexed by {}", container, key)
            }
            RuntimeErrorKind::NotCallable { callee } => {
                write!(f, "value of type {} is not callable", callee)
            }
            RuntimeErrorKind::Native { message, .. } => f.write_str(message),
            RuntimeErrorKind::DivisionByZero => write!(f, "modulo by zero"),
            RuntimeErrorKind::StackUnderflow => write!(f, "operand stack underflow"),
            RuntimeErrorKind::ScopeUnderflow => write!(f, "cannot leave the global scope"),
            RuntimeErrorKind::InvalidLiteral(index) => {
                write!(f, "literal index {} is out of range", index)
            }
            RuntimeErrorKind::InvalidSymbol(index) => {
                write!(f, "symbol index {} is out of range", index)
            }
            RuntimeErrorKind::InvalidFunction(index) => {
                write!(f, "function index {} is out of range", index)
            }
            RuntimeErrorKind::CallDepthExceeded(limit) => {
                write!(f, "maximum call depth of {} exceeded", limit)
            }
            RuntimeErrorKind::WrongArity {
                name,
                expected,
                got,
            } => write!(
                f,
                "wrong number of arguments to {}: want={}, got={}",
                name, expected, got
            ),
            RuntimeErrorKind::Io(message) => write!(f, "failed to write output: {}", message),
        }
    }
}

/// One active frame at the moment an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    /// `None` for top-level code.
    pub function: Option<usize>,
    pub ip: usize,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.function {
            Some(index) => write!(f, "function #{} (ip {})", index, self.ip),
            None => write!(f, "<top-level> (ip {})", self.ip),
        }
    }
}

/// A fatal run error together with the frames active when it was raised,
/// innermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub trace: Vec<TraceEntry>,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, trace: Vec<TraceEntry>) -> Self {
        Self { kind, trace }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl From<RuntimeErrorKind> for RuntimeError {
    fn from(kind: RuntimeErrorKind) -> Self {
        Self::new(kind, Vec::new())
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code(), self.kind)?;
        if !self.trace.is_empty() {
            write!(f, "\n\nStack trace:")?;
            for entry in &self.trace {
                write!(f, "\n  at {}", entry)?;
            }
        }
        Ok(())
    }
}

impl Error for RuntimeError {}
