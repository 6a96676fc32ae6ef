use std::fmt;

use crate::runtime::value::Value;

/// Host callable: receives the call site (or `None`) and the arguments.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(expected) => expected == count,
            Arity::Variadic => true,
        }
    }
}

pub struct NativeFunction {
    pub name: String,
    pub arity: Arity,
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        func: impl Fn(&Value, &[Value]) -> Result<Value, String> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity: Arity::Exact(arity),
            func: Box::new(func),
        }
    }

    pub fn variadic(
        name: impl Into<String>,
        func: impl Fn(&Value, &[Value]) -> Result<Value, String> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity: Arity::Variadic,
            func: Box::new(func),
        }
    }

    /// Invokes the callable without checking arity.
    pub fn call(&self, call_site: &Value, args: &[Value]) -> Result<Value, String> {
        (self.func)(call_site, args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}
