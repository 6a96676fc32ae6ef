use std::{fmt, rc::Rc};

use crate::runtime::environment::Environment;

/// A function chunk paired with the scope it was created in.
pub struct Closure {
    pub function_index: usize,
    pub env: Rc<Environment>,
}

impl Closure {
    pub fn new(function_index: usize, env: Rc<Environment>) -> Self {
        Self {
            function_index,
            env,
        }
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Closure(#{})", self.function_index)
    }
}
