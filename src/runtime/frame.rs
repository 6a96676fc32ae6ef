use std::rc::Rc;

use crate::runtime::environment::Environment;

/// Where to resume once a user-defined call returns.
#[derive(Debug, Clone)]
pub struct CallFrame {
    /// Index of the instruction after the call.
    pub return_ip: usize,
    /// Caller's chunk: `None` for top level, else a function index.
    pub frame_pointer: Option<usize>,
    pub env: Rc<Environment>,
}

impl CallFrame {
    pub fn new(return_ip: usize, frame_pointer: Option<usize>, env: Rc<Environment>) -> Self {
        Self {
            return_ip,
            frame_pointer,
            env,
        }
    }

    /// Index of the call instruction in the caller's chunk.
    pub fn call_ip(&self) -> usize {
        self.return_ip.saturating_sub(1)
    }
}
