//! Stack-machine interpreter for a loaded [`CompiledUnit`].
//!
//! Execution state is owned by one `VM`: the active chunk (`fp`, `None` for
//! top level), the instruction index `ip`, the current scope, the operand
//! stack of the active call, the operand stacks of suspended callers and the
//! call frames that say where each caller resumes.

use std::{
    io::{self, Write},
    rc::Rc,
};

use crate::{
    bytecode::compiled_unit::{CompiledUnit, Literal},
    runtime::{
        environment::Environment,
        frame::CallFrame,
        prototypes::Prototypes,
        runtime_error::{RuntimeError, RuntimeErrorKind},
        stack::Stack,
        stdlib,
        value::Value,
    },
};

mod binary_ops;
mod comparison_ops;
mod dispatch;
mod function_call;
mod index_ops;
mod trace;


use dispatch::Flow;

/// Nested user-defined calls allowed before `CallDepthExceeded`.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 4096;

pub struct VM {
    unit: Rc<CompiledUnit>,
    literals: Vec<Value>,
    symbols: Vec<Rc<str>>,
    globals: Rc<Environment>,
    env: Rc<Environment>,
    operands: Stack<Value>,
    caller_stacks: Stack<Stack<Value>>,
    frames: Stack<CallFrame>,
    ip: usize,
    fp: Option<usize>,
    prototypes: Prototypes,
    out: Box<dyn Write>,
    trace: bool,
    max_call_depth: usize,
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::None => Value::None,
        Literal::Bool(value) => Value::Bool(*value),
        Literal::Number(value) => Value::Number(*value),
        Literal::Text(text) => Value::Text(Rc::from(text.as_str())),
    }
}

impl VM {
    /// A VM printing to stdout, with the standard library installed.
    pub fn new(unit: impl Into<Rc<CompiledUnit>>) -> Self {
        Self::with_output(unit, Box::new(io::stdout()))
    }

    pub fn with_output(unit: impl Into<Rc<CompiledUnit>>, out: Box<dyn Write>) -> Self {
        let unit = unit.into();
        let literals = unit.literals().iter().map(literal_value).collect();
        let symbols = unit
            .symbols()
            .iter()
            .map(|symbol| Rc::from(symbol.as_str()))
            .collect();

        let globals = Environment::global();
        let prototypes = Prototypes::new();
        stdlib::install(&globals, &prototypes);

        Self {
            unit,
            literals,
            symbols,
            env: Rc::clone(&globals),
            globals,
            operands: Stack::with_capacity(64),
            caller_stacks: Stack::new(),
            frames: Stack::new(),
            ip: 0,
            fp: None,
            prototypes,
            out,
            trace: false,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    pub fn set_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn set_max_call_depth(&mut self, depth: usize) {
        self.max_call_depth = depth;
    }

    /// Binds a global visible to the program. Replaces an existing binding.
    pub fn define(&self, name: &str, value: Value) {
        self.globals.define(name, value);
    }

    pub fn globals(&self) -> &Rc<Environment> {
        &self.globals
    }

    pub fn prototypes(&self) -> &Prototypes {
        &self.prototypes
    }

    pub fn unit(&self) -> &CompiledUnit {
        &self.unit
    }

    /// Runs the top-level chunk from the start. Globals defined by earlier
    /// runs are kept.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        self.reset();
        let result = self.run_inner().and_then(|()| {
            self.out
                .flush()
                .map_err(|err| RuntimeErrorKind::Io(err.to_string()))
        });
        result.map_err(|kind| self.runtime_error(kind))
    }

    fn reset(&mut self) {
        self.ip = 0;
        self.fp = None;
        self.env = Rc::clone(&self.globals);
        self.operands.clear();
        self.caller_stacks.clear();
        self.frames.clear();
    }

    fn run_inner(&mut self) -> Result<(), RuntimeErrorKind> {
        let unit = Rc::clone(&self.unit);
        loop {
            let Some(&instruction) = unit.chunk(self.fp).get(self.ip) else {
                // Running off the end of a chunk is an implicit `RET`.
                if self.return_from_call(Value::None)? == Flow::Halt {
                    return Ok(());
                }
                continue;
            };

            if self.trace {
                self.trace_instruction(&instruction);
            }

            match self.dispatch_instruction(instruction)? {
                Flow::Next => self.ip += 1,
                Flow::Jump(target) => self.ip = target,
                Flow::Transfer => {}
                Flow::Halt => return Ok(()),
            }
        }
    }

    pub(super) fn push(&mut self, value: Value) {
        self.operands.push(value);
    }

    pub(super) fn pop(&mut self) -> Result<Value, RuntimeErrorKind> {
        self.operands.pop().ok_or(RuntimeErrorKind::StackUnderflow)
    }

    pub(super) fn peek(&self) -> Result<&Value, RuntimeErrorKind> {
        self.operands.peek().ok_or(RuntimeErrorKind::StackUnderflow)
    }

    /// Pops `count` values, returned in push order.
    pub(super) fn pop_n(&mut self, count: usize) -> Result<Vec<Value>, RuntimeErrorKind> {
        self.operands
            .pop_n(count)
            .ok_or(RuntimeErrorKind::StackUnderflow)
    }

    pub(super) fn literal(&self, index: usize) -> Result<Value, RuntimeErrorKind> {
        self.literals
            .get(index)
            .cloned()
            .ok_or(RuntimeErrorKind::InvalidLiteral(index))
    }

    pub(super) fn symbol(&self, index: usize) -> Result<Rc<str>, RuntimeErrorKind> {
        self.symbols
            .get(index)
            .cloned()
            .ok_or(RuntimeErrorKind::InvalidSymbol(index))
    }

    /// Depth of the operand stack of the active call.
    pub fn stack_depth(&self) -> usize {
        self.operands.len()
    }

    /// Number of user-defined calls currently in progress.
    pub fn call_depth(&self) -> usize {
        self.frames.len()
    }
}
