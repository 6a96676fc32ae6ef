use crate::{
    bytecode::{compiled_unit::Instruction, op_code::operand_width},
    runtime::{
        runtime_error::{RuntimeError, RuntimeErrorKind, TraceEntry},
        value::Value,
    },
};

use super::VM;

impl VM {
    pub(super) fn runtime_error(&self, kind: RuntimeErrorKind) -> RuntimeError {
        RuntimeError::new(kind, self.stack_trace())
    }

    /// Active frames, innermost first.
    pub(super) fn stack_trace(&self) -> Vec<TraceEntry> {
        let mut trace = Vec::with_capacity(self.frames.len() + 1);
        trace.push(TraceEntry {
            function: self.fp,
            ip: self.ip,
        });
        trace.extend(self.frames.iter_top_down().map(|frame| TraceEntry {
            function: frame.frame_pointer,
            ip: frame.call_ip(),
        }));
        trace
    }

    pub(super) fn format_instruction(&self, instruction: &Instruction) -> String {
        let chunk = match self.fp {
            Some(index) => format!("F{}", index),
            None => "TOP".to_string(),
        };
        let operand = if operand_width(instruction.op) > 0 {
            format!(" {}", instruction.operand)
        } else {
            String::new()
        };
        format!("{} IP={:04} {}{}", chunk, self.ip, instruction.op, operand)
    }

    pub(super) fn trace_instruction(&self, instruction: &Instruction) {
        eprintln!("{}", self.format_instruction(instruction));
        self.trace_stack();
    }

    fn trace_stack(&self) {
        let items: Vec<String> = self
            .operands
            .as_slice()
            .iter()
            .map(Value::stringify)
            .collect();
        eprintln!("  stack: [{}]", items.join(", "));
    }
}
