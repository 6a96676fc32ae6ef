use crate::{
    bytecode::op_code::OpCode,
    runtime::{runtime_error::RuntimeErrorKind, value::Value},
};

use super::VM;

impl VM {
    pub(super) fn execute_comparison(&mut self, op: OpCode) -> Result<(), RuntimeErrorKind> {
        let right = self.pop()?;
        let left = self.pop()?;

        let result = match op {
            OpCode::OpEqual => left == right,
            OpCode::OpNotEqual => left != right,
            _ => match (&left, &right) {
                (Value::Number(l), Value::Number(r)) => compare_numbers(op, *l, *r),
                _ => {
                    return Err(RuntimeErrorKind::TypeMismatch {
                        op: op.mnemonic(),
                        left: left.type_name(),
                        right: Some(right.type_name()),
                    });
                }
            },
        };
        self.push(Value::Bool(result));
        Ok(())
    }
}

fn compare_numbers(op: OpCode, left: f64, right: f64) -> bool {
    match op {
        OpCode::OpLessThan => left < right,
        OpCode::OpLessThanOrEqual => left <= right,
        OpCode::OpGreaterThan => left > right,
        OpCode::OpGreaterThanOrEqual => left >= right,
        _ => false,
    }
}
