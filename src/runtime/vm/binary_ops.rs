use std::rc::Rc;

use crate::{
    bytecode::op_code::OpCode,
    runtime::{runtime_error::RuntimeErrorKind, value::Value},
};

use super::VM;

impl VM {
    pub(super) fn execute_binary_operation(&mut self, op: OpCode) -> Result<(), RuntimeErrorKind> {
        let right = self.pop()?;
        let left = self.pop()?;

        let result = match (&left, &right) {
            (Value::Number(l), Value::Number(r)) => Value::Number(arithmetic(op, *l, *r)?),
            (Value::Text(l), Value::Text(r)) if op == OpCode::OpAdd => {
                let mut joined = String::with_capacity(l.len() + r.len());
                joined.push_str(l);
                joined.push_str(r);
                Value::Text(Rc::from(joined))
            }
            _ => {
                return Err(RuntimeErrorKind::TypeMismatch {
                    op: op.mnemonic(),
                    left: left.type_name(),
                    right: Some(right.type_name()),
                });
            }
        };
        self.push(result);
        Ok(())
    }

    /// Logical negation of the operand's truthiness, for both `NEG` and `NOT`.
    pub(super) fn execute_negation(&mut self) -> Result<(), RuntimeErrorKind> {
        let operand = self.pop()?;
        self.push(Value::Bool(!operand.is_truthy()));
        Ok(())
    }
}

fn arithmetic(op: OpCode, left: f64, right: f64) -> Result<f64, RuntimeErrorKind> {
    Ok(match op {
        OpCode::OpAdd => left + right,
        OpCode::OpSub => left - right,
        OpCode::OpMul => left * right,
        OpCode::OpDiv => left / right,
        OpCode::OpMod => {
            // Both sides truncate toward zero first, as integer remainder.
            let divisor = right as i64;
            if divisor == 0 {
                return Err(RuntimeErrorKind::DivisionByZero);
            }
            (left as i64).wrapping_rem(divisor) as f64
        }
        _ => {
            return Err(RuntimeErrorKind::TypeMismatch {
                op: op.mnemonic(),
                left: "Number",
                right: Some("Number"),
            });
        }
    })
}
