use std::{io::Write, rc::Rc};

use crate::{
    bytecode::{compiled_unit::Instruction, op_code::OpCode},
    runtime::{
        closure::Closure, environment::Environment, runtime_error::RuntimeErrorKind, value::Value,
    },
};

use super::VM;

/// How the dispatch loop moves on after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flow {
    Next,
    Jump(usize),
    /// `ip` and `fp` were already set by a call or return.
    Transfer,
    Halt,
}

impl VM {
    pub(super) fn dispatch_instruction(
        &mut self,
        instruction: Instruction,
    ) -> Result<Flow, RuntimeErrorKind> {
        let operand = instruction.operand as usize;
        match instruction.op {
            OpCode::OpLoadConst => {
                let value = self.literal(operand)?;
                self.push(value);
            }
            OpCode::OpLoad => {
                let name = self.symbol(operand)?;
                let value = self
                    .env
                    .get(&name)
                    .ok_or_else(|| RuntimeErrorKind::UndefinedVariable(name.to_string()))?;
                self.push(value);
            }
            OpCode::OpDeclare => {
                let name = self.symbol(operand)?;
                let value = self.peek()?.clone();
                self.env.define(name, value);
            }
            OpCode::OpAssign => {
                let name = self.symbol(operand)?;
                let value = self.peek()?.clone();
                if !self.env.assign(&name, value) {
                    return Err(RuntimeErrorKind::UndefinedVariable(name.to_string()));
                }
            }
            OpCode::OpPop => {
                self.pop()?;
            }
            OpCode::OpDup => {
                let value = self.peek()?.clone();
                self.push(value);
            }
            OpCode::OpJump => return Ok(Flow::Jump(operand)),
            OpCode::OpJumpTruthy => {
                if self.pop()?.is_truthy() {
                    return Ok(Flow::Jump(operand));
                }
            }
            OpCode::OpJumpFalsy => {
                if !self.pop()?.is_truthy() {
                    return Ok(Flow::Jump(operand));
                }
            }
            OpCode::OpCall => return self.execute_call(operand, false),
            OpCode::OpCallWith => return self.execute_call(operand, true),
            OpCode::OpFunction => {
                if self.unit.function(operand).is_none() {
                    return Err(RuntimeErrorKind::InvalidFunction(operand));
                }
                let closure = Closure::new(operand, Rc::clone(&self.env));
                self.push(Value::Closure(Rc::new(closure)));
            }
            OpCode::OpReturn => return self.return_from_call(Value::None),
            OpCode::OpReturnValue => {
                let value = self.pop()?;
                return self.return_from_call(value);
            }
            OpCode::OpEnvStart => {
                self.env = Environment::enclosed(&self.env);
            }
            OpCode::OpEnvEnd => {
                let enclosing = self
                    .env
                    .enclosing()
                    .cloned()
                    .ok_or(RuntimeErrorKind::ScopeUnderflow)?;
                self.env = enclosing;
            }
            OpCode::OpGet => self.execute_get(false)?,
            OpCode::OpGetWith => self.execute_get(true)?,
            OpCode::OpSet => self.execute_set()?,
            OpCode::OpAdd
            | OpCode::OpSub
            | OpCode::OpMul
            | OpCode::OpDiv
            | OpCode::OpMod => self.execute_binary_operation(instruction.op)?,
            OpCode::OpNeg | OpCode::OpNot => self.execute_negation()?,
            OpCode::OpEqual
            | OpCode::OpNotEqual
            | OpCode::OpLessThan
            | OpCode::OpLessThanOrEqual
            | OpCode::OpGreaterThan
            | OpCode::OpGreaterThanOrEqual => self.execute_comparison(instruction.op)?,
            OpCode::OpPrint => self.execute_print(operand)?,
        }
        Ok(Flow::Next)
    }

    fn execute_print(&mut self, count: usize) -> Result<(), RuntimeErrorKind> {
        let values = self.pop_n(count)?;
        let line = values
            .iter()
            .map(Value::stringify)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(self.out, "{}", line).map_err(|err| RuntimeErrorKind::Io(err.to_string()))
    }
}
