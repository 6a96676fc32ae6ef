use std::rc::Rc;

use crate::runtime::{
    closure::Closure,
    environment::Environment,
    frame::CallFrame,
    native_function::{Arity, NativeFunction},
    runtime_error::RuntimeErrorKind,
    value::Value,
};

use super::{VM, dispatch::Flow};

impl VM {
    /// `CALL argc` / `CALWT argc`: arguments sit above the callee, and for
    /// `CALWT` the call site sits below it.
    pub(super) fn execute_call(
        &mut self,
        argc: usize,
        with_call_site: bool,
    ) -> Result<Flow, RuntimeErrorKind> {
        let args = self.pop_n(argc)?;
        let callee = self.pop()?;
        let call_site = if with_call_site {
            Some(self.pop()?)
        } else {
            None
        };
        self.call_value(callee, call_site, args)
    }

    pub(super) fn call_value(
        &mut self,
        callee: Value,
        call_site: Option<Value>,
        args: Vec<Value>,
    ) -> Result<Flow, RuntimeErrorKind> {
        match &callee {
            Value::Closure(closure) => self.enter_closure(Rc::clone(closure), call_site, args),
            Value::Native(native) => {
                let result = call_native(native, call_site, &args)?;
                self.push(result);
                Ok(Flow::Next)
            }
            Value::Object(object) => match object.function() {
                Some(closure) => self.enter_closure(closure, call_site, args),
                None => Err(RuntimeErrorKind::NotCallable {
                    callee: callee.type_name(),
                }),
            },
            other => Err(RuntimeErrorKind::NotCallable {
                callee: other.type_name(),
            }),
        }
    }

    fn enter_closure(
        &mut self,
        closure: Rc<Closure>,
        call_site: Option<Value>,
        args: Vec<Value>,
    ) -> Result<Flow, RuntimeErrorKind> {
        if self.frames.len() >= self.max_call_depth {
            return Err(RuntimeErrorKind::CallDepthExceeded(self.max_call_depth));
        }
        let index = closure.function_index;
        let function = self
            .unit
            .function(index)
            .ok_or(RuntimeErrorKind::InvalidFunction(index))?;

        let env = Environment::enclosed(&closure.env);
        // Extra arguments are dropped and missing parameters stay unbound.
        for (param, arg) in function.params.iter().zip(args) {
            env.define(self.symbol(*param as usize)?, arg);
        }
        env.define("self", Value::Closure(Rc::clone(&closure)));
        if let Some(call_site) = call_site {
            env.define("this", call_site);
        }

        let caller_env = std::mem::replace(&mut self.env, env);
        self.frames
            .push(CallFrame::new(self.ip + 1, self.fp, caller_env));
        let caller_stack = std::mem::take(&mut self.operands);
        self.caller_stacks.push(caller_stack);
        self.fp = Some(index);
        self.ip = 0;
        Ok(Flow::Transfer)
    }

    /// Leaves the active call and pushes `value` onto the caller's stack.
    /// At top level there is no caller and the run halts.
    pub(super) fn return_from_call(&mut self, value: Value) -> Result<Flow, RuntimeErrorKind> {
        let Some(frame) = self.frames.pop() else {
            return Ok(Flow::Halt);
        };
        self.operands = self
            .caller_stacks
            .pop()
            .ok_or(RuntimeErrorKind::StackUnderflow)?;
        self.push(value);
        self.ip = frame.return_ip;
        self.fp = frame.frame_pointer;
        self.env = frame.env;
        Ok(Flow::Transfer)
    }
}

fn call_native(
    native: &NativeFunction,
    call_site: Option<Value>,
    args: &[Value],
) -> Result<Value, RuntimeErrorKind> {
    if !native.arity.accepts(args.len())
        && let Arity::Exact(expected) = native.arity
    {
        return Err(RuntimeErrorKind::WrongArity {
            name: native.name.clone(),
            expected,
            got: args.len(),
        });
    }
    let call_site = call_site.unwrap_or(Value::None);
    native
        .call(&call_site, args)
        .map_err(|message| RuntimeErrorKind::Native {
            name: native.name.clone(),
            message,
        })
}
