//! Non-recursive release of value graphs.
//!
//! Containers, closures and scopes own each other through `Rc`. Left to the
//! derived drop glue, a long chain such as `[[[...]]]` is freed one stack
//! frame per link. Their `Drop` impls hand their contents to
//! [`Teardown`] instead, which unlinks uniquely owned children onto a
//! worklist so every node is freed at constant stack depth.

use std::rc::Rc;

use crate::runtime::{environment::Environment, value::Value};

pub(crate) struct Teardown {
    values: Vec<Value>,
    scopes: Vec<Rc<Environment>>,
}

impl Teardown {
    pub(crate) fn values(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            values: values.into_iter().collect(),
            scopes: Vec::new(),
        }
    }

    pub(crate) fn scope(&mut self, scope: Option<Rc<Environment>>) -> &mut Self {
        self.scopes.extend(scope);
        self
    }

    pub(crate) fn run(&mut self) {
        loop {
            if let Some(value) = self.values.pop() {
                self.unlink_value(value);
            } else if let Some(scope) = self.scopes.pop() {
                if let Some(mut scope) = Rc::into_inner(scope) {
                    let (bindings, enclosing) = scope.detach();
                    self.values.extend(bindings);
                    self.scopes.extend(enclosing);
                }
            } else {
                return;
            }
        }
    }

    /// A shared child only loses a reference here; the last owner frees it
    /// later through the same path. Emptied nodes drop with nothing left to
    /// walk.
    fn unlink_value(&mut self, value: Value) {
        match value {
            Value::Array(array) => {
                if let Some(array) = Rc::into_inner(array) {
                    self.values.extend(array.take_items());
                }
            }
            Value::Object(object) => {
                if let Some(object) = Rc::into_inner(object) {
                    self.values.extend(object.take_values());
                }
            }
            Value::Closure(closure) => {
                if let Some(closure) = Rc::into_inner(closure) {
                    self.scopes.push(closure.env);
                }
            }
            _ => {}
        }
    }
}
