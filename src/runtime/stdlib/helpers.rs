use std::rc::Rc;

use crate::runtime::{
    array::KulaArray,
    native_function::NativeFunction,
    object::KulaObject,
    value::Value,
};

pub(super) fn type_error(name: &str, label: &str, expected: &str, got: &str) -> String {
    format!("{} expected {} to be {}, got {}", name, label, expected, got)
}

fn describe(value: Option<&Value>) -> &'static str {
    value.map(Value::type_name).unwrap_or("nothing")
}

pub(super) fn arg_number(args: &[Value], index: usize, name: &str, label: &str) -> Result<f64, String> {
    match args.get(index) {
        Some(Value::Number(value)) => Ok(*value),
        other => Err(type_error(name, label, "Number", describe(other))),
    }
}

pub(super) fn arg_text<'a>(
    args: &'a [Value],
    index: usize,
    name: &str,
    label: &str,
) -> Result<&'a str, String> {
    match args.get(index) {
        Some(Value::Text(text)) => Ok(text),
        other => Err(type_error(name, label, "String", describe(other))),
    }
}

pub(super) fn arg_value(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::None)
}

pub(super) fn receiver_text<'a>(this: &'a Value, name: &str) -> Result<&'a str, String> {
    match this {
        Value::Text(text) => Ok(text),
        other => Err(type_error(name, "receiver", "String", other.type_name())),
    }
}

pub(super) fn receiver_number(this: &Value, name: &str) -> Result<f64, String> {
    match this {
        Value::Number(value) => Ok(*value),
        other => Err(type_error(name, "receiver", "Number", other.type_name())),
    }
}

pub(super) fn receiver_array<'a>(this: &'a Value, name: &str) -> Result<&'a Rc<KulaArray>, String> {
    match this {
        Value::Array(array) => Ok(array),
        other => Err(type_error(name, "receiver", "Array", other.type_name())),
    }
}

pub(super) fn receiver_object<'a>(
    this: &'a Value,
    name: &str,
) -> Result<&'a Rc<KulaObject>, String> {
    match this {
        Value::Object(object) => Ok(object),
        other => Err(type_error(name, "receiver", "Object", other.type_name())),
    }
}

/// Truncates a number to a character position; negative positions are `None`.
pub(super) fn char_index(value: f64) -> Option<usize> {
    let value = value.trunc();
    if value.is_nan() || value < 0.0 {
        return None;
    }
    Some(value as usize)
}

pub(super) fn register(target: &KulaObject, native: NativeFunction) {
    target.set(native.name.clone(), Value::native(native));
}
