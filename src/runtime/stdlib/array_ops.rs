use crate::runtime::{native_function::NativeFunction, object::KulaObject, value::Value};

use super::helpers::{arg_number, arg_value, receiver_array, register};

pub(super) fn install(proto: &KulaObject) {
    register(proto, NativeFunction::new("insert", 2, native_insert));
    register(proto, NativeFunction::new("remove", 1, native_remove));
    register(proto, NativeFunction::new("push", 1, native_push));
    register(proto, NativeFunction::new("length", 0, native_length));
}

pub(super) fn native_insert(this: &Value, args: &[Value]) -> Result<Value, String> {
    let array = receiver_array(this, "insert")?;
    let index = arg_number(args, 0, "insert", "index")?;
    array.insert(index, arg_value(args, 1));
    Ok(Value::None)
}

/// Returns the removed element, or `None` when the index is out of range.
pub(super) fn native_remove(this: &Value, args: &[Value]) -> Result<Value, String> {
    let array = receiver_array(this, "remove")?;
    let index = arg_number(args, 0, "remove", "index")?;
    Ok(array.remove(index).unwrap_or(Value::None))
}

pub(super) fn native_push(this: &Value, args: &[Value]) -> Result<Value, String> {
    let array = receiver_array(this, "push")?;
    array.push(arg_value(args, 0));
    Ok(Value::Number(array.len() as f64))
}

pub(super) fn native_length(this: &Value, _args: &[Value]) -> Result<Value, String> {
    let array = receiver_array(this, "length")?;
    Ok(Value::Number(array.len() as f64))
}
