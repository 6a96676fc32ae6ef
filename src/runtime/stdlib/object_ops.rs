use crate::runtime::{
    native_function::NativeFunction,
    object::KulaObject,
    value::Value,
};

use super::helpers::{receiver_object, register};

pub(super) fn install(proto: &KulaObject) {
    register(proto, NativeFunction::new("copy", 0, native_copy));
    register(proto, NativeFunction::new("keys", 0, native_keys));
    register(proto, NativeFunction::new("values", 0, native_values));
}

/// Shallow copy; the copy keeps the receiver's prototype link.
pub(super) fn native_copy(this: &Value, _args: &[Value]) -> Result<Value, String> {
    let object = receiver_object(this, "copy")?;
    Ok(Value::object(object.shallow_copy()))
}

pub(super) fn native_keys(this: &Value, _args: &[Value]) -> Result<Value, String> {
    let object = receiver_object(this, "keys")?;
    Ok(Value::array(
        object.keys().into_iter().map(Value::from).collect(),
    ))
}

pub(super) fn native_values(this: &Value, _args: &[Value]) -> Result<Value, String> {
    let object = receiver_object(this, "values")?;
    Ok(Value::array(object.values()))
}
