use crate::runtime::{native_function::NativeFunction, object::KulaObject, value::Value};

use super::helpers::{receiver_number, register};

pub(super) fn install(proto: &KulaObject) {
    register(proto, NativeFunction::new("floor", 0, native_floor));
    register(proto, NativeFunction::new("round", 0, native_round));
}

pub(super) fn native_floor(this: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Number(receiver_number(this, "floor")?.floor()))
}

/// Rounds half away from zero.
pub(super) fn native_round(this: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Number(receiver_number(this, "round")?.round()))
}
