use std::{rc::Rc, time::Instant};

use crate::runtime::{
    environment::Environment,
    native_function::NativeFunction,
    object::KulaObject,
    value::Value,
};

use super::helpers::{arg_value, type_error};

fn define_native(globals: &Environment, native: NativeFunction) {
    let name = native.name.clone();
    globals.define(name, Value::native(native));
}

pub(super) fn install(globals: &Environment, object_proto: &Rc<KulaObject>) {
    let started = Instant::now();
    define_native(
        globals,
        NativeFunction::new("clock", 0, move |_, _| {
            Ok(Value::Number(started.elapsed().as_secs_f64()))
        }),
    );
    define_native(globals, NativeFunction::new("String", 1, native_string));
    define_native(globals, NativeFunction::new("Bool", 1, native_bool));
    define_native(globals, NativeFunction::new("Array", 0, native_array));
    define_native(globals, NativeFunction::variadic("asArray", native_as_array));
    define_native(globals, NativeFunction::variadic("typeof", native_typeof));

    let proto = Rc::clone(object_proto);
    define_native(
        globals,
        NativeFunction::new("Object", 0, move |_, _| {
            Ok(Value::object(KulaObject::with_proto(&proto)))
        }),
    );
    let proto = Rc::clone(object_proto);
    define_native(
        globals,
        NativeFunction::variadic("asObject", move |_, args| {
            as_object(&proto, args)
        }),
    );
}

pub(super) fn native_string(_this: &Value, args: &[Value]) -> Result<Value, String> {
    Ok(Value::from(arg_value(args, 0).stringify()))
}

pub(super) fn native_bool(_this: &Value, args: &[Value]) -> Result<Value, String> {
    Ok(Value::Bool(arg_value(args, 0).is_truthy()))
}

pub(super) fn native_array(_this: &Value, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::array(Vec::new()))
}

pub(super) fn native_as_array(_this: &Value, args: &[Value]) -> Result<Value, String> {
    Ok(Value::array(args.to_vec()))
}

/// Type of the argument, or of the call site when called with none.
pub(super) fn native_typeof(this: &Value, args: &[Value]) -> Result<Value, String> {
    let subject = args.first().unwrap_or(this);
    Ok(Value::from(subject.type_name()))
}

pub(super) fn as_object(proto: &Rc<KulaObject>, args: &[Value]) -> Result<Value, String> {
    if args.len() % 2 == 1 {
        return Err(format!(
            "asObject expected key/value pairs, got {} arguments",
            args.len()
        ));
    }
    let object = KulaObject::with_proto(proto);
    for pair in args.chunks_exact(2) {
        match &pair[0] {
            Value::Text(key) => object.set(key.to_string(), pair[1].clone()),
            other => return Err(type_error("asObject", "key", "String", other.type_name())),
        }
    }
    Ok(Value::object(object))
}
