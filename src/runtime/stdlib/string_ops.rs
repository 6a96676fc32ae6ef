use crate::runtime::{native_function::NativeFunction, object::KulaObject, value::Value};

use super::helpers::{arg_number, arg_text, char_index, receiver_text, register};

pub(super) fn install(proto: &KulaObject) {
    register(proto, NativeFunction::new("at", 1, native_at));
    register(proto, NativeFunction::new("cut", 2, native_cut));
    register(proto, NativeFunction::new("length", 0, native_length));
    register(proto, NativeFunction::new("split", 1, native_split));
    register(proto, NativeFunction::new("parse", 0, native_parse));
    register(proto, NativeFunction::new("charCode", 1, native_char_code));
}

pub(super) fn native_at(this: &Value, args: &[Value]) -> Result<Value, String> {
    let text = receiver_text(this, "at")?;
    let index = arg_number(args, 0, "at", "index")?;
    Ok(char_index(index)
        .and_then(|index| text.chars().nth(index))
        .map(|ch| Value::from(ch.to_string()))
        .unwrap_or(Value::None))
}

/// `cut(start, count)`: both bounds are clamped to the text.
pub(super) fn native_cut(this: &Value, args: &[Value]) -> Result<Value, String> {
    let text = receiver_text(this, "cut")?;
    let start = arg_number(args, 0, "cut", "start")?;
    let count = arg_number(args, 1, "cut", "count")?;
    let start = char_index(start).unwrap_or(0);
    let count = char_index(count).unwrap_or(0);
    Ok(Value::from(
        text.chars().skip(start).take(count).collect::<String>(),
    ))
}

pub(super) fn native_length(this: &Value, _args: &[Value]) -> Result<Value, String> {
    let text = receiver_text(this, "length")?;
    Ok(Value::Number(text.chars().count() as f64))
}

pub(super) fn native_split(this: &Value, args: &[Value]) -> Result<Value, String> {
    let text = receiver_text(this, "split")?;
    let separator = arg_text(args, 0, "split", "separator")?;
    let parts: Vec<Value> = if separator.is_empty() {
        text.chars().map(|ch| Value::from(ch.to_string())).collect()
    } else {
        text.split(separator).map(Value::from).collect()
    };
    Ok(Value::array(parts))
}

pub(super) fn native_parse(this: &Value, _args: &[Value]) -> Result<Value, String> {
    let text = receiver_text(this, "parse")?;
    Ok(text
        .trim()
        .parse::<f64>()
        .map(Value::Number)
        .unwrap_or(Value::None))
}

pub(super) fn native_char_code(this: &Value, args: &[Value]) -> Result<Value, String> {
    let text = receiver_text(this, "charCode")?;
    let index = arg_number(args, 0, "charCode", "index")?;
    Ok(char_index(index)
        .and_then(|index| text.chars().nth(index))
        .map(|ch| Value::Number(ch as u32 as f64))
        .unwrap_or(Value::None))
}
