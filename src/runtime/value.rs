use std::{collections::HashSet, fmt, rc::Rc, vec};

use crate::runtime::{
    array::KulaArray,
    closure::Closure,
    native_function::NativeFunction,
    object::{KulaObject, PROTO_KEY},
};

/// Runtime value used by operand stacks, environments and containers.
///
/// Primitives are unboxed. `Text` is immutable and shared through `Rc<str>`;
/// arrays and objects are shared mutable storage, so cloning a `Value` copies
/// the handle and every holder observes the same mutations.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absence of value, printed as `null`.
    None,
    Bool(bool),
    /// IEEE-754 double; there is no separate integer type.
    Number(f64),
    Text(Rc<str>),
    Array(Rc<KulaArray>),
    Object(Rc<KulaObject>),
    Closure(Rc<Closure>),
    Native(Rc<NativeFunction>),
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(KulaArray::from_vec(items)))
    }

    pub fn object(object: KulaObject) -> Self {
        Value::Object(Rc::new(object))
    }

    pub fn native(native: NativeFunction) -> Self {
        Value::Native(Rc::new(native))
    }

    /// Type label shown by `typeof` and in runtime errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "None",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::Text(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Closure(_) | Value::Native(_) => "Function",
        }
    }

    /// Only `None` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::None | Value::Bool(false))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Canonical stringification used by `PRINT` and `String(x)`.
    pub fn stringify(&self) -> String {
        Renderer::render(self)
    }
}

/// Formats a number with eight fractional digits, then trims trailing zeros
/// and a dangling decimal point.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    let fixed = format!("{:.8}", value);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// A container whose elements are still being written.
struct OpenContainer {
    ptr: *const (),
    close: char,
    items: vec::IntoIter<(Option<String>, Value)>,
    first: bool,
}

struct Renderer {
    out: String,
    open: HashSet<*const ()>,
    pending: Vec<OpenContainer>,
}

impl Renderer {
    fn render(value: &Value) -> String {
        let mut renderer = Renderer {
            out: String::new(),
            open: HashSet::new(),
            pending: Vec::new(),
        };
        renderer.write(value, false);
        while let Some(container) = renderer.pending.last_mut() {
            match container.items.next() {
                Some((key, item)) => {
                    if !container.first {
                        renderer.out.push(',');
                    }
                    container.first = false;
                    if let Some(key) = key {
                        renderer.out.push('"');
                        renderer.out.push_str(&key);
                        renderer.out.push_str("\":");
                    }
                    renderer.write(&item, true);
                }
                None => {
                    renderer.out.push(container.close);
                    let ptr = container.ptr;
                    renderer.open.remove(&ptr);
                    renderer.pending.pop();
                }
            }
        }
        renderer.out
    }

    /// Writes scalars in place; containers are opened and queued.
    fn write(&mut self, value: &Value, nested: bool) {
        let out = &mut self.out;
        match value {
            Value::None => out.push_str("null"),
            Value::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            Value::Number(value) => out.push_str(&format_number(*value)),
            Value::Text(text) if nested => {
                out.push('"');
                out.push_str(text);
                out.push('"');
            }
            Value::Text(text) => out.push_str(text),
            Value::Closure(_) | Value::Native(_) => out.push_str("<Function>"),
            Value::Array(array) => {
                let items = array.items().iter().map(|item| (None, item.clone())).collect();
                self.open_container(Rc::as_ptr(array) as *const (), '[', ']', items);
            }
            Value::Object(object) => {
                let entries = object
                    .entries()
                    .iter()
                    .filter(|(key, _)| key.as_str() != PROTO_KEY)
                    .map(|(key, item)| (Some(key.clone()), item.clone()))
                    .collect();
                self.open_container(Rc::as_ptr(object) as *const (), '{', '}', entries);
            }
        }
    }

    fn open_container(
        &mut self,
        ptr: *const (),
        open: char,
        close: char,
        items: Vec<(Option<String>, Value)>,
    ) {
        if !self.open.insert(ptr) {
            self.out.push(open);
            self.out.push_str("...");
            self.out.push(close);
            return;
        }
        self.out.push(open);
        self.pending.push(OpenContainer {
            ptr,
            close,
            items: items.into_iter(),
            first: true,
        });
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

/// Numbers, booleans, `None` and text compare by content; containers and
/// functions compare by identity. Values of different kinds are unequal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(Rc::from(value))
    }
}
