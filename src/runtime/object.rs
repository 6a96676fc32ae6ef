use std::{
    cell::{Ref, RefCell},
    collections::BTreeMap,
    rc::Rc,
};

use crate::runtime::{closure::Closure, teardown::Teardown, value::Value};

/// Entry holding the prototype link. It is an ordinary map entry; only an
/// `Object` value stored under it acts as a prototype.
pub const PROTO_KEY: &str = "__proto__";

/// Entry that makes an object callable when it holds a closure.
pub const FUNC_KEY: &str = "__func__";

/// String-keyed object shared by reference.
///
/// Keys are kept sorted so that stringification, `keys()` and `values()` are
/// deterministic.
#[derive(Debug, Default)]
pub struct KulaObject {
    entries: RefCell<BTreeMap<String, Value>>,
}

impl KulaObject {
    /// An object with no prototype link.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_proto(proto: &Rc<KulaObject>) -> Self {
        let object = Self::new();
        object.set(PROTO_KEY, Value::Object(Rc::clone(proto)));
        object
    }

    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn proto(&self) -> Option<Rc<KulaObject>> {
        match self.entries.borrow().get(PROTO_KEY) {
            Some(Value::Object(proto)) => Some(Rc::clone(proto)),
            _ => None,
        }
    }

    /// Own entry, else the nearest entry along the `__proto__` chain.
    ///
    /// A chain that revisits an object ends the lookup with `None`.
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.get_own(key) {
            return Some(value);
        }
        let mut visited: Vec<*const KulaObject> = vec![self as *const KulaObject];
        let mut next = self.proto();
        while let Some(proto) = next {
            let ptr = Rc::as_ptr(&proto);
            if visited.contains(&ptr) {
                return None;
            }
            if let Some(value) = proto.get_own(key) {
                return Some(value);
            }
            visited.push(ptr);
            next = proto.proto();
        }
        None
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.entries.borrow_mut().insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Own keys in sorted order, prototype link excluded.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .borrow()
            .keys()
            .filter(|key| key.as_str() != PROTO_KEY)
            .cloned()
            .collect()
    }

    /// Own values in key order, prototype link excluded.
    pub fn values(&self) -> Vec<Value> {
        self.entries
            .borrow()
            .iter()
            .filter(|(key, _)| key.as_str() != PROTO_KEY)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Copies every own entry, the prototype link included.
    pub fn shallow_copy(&self) -> Self {
        Self {
            entries: RefCell::new(self.entries.borrow().clone()),
        }
    }

    /// The closure stored under `__func__`, if any.
    pub fn function(&self) -> Option<Rc<Closure>> {
        match self.get(FUNC_KEY) {
            Some(Value::Closure(closure)) => Some(closure),
            _ => None,
        }
    }

    pub fn entries(&self) -> Ref<'_, BTreeMap<String, Value>> {
        self.entries.borrow()
    }

    pub(crate) fn take_values(&self) -> Vec<Value> {
        std::mem::take(&mut *self.entries.borrow_mut())
            .into_values()
            .collect()
    }
}

impl Drop for KulaObject {
    fn drop(&mut self) {
        let entries = std::mem::take(self.entries.get_mut());
        if !entries.is_empty() {
            Teardown::values(entries.into_values()).run();
        }
    }
}
