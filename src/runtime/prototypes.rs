use std::rc::Rc;

use crate::runtime::{object::KulaObject, value::Value};

/// Built-in prototype objects owned by one VM.
///
/// `array`, `string`, `number` and `boolean` chain to `object`, so methods on
/// the object prototype are reachable from every kind.
#[derive(Debug, Clone)]
pub struct Prototypes {
    pub object: Rc<KulaObject>,
    pub array: Rc<KulaObject>,
    pub string: Rc<KulaObject>,
    pub number: Rc<KulaObject>,
    pub boolean: Rc<KulaObject>,
}

impl Default for Prototypes {
    fn default() -> Self {
        Self::new()
    }
}

impl Prototypes {
    pub fn new() -> Self {
        let object = Rc::new(KulaObject::new());
        let derived = || Rc::new(KulaObject::with_proto(&object));
        Self {
            array: derived(),
            string: derived(),
            number: derived(),
            boolean: derived(),
            object,
        }
    }

    /// Prototype consulted for property reads on a non-object value.
    pub fn for_value(&self, value: &Value) -> Option<&Rc<KulaObject>> {
        match value {
            Value::Array(_) => Some(&self.array),
            Value::Text(_) => Some(&self.string),
            Value::Number(_) => Some(&self.number),
            Value::Bool(_) => Some(&self.boolean),
            _ => None,
        }
    }

    /// A fresh object linked to the object prototype.
    pub fn new_object(&self) -> KulaObject {
        KulaObject::with_proto(&self.object)
    }
}
