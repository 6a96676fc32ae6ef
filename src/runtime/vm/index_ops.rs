use crate::runtime::{runtime_error::RuntimeErrorKind, value::Value};

use super::VM;

impl VM {
    /// `GET` / `GETWT`: pops key and container and pushes the property.
    /// With `keep_receiver` the container is pushed back underneath it.
    pub(super) fn execute_get(&mut self, keep_receiver: bool) -> Result<(), RuntimeErrorKind> {
        let key = self.pop()?;
        let container = self.pop()?;
        let value = self.get_property(&container, &key)?;
        if keep_receiver {
            self.push(container);
        }
        self.push(value);
        Ok(())
    }

    /// `SET`: pops value, key and container, stores, and pushes the value.
    pub(super) fn execute_set(&mut self) -> Result<(), RuntimeErrorKind> {
        let value = self.pop()?;
        let key = self.pop()?;
        let container = self.pop()?;
        self.set_property(&container, &key, value.clone())?;
        self.push(value);
        Ok(())
    }

    pub(super) fn get_property(
        &self,
        container: &Value,
        key: &Value,
    ) -> Result<Value, RuntimeErrorKind> {
        let found = match (container, key) {
            (Value::Object(object), Value::Text(name)) => object.get(name),
            (Value::Array(array), Value::Number(index)) => array.get(*index),
            (_, Value::Text(name)) => match self.prototypes.for_value(container) {
                Some(proto) => proto.get(name),
                None => {
                    return Err(RuntimeErrorKind::NotIndexable {
                        container: container.type_name(),
                    });
                }
            },
            (Value::Object(_) | Value::Array(_), _) => {
                return Err(RuntimeErrorKind::BadKeyType {
                    container: container.type_name(),
                    key: key.type_name(),
                });
            }
            _ => match self.prototypes.for_value(container) {
                Some(_) => {
                    return Err(RuntimeErrorKind::BadKeyType {
                        container: container.type_name(),
                        key: key.type_name(),
                    });
                }
                None => {
                    return Err(RuntimeErrorKind::NotIndexable {
                        container: container.type_name(),
                    });
                }
            },
        };
        Ok(found.unwrap_or(Value::None))
    }

    pub(super) fn set_property(
        &self,
        container: &Value,
        key: &Value,
        value: Value,
    ) -> Result<(), RuntimeErrorKind> {
        match (container, key) {
            (Value::Object(object), Value::Text(name)) => {
                object.set(name.to_string(), value);
                Ok(())
            }
            (Value::Array(array), Value::Number(index)) => {
                array.set(*index, value);
                Ok(())
            }
            (Value::Object(_) | Value::Array(_), _) => Err(RuntimeErrorKind::BadKeyType {
                container: container.type_name(),
                key: key.type_name(),
            }),
            _ => Err(RuntimeErrorKind::NotIndexable {
                container: container.type_name(),
            }),
        }
    }
}
