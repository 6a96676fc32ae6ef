//! Standard library installed into every VM's global scope.

use std::rc::Rc;

use crate::runtime::{environment::Environment, prototypes::Prototypes, value::Value};

mod array_ops;
mod global_ops;
mod helpers;
mod number_ops;
mod object_ops;
mod string_ops;


/// Defines the global natives and prototype globals, and fills the built-in
/// prototypes with their methods.
pub fn install(globals: &Environment, prototypes: &Prototypes) {
    global_ops::install(globals, &prototypes.object);

    object_ops::install(&prototypes.object);
    array_ops::install(&prototypes.array);
    string_ops::install(&prototypes.string);
    number_ops::install(&prototypes.number);

    let proto_globals = [
        ("__object_proto__", &prototypes.object),
        ("__array_proto__", &prototypes.array),
        ("__string_proto__", &prototypes.string),
        ("__number_proto__", &prototypes.number),
        ("__bool_proto__", &prototypes.boolean),
    ];
    for (name, proto) in proto_globals {
        globals.define(name, Value::Object(Rc::clone(proto)));
    }
}
