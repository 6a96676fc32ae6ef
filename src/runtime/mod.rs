//! Runtime values, scopes and the VM that executes a loaded unit.
//!
//! # Reference cycles
//! Arrays and objects are shared, mutable and reference counted. Programs can
//! build cycles (an object stored inside itself, a closure stored in the scope
//! it captured), and such graphs are not reclaimed before the VM is dropped.
//! Stringification and prototype lookup guard against cycles so they always
//! terminate.

pub mod array;
pub mod closure;
pub mod environment;
pub mod frame;
pub mod native_function;
pub mod object;
pub mod output;
pub mod prototypes;
pub mod runtime_error;
pub mod stack;
pub mod stdlib;
mod teardown;
pub mod value;
pub mod vm;

pub use runtime_error::RuntimeError;
pub use value::Value;
pub use vm::VM;
