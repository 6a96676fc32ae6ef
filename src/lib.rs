pub mod bytecode;
pub mod runtime;
