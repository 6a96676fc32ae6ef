mod byte_reader;
pub mod compiled_unit;
pub mod encoder;
pub mod fingerprint;
pub mod listing;
pub mod load_error;
pub mod loader;
pub mod op_code;

pub use compiled_unit::{CompiledUnit, FunctionChunk, Instruction, Literal};
pub use load_error::LoadError;
pub use loader::{load, load_bytes, load_from_reader};
