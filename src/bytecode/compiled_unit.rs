use serde::{Serialize, Serializer};

use crate::bytecode::op_code::OpCode;

/// Number of literals every unit starts with: `false`, `true`, `none`.
pub const PRESEEDED_LITERALS: usize = 3;

pub const LITERAL_FALSE: usize = 0;
pub const LITERAL_TRUE: usize = 1;
pub const LITERAL_NONE: usize = 2;

/// One decoded instruction. `operand` is zero for opcodes without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instruction {
    #[serde(serialize_with = "serialize_op")]
    pub op: OpCode,
    pub operand: u16,
}

impl Instruction {
    pub fn new(op: OpCode) -> Self {
        Self { op, operand: 0 }
    }

    pub fn with_operand(op: OpCode, operand: u16) -> Self {
        Self { op, operand }
    }
}

fn serialize_op<S: Serializer>(op: &OpCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(op.mnemonic())
}

/// Literal pool entry as it appears in the artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Literal {
    None,
    Bool(bool),
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionChunk {
    /// Symbol indexes of the parameters, in declaration order.
    pub params: Vec<u16>,
    pub instructions: Vec<Instruction>,
}

impl FunctionChunk {
    pub fn new(params: Vec<u16>, instructions: Vec<Instruction>) -> Self {
        Self {
            params,
            instructions,
        }
    }
}

/// The loaded, immutable form of one compiled program.
///
/// The engine never mutates a unit; it is shared behind an `Rc` while a VM
/// runs it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledUnit {
    symbols: Vec<String>,
    literals: Vec<Literal>,
    top_level: Vec<Instruction>,
    functions: Vec<FunctionChunk>,
}

impl CompiledUnit {
    /// Builds a unit from already-decoded parts. `loaded_literals` must not
    /// include the three pre-seeded constants; they are prepended here.
    pub fn new(
        symbols: Vec<String>,
        loaded_literals: Vec<Literal>,
        top_level: Vec<Instruction>,
        functions: Vec<FunctionChunk>,
    ) -> Self {
        let mut literals = Vec::with_capacity(PRESEEDED_LITERALS + loaded_literals.len());
        literals.push(Literal::Bool(false));
        literals.push(Literal::Bool(true));
        literals.push(Literal::None);
        literals.extend(loaded_literals);

        Self {
            symbols,
            literals,
            top_level,
            functions,
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Full literal pool, pre-seeded constants included.
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Literals that were read from the artifact.
    pub fn loaded_literals(&self) -> &[Literal] {
        &self.literals[PRESEEDED_LITERALS..]
    }

    pub fn top_level(&self) -> &[Instruction] {
        &self.top_level
    }

    pub fn functions(&self) -> &[FunctionChunk] {
        &self.functions
    }

    pub fn symbol(&self, index: usize) -> Option<&str> {
        self.symbols.get(index).map(String::as_str)
    }

    pub fn literal(&self, index: usize) -> Option<&Literal> {
        self.literals.get(index)
    }

    pub fn function(&self, index: usize) -> Option<&FunctionChunk> {
        self.functions.get(index)
    }

    /// Instruction sequence selected by a frame pointer (`None` is top level).
    pub fn chunk(&self, frame_pointer: Option<usize>) -> &[Instruction] {
        match frame_pointer {
            None => &self.top_level,
            Some(index) => self
                .functions
                .get(index)
                .map(|function| function.instructions.as_slice())
                .unwrap_or(&[]),
        }
    }

    pub fn instruction_count(&self) -> usize {
        self.top_level.len()
            + self
                .functions
                .iter()
                .map(|function| function.instructions.len())
                .sum::<usize>()
    }
}
