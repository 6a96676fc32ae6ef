//! Binary loader for compiled `kulac` artifacts.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! magic        u16 = 0x1701
//! symbols      { len: u8, utf8[len] }*                      0xFF
//! literals     { tag: u8, payload }*                        0xFF
//! top level    { op: u8, operand[width(op)] }*              0xFF
//! functions    { n: u8, param: u16 * n, instruction* 0xFF }* EOF
//! ```
//!
//! The function section is the only one terminated by end of stream, and only
//! at the point where the next parameter count would be read.

use std::{fs::File, io::Read, path::Path};

use super::{
    byte_reader::ByteReader,
    compiled_unit::{CompiledUnit, FunctionChunk, Instruction, Literal},
    load_error::{LoadError, Section},
    op_code::{OpCode, operand_width},
};

pub const MAGIC_NUMBER: u16 = 0x1701;
pub const SEPARATOR: u8 = 0xFF;

pub const TAG_NONE: u8 = 0x80;
pub const TAG_BOOL: u8 = 0x81;
pub const TAG_DOUBLE: u8 = 0x82;
pub const TAG_STRING: u8 = 0x83;

pub fn load(path: impl AsRef<Path>) -> Result<CompiledUnit, LoadError> {
    let file = File::open(path)?;
    load_from_reader(std::io::BufReader::new(file))
}

pub fn load_bytes(bytes: &[u8]) -> Result<CompiledUnit, LoadError> {
    load_from_reader(bytes)
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<CompiledUnit, LoadError> {
    let mut reader = ByteReader::new(reader);

    let magic = reader.read_u16()?;
    if magic != MAGIC_NUMBER {
        return Err(LoadError::BadMagic { found: magic });
    }

    reader.enter(Section::Symbols);
    let symbols = read_symbols(&mut reader)?;

    reader.enter(Section::Literals);
    let literals = read_literals(&mut reader)?;

    reader.enter(Section::TopLevel);
    let top_level = read_instructions(&mut reader)?;

    reader.enter(Section::Functions);
    let functions = read_functions(&mut reader)?;

    Ok(CompiledUnit::new(symbols, literals, top_level, functions))
}

fn read_symbols<R: Read>(reader: &mut ByteReader<R>) -> Result<Vec<String>, LoadError> {
    let mut symbols = Vec::new();
    loop {
        let len = reader.read_u8()?;
        if len == SEPARATOR {
            return Ok(symbols);
        }
        symbols.push(reader.read_text(len as usize)?);
    }
}

fn read_literals<R: Read>(reader: &mut ByteReader<R>) -> Result<Vec<Literal>, LoadError> {
    let mut literals = Vec::new();
    loop {
        match reader.read_u8()? {
            SEPARATOR => return Ok(literals),
            // Reserved markers: accepted, contribute nothing to the pool.
            TAG_NONE | TAG_BOOL => {}
            TAG_DOUBLE => literals.push(Literal::Number(reader.read_f64()?)),
            TAG_STRING => {
                let len = reader.read_u32()? as usize;
                literals.push(Literal::Text(reader.read_text(len)?));
            }
            tag => return Err(LoadError::UnknownLiteralTag { tag }),
        }
    }
}

fn read_instructions<R: Read>(
    reader: &mut ByteReader<R>,
) -> Result<Vec<Instruction>, LoadError> {
    let mut instructions = Vec::new();
    loop {
        let byte = reader.read_u8()?;
        if byte == SEPARATOR {
            return Ok(instructions);
        }
        instructions.push(read_instruction(reader, byte)?);
    }
}

fn read_instruction<R: Read>(
    reader: &mut ByteReader<R>,
    byte: u8,
) -> Result<Instruction, LoadError> {
    let op = OpCode::try_from(byte).map_err(|byte| LoadError::UnknownOpcode {
        section: reader.section(),
        byte,
    })?;
    let operand = match operand_width(op) {
        1 => reader.read_u8()? as u16,
        2 => reader.read_u16()?,
        _ => 0,
    };
    Ok(Instruction::with_operand(op, operand))
}

fn read_functions<R: Read>(reader: &mut ByteReader<R>) -> Result<Vec<FunctionChunk>, LoadError> {
    let mut functions = Vec::new();
    while let Some(param_count) = reader.try_read_u8()? {
        let mut params = Vec::with_capacity(param_count as usize);
        for _ in 0..param_count {
            params.push(reader.read_u16()?);
        }
        let instructions = read_instructions(reader)?;
        functions.push(FunctionChunk::new(params, instructions));
    }
    Ok(functions)
}
