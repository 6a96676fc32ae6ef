//! Writer for the artifact format read by [`crate::bytecode::loader`].
//!
//! The front end that normally produces artifacts lives outside this crate;
//! the encoder exists so hosts, tests and benches can produce conformant
//! bytes from an in-memory unit.

use std::io::{self, Write};

use super::{
    compiled_unit::{CompiledUnit, Instruction, Literal},
    loader::{MAGIC_NUMBER, SEPARATOR, TAG_DOUBLE, TAG_STRING},
    op_code::operand_width,
};

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn write_u16<W: Write>(writer: &mut W, value: u16) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

fn write_instructions<W: Write>(writer: &mut W, instructions: &[Instruction]) -> io::Result<()> {
    for instruction in instructions {
        writer.write_all(&[instruction.op as u8])?;
        match operand_width(instruction.op) {
            1 => {
                let operand = u8::try_from(instruction.operand).map_err(|_| {
                    invalid(format!(
                        "operand {} does not fit {}",
                        instruction.operand, instruction.op
                    ))
                })?;
                writer.write_all(&[operand])?;
            }
            2 => write_u16(writer, instruction.operand)?,
            _ => {}
        }
    }
    writer.write_all(&[SEPARATOR])
}

fn write_literal<W: Write>(writer: &mut W, literal: &Literal) -> io::Result<()> {
    match literal {
        Literal::Number(value) => {
            writer.write_all(&[TAG_DOUBLE])?;
            writer.write_all(&value.to_le_bytes())
        }
        Literal::Text(text) => {
            let len = u32::try_from(text.len())
                .map_err(|_| invalid(format!("string literal of {} bytes", text.len())))?;
            writer.write_all(&[TAG_STRING])?;
            writer.write_all(&len.to_le_bytes())?;
            writer.write_all(text.as_bytes())
        }
        Literal::None | Literal::Bool(_) => Err(invalid(
            "only number and string literals can be stored in an artifact".to_string(),
        )),
    }
}

pub fn write_unit<W: Write>(writer: &mut W, unit: &CompiledUnit) -> io::Result<()> {
    write_u16(writer, MAGIC_NUMBER)?;

    for symbol in unit.symbols() {
        let len = u8::try_from(symbol.len())
            .ok()
            .filter(|len| *len != SEPARATOR)
            .ok_or_else(|| invalid(format!("symbol `{}` is too long", symbol)))?;
        writer.write_all(&[len])?;
        writer.write_all(symbol.as_bytes())?;
    }
    writer.write_all(&[SEPARATOR])?;

    for literal in unit.loaded_literals() {
        write_literal(writer, literal)?;
    }
    writer.write_all(&[SEPARATOR])?;

    write_instructions(writer, unit.top_level())?;

    for function in unit.functions() {
        let count = u8::try_from(function.params.len())
            .map_err(|_| invalid(format!("{} parameters", function.params.len())))?;
        writer.write_all(&[count])?;
        for param in &function.params {
            write_u16(writer, *param)?;
        }
        write_instructions(writer, &function.instructions)?;
    }
    Ok(())
}

pub fn encode(unit: &CompiledUnit) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_unit(&mut bytes, unit)?;
    Ok(bytes)
}
