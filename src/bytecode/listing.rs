use std::fmt::Write;

use super::{
    compiled_unit::{CompiledUnit, Instruction, Literal},
    op_code::{OpCode, operand_width},
};
use crate::runtime::value::format_number;

fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::None => "null".to_string(),
        Literal::Bool(value) => value.to_string(),
        Literal::Number(value) => format_number(*value),
        Literal::Text(text) => format!("{:?}", text),
    }
}

fn annotate(unit: &CompiledUnit, instruction: &Instruction) -> Option<String> {
    let index = instruction.operand as usize;
    match instruction.op {
        OpCode::OpLoad | OpCode::OpDeclare | OpCode::OpAssign => Some(
            unit.symbol(index)
                .map(str::to_string)
                .unwrap_or_else(|| "<invalid symbol>".to_string()),
        ),
        OpCode::OpLoadConst => Some(
            unit.literal(index)
                .map(render_literal)
                .unwrap_or_else(|| "<invalid literal>".to_string()),
        ),
        _ => None,
    }
}

fn write_instructions(out: &mut String, unit: &CompiledUnit, instructions: &[Instruction]) {
    for (index, instruction) in instructions.iter().enumerate() {
        let _ = write!(out, "{:04} {}", index, instruction.op);
        if operand_width(instruction.op) > 0 {
            let _ = write!(out, " {}", instruction.operand);
        }
        if let Some(note) = annotate(unit, instruction) {
            let _ = write!(out, "  ; {}", note);
        }
        out.push('\n');
    }
}

/// Renders a unit the way `kula show` prints it.
pub fn render(unit: &CompiledUnit) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str("==== Symbols ====\n");
    for (index, symbol) in unit.symbols().iter().enumerate() {
        let _ = writeln!(out, "{:4}  {}", index, symbol);
    }

    out.push_str("==== Literals ====\n");
    for (index, literal) in unit.literals().iter().enumerate() {
        let _ = writeln!(out, "{:4}  {}", index, render_literal(literal));
    }

    out.push_str("==== Instructions ====\n");
    write_instructions(&mut out, unit, unit.top_level());

    out.push_str("==== Functions ====\n");
    for (index, function) in unit.functions().iter().enumerate() {
        let params: Vec<String> = function
            .params
            .iter()
            .map(|param| {
                unit.symbol(*param as usize)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", param))
            })
            .collect();
        let _ = writeln!(out, "---- F {} ({}) ----", index, params.join(", "));
        write_instructions(&mut out, unit, &function.instructions);
    }

    out
}

/// One-line description used by `kula run --verbose`.
pub fn summary(unit: &CompiledUnit) -> String {
    format!(
        "{} symbols, {} literals, {} instructions, {} functions",
        unit.symbols().len(),
        unit.loaded_literals().len(),
        unit.instruction_count(),
        unit.functions().len()
    )
}
