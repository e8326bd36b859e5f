//! Disassembler: program → text listing.
//!
//! One line per instruction: the mnemonic followed by each operand as
//! `slot:kind:type:text`. Unknown mnemonics and slots are listed as
//! written.

use tacy_common::{Instruction, Operand, Program};

/// Render a program as a text listing.
pub fn disassemble(program: &Program) -> String {
    let mut out = String::new();
    for instr in &program.instructions {
        out.push_str(&instruction_line(instr));
        out.push('\n');
    }
    out
}

fn instruction_line(instr: &Instruction) -> String {
    let mut line = instr.mnemonic.clone();
    for operand in &instr.operands {
        line.push(' ');
        line.push_str(&operand_field(operand));
    }
    line
}

fn operand_field(operand: &Operand) -> String {
    format!(
        "{}:{}:{}:{}",
        operand.slot,
        operand.kind.name(),
        operand.data_type.name(),
        operand.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacy_common::{DataType, Opcode, Slot};

    #[test]
    fn empty_program() {
        assert_eq!(disassemble(&Program::default()), "");
    }

    #[test]
    fn operands_in_order() {
        let program = Program::new(vec![
            Instruction::new(
                Opcode::Add,
                vec![
                    Operand::variable(Slot::Dst, DataType::Integer, "r"),
                    Operand::variable(Slot::Src1, DataType::Integer, "a"),
                    Operand::literal(Slot::Src2, DataType::Integer, "1"),
                ],
            ),
            Instruction::new(Opcode::Return, vec![]),
        ]);
        assert_eq!(
            disassemble(&program),
            "ADD dst:variable:integer:r src1:variable:integer:a src2:literal:integer:1\nRETURN\n"
        );
    }

    #[test]
    fn unknown_names_listed_verbatim() {
        let program = Program::new(vec![Instruction::from_mnemonic(
            "NOP",
            vec![Operand::literal(
                Slot::Other("extra".to_string()),
                DataType::String,
                "",
            )],
        )]);
        assert_eq!(disassemble(&program), "NOP extra:literal:string:\n");
    }
}
