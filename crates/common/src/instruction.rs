//! Instructions: an opcode plus up to three operand slots.
//!
//! ```text
//! <tac opcode="ADD">
//!   <dst  kind="variable" type="integer">sum</dst>
//!   <src1 kind="variable" type="integer">a</src1>
//!   <src2 kind="literal"  type="integer">1</src2>
//! </tac>
//! ```

use crate::opcode::Opcode;
use crate::operand::{Operand, Slot};

/// A single TAC instruction.
///
/// Instructions are built once at load time and never mutated. The raw
/// mnemonic is always kept; `opcode` is `None` when the mnemonic is not
/// part of the instruction set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Mnemonic as written in the source.
    pub mnemonic: String,
    /// Decoded opcode, if the mnemonic is recognized.
    pub opcode: Option<Opcode>,
    /// Operands in source order.
    pub operands: Vec<Operand>,
}

impl Instruction {
    /// Create an instruction with a known opcode.
    pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self {
            mnemonic: opcode.mnemonic().to_string(),
            opcode: Some(opcode),
            operands,
        }
    }

    /// Create an instruction from a raw mnemonic, decoding it if possible.
    pub fn from_mnemonic(mnemonic: impl Into<String>, operands: Vec<Operand>) -> Self {
        let mnemonic = mnemonic.into();
        let opcode = mnemonic.parse().ok();
        Self {
            mnemonic,
            opcode,
            operands,
        }
    }

    /// Returns the first operand occupying `slot`.
    pub fn operand(&self, slot: &Slot) -> Option<&Operand> {
        self.operands.iter().find(|op| &op.slot == slot)
    }

    pub fn dst(&self) -> Option<&Operand> {
        self.operand(&Slot::Dst)
    }

    pub fn src1(&self) -> Option<&Operand> {
        self.operand(&Slot::Src1)
    }

    pub fn src2(&self) -> Option<&Operand> {
        self.operand(&Slot::Src2)
    }

    /// Returns true if this is a LABEL instruction.
    pub fn is_label(&self) -> bool {
        self.opcode == Some(Opcode::Label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::DataType;

    fn add_instr() -> Instruction {
        Instruction::new(
            Opcode::Add,
            vec![
                Operand::variable(Slot::Dst, DataType::Integer, "sum"),
                Operand::variable(Slot::Src1, DataType::Integer, "a"),
                Operand::literal(Slot::Src2, DataType::Integer, "1"),
            ],
        )
    }

    #[test]
    fn new_sets_mnemonic() {
        let instr = add_instr();
        assert_eq!(instr.mnemonic, "ADD");
        assert_eq!(instr.opcode, Some(Opcode::Add));
    }

    #[test]
    fn slot_lookup() {
        let instr = add_instr();
        assert_eq!(instr.dst().map(|op| op.text.as_str()), Some("sum"));
        assert_eq!(instr.src1().map(|op| op.text.as_str()), Some("a"));
        assert_eq!(instr.src2().map(|op| op.text.as_str()), Some("1"));
    }

    #[test]
    fn missing_slot_is_none() {
        let instr = Instruction::new(Opcode::Return, vec![]);
        assert!(instr.dst().is_none());
        assert!(instr.src1().is_none());
    }

    #[test]
    fn first_operand_wins_for_repeated_slot() {
        let instr = Instruction::new(
            Opcode::Print,
            vec![
                Operand::literal(Slot::Src1, DataType::String, "first"),
                Operand::literal(Slot::Src1, DataType::String, "second"),
            ],
        );
        assert_eq!(instr.src1().map(|op| op.text.as_str()), Some("first"));
    }

    #[test]
    fn from_mnemonic_decodes_known() {
        let instr = Instruction::from_mnemonic("LABEL", vec![]);
        assert_eq!(instr.opcode, Some(Opcode::Label));
        assert!(instr.is_label());
    }

    #[test]
    fn from_mnemonic_keeps_unknown() {
        let instr = Instruction::from_mnemonic("HALT", vec![]);
        assert_eq!(instr.opcode, None);
        assert_eq!(instr.mnemonic, "HALT");
    }
}
