//! Structural validation pass.
//!
//! Checks operand count, slot names and variable names for every
//! instruction. Opcode-specific slot requirements are enforced by the
//! dispatcher when the instruction runs.

use crate::error::SemanticError;
use tacy_common::{is_valid_identifier, Instruction};

/// Maximum operand slots per instruction.
pub const MAX_OPERANDS: usize = 3;

/// Run the structural validation pass over the whole program.
///
/// Returns the first error found, scanning instructions in order.
pub fn check_structural(instrs: &[Instruction]) -> Result<(), SemanticError> {
    for (at, instr) in instrs.iter().enumerate() {
        check_instruction(instr, at)?;
    }
    Ok(())
}

fn check_instruction(instr: &Instruction, at: usize) -> Result<(), SemanticError> {
    if instr.operands.len() > MAX_OPERANDS {
        return Err(SemanticError::TooManyOperands {
            at,
            count: instr.operands.len(),
        });
    }

    for operand in &instr.operands {
        if !operand.slot.is_known() {
            return Err(SemanticError::BadOperandTag {
                at,
                tag: operand.slot.name().to_string(),
            });
        }
        if operand.is_variable() && !is_valid_identifier(&operand.text) {
            return Err(SemanticError::InvalidVariableName {
                at,
                name: operand.text.clone(),
            });
        }
    }

    Ok(())
}
