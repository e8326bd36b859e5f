//! Semantic errors: structural problems detectable without running code.
//!
//! Every error includes an instruction index (`at`) for precise error
//! reporting. All semantic errors terminate the interpreter with exit
//! code 5.

use tacy_common::{Opcode, Slot};
use thiserror::Error;

/// Exit code shared by every semantic error.
pub const SEMANTIC_EXIT_CODE: i32 = 5;

/// Errors found by the pre-execution passes, and the two structural
/// errors the dispatcher can only detect lazily (missing operand,
/// unknown opcode).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    // --- Labels ---
    /// A label name is defined by more than one LABEL instruction.
    #[error("duplicate label '{name}' at instruction {at} (first defined at {first})")]
    DuplicateLabel {
        at: usize,
        name: String,
        first: usize,
    },

    /// LABEL without a `dst` operand, or with one that is not a string literal.
    #[error("LABEL at instruction {at} needs a string literal dst operand")]
    BadLabelOperand { at: usize },

    // --- Structure ---
    /// More than three operand slots.
    #[error("too many operands at instruction {at}: {count} (max 3)")]
    TooManyOperands { at: usize, count: usize },

    /// Operand slot name outside `dst`, `src1`, `src2`.
    #[error("bad operand tag '{tag}' at instruction {at}")]
    BadOperandTag { at: usize, tag: String },

    /// Variable operand whose text is not a legal identifier.
    #[error("invalid variable name '{name}' at instruction {at}")]
    InvalidVariableName { at: usize, name: String },

    // --- Dispatch ---
    /// An opcode's required slot is absent.
    #[error("{opcode} at instruction {at} is missing its {slot} operand")]
    MissingOperand { at: usize, opcode: Opcode, slot: Slot },

    /// Mnemonic outside the instruction set.
    #[error("unknown opcode '{mnemonic}' at instruction {at}")]
    UnknownOpcode { at: usize, mnemonic: String },
}

impl SemanticError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        SEMANTIC_EXIT_CODE
    }
}
