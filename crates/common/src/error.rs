//! Errors for parsing the textual tokens of a TAC program.

use thiserror::Error;

/// Errors that occur when a mnemonic, operand kind or data type name
/// cannot be recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Opcode mnemonic is not part of the instruction set.
    #[error("unknown opcode '{0}'")]
    UnknownOpcode(String),

    /// Operand kind is neither `variable` nor `literal`.
    #[error("unknown operand kind '{0}'")]
    UnknownKind(String),

    /// Operand type is neither `integer` nor `string`.
    #[error("unknown operand type '{0}'")]
    UnknownType(String),
}
