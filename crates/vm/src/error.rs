//! Runtime errors for the tacy interpreter.
//!
//! These are errors that can only happen while executing with concrete
//! values. Every error includes the instruction index (`at`) of the
//! failing instruction.

use tacy_verifier::SemanticError;
use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// JUMP, taken conditional jump or CALL to a label that does not exist.
    #[error("jump to unknown label '{label}' at instruction {at}")]
    UnknownLabel { at: usize, label: String },

    /// Read of a variable that has never been written.
    #[error("read of undefined variable '{name}' at instruction {at}")]
    UndefinedVariable { at: usize, name: String },

    /// DIV with a zero divisor.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// READINT received a line that is not an integer.
    #[error("READINT received invalid integer {input:?} at instruction {at}")]
    InvalidIntegerInput { at: usize, input: String },

    /// Declared or resolved operand types do not fit the opcode.
    #[error("operands of incompatible type at instruction {at}")]
    TypeMismatch { at: usize },

    /// RETURN with no saved return address.
    #[error("RETURN with empty call stack at instruction {at}")]
    EmptyCallStack { at: usize },

    /// POP with nothing on the data stack.
    #[error("POP from empty data stack at instruction {at}")]
    EmptyDataStack { at: usize },

    /// Integer literal or STRINT input that does not parse.
    #[error("invalid integer literal {text:?} at instruction {at}")]
    InvalidIntegerLiteral { at: usize, text: String },

    /// GETAT index outside the string.
    #[error("index {index} out of bounds (length {length}) at instruction {at}")]
    IndexOutOfBounds { at: usize, index: i64, length: usize },

    /// Console read or write failed.
    #[error("console I/O failed at instruction {at}: {message}")]
    Io { at: usize, message: String },
}

impl RuntimeError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RuntimeError::UnknownLabel { .. } => 10,
            RuntimeError::UndefinedVariable { .. } => 11,
            RuntimeError::DivisionByZero { .. } => 12,
            RuntimeError::InvalidIntegerInput { .. } => 13,
            RuntimeError::TypeMismatch { .. } => 14,
            RuntimeError::EmptyCallStack { .. } | RuntimeError::EmptyDataStack { .. } => 15,
            RuntimeError::InvalidIntegerLiteral { .. } | RuntimeError::IndexOutOfBounds { .. } => {
                20
            }
            RuntimeError::Io { .. } => 1,
        }
    }
}

/// Any error that stops the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl VmError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            VmError::Semantic(e) => e.exit_code(),
            VmError::Runtime(e) => e.exit_code(),
        }
    }
}
