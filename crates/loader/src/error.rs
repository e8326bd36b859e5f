//! Error types for loading tacy programs.

use thiserror::Error;

/// Exit code for every load failure.
pub const LOAD_EXIT_CODE: i32 = 3;

/// Errors produced while reading and decoding a program source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source file could not be opened or read.
    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },

    /// The source is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(String),

    /// An instruction element has no `opcode` attribute.
    #[error("instruction {at}: missing 'opcode' attribute")]
    MissingOpcode { at: usize },

    /// An operand element lacks `kind` or `type`.
    #[error("instruction {at}: operand '{slot}' is missing its '{attribute}' attribute")]
    MissingAttribute {
        at: usize,
        slot: String,
        attribute: &'static str,
    },

    /// An operand `kind` other than `variable` or `literal`.
    #[error("instruction {at}: invalid operand kind '{value}'")]
    InvalidKind { at: usize, value: String },

    /// An operand `type` other than `integer` or `string`.
    #[error("instruction {at}: invalid operand type '{value}'")]
    InvalidType { at: usize, value: String },
}

impl LoadError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        LOAD_EXIT_CODE
    }
}
