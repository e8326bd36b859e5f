//! Operands: typed references to a variable or an embedded literal.

use std::fmt;
use std::str::FromStr;

use crate::error::TokenError;

/// Whether an operand names a variable or carries a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// Text is a variable name looked up in the execution state.
    Variable,
    /// Text is the printed form of a fixed value.
    Literal,
}

impl OperandKind {
    /// Returns the name used in program sources.
    pub fn name(&self) -> &'static str {
        match self {
            OperandKind::Variable => "variable",
            OperandKind::Literal => "literal",
        }
    }
}

impl FromStr for OperandKind {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "variable" => Ok(OperandKind::Variable),
            "literal" => Ok(OperandKind::Literal),
            other => Err(TokenError::UnknownKind(other.to_string())),
        }
    }
}

/// Declared type of an operand.
///
/// The declaration is checked against opcode constraints before an
/// instruction runs; resolved values are checked again at use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Signed 64-bit integer.
    Integer,
    /// Immutable string.
    String,
}

impl DataType {
    /// Returns the name used in program sources.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Integer => "integer",
            DataType::String => "string",
        }
    }
}

impl FromStr for DataType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" => Ok(DataType::Integer),
            "string" => Ok(DataType::String),
            other => Err(TokenError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The position an operand occupies in its instruction.
///
/// Sources may contain any slot name; names outside `dst`, `src1` and
/// `src2` are preserved in [`Slot::Other`] so the structural validator
/// can reject them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    Dst,
    Src1,
    Src2,
    Other(String),
}

impl Slot {
    /// Returns the slot name as written in program sources.
    pub fn name(&self) -> &str {
        match self {
            Slot::Dst => "dst",
            Slot::Src1 => "src1",
            Slot::Src2 => "src2",
            Slot::Other(name) => name,
        }
    }

    /// Returns true for `dst`, `src1` and `src2`.
    pub fn is_known(&self) -> bool {
        !matches!(self, Slot::Other(_))
    }
}

impl From<&str> for Slot {
    fn from(name: &str) -> Self {
        match name {
            "dst" => Slot::Dst,
            "src1" => Slot::Src1,
            "src2" => Slot::Src2,
            other => Slot::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single operand of an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    /// Which slot this operand fills.
    pub slot: Slot,
    /// Variable reference or literal.
    pub kind: OperandKind,
    /// Declared type.
    pub data_type: DataType,
    /// Variable name, or the literal's printed form.
    pub text: String,
}

impl Operand {
    /// Create a new operand.
    pub fn new(
        slot: Slot,
        kind: OperandKind,
        data_type: DataType,
        text: impl Into<String>,
    ) -> Self {
        Self {
            slot,
            kind,
            data_type,
            text: text.into(),
        }
    }

    /// A variable reference.
    pub fn variable(slot: Slot, data_type: DataType, name: impl Into<String>) -> Self {
        Self::new(slot, OperandKind::Variable, data_type, name)
    }

    /// A literal of the given declared type.
    pub fn literal(slot: Slot, data_type: DataType, text: impl Into<String>) -> Self {
        Self::new(slot, OperandKind::Literal, data_type, text)
    }

    pub fn is_variable(&self) -> bool {
        self.kind == OperandKind::Variable
    }

    /// Returns true for a literal declared as a string, the only shape a
    /// label reference may take.
    pub fn is_string_literal(&self) -> bool {
        self.kind == OperandKind::Literal && self.data_type == DataType::String
    }
}

/// Returns true if `name` is a legal variable name: non-empty, not
/// starting with an ASCII digit, and made only of alphanumerics and
/// underscores.
pub fn is_valid_identifier(name: &str) -> bool {
    match name.chars().next() {
        None => false,
        Some(first) if first.is_ascii_digit() => false,
        Some(_) => name.chars().all(|c| c.is_alphanumeric() || c == '_'),
    }
}
