//! Operand resolution: turn a variable reference or literal into a value.

use std::io::{BufRead, Write};

use crate::error::RuntimeError;
use crate::machine::Interpreter;
use tacy_common::{DataType, Operand, OperandKind, Value};

/// Parse integer text the way literals, READINT and STRINT do:
/// surrounding whitespace is ignored and a leading sign is accepted.
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

impl<'a, R: BufRead, W: Write> Interpreter<'a, R, W> {
    /// Resolve an operand to its current value.
    pub(crate) fn resolve(&self, operand: &Operand) -> Result<Value, RuntimeError> {
        let at = self.state.pc;
        match (operand.kind, operand.data_type) {
            (OperandKind::Variable, _) => self
                .state
                .variables
                .get(&operand.text)
                .cloned()
                .ok_or_else(|| RuntimeError::UndefinedVariable {
                    at,
                    name: operand.text.clone(),
                }),
            (OperandKind::Literal, DataType::Integer) => parse_int(&operand.text)
                .map(Value::Int)
                .ok_or_else(|| RuntimeError::InvalidIntegerLiteral {
                    at,
                    text: operand.text.clone(),
                }),
            (OperandKind::Literal, DataType::String) => Ok(Value::Str(operand.text.clone())),
        }
    }

    /// Resolve an operand that must hold an integer.
    pub(crate) fn resolve_int(&self, operand: &Operand) -> Result<i64, RuntimeError> {
        self.resolve(operand)?
            .as_int()
            .ok_or(RuntimeError::TypeMismatch { at: self.state.pc })
    }

    /// Resolve an operand that must hold a string.
    pub(crate) fn resolve_str(&self, operand: &Operand) -> Result<String, RuntimeError> {
        match self.resolve(operand)? {
            Value::Str(s) => Ok(s),
            Value::Int(_) => Err(RuntimeError::TypeMismatch { at: self.state.pc }),
        }
    }
}
