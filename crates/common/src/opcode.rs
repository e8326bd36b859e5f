//! Opcode definitions for the three-address-code instruction set.

use std::fmt;
use std::str::FromStr;

use crate::error::TokenError;

/// Identifies the operation to perform.
///
/// The set is closed: a mnemonic outside it never becomes an `Opcode`
/// and is reported as an unknown opcode when the dispatcher reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Data movement
    /// `dst <- src1`.
    Mov,

    // Integer arithmetic
    /// `dst <- src1 + src2`.
    Add,
    /// `dst <- src1 - src2`.
    Sub,
    /// `dst <- src1 * src2`.
    Mul,
    /// `dst <- src1 / src2`, truncating toward zero.
    Div,

    // Console I/O
    /// Prompt and read an integer into `dst`.
    ReadInt,
    /// Prompt and read a line into `dst`.
    ReadStr,
    /// Write the textual form of `src1` followed by a newline.
    Print,

    // Control transfer
    /// Names the position of this instruction. No runtime effect.
    Label,
    /// Unconditional jump to label `dst`.
    Jump,
    /// Jump to `dst` if `src1 == src2`.
    JumpIfEq,
    /// Jump to `dst` if `src1 > src2`.
    JumpIfGr,
    /// Save the current position on the call stack and jump to `dst`.
    Call,
    /// Resume after the most recent CALL.
    Return,

    // Data stack
    /// Push the value of `src1`.
    Push,
    /// Pop into `dst`.
    Pop,

    // Strings
    /// `dst <- src1 ++ src2`.
    Concat,
    /// `dst <- src1[src2]` as a one-character string.
    GetAt,
    /// `dst <- length(src1)` in characters.
    Len,
    /// `dst <- integer parsed from src1`.
    StrInt,
    /// `dst <- decimal text of src1`.
    IntStr,
}

/// All opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 21] = [
    Opcode::Mov,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::ReadInt,
    Opcode::ReadStr,
    Opcode::Print,
    Opcode::Label,
    Opcode::Jump,
    Opcode::JumpIfEq,
    Opcode::JumpIfGr,
    Opcode::Call,
    Opcode::Return,
    Opcode::Push,
    Opcode::Pop,
    Opcode::Concat,
    Opcode::GetAt,
    Opcode::Len,
    Opcode::StrInt,
    Opcode::IntStr,
];

impl Opcode {
    /// Returns the mnemonic as it appears in program sources.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Mov => "MOV",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::ReadInt => "READINT",
            Opcode::ReadStr => "READSTR",
            Opcode::Print => "PRINT",
            Opcode::Label => "LABEL",
            Opcode::Jump => "JUMP",
            Opcode::JumpIfEq => "JUMPIFEQ",
            Opcode::JumpIfGr => "JUMPIFGR",
            Opcode::Call => "CALL",
            Opcode::Return => "RETURN",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Concat => "CONCAT",
            Opcode::GetAt => "GETAT",
            Opcode::Len => "LEN",
            Opcode::StrInt => "STRINT",
            Opcode::IntStr => "INTSTR",
        }
    }
}

impl FromStr for Opcode {
    type Err = TokenError;

    /// Mnemonics are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_OPCODES
            .iter()
            .copied()
            .find(|op| op.mnemonic() == s)
            .ok_or_else(|| TokenError::UnknownOpcode(s.to_string()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonic_roundtrip() {
        for &opcode in &ALL_OPCODES {
            let m = opcode.mnemonic();
            assert!(!m.is_empty(), "empty mnemonic for {opcode:?}");
            assert_eq!(m, m.to_uppercase(), "mnemonic should be uppercase: {m}");
            assert_eq!(m.parse::<Opcode>(), Ok(opcode));
        }
    }

    #[test]
    fn mnemonics_are_unique() {
        for (i, a) in ALL_OPCODES.iter().enumerate() {
            for b in &ALL_OPCODES[i + 1..] {
                assert_ne!(a.mnemonic(), b.mnemonic());
            }
        }
    }

    #[test]
    fn unknown_mnemonic_rejected() {
        assert_eq!(
            "HALT".parse::<Opcode>(),
            Err(TokenError::UnknownOpcode("HALT".to_string()))
        );
    }

    #[test]
    fn mnemonics_are_case_sensitive() {
        assert!("mov".parse::<Opcode>().is_err());
        assert!("Print".parse::<Opcode>().is_err());
    }

    #[test]
    fn display_uses_mnemonic() {
        assert_eq!(Opcode::JumpIfGr.to_string(), "JUMPIFGR");
    }
}
