//! Common types for the tacy three-address-code interpreter.
//!
//! This crate provides the data model shared by the loader, verifier and
//! interpreter:
//!
//! - [`Opcode`]: the closed set of TAC operations
//! - [`Operand`]: a typed variable reference or literal in a named [`Slot`]
//! - [`Instruction`]: a mnemonic plus its operands
//! - [`Program`]: the immutable instruction list
//! - [`Value`]: runtime integer or string
//! - [`TokenError`]: unrecognized mnemonics, kinds and types

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod operand;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::TokenError;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use operand::{is_valid_identifier, DataType, Operand, OperandKind, Slot};
pub use program::Program;
pub use value::Value;

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy that generates a random Opcode.
    fn arb_opcode() -> impl Strategy<Value = Opcode> {
        prop::sample::select(&opcode::ALL_OPCODES[..])
    }

    proptest! {
        /// Every mnemonic decodes back to its opcode through an instruction.
        #[test]
        fn mnemonic_decode_roundtrip(op in arb_opcode()) {
            let instr = Instruction::from_mnemonic(op.mnemonic(), vec![]);
            prop_assert_eq!(instr.opcode, Some(op));
        }

        /// Identifiers built from a letter or underscore followed by word
        /// characters are always valid.
        #[test]
        fn word_identifiers_valid(name in "[A-Za-z_][A-Za-z0-9_]{0,16}") {
            prop_assert!(is_valid_identifier(&name));
        }

        /// Anything starting with an ASCII digit is never a valid identifier.
        #[test]
        fn digit_prefix_invalid(name in "[0-9][A-Za-z0-9_]{0,16}") {
            prop_assert!(!is_valid_identifier(&name));
        }

        /// Integer values print as their decimal form.
        #[test]
        fn int_display_matches_decimal(n in any::<i64>()) {
            prop_assert_eq!(Value::Int(n).to_string(), n.to_string());
        }
    }
}
