//! tacy verifier: semantic checks that run before execution.
//!
//! # Usage
//!
//! ```
//! use tacy_common::{DataType, Instruction, Opcode, Operand, Program, Slot};
//! use tacy_verifier::verify;
//!
//! let program = Program::new(vec![
//!     Instruction::new(
//!         Opcode::Label,
//!         vec![Operand::literal(Slot::Dst, DataType::String, "main")],
//!     ),
//!     Instruction::new(
//!         Opcode::Print,
//!         vec![Operand::literal(Slot::Src1, DataType::String, "hi")],
//!     ),
//! ]);
//!
//! let labels = verify(&program).unwrap();
//! assert_eq!(labels.get("main"), Some(0));
//! ```
//!
//! # Passes
//!
//! 1. **Labels**: build the label table; reject duplicates and malformed LABELs
//! 2. **Structural**: operand count, slot names, variable names
//!
//! Both passes stop at the first error: every semantic error is fatal.

pub mod error;
pub mod labels;
pub mod structural;

pub use error::SemanticError;
pub use labels::{build_labels, LabelTable};
pub use structural::check_structural;

use tacy_common::Program;

/// Verify a program and return its label table.
pub fn verify(program: &Program) -> Result<LabelTable, SemanticError> {
    let instrs = &program.instructions;

    // Pass 1: Labels
    let labels = build_labels(instrs)?;

    // Pass 2: Structural
    check_structural(instrs)?;

    tracing::debug!(
        instructions = instrs.len(),
        labels = labels.len(),
        "program verified"
    );
    Ok(labels)
}
