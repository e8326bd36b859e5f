//! tacy virtual machine: executes three-address-code programs.
//!
//! The interpreter owns:
//! - A program counter driving a fetch-dispatch-advance loop
//! - Variable bindings, created on first write
//! - A data stack for PUSH/POP
//! - A call stack of return addresses for CALL/RETURN
//!
//! # Usage
//!
//! ```
//! use tacy_common::{DataType, Instruction, Opcode, Operand, Program, Slot, Value};
//! use tacy_vm::run_with_io;
//!
//! let program = Program::new(vec![
//!     Instruction::new(
//!         Opcode::Mov,
//!         vec![
//!             Operand::variable(Slot::Dst, DataType::Integer, "x"),
//!             Operand::literal(Slot::Src1, DataType::Integer, "42"),
//!         ],
//!     ),
//!     Instruction::new(
//!         Opcode::Print,
//!         vec![Operand::variable(Slot::Src1, DataType::Integer, "x")],
//!     ),
//! ]);
//!
//! let mut out = Vec::new();
//! let state = run_with_io(&program, &b""[..], &mut out).unwrap();
//! assert_eq!(out, b"42\n");
//! assert_eq!(state.variable("x"), Some(&Value::Int(42)));
//! ```

pub mod error;
pub mod execute;
pub mod machine;
pub mod resolve;

pub use error::{RuntimeError, VmError};
pub use execute::Step;
pub use machine::{ExecState, Interpreter};

use std::io::{self, BufRead, Write};

use tacy_common::Program;

/// Verify and execute a program against stdin and stdout.
///
/// # Errors
///
/// Returns [`VmError`] for the first semantic or runtime fault.
pub fn run(program: &Program) -> Result<(), VmError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with_io(program, stdin.lock(), stdout.lock()).map(|_| ())
}

/// Verify and execute a program with the given console streams.
///
/// This is the primary entry point for the VM. It:
/// 1. Builds the label table and runs the structural checks
/// 2. Executes from instruction 0 until the pc runs past the end
/// 3. Returns the final execution state
pub fn run_with_io<R: BufRead, W: Write>(
    program: &Program,
    input: R,
    output: W,
) -> Result<ExecState, VmError> {
    let labels = tacy_verifier::verify(program)?;
    let mut vm = Interpreter::new(program, labels, input, output);
    vm.execute()?;
    Ok(vm.into_state())
}
