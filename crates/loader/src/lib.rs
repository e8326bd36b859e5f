//! tacy loader: XML program sources to [`Program`] and back to text.
//!
//! # Usage
//!
//! ```
//! use tacy_loader::{disassemble, load_str};
//!
//! let xml = r#"<program>
//!   <tac opcode="PRINT"><src1 kind="literal" type="string">hi</src1></tac>
//! </program>"#;
//! let program = load_str(xml).unwrap();
//! assert_eq!(disassemble(&program), "PRINT src1:literal:string:hi\n");
//! ```
//!
//! Loading only checks that the document can be turned into the data
//! model. Labels, operand slots, identifiers and opcodes are checked by
//! `tacy-verifier` and the interpreter.

pub mod error;

mod decoder;
mod disassembler;

pub use disassembler::disassemble;
pub use error::LoadError;

use std::fs;
use std::path::Path;

use tacy_common::Program;

/// Decode a program from XML text.
pub fn load_str(text: &str) -> Result<Program, LoadError> {
    let program = decoder::decode(text)?;
    tracing::debug!(instructions = program.len(), "program decoded");
    Ok(program)
}

/// Read and decode a program file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "program source read");
    load_str(&text)
}
