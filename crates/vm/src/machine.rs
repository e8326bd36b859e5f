//! Interpreter state: program counter, variables, data stack, call stack.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use crate::error::RuntimeError;
use tacy_common::{Instruction, Operand, Program, Value};
use tacy_verifier::LabelTable;

/// Mutable execution state, owned by one interpreter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecState {
    /// Index of the instruction being executed.
    pub pc: usize,
    /// Variable bindings, created on first write.
    pub variables: HashMap<String, Value>,
    /// Values pushed by PUSH.
    pub data_stack: Vec<Value>,
    /// Saved program counters pushed by CALL.
    pub call_stack: Vec<usize>,
}

impl ExecState {
    /// Current binding of `name`, if any.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}

/// The tacy interpreter.
///
/// Console input and output are injected so the same engine runs against
/// stdin/stdout or in-memory buffers.
pub struct Interpreter<'a, R, W> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Label name to instruction index.
    pub(crate) labels: LabelTable,
    pub(crate) state: ExecState,
    /// Source for READINT/READSTR.
    pub(crate) input: R,
    /// Sink for PRINT and input prompts.
    pub(crate) output: W,
}

impl<'a, R: BufRead, W: Write> Interpreter<'a, R, W> {
    /// Create an interpreter for a verified program.
    pub fn new(program: &'a Program, labels: LabelTable, input: R, output: W) -> Self {
        Self {
            program,
            labels,
            state: ExecState::default(),
            input,
            output,
        }
    }

    /// Current execution state.
    pub fn state(&self) -> &ExecState {
        &self.state
    }

    /// Consume the interpreter, keeping its final state.
    pub fn into_state(self) -> ExecState {
        self.state
    }

    /// Fetch the instruction at the current pc, or `None` past the end.
    pub(crate) fn fetch(&self) -> Option<&'a Instruction> {
        self.program.get(self.state.pc)
    }

    /// Bind `dst` (a variable operand) to `value`, replacing any old binding.
    pub(crate) fn bind(&mut self, dst: &Operand, value: Value) {
        self.state.variables.insert(dst.text.clone(), value);
    }

    /// Instruction index of `label`.
    pub(crate) fn label_target(&self, label: &str) -> Result<usize, RuntimeError> {
        self.labels
            .get(label)
            .ok_or_else(|| RuntimeError::UnknownLabel {
                at: self.state.pc,
                label: label.to_string(),
            })
    }

    /// Write `prompt`, then read one line without its line terminator.
    ///
    /// Returns `None` at end of input.
    pub(crate) fn read_line(&mut self, prompt: &str) -> Result<Option<String>, RuntimeError> {
        let at = self.state.pc;
        let io_err = |e: std::io::Error| RuntimeError::Io {
            at,
            message: e.to_string(),
        };

        self.output.write_all(prompt.as_bytes()).map_err(io_err)?;
        self.output.flush().map_err(io_err)?;

        let mut line = String::new();
        if self.input.read_line(&mut line).map_err(io_err)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Write `value`'s textual form followed by a newline.
    pub(crate) fn write_value(&mut self, value: &Value) -> Result<(), RuntimeError> {
        writeln!(self.output, "{value}").map_err(|e| RuntimeError::Io {
            at: self.state.pc,
            message: e.to_string(),
        })
    }

    pub(crate) fn flush(&mut self) -> Result<(), RuntimeError> {
        self.output.flush().map_err(|e| RuntimeError::Io {
            at: self.state.pc,
            message: e.to_string(),
        })
    }
}
