//! Main execution loop and opcode dispatch for the tacy interpreter.
//!
//! After every instruction, jump or not, the program counter advances by
//! one. Jumps therefore set the pc to the LABEL instruction itself (and
//! RETURN to the CALL instruction), and execution resumes at the
//! instruction after it.

use std::io::{BufRead, Write};

use crate::error::{RuntimeError, VmError};
use crate::machine::Interpreter;
use crate::resolve::parse_int;
use tacy_common::{DataType, Instruction, Opcode, Operand, Slot, Value};
use tacy_verifier::SemanticError;

/// Outcome of a single [`Interpreter::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An instruction ran; there may be more.
    Continue,
    /// The program counter is past the end of the program.
    Finished,
}

/// Fetch a required operand slot.
fn required<'i>(
    instr: &'i Instruction,
    opcode: Opcode,
    slot: Slot,
    at: usize,
) -> Result<&'i Operand, SemanticError> {
    match instr.operand(&slot) {
        Some(operand) => Ok(operand),
        None => Err(SemanticError::MissingOperand { at, opcode, slot }),
    }
}

/// The `dst`, `src1` and `src2` operands of a three-address instruction.
struct Ternary<'i> {
    dst: &'i Operand,
    src1: &'i Operand,
    src2: &'i Operand,
}

impl<'i> Ternary<'i> {
    fn of(instr: &'i Instruction, opcode: Opcode, at: usize) -> Result<Self, SemanticError> {
        Ok(Self {
            dst: required(instr, opcode, Slot::Dst, at)?,
            src1: required(instr, opcode, Slot::Src1, at)?,
            src2: required(instr, opcode, Slot::Src2, at)?,
        })
    }
}

/// `s[index]` as a one-character string. Negative indices count from the end.
fn char_at(s: &str, index: i64) -> Option<String> {
    let length = s.chars().count() as i64;
    let pos = if index < 0 { index + length } else { index };
    if !(0..length).contains(&pos) {
        return None;
    }
    s.chars().nth(pos as usize).map(String::from)
}

impl<'a, R: BufRead, W: Write> Interpreter<'a, R, W> {
    /// Execute the program until the pc runs past the end or an error occurs.
    pub fn execute(&mut self) -> Result<(), VmError> {
        tracing::debug!(
            instructions = self.program.len(),
            labels = self.labels.len(),
            "execution started"
        );

        loop {
            match self.step() {
                Ok(Step::Continue) => {}
                Ok(Step::Finished) => break,
                Err(e) => {
                    // Keep whatever was printed before the failure.
                    let _ = self.flush();
                    tracing::debug!(pc = self.state.pc, error = %e, "execution failed");
                    return Err(e);
                }
            }
        }

        self.flush()?;
        tracing::debug!("execution finished");
        Ok(())
    }

    /// Execute the instruction at the current pc, then advance the pc by one.
    pub fn step(&mut self) -> Result<Step, VmError> {
        let Some(instr) = self.fetch() else {
            return Ok(Step::Finished);
        };

        tracing::trace!(pc = self.state.pc, opcode = %instr.mnemonic, "dispatch");
        self.dispatch(instr)?;
        self.state.pc += 1;

        Ok(Step::Continue)
    }

    fn dispatch(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let at = self.state.pc;
        let Some(opcode) = instr.opcode else {
            return Err(SemanticError::UnknownOpcode {
                at,
                mnemonic: instr.mnemonic.clone(),
            }
            .into());
        };

        match opcode {
            Opcode::Mov => self.exec_mov(instr)?,

            // Arithmetic
            Opcode::Add => self.exec_binary_arith(instr, opcode, i64::wrapping_add)?,
            Opcode::Sub => self.exec_binary_arith(instr, opcode, i64::wrapping_sub)?,
            Opcode::Mul => self.exec_binary_arith(instr, opcode, i64::wrapping_mul)?,
            Opcode::Div => self.exec_div(instr)?,

            // Console I/O
            Opcode::ReadInt => self.exec_read_int(instr)?,
            Opcode::ReadStr => self.exec_read_str(instr)?,
            Opcode::Print => self.exec_print(instr)?,

            // Control transfer
            Opcode::Label => {} // resolved before execution
            Opcode::Jump => self.exec_jump(instr)?,
            Opcode::JumpIfEq => self.exec_conditional_jump(instr, opcode, |a, b| a == b)?,
            Opcode::JumpIfGr => self.exec_conditional_jump(instr, opcode, |a, b| a > b)?,
            Opcode::Call => self.exec_call(instr)?,
            Opcode::Return => self.exec_return()?,

            // Data stack
            Opcode::Push => self.exec_push(instr)?,
            Opcode::Pop => self.exec_pop(instr)?,

            // Strings
            Opcode::Concat => self.exec_concat(instr)?,
            Opcode::GetAt => self.exec_get_at(instr)?,
            Opcode::Len => self.exec_len(instr)?,
            Opcode::StrInt => self.exec_str_int(instr)?,
            Opcode::IntStr => self.exec_int_str(instr)?,
        }

        Ok(())
    }

    fn type_mismatch(&self) -> VmError {
        RuntimeError::TypeMismatch { at: self.state.pc }.into()
    }

    // ---- Data movement ----

    fn exec_mov(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let at = self.state.pc;
        let dst = required(instr, Opcode::Mov, Slot::Dst, at)?;
        let src1 = required(instr, Opcode::Mov, Slot::Src1, at)?;
        if !dst.is_variable() {
            return Err(self.type_mismatch());
        }

        let value = self.resolve(src1)?;
        self.bind(dst, value);
        Ok(())
    }

    // ---- Arithmetic ----

    /// Check shape and types of an arithmetic instruction and resolve its sources.
    fn arith_operands<'i>(
        &self,
        instr: &'i Instruction,
        opcode: Opcode,
    ) -> Result<(&'i Operand, i64, i64), VmError> {
        let ops = Ternary::of(instr, opcode, self.state.pc)?;
        let all_integer = [ops.dst, ops.src1, ops.src2]
            .iter()
            .all(|op| op.data_type == DataType::Integer);
        if !all_integer || !ops.dst.is_variable() {
            return Err(self.type_mismatch());
        }

        let a = self.resolve_int(ops.src1)?;
        let b = self.resolve_int(ops.src2)?;
        Ok((ops.dst, a, b))
    }

    /// ADD, SUB, MUL. Overflow wraps.
    fn exec_binary_arith(
        &mut self,
        instr: &Instruction,
        opcode: Opcode,
        op: fn(i64, i64) -> i64,
    ) -> Result<(), VmError> {
        let (dst, a, b) = self.arith_operands(instr, opcode)?;
        self.bind(dst, Value::Int(op(a, b)));
        Ok(())
    }

    /// Integer division, truncating toward zero.
    fn exec_div(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let (dst, a, b) = self.arith_operands(instr, Opcode::Div)?;
        if b == 0 {
            return Err(RuntimeError::DivisionByZero { at: self.state.pc }.into());
        }
        self.bind(dst, Value::Int(a.wrapping_div(b)));
        Ok(())
    }

    // ---- Console I/O ----

    /// `dst` operand of READINT/READSTR: a variable declared as `expected`.
    fn read_target<'i>(
        &self,
        instr: &'i Instruction,
        opcode: Opcode,
        expected: DataType,
    ) -> Result<&'i Operand, VmError> {
        let dst = required(instr, opcode, Slot::Dst, self.state.pc)?;
        if !dst.is_variable() || dst.data_type != expected {
            return Err(self.type_mismatch());
        }
        Ok(dst)
    }

    fn exec_read_int(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let dst = self.read_target(instr, Opcode::ReadInt, DataType::Integer)?;
        let line = self.read_line(&format!("{} = ", dst.text))?;
        let input = line.unwrap_or_default();
        let n = parse_int(&input).ok_or(RuntimeError::InvalidIntegerInput {
            at: self.state.pc,
            input,
        })?;
        self.bind(dst, Value::Int(n));
        Ok(())
    }

    fn exec_read_str(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let dst = self.read_target(instr, Opcode::ReadStr, DataType::String)?;
        let line = self.read_line(&format!("{} = ", dst.text))?;
        self.bind(dst, Value::Str(line.unwrap_or_default()));
        Ok(())
    }

    fn exec_print(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let src1 = required(instr, Opcode::Print, Slot::Src1, self.state.pc)?;
        let value = self.resolve(src1)?;
        self.write_value(&value)?;
        Ok(())
    }

    // ---- Control transfer ----

    /// `dst` operand of a jump-family instruction: a string literal naming a label.
    fn jump_target<'i>(
        &self,
        instr: &'i Instruction,
        opcode: Opcode,
    ) -> Result<&'i Operand, VmError> {
        let dst = required(instr, opcode, Slot::Dst, self.state.pc)?;
        if !dst.is_string_literal() {
            return Err(self.type_mismatch());
        }
        Ok(dst)
    }

    fn exec_jump(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let dst = self.jump_target(instr, Opcode::Jump)?;
        self.state.pc = self.label_target(&dst.text)?;
        Ok(())
    }

    /// JUMPIFEQ, JUMPIFGR. Both sources must be declared with, and resolve
    /// to, the same type. Strings compare lexicographically by code point.
    fn exec_conditional_jump(
        &mut self,
        instr: &Instruction,
        opcode: Opcode,
        holds: fn(&Value, &Value) -> bool,
    ) -> Result<(), VmError> {
        let ops = Ternary::of(instr, opcode, self.state.pc)?;
        if ops.src1.data_type != ops.src2.data_type || !ops.dst.is_string_literal() {
            return Err(self.type_mismatch());
        }

        let a = self.resolve(ops.src1)?;
        let b = self.resolve(ops.src2)?;
        if a.data_type() != b.data_type() {
            return Err(self.type_mismatch());
        }

        // Value's derived ordering is only meaningful within one variant.
        if holds(&a, &b) {
            self.state.pc = self.label_target(&ops.dst.text)?;
        }
        Ok(())
    }

    fn exec_call(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let dst = self.jump_target(instr, Opcode::Call)?;
        let target = self.label_target(&dst.text)?;
        self.state.call_stack.push(self.state.pc);
        self.state.pc = target;
        Ok(())
    }

    fn exec_return(&mut self) -> Result<(), VmError> {
        self.state.pc = self
            .state
            .call_stack
            .pop()
            .ok_or(RuntimeError::EmptyCallStack { at: self.state.pc })?;
        Ok(())
    }

    // ---- Data stack ----

    fn exec_push(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let src1 = required(instr, Opcode::Push, Slot::Src1, self.state.pc)?;
        let value = self.resolve(src1)?;
        self.state.data_stack.push(value);
        Ok(())
    }

    fn exec_pop(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let dst = required(instr, Opcode::Pop, Slot::Dst, self.state.pc)?;
        if !dst.is_variable() {
            return Err(self.type_mismatch());
        }
        let value = self
            .state
            .data_stack
            .pop()
            .ok_or(RuntimeError::EmptyDataStack { at: self.state.pc })?;
        self.bind(dst, value);
        Ok(())
    }

    // ---- Strings ----

    fn exec_concat(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let ops = Ternary::of(instr, Opcode::Concat, self.state.pc)?;
        if ops.src1.data_type != DataType::String
            || ops.src2.data_type != DataType::String
            || !ops.dst.is_variable()
        {
            return Err(self.type_mismatch());
        }

        let mut joined = self.resolve_str(ops.src1)?;
        joined.push_str(&self.resolve_str(ops.src2)?);
        self.bind(ops.dst, Value::Str(joined));
        Ok(())
    }

    fn exec_get_at(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let ops = Ternary::of(instr, Opcode::GetAt, self.state.pc)?;
        if ops.src1.data_type != DataType::String
            || ops.src2.data_type != DataType::Integer
            || !ops.dst.is_variable()
        {
            return Err(self.type_mismatch());
        }

        let s = self.resolve_str(ops.src1)?;
        let index = self.resolve_int(ops.src2)?;
        let c = char_at(&s, index).ok_or_else(|| RuntimeError::IndexOutOfBounds {
            at: self.state.pc,
            index,
            length: s.chars().count(),
        })?;
        self.bind(ops.dst, Value::Str(c));
        Ok(())
    }

    /// Check the `dst`/`src1` shape shared by LEN, STRINT and INTSTR.
    fn conversion_operands<'i>(
        &self,
        instr: &'i Instruction,
        opcode: Opcode,
        from: DataType,
        to: DataType,
    ) -> Result<(&'i Operand, &'i Operand), VmError> {
        let at = self.state.pc;
        let dst = required(instr, opcode, Slot::Dst, at)?;
        let src1 = required(instr, opcode, Slot::Src1, at)?;
        if src1.data_type != from || dst.data_type != to || !dst.is_variable() {
            return Err(self.type_mismatch());
        }
        Ok((dst, src1))
    }

    fn exec_len(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let (dst, src1) =
            self.conversion_operands(instr, Opcode::Len, DataType::String, DataType::Integer)?;
        let s = self.resolve_str(src1)?;
        self.bind(dst, Value::Int(s.chars().count() as i64));
        Ok(())
    }

    fn exec_str_int(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let (dst, src1) =
            self.conversion_operands(instr, Opcode::StrInt, DataType::String, DataType::Integer)?;
        let text = self.resolve_str(src1)?;
        let n = parse_int(&text).ok_or(RuntimeError::InvalidIntegerLiteral {
            at: self.state.pc,
            text,
        })?;
        self.bind(dst, Value::Int(n));
        Ok(())
    }

    fn exec_int_str(&mut self, instr: &Instruction) -> Result<(), VmError> {
        let (dst, src1) =
            self.conversion_operands(instr, Opcode::IntStr, DataType::Integer, DataType::String)?;
        let n = self.resolve_int(src1)?;
        self.bind(dst, Value::Str(n.to_string()));
        Ok(())
    }
}
