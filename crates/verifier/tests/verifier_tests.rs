//! Integration tests for the tacy verifier.

use proptest::prelude::*;
use tacy_common::{DataType, Instruction, Opcode, Operand, Program, Slot};
use tacy_verifier::{verify, SemanticError};

fn label(name: &str) -> Instruction {
    Instruction::new(
        Opcode::Label,
        vec![Operand::literal(Slot::Dst, DataType::String, name)],
    )
}

fn mov(dst: &str, value: i64) -> Instruction {
    Instruction::new(
        Opcode::Mov,
        vec![
            Operand::variable(Slot::Dst, DataType::Integer, dst),
            Operand::literal(Slot::Src1, DataType::Integer, value.to_string()),
        ],
    )
}

fn jump(target: &str) -> Instruction {
    Instruction::new(
        Opcode::Jump,
        vec![Operand::literal(Slot::Dst, DataType::String, target)],
    )
}

// ========================================================
// Valid programs pass verification
// ========================================================

#[test]
fn accept_straight_line_program() {
    let p = Program::new(vec![mov("x", 1), mov("y", 2)]);
    let labels = verify(&p).unwrap();
    assert!(labels.is_empty());
}

#[test]
fn accept_loop_with_label() {
    let p = Program::new(vec![label("top"), mov("x", 1), jump("top")]);
    let labels = verify(&p).unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels.get("top"), Some(0));
}

#[test]
fn accept_jump_to_missing_label() {
    // Unknown jump targets are a runtime error, not a semantic one.
    let p = Program::new(vec![jump("nowhere")]);
    assert!(verify(&p).is_ok());
}

#[test]
fn accept_unknown_opcode() {
    // Unknown opcodes surface lazily, when dispatch reaches them.
    let p = Program::new(vec![Instruction::from_mnemonic("NOP", vec![])]);
    assert!(verify(&p).is_ok());
}

#[test]
fn accept_missing_operands() {
    // Per-opcode slot requirements are checked at dispatch.
    let p = Program::new(vec![Instruction::new(Opcode::Mov, vec![])]);
    assert!(verify(&p).is_ok());
}

// ========================================================
// Rejections
// ========================================================

#[test]
fn reject_duplicate_label() {
    let p = Program::new(vec![label("a"), label("b"), label("a")]);
    assert_eq!(
        verify(&p),
        Err(SemanticError::DuplicateLabel {
            at: 2,
            name: "a".to_string(),
            first: 0,
        })
    );
}

#[test]
fn reject_label_with_integer_operand() {
    let p = Program::new(vec![Instruction::new(
        Opcode::Label,
        vec![Operand::literal(Slot::Dst, DataType::Integer, "3")],
    )]);
    assert_eq!(verify(&p), Err(SemanticError::BadLabelOperand { at: 0 }));
}

#[test]
fn reject_too_many_operands() {
    let p = Program::new(vec![
        mov("x", 1),
        Instruction::new(
            Opcode::Concat,
            vec![
                Operand::variable(Slot::Dst, DataType::String, "s"),
                Operand::literal(Slot::Src1, DataType::String, "a"),
                Operand::literal(Slot::Src2, DataType::String, "b"),
                Operand::literal(Slot::Src2, DataType::String, "c"),
            ],
        ),
    ]);
    assert_eq!(
        verify(&p),
        Err(SemanticError::TooManyOperands { at: 1, count: 4 })
    );
}

#[test]
fn reject_bad_operand_tag() {
    let p = Program::new(vec![Instruction::new(
        Opcode::Print,
        vec![Operand::literal(Slot::from("source"), DataType::String, "x")],
    )]);
    assert_eq!(
        verify(&p),
        Err(SemanticError::BadOperandTag {
            at: 0,
            tag: "source".to_string(),
        })
    );
}

#[test]
fn reject_invalid_variable_name() {
    let p = Program::new(vec![mov("my-var", 1)]);
    assert_eq!(
        verify(&p),
        Err(SemanticError::InvalidVariableName {
            at: 0,
            name: "my-var".to_string(),
        })
    );
}

#[test]
fn every_semantic_error_exits_5() {
    let p = Program::new(vec![label("a"), label("a")]);
    assert_eq!(verify(&p).unwrap_err().exit_code(), 5);
}

// ========================================================
// Properties
// ========================================================

proptest! {
    /// With unique names, the table has exactly one entry per LABEL and
    /// each entry points at its LABEL instruction.
    #[test]
    fn label_table_size_matches_label_count(
        names in prop::collection::hash_set("[a-z]{1,8}", 0..20),
        filler in 0usize..3,
    ) {
        let mut instrs = Vec::new();
        for name in &names {
            for _ in 0..filler {
                instrs.push(mov("x", 0));
            }
            instrs.push(label(name));
        }
        let labels = verify(&Program::new(instrs.clone())).unwrap();
        prop_assert_eq!(labels.len(), names.len());
        for (name, at) in labels.iter() {
            prop_assert_eq!(instrs[at].dst().map(|op| op.text.as_str()), Some(name));
        }
    }
}
