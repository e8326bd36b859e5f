//! Decoder: XML document → program.
//!
//! Decoding is a mechanical translation of elements into instructions.
//! Only the attributes needed to build the data model are checked here;
//! unknown mnemonics and unknown operand slots pass through so that the
//! verifier and interpreter report them with their own exit codes.

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::LoadError;
use tacy_common::{DataType, Instruction, Operand, OperandKind, Program, Slot};

/// Decode an XML program source.
pub(crate) fn decode(text: &str) -> Result<Program, LoadError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)
        .map_err(|e| LoadError::Xml(e.to_string()))?;

    let instructions = doc
        .root_element()
        .children()
        .filter(Node::is_element)
        .enumerate()
        .map(|(at, node)| decode_instruction(node, at))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Program::new(instructions))
}

fn decode_instruction(node: Node<'_, '_>, at: usize) -> Result<Instruction, LoadError> {
    let mnemonic = node
        .attribute("opcode")
        .ok_or(LoadError::MissingOpcode { at })?;

    let operands = node
        .children()
        .filter(Node::is_element)
        .map(|child| decode_operand(child, at))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Instruction::from_mnemonic(mnemonic, operands))
}

fn decode_operand(node: Node<'_, '_>, at: usize) -> Result<Operand, LoadError> {
    let slot = node.tag_name().name();
    let attribute = |name: &'static str| {
        node.attribute(name)
            .ok_or_else(|| LoadError::MissingAttribute {
                at,
                slot: slot.to_string(),
                attribute: name,
            })
    };

    let kind_text = attribute("kind")?;
    let kind: OperandKind = kind_text.parse().map_err(|_| LoadError::InvalidKind {
        at,
        value: kind_text.to_string(),
    })?;

    let type_text = attribute("type")?;
    let data_type: DataType = type_text.parse().map_err(|_| LoadError::InvalidType {
        at,
        value: type_text.to_string(),
    })?;

    let text = node.text().unwrap_or_default();
    Ok(Operand::new(Slot::from(slot), kind, data_type, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacy_common::Opcode;

    #[test]
    fn decode_single_instruction() {
        let program = decode(
            r#"<program><tac opcode="MOV">
                 <dst kind="variable" type="integer">x</dst>
                 <src1 kind="literal" type="integer">42</src1>
               </tac></program>"#,
        )
        .unwrap();
        assert_eq!(program.len(), 1);
        let instr = &program.instructions[0];
        assert_eq!(instr.opcode, Some(Opcode::Mov));
        assert_eq!(
            instr.operands,
            vec![
                Operand::variable(Slot::Dst, DataType::Integer, "x"),
                Operand::literal(Slot::Src1, DataType::Integer, "42"),
            ]
        );
    }

    #[test]
    fn empty_text_is_empty_string() {
        let program =
            decode(r#"<p><i opcode="PRINT"><src1 kind="literal" type="string"/></i></p>"#).unwrap();
        assert_eq!(program.instructions[0].operands[0].text, "");
    }

    #[test]
    fn text_is_verbatim() {
        let program = decode(
            r#"<p><i opcode="PRINT"><src1 kind="literal" type="string">  a &amp; b </src1></i></p>"#,
        )
        .unwrap();
        assert_eq!(program.instructions[0].operands[0].text, "  a & b ");
    }

    #[test]
    fn unknown_mnemonic_is_kept() {
        let program = decode(r#"<p><i opcode="HALT"/></p>"#).unwrap();
        let instr = &program.instructions[0];
        assert_eq!(instr.mnemonic, "HALT");
        assert_eq!(instr.opcode, None);
    }

    #[test]
    fn unknown_slot_is_kept() {
        let program =
            decode(r#"<p><i opcode="PRINT"><src9 kind="literal" type="integer">1</src9></i></p>"#)
                .unwrap();
        assert_eq!(
            program.instructions[0].operands[0].slot,
            Slot::Other("src9".to_string())
        );
    }

    #[test]
    fn missing_opcode_reports_index() {
        let err = decode(r#"<p><i opcode="RETURN"/><i/></p>"#).unwrap_err();
        assert_eq!(err, LoadError::MissingOpcode { at: 1 });
    }

    #[test]
    fn missing_type_attribute() {
        let err = decode(r#"<p><i opcode="PRINT"><src1 kind="literal">1</src1></i></p>"#).unwrap_err();
        assert_eq!(
            err,
            LoadError::MissingAttribute {
                at: 0,
                slot: "src1".to_string(),
                attribute: "type",
            }
        );
    }

    #[test]
    fn invalid_kind() {
        let err =
            decode(r#"<p><i opcode="PRINT"><src1 kind="const" type="integer">1</src1></i></p>"#)
                .unwrap_err();
        assert_eq!(
            err,
            LoadError::InvalidKind {
                at: 0,
                value: "const".to_string()
            }
        );
    }

    #[test]
    fn doctype_is_accepted() {
        let program = decode(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE program>\n<program><tac opcode=\"RETURN\"/></program>",
        )
        .unwrap();
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn malformed_xml() {
        assert!(matches!(decode("<program>"), Err(LoadError::Xml(_))));
        assert!(matches!(decode(""), Err(LoadError::Xml(_))));
    }
}
