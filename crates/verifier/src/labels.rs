//! Label table construction.
//!
//! Scans the program once, in order, and maps every LABEL's name to the
//! index of the LABEL instruction itself.

use std::collections::HashMap;

use crate::error::SemanticError;
use tacy_common::Instruction;

/// Label name to instruction index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    entries: HashMap<String, usize>,
}

impl LabelTable {
    /// Index of the LABEL instruction named `name`.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.get(name).copied()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, index)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, &at)| (name.as_str(), at))
    }
}

/// Build the label table.
///
/// Fails on the first LABEL whose name is already taken, or whose `dst`
/// is missing or not a string literal.
pub fn build_labels(instrs: &[Instruction]) -> Result<LabelTable, SemanticError> {
    let mut entries: HashMap<String, usize> = HashMap::new();

    for (at, instr) in instrs.iter().enumerate().filter(|(_, i)| i.is_label()) {
        let dst = instr.dst().ok_or(SemanticError::BadLabelOperand { at })?;

        if let Some(&first) = entries.get(&dst.text) {
            return Err(SemanticError::DuplicateLabel {
                at,
                name: dst.text.clone(),
                first,
            });
        }
        if !dst.is_string_literal() {
            return Err(SemanticError::BadLabelOperand { at });
        }

        entries.insert(dst.text.clone(), at);
    }

    tracing::debug!(labels = entries.len(), "built label table");
    Ok(LabelTable { entries })
}
