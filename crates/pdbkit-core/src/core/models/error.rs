use crate::core::io::records::RecordError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Force matrix has shape {found:?} but {expected:?} was required")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Residue group {key} contains no atoms")]
    EmptyResidueGroup { key: String },

    #[error("Atom belongs to residue {found}, not {expected}")]
    InconsistentResidue { expected: String, found: String },

    #[error("Requested atom order {requested:?} does not match the atoms {actual:?} of residue {residue}")]
    NameMismatch {
        residue: String,
        requested: Vec<String>,
        actual: Vec<String>,
    },

    #[error("No replacement given for atom name '{name}'")]
    MissingRename { name: String },

    #[error("Invalid atom record: {0}")]
    Record(#[from] RecordError),
}
