use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Failures raised by the line-level codec and by typed views over record fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Malformed {expected} record: found record type '{found}'")]
    MalformedRecord {
        expected: &'static str,
        found: String,
    },
    #[error("Invalid number in field '{field}' (value: '{value}')")]
    InvalidNumber { field: &'static str, value: String },
}

/// The two coordinate-bearing record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordKind {
    #[default]
    Atom,
    Hetatm,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM",
            RecordKind::Hetatm => "HETATM",
        }
    }
}

impl FromStr for RecordKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ATOM" => Ok(RecordKind::Atom),
            "HETATM" => Ok(RecordKind::Hetatm),
            other => Err(RecordError::MalformedRecord {
                expected: "ATOM/HETATM",
                found: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! text_fields {
    ($($(#[$doc:meta])* $field:ident => $with:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $field(&self) -> &str {
                &self.$field
            }

            /// Returns a copy of this record with the field replaced (surrounding whitespace trimmed).
            pub fn $with(&self, value: &str) -> Self {
                Self {
                    $field: value.trim().to_string(),
                    ..self.clone()
                }
            }
        )*
    };
}

/// One ATOM or HETATM record.
///
/// Every textual sub-field is stored with its surrounding whitespace trimmed; the
/// fixed-column geometry lives entirely in the codec (`core::io::pdb`). Records are
/// immutable: each `with_*` method produces a new record and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AtomRecord {
    pub(crate) kind: RecordKind,
    pub(crate) serial: String,
    pub(crate) name: String,
    pub(crate) alt_loc: String,
    pub(crate) res_name: String,
    pub(crate) chain_id: String,
    pub(crate) res_seq: String,
    pub(crate) i_code: String,
    pub(crate) x: String,
    pub(crate) y: String,
    pub(crate) z: String,
    pub(crate) occupancy: String,
    pub(crate) temp_factor: String,
    pub(crate) element: String,
    pub(crate) charge: String,
}

impl AtomRecord {
    /// Creates a record of the given kind with every text field empty.
    ///
    /// Fill the fields with the `with_*` methods:
    ///
    /// ```
    /// use pdbkit::core::io::records::{AtomRecord, RecordKind};
    ///
    /// let record = AtomRecord::new(RecordKind::Atom)
    ///     .with_serial("1")
    ///     .with_name("CA")
    ///     .with_res_name("GLY")
    ///     .with_res_seq("1");
    /// assert_eq!(record.name(), "CA");
    /// ```
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn with_kind(&self, kind: RecordKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    text_fields! {
        /// Atom serial number, kept as text.
        serial => with_serial;
        /// Atom name (e.g. "CA", "HG21").
        name => with_name;
        /// Alternate location indicator.
        alt_loc => with_alt_loc;
        /// Residue name, up to four characters.
        res_name => with_res_name;
        chain_id => with_chain_id;
        /// Residue sequence number, kept as text.
        res_seq => with_res_seq;
        /// Code for insertion of residues.
        i_code => with_i_code;
        x => with_x;
        y => with_y;
        z => with_z;
        occupancy => with_occupancy;
        temp_factor => with_temp_factor;
        /// Element symbol.
        element => with_element;
        charge => with_charge;
    }

    /// Returns a copy with the three coordinate fields rendered from `position`
    /// using three decimals.
    pub fn with_position(&self, position: &Point3<f64>) -> Self {
        Self {
            x: format!("{:7.3}", position.x).trim().to_string(),
            y: format!("{:7.3}", position.y).trim().to_string(),
            z: format!("{:7.3}", position.z).trim().to_string(),
            ..self.clone()
        }
    }

    /// Parses the x/y/z fields into a point.
    pub fn position(&self) -> Result<Point3<f64>, RecordError> {
        Ok(Point3::new(
            parse_field("x", &self.x)?,
            parse_field("y", &self.y)?,
            parse_field("z", &self.z)?,
        ))
    }

    /// Parses the residue sequence number.
    pub fn sequence_number(&self) -> Result<i32, RecordError> {
        parse_field("resSeq", &self.res_seq)
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element == "H"
    }
}

impl fmt::Display for AtomRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::pdb::format_atom_line(self))
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// One HELIX record.
///
/// Unlike [`AtomRecord`], the sub-fields keep their exact fixed-width text (including
/// padding), so re-rendering and re-slicing reproduce the same values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct HelixRecord {
    pub(crate) ser_num: String,
    pub(crate) helix_id: String,
    pub(crate) init_res_name: String,
    pub(crate) init_chain_id: String,
    pub(crate) init_seq_num: String,
    pub(crate) init_i_code: String,
    pub(crate) end_res_name: String,
    pub(crate) end_chain_id: String,
    pub(crate) end_seq_num: String,
    pub(crate) end_i_code: String,
    pub(crate) helix_class: String,
    pub(crate) comment: String,
    pub(crate) length: String,
}

impl HelixRecord {
    pub fn ser_num(&self) -> &str {
        &self.ser_num
    }

    pub fn helix_id(&self) -> &str {
        &self.helix_id
    }

    pub fn init_res_name(&self) -> &str {
        &self.init_res_name
    }

    pub fn init_chain_id(&self) -> &str {
        &self.init_chain_id
    }

    pub fn init_seq_num(&self) -> &str {
        &self.init_seq_num
    }

    pub fn init_i_code(&self) -> &str {
        &self.init_i_code
    }

    pub fn end_res_name(&self) -> &str {
        &self.end_res_name
    }

    pub fn end_chain_id(&self) -> &str {
        &self.end_chain_id
    }

    pub fn end_seq_num(&self) -> &str {
        &self.end_seq_num
    }

    pub fn end_i_code(&self) -> &str {
        &self.end_i_code
    }

    pub fn helix_class(&self) -> &str {
        &self.helix_class
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn length(&self) -> &str {
        &self.length
    }

    /// Parses the helix length (residue count).
    pub fn residue_count(&self) -> Result<usize, RecordError> {
        parse_field("length", self.length.trim())
    }
}

impl fmt::Display for HelixRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::pdb::format_helix_line(self))
    }
}
