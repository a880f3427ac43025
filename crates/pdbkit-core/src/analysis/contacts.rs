use crate::core::io::traits::RecordFile;
use crate::core::models::amino_acid::AminoAcid;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, instrument, trace};

const CONTACT_TOKEN_COUNT: usize = 9;

/// Failures while interpreting a single contact-report line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Malformed contact line ({reason}): '{line}'")]
    MalformedContactLine { line: String, reason: &'static str },
    #[error("Unknown residue abbreviation '{abbreviation}' in '{token}'")]
    UnknownResidueAbbreviation { abbreviation: String, token: String },
}

#[derive(Debug, Error)]
pub enum ContactReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ContactError },
}

/// One residue of a contact, as written in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEnd {
    pub chain: String,
    /// MOE-internal residue position.
    pub moe_index: String,
    pub abbreviation: String,
    pub residue_id: i32,
    /// Atom taking part in the contact.
    pub atom: String,
    /// Interaction group of the residue's amino acid.
    pub group: u8,
}

impl ContactEnd {
    // `residue_token` looks like "SER38.OG".
    fn parse(
        line: &str,
        chain: &str,
        moe_index: &str,
        residue_token: &str,
    ) -> Result<Self, ContactError> {
        let malformed = |reason: &'static str| ContactError::MalformedContactLine {
            line: line.to_string(),
            reason,
        };

        let (residue, atom) = residue_token
            .split_once('.')
            .filter(|(_, atom)| !atom.contains('.'))
            .ok_or_else(|| malformed("residue token must contain exactly one '.'"))?;
        let abbreviation = residue
            .get(..3)
            .ok_or_else(|| malformed("residue token is shorter than an abbreviation"))?;
        let residue_id = residue[3..]
            .parse()
            .map_err(|_| malformed("residue id is not an integer"))?;
        let amino_acid = AminoAcid::by_abbreviation(abbreviation).map_err(|_| {
            ContactError::UnknownResidueAbbreviation {
                abbreviation: abbreviation.to_string(),
                token: residue_token.to_string(),
            }
        })?;

        Ok(Self {
            chain: chain.to_string(),
            moe_index: moe_index.to_string(),
            abbreviation: abbreviation.to_string(),
            residue_id,
            atom: atom.to_string(),
            group: amino_acid.group,
        })
    }

    fn residue_token(&self) -> String {
        format!("{}{}.{}", self.abbreviation, self.residue_id, self.atom)
    }
}

/// Canonical, order-independent label of a contact: the two residue groups in
/// ascending order followed by the interaction type, e.g. `4 5 HB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractionPair {
    pub low_group: u8,
    pub high_group: u8,
    pub interaction_type: String,
}

impl InteractionPair {
    pub fn new(group1: u8, group2: u8, interaction_type: &str) -> Self {
        Self {
            low_group: group1.min(group2),
            high_group: group1.max(group2),
            interaction_type: interaction_type.to_string(),
        }
    }
}

impl fmt::Display for InteractionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.low_group, self.high_group, self.interaction_type
        )
    }
}

/// One line of a MOE protein contact report.
///
/// ```text
///  #  Type  Chain     Pos Residue   Chain     Pos Residue   Net
///  1  HB    1:1C3WA_c   3 LEU13.O   1:1C3WA_c   7 THR17.OG1  16
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterresidueContact {
    pub line_number: u32,
    pub interaction_type: String,
    pub first: ContactEnd,
    pub second: ContactEnd,
    pub network: String,
}

impl InterresidueContact {
    pub fn interaction_pair(&self) -> InteractionPair {
        InteractionPair::new(self.first.group, self.second.group, &self.interaction_type)
    }

    /// The canonical pair label as text.
    pub fn pair_label(&self) -> String {
        self.interaction_pair().to_string()
    }
}

impl FromStr for InterresidueContact {
    type Err = ContactError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != CONTACT_TOKEN_COUNT {
            return Err(ContactError::MalformedContactLine {
                line: line.to_string(),
                reason: "expected 9 whitespace-separated fields",
            });
        }

        let line_number = tokens[0]
            .parse()
            .map_err(|_| ContactError::MalformedContactLine {
                line: line.to_string(),
                reason: "contact number is not an integer",
            })?;

        Ok(Self {
            line_number,
            interaction_type: tokens[1].to_string(),
            first: ContactEnd::parse(line, tokens[2], tokens[3], tokens[4])?,
            second: ContactEnd::parse(line, tokens[5], tokens[6], tokens[7])?,
            network: tokens[8].to_string(),
        })
    }
}

impl fmt::Display for InterresidueContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>5} {:<5} {:<10} {:>4} {:<12} {:<10} {:>4} {:<12} {:>4}",
            self.line_number,
            self.interaction_type,
            self.first.chain,
            self.first.moe_index,
            self.first.residue_token(),
            self.second.chain,
            self.second.moe_index,
            self.second.residue_token(),
            self.network
        )
    }
}

/// All contacts of one report, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactReport {
    contacts: Vec<InterresidueContact>,
}

impl ContactReport {
    pub fn new(contacts: Vec<InterresidueContact>) -> Self {
        Self { contacts }
    }

    pub fn contacts(&self) -> &[InterresidueContact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Number of contacts per canonical interaction pair, ordered by pair.
    pub fn pair_statistics(&self) -> BTreeMap<InteractionPair, usize> {
        let mut counts = BTreeMap::new();
        for contact in &self.contacts {
            *counts.entry(contact.interaction_pair()).or_insert(0) += 1;
        }
        counts
    }

    /// Contacts grouped by network id.
    pub fn networks(&self) -> BTreeMap<&str, Vec<&InterresidueContact>> {
        let mut networks: BTreeMap<&str, Vec<&InterresidueContact>> = BTreeMap::new();
        for contact in &self.contacts {
            networks
                .entry(contact.network.as_str())
                .or_default()
                .push(contact);
        }
        networks
    }
}

/// Reader and writer for MOE contact reports.
///
/// Blank lines and lines whose first field is not an integer (column headers, titles)
/// are skipped.
pub struct ContactReportFile;

impl RecordFile for ContactReportFile {
    type Contents = ContactReport;
    type Error = ContactReportError;

    #[instrument(skip_all, name = "contact_report_read")]
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Contents, Self::Error> {
        let mut contacts = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let Some(first) = line.split_whitespace().next() else {
                continue;
            };
            if first.parse::<u32>().is_err() {
                trace!(line = line_num, "Skipping header line.");
                continue;
            }

            let contact = line
                .parse::<InterresidueContact>()
                .map_err(|kind| ContactReportError::Parse {
                    line: line_num,
                    kind,
                })?;
            contacts.push(contact);
        }

        debug!(contacts = contacts.len(), "Parsed contact report.");
        Ok(ContactReport::new(contacts))
    }

    fn write_to(contents: &Self::Contents, writer: &mut impl Write) -> Result<(), Self::Error> {
        for contact in contents.contacts() {
            writeln!(writer, "{}", contact)?;
        }
        Ok(())
    }
}
