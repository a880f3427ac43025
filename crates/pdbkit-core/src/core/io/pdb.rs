use crate::core::io::records::{AtomRecord, HelixRecord, RecordError, RecordKind};
use crate::core::io::traits::RecordFile;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, instrument, trace};

const ATOM_LINE_WIDTH: usize = 80;
const HELIX_LINE_WIDTH: usize = 76;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Justify {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AtomColumn {
    Kind,
    Serial,
    Name,
    AltLoc,
    ResName,
    ChainId,
    ResSeq,
    ICode,
    X,
    Y,
    Z,
    Occupancy,
    TempFactor,
    Element,
    Charge,
    Blank,
}

impl AtomColumn {
    fn value(self, record: &AtomRecord) -> &str {
        match self {
            AtomColumn::Kind => record.kind.as_str(),
            AtomColumn::Serial => &record.serial,
            AtomColumn::Name => &record.name,
            AtomColumn::AltLoc => &record.alt_loc,
            AtomColumn::ResName => &record.res_name,
            AtomColumn::ChainId => &record.chain_id,
            AtomColumn::ResSeq => &record.res_seq,
            AtomColumn::ICode => &record.i_code,
            AtomColumn::X => &record.x,
            AtomColumn::Y => &record.y,
            AtomColumn::Z => &record.z,
            AtomColumn::Occupancy => &record.occupancy,
            AtomColumn::TempFactor => &record.temp_factor,
            AtomColumn::Element => &record.element,
            AtomColumn::Charge => &record.charge,
            AtomColumn::Blank => "",
        }
    }
}

// Widths sum to 80 and mirror the slices taken in `parse_atom_line`.
const ATOM_LAYOUT: [(AtomColumn, usize, Justify); 18] = [
    (AtomColumn::Kind, 6, Justify::Left),
    (AtomColumn::Serial, 5, Justify::Right),
    (AtomColumn::Blank, 1, Justify::Left),
    (AtomColumn::Name, 4, Justify::Left),
    (AtomColumn::AltLoc, 1, Justify::Left),
    (AtomColumn::ResName, 4, Justify::Left),
    (AtomColumn::ChainId, 1, Justify::Left),
    (AtomColumn::ResSeq, 4, Justify::Right),
    (AtomColumn::ICode, 1, Justify::Left),
    (AtomColumn::Blank, 3, Justify::Left),
    (AtomColumn::X, 8, Justify::Right),
    (AtomColumn::Y, 8, Justify::Right),
    (AtomColumn::Z, 8, Justify::Right),
    (AtomColumn::Occupancy, 6, Justify::Right),
    (AtomColumn::TempFactor, 6, Justify::Right),
    (AtomColumn::Blank, 10, Justify::Left),
    (AtomColumn::Element, 2, Justify::Right),
    (AtomColumn::Charge, 2, Justify::Right),
];

fn pad_line(line: &str, width: usize) -> String {
    format!("{:<width$}", line.trim_end())
}

/// Byte offset of the column `col`, counted in characters. Past the end this is the
/// line length.
fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(offset, _)| offset)
}

fn slice(line: &str, start: usize, end: usize) -> &str {
    let start = byte_offset(line, start);
    let end = byte_offset(line, end).max(start);
    &line[start..end]
}

fn slice_from(line: &str, start: usize) -> &str {
    &line[byte_offset(line, start)..]
}

fn record_type(line: &str) -> String {
    slice_and_trim(&pad_line(line, 6), 0, 6).to_string()
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    slice(line, start, end).trim()
}

/// Parses one ATOM or HETATM line.
///
/// The line is right-padded to 80 columns before the fixed column ranges are sliced.
/// The charge slice runs to the end of the line so that over-wide charges survive.
///
/// Returns `None` when the record type in columns 1-6 is neither `ATOM` nor `HETATM`,
/// which lets callers skip other record types in a mixed stream.
pub fn parse_atom_line(line: &str) -> Option<AtomRecord> {
    let padded = pad_line(line, ATOM_LINE_WIDTH);
    let kind: RecordKind = slice(&padded, 0, 6).parse().ok()?;

    Some(AtomRecord {
        kind,
        serial: slice_and_trim(&padded, 6, 11).to_string(),
        name: slice_and_trim(&padded, 12, 16).to_string(),
        alt_loc: slice_and_trim(&padded, 16, 17).to_string(),
        res_name: slice_and_trim(&padded, 17, 21).to_string(),
        chain_id: slice_and_trim(&padded, 21, 22).to_string(),
        res_seq: slice_and_trim(&padded, 22, 26).to_string(),
        i_code: slice_and_trim(&padded, 26, 27).to_string(),
        x: slice_and_trim(&padded, 30, 38).to_string(),
        y: slice_and_trim(&padded, 38, 46).to_string(),
        z: slice_and_trim(&padded, 46, 54).to_string(),
        occupancy: slice_and_trim(&padded, 54, 60).to_string(),
        temp_factor: slice_and_trim(&padded, 60, 66).to_string(),
        element: slice_and_trim(&padded, 76, 78).to_string(),
        charge: slice_from(&padded, 78).trim().to_string(),
    })
}

/// Renders an atom record into the fixed-width ATOM/HETATM layout.
///
/// Atom names of one to three characters get a leading space so the element symbol
/// lands in column 14, the convention that separates one-letter elements from two-letter
/// ones. Values wider than their slot are written unchanged.
pub fn format_atom_line(record: &AtomRecord) -> String {
    let mut line = String::with_capacity(ATOM_LINE_WIDTH);
    for (column, width, justify) in ATOM_LAYOUT {
        let value = column.value(record);
        let shifted_name;
        let value = if column == AtomColumn::Name
            && !value.is_empty()
            && value.chars().count() < 4
            && !value.starts_with(' ')
        {
            shifted_name = format!(" {value}");
            shifted_name.as_str()
        } else {
            value
        };
        match justify {
            Justify::Left => line.push_str(&format!("{value:<width$}")),
            Justify::Right => line.push_str(&format!("{value:>width$}")),
        }
    }
    line
}

/// Parses one HELIX line, keeping every sub-field at its exact column width.
///
/// # Errors
///
/// Returns [`RecordError::MalformedRecord`] if columns 1-6 do not hold `HELIX`. Unlike
/// [`parse_atom_line`] there is no skip case.
pub fn parse_helix_line(line: &str) -> Result<HelixRecord, RecordError> {
    let padded = pad_line(line, HELIX_LINE_WIDTH);
    let record_type = slice_and_trim(&padded, 0, 6);
    if record_type != "HELIX" {
        return Err(RecordError::MalformedRecord {
            expected: "HELIX",
            found: record_type.to_string(),
        });
    }

    Ok(HelixRecord {
        ser_num: slice(&padded, 7, 10).to_string(),
        helix_id: slice(&padded, 11, 14).to_string(),
        init_res_name: slice(&padded, 15, 18).to_string(),
        init_chain_id: slice(&padded, 19, 20).to_string(),
        init_seq_num: slice(&padded, 21, 25).to_string(),
        init_i_code: slice(&padded, 25, 26).to_string(),
        end_res_name: slice(&padded, 27, 30).to_string(),
        end_chain_id: slice(&padded, 31, 32).to_string(),
        end_seq_num: slice(&padded, 33, 37).to_string(),
        end_i_code: slice(&padded, 37, 38).to_string(),
        helix_class: slice(&padded, 38, 40).to_string(),
        comment: slice(&padded, 40, 70).to_string(),
        length: slice(&padded, 71, 76).to_string(),
    })
}

/// Renders a helix record into the HELIX layout; trailing blanks are dropped.
pub fn format_helix_line(record: &HelixRecord) -> String {
    let line = format!(
        "HELIX  {:<3} {:<3} {:<3} {:<1} {:<4}{:<1} {:<3} {:<1} {:<4}{:<1}{:<2}{:<30} {:<5}",
        record.ser_num,
        record.helix_id,
        record.init_res_name,
        record.init_chain_id,
        record.init_seq_num,
        record.init_i_code,
        record.end_res_name,
        record.end_chain_id,
        record.end_seq_num,
        record.end_i_code,
        record.helix_class,
        record.comment,
        record.length,
    );
    line.trim_end().to_string()
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: RecordError },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

/// One line of a PDB file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub enum PdbLine {
    Atom(AtomRecord),
    Helix(HelixRecord),
    /// Any other record, kept verbatim.
    Other(String),
}

/// The parsed lines of one PDB file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbContents {
    lines: Vec<PdbLine>,
}

impl PdbContents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: PdbLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[PdbLine] {
        &self.lines
    }

    pub fn atoms(&self) -> impl Iterator<Item = &AtomRecord> {
        self.lines.iter().filter_map(|line| match line {
            PdbLine::Atom(record) => Some(record),
            _ => None,
        })
    }

    pub fn helices(&self) -> impl Iterator<Item = &HelixRecord> {
        self.lines.iter().filter_map(|line| match line {
            PdbLine::Helix(record) => Some(record),
            _ => None,
        })
    }

    /// Replaces all atom lines with `records`, placed where the first atom line was
    /// (or at the end if there were none). Every other line keeps its position.
    pub fn replace_atoms(&mut self, records: impl IntoIterator<Item = AtomRecord>) {
        let insert_at = self
            .lines
            .iter()
            .position(|line| matches!(line, PdbLine::Atom(_)))
            .unwrap_or(self.lines.len());
        self.lines.retain(|line| !matches!(line, PdbLine::Atom(_)));
        let new_atoms: Vec<PdbLine> = records.into_iter().map(PdbLine::Atom).collect();
        self.lines.splice(insert_at..insert_at, new_atoms);
    }
}

pub struct PdbFile;

impl RecordFile for PdbFile {
    type Contents = PdbContents;
    type Error = PdbError;

    #[instrument(skip_all, name = "pdb_read")]
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Contents, Self::Error> {
        let mut contents = PdbContents::new();
        let mut atom_count = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if line.trim().is_empty() {
                contents.push(PdbLine::Other(String::new()));
                continue;
            }

            let tag = record_type(&line);
            match tag.as_str() {
                "ATOM" | "HETATM" => {
                    let record = parse_atom_line(&line).ok_or_else(|| PdbError::Parse {
                        line: line_num,
                        kind: RecordError::MalformedRecord {
                            expected: "ATOM/HETATM",
                            found: tag.clone(),
                        },
                    })?;
                    record.position().map_err(|kind| PdbError::Parse {
                        line: line_num,
                        kind,
                    })?;
                    atom_count += 1;
                    contents.push(PdbLine::Atom(record));
                }
                "HELIX" => {
                    let record = parse_helix_line(&line).map_err(|kind| PdbError::Parse {
                        line: line_num,
                        kind,
                    })?;
                    contents.push(PdbLine::Helix(record));
                }
                "END" => break,
                other => {
                    trace!(line = line_num, record_type = other, "Keeping record verbatim.");
                    contents.push(PdbLine::Other(line));
                }
            }
        }

        if atom_count == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        debug!(atoms = atom_count, lines = contents.lines.len(), "Parsed PDB stream.");
        Ok(contents)
    }

    fn write_to(contents: &Self::Contents, writer: &mut impl Write) -> Result<(), Self::Error> {
        for line in contents.lines() {
            match line {
                PdbLine::Atom(record) => writeln!(writer, "{}", format_atom_line(record))?,
                PdbLine::Helix(record) => writeln!(writer, "{}", format_helix_line(record))?,
                PdbLine::Other(raw) => writeln!(writer, "{}", raw)?,
            }
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}
