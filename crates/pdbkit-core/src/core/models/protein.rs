use super::atom::Atom;
use super::error::ModelError;
use super::residue::{Residue, ResidueKey};
use crate::core::io::records::AtomRecord;
use nalgebra::{DMatrix, Vector3};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// A structure assembled from atom records, grouped into residues.
///
/// Residues keep the order in which their first atom appeared in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Protein {
    /// Residues in first-seen order.
    residues: Vec<Residue>,
    /// Lookup map from residue key to position in `residues`.
    index: HashMap<ResidueKey, usize>,
}

impl Protein {
    /// Builds a protein by grouping atom records into residues.
    ///
    /// # Arguments
    ///
    /// * `records` - Atom records in file order.
    /// * `forces` - Optional per-atom force vectors, one row per record.
    ///
    /// # Return
    ///
    /// The assembled protein, residues ordered by first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DimensionMismatch`] if `forces` is not `records.len()` x 3,
    /// and [`ModelError::Record`] if a record has unparsable coordinates. Residues are keyed
    /// by their numeric resSeq, so a non-decimal value such as the hybrid-36 `A000` also
    /// fails with [`ModelError::Record`].
    pub fn from_records(
        records: Vec<AtomRecord>,
        forces: Option<&DMatrix<f64>>,
    ) -> Result<Self, ModelError> {
        if let Some(forces) = forces {
            let expected = (records.len(), 3);
            if forces.shape() != expected {
                return Err(ModelError::DimensionMismatch {
                    expected,
                    found: forces.shape(),
                });
            }
        }

        let atom_count = records.len();
        let mut groups: Vec<(ResidueKey, Vec<Atom>)> = Vec::new();
        let mut index: HashMap<ResidueKey, usize> = HashMap::new();

        for (i, record) in records.into_iter().enumerate() {
            let key = ResidueKey::of(&record)?;
            let atom = match forces {
                Some(forces) => Atom::with_force(
                    record,
                    Vector3::new(forces[(i, 0)], forces[(i, 1)], forces[(i, 2)]),
                )?,
                None => Atom::new(record)?,
            };

            match index.get(&key) {
                Some(&slot) => groups[slot].1.push(atom),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push((key, vec![atom]));
                }
            }
        }

        let residues = groups
            .into_iter()
            .map(|(key, atoms)| Residue::from_group(key, atoms))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            atoms = atom_count,
            residues = residues.len(),
            with_forces = forces.is_some(),
            "Assembled protein from atom records."
        );
        Ok(Self { residues, index })
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Retrieves a residue by its full key.
    pub fn residue(&self, key: &ResidueKey) -> Option<&Residue> {
        self.index.get(key).map(|&slot| &self.residues[slot])
    }

    /// Retrieves the first residue on `chain_id` with the given sequence number,
    /// whatever its insertion code.
    pub fn residue_by_number(&self, chain_id: &str, sequence_number: i32) -> Option<&Residue> {
        self.residues
            .iter()
            .find(|r| r.chain_id() == chain_id && r.sequence_number() == sequence_number)
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(Residue::len).sum()
    }

    /// Removes hydrogens from every residue and returns the total removed.
    pub fn strip_hydrogens(&mut self) -> usize {
        let removed: usize = self
            .residues
            .iter_mut()
            .map(Residue::strip_hydrogens)
            .sum();
        debug!(removed, "Stripped hydrogens.");
        removed
    }

    /// Renames every atom through `names_map`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingRename`] if any atom name is absent from the map. The
    /// protein is left unchanged in that case.
    pub fn rename_atoms(&mut self, names_map: &HashMap<String, String>) -> Result<(), ModelError> {
        if let Some(atom) = self
            .residues
            .iter()
            .flat_map(Residue::atoms)
            .find(|atom| !names_map.contains_key(atom.name()))
        {
            return Err(ModelError::MissingRename {
                name: atom.name().to_string(),
            });
        }
        for residue in &mut self.residues {
            residue.rename_atoms(names_map)?;
        }
        Ok(())
    }

    /// Returns true if any residue of this protein is closer than `distance` to `residue`.
    pub fn is_closer_than(&self, distance: f64, residue: &Residue) -> bool {
        self.residues
            .iter()
            .any(|this| this.is_closer_than(distance, residue))
    }

    /// Lists the residues closer than `distance` to `residue`, excluding any residue
    /// with the same key.
    pub fn residues_near<'a>(&'a self, distance: f64, residue: &'a Residue) -> Vec<&'a Residue> {
        self.residues
            .iter()
            .filter(|this| this.key() != residue.key())
            .filter(|this| this.is_closer_than(distance, residue))
            .collect()
    }

    /// Residues sorted by sequence number; ties keep their first-seen order.
    pub fn sorted_residues(&self) -> Vec<&Residue> {
        let mut sorted: Vec<&Residue> = self.residues.iter().collect();
        sorted.sort_by(|a, b| a.cmp_by_sequence(b));
        sorted
    }

    /// Flattens the protein back into atom records, residue by residue.
    pub fn to_records(&self) -> Vec<AtomRecord> {
        self.residues
            .iter()
            .flat_map(Residue::atoms)
            .map(|atom| atom.record().clone())
            .collect()
    }
}

impl fmt::Display for Protein {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, residue) in self.residues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", residue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::records::RecordKind;
    use nalgebra::Point3;

    fn record(serial: u32, name: &str, element: &str, res_seq: i32, x: f64) -> AtomRecord {
        AtomRecord::new(RecordKind::Atom)
            .with_serial(&serial.to_string())
            .with_name(name)
            .with_res_name("ALA")
            .with_chain_id("A")
            .with_res_seq(&res_seq.to_string())
            .with_position(&Point3::new(x, 0.0, 0.0))
            .with_element(element)
    }

    fn five_atoms() -> Vec<AtomRecord> {
        vec![
            record(1, "N", "N", 1, 0.0),
            record(2, "CA", "C", 1, 1.0),
            record(3, "N", "N", 2, 5.0),
            record(4, "CA", "C", 2, 6.0),
            record(5, "N", "N", 3, 20.0),
        ]
    }

    #[test]
    fn from_records_groups_atoms_in_first_seen_order() {
        let protein = Protein::from_records(five_atoms(), None).unwrap();
        assert_eq!(protein.len(), 3);
        assert_eq!(protein.atom_count(), 5);
        let numbers: Vec<i32> = protein.residues().iter().map(|r| r.sequence_number()).collect();
        assert_eq!(numbers, [1, 2, 3]);
        let serials: Vec<&str> = protein.residues()[1].atoms().iter().map(|a| a.serial()).collect();
        assert_eq!(serials, ["3", "4"]);
    }

    #[test]
    fn from_records_keeps_interleaved_atoms_with_their_residue() {
        let records = vec![
            record(1, "N", "N", 2, 0.0),
            record(2, "N", "N", 1, 0.0),
            record(3, "CA", "C", 2, 0.0),
        ];
        let protein = Protein::from_records(records, None).unwrap();
        assert_eq!(protein.residues()[0].sequence_number(), 2);
        assert_eq!(protein.residues()[0].len(), 2);
        assert_eq!(protein.residues()[1].sequence_number(), 1);
    }

    #[test]
    fn from_records_rejects_non_decimal_sequence_numbers() {
        let mut records = five_atoms();
        records[4] = records[4].with_res_seq("A000");
        assert!(matches!(
            Protein::from_records(records, None),
            Err(ModelError::Record(_))
        ));
    }

    #[test]
    fn from_records_separates_chains_and_insertion_codes() {
        let records = vec![
            record(1, "N", "N", 7, 0.0),
            record(2, "N", "N", 7, 0.0).with_chain_id("B"),
            record(3, "N", "N", 7, 0.0).with_i_code("A"),
        ];
        let protein = Protein::from_records(records, None).unwrap();
        assert_eq!(protein.len(), 3);
        assert!(protein.residue(&ResidueKey::new("B", 7, "")).is_some());
        assert!(protein.residue(&ResidueKey::new("A", 7, "A")).is_some());
        assert_eq!(
            protein.residue_by_number("A", 7).unwrap().key(),
            &ResidueKey::new("A", 7, "")
        );
        assert!(protein.residue_by_number("C", 7).is_none());
    }

    #[test]
    fn from_records_attaches_forces_row_by_row() {
        let forces = DMatrix::from_row_slice(
            5,
            3,
            &[
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.0, 0.0, 1.0, //
                2.0, 2.0, 2.0, //
                0.0, 0.0, 0.0,
            ],
        );
        let protein = Protein::from_records(five_atoms(), Some(&forces)).unwrap();
        assert_eq!(protein.residues()[0].force(), Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(protein.residues()[1].force(), Vector3::new(2.0, 2.0, 3.0));
        assert_eq!(protein.residues()[2].force(), Vector3::zeros());
    }

    #[test]
    fn from_records_rejects_misshapen_force_matrices() {
        let forces = DMatrix::<f64>::zeros(4, 3);
        assert_eq!(
            Protein::from_records(five_atoms(), Some(&forces)),
            Err(ModelError::DimensionMismatch {
                expected: (5, 3),
                found: (4, 3)
            })
        );
        let forces = DMatrix::<f64>::zeros(5, 2);
        assert!(Protein::from_records(five_atoms(), Some(&forces)).is_err());
    }

    #[test]
    fn from_records_of_nothing_is_empty() {
        let protein = Protein::from_records(Vec::new(), None).unwrap();
        assert!(protein.is_empty());
        assert_eq!(protein.to_string(), "");
    }

    #[test]
    fn strip_hydrogens_applies_to_every_residue() {
        let mut records = five_atoms();
        records.push(record(6, "H", "H", 1, 0.5));
        records.push(record(7, "H", "H", 3, 20.5));
        let mut protein = Protein::from_records(records, None).unwrap();
        assert_eq!(protein.strip_hydrogens(), 2);
        assert_eq!(protein.atom_count(), 5);
        assert_eq!(protein.strip_hydrogens(), 0);
    }

    #[test]
    fn rename_atoms_is_all_or_nothing() {
        let mut protein = Protein::from_records(five_atoms(), None).unwrap();
        let partial: HashMap<String, String> = [("N".to_string(), "NT".to_string())].into();
        assert_eq!(
            protein.rename_atoms(&partial),
            Err(ModelError::MissingRename {
                name: "CA".to_string()
            })
        );
        assert_eq!(protein.residues()[0].atoms()[0].name(), "N");

        let full: HashMap<String, String> = [
            ("N".to_string(), "NT".to_string()),
            ("CA".to_string(), "CA".to_string()),
        ]
        .into();
        protein.rename_atoms(&full).unwrap();
        assert!(protein.to_records().iter().all(|r| r.name() != "N"));
    }

    #[test]
    fn is_closer_than_and_residues_near_check_every_residue() {
        let protein = Protein::from_records(five_atoms(), None).unwrap();
        let first = &protein.residues()[0];
        // Residue 1 ends at x=1, residue 2 starts at x=5.
        assert!(protein.is_closer_than(4.5, first));
        let near: Vec<i32> = protein
            .residues_near(4.5, first)
            .iter()
            .map(|r| r.sequence_number())
            .collect();
        assert_eq!(near, [2]);
        assert!(protein.residues_near(4.0, first).is_empty());

        let far = Residue::new(vec![
            Atom::new(record(9, "O", "O", 99, 100.0)).unwrap(),
        ])
        .unwrap();
        assert!(!protein.is_closer_than(10.0, &far));
    }

    #[test]
    fn sorted_residues_orders_by_sequence_number() {
        let records = vec![
            record(1, "N", "N", 10, 0.0),
            record(2, "N", "N", 9, 0.0),
            record(3, "N", "N", 11, 0.0),
        ];
        let protein = Protein::from_records(records, None).unwrap();
        let sorted: Vec<i32> = protein
            .sorted_residues()
            .iter()
            .map(|r| r.sequence_number())
            .collect();
        assert_eq!(sorted, [9, 10, 11]);
    }

    #[test]
    fn to_records_and_display_follow_residue_order() {
        let protein = Protein::from_records(five_atoms(), None).unwrap();
        let serials: Vec<String> = protein
            .to_records()
            .iter()
            .map(|r| r.serial().to_string())
            .collect();
        assert_eq!(serials, ["1", "2", "3", "4", "5"]);
        assert_eq!(protein.to_string().lines().count(), 5);
    }
}
