use super::atom::Atom;
use super::error::ModelError;
use crate::core::io::records::{AtomRecord, RecordError};
use nalgebra::Vector3;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Identifies a residue within a structure: chain, sequence number, insertion code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueKey {
    pub chain_id: String,
    pub sequence_number: i32,
    pub i_code: String,
}

impl ResidueKey {
    pub fn new(chain_id: &str, sequence_number: i32, i_code: &str) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            sequence_number,
            i_code: i_code.to_string(),
        }
    }

    /// The key of the residue an atom record belongs to.
    pub fn of(record: &AtomRecord) -> Result<Self, RecordError> {
        Ok(Self::new(
            record.chain_id(),
            record.sequence_number()?,
            record.i_code(),
        ))
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.chain_id.is_empty() {
            write!(f, "{}{}", self.sequence_number, self.i_code)
        } else {
            write!(f, "{}:{}{}", self.chain_id, self.sequence_number, self.i_code)
        }
    }
}

/// An ordered group of atoms sharing one chain, sequence number, and insertion code.
///
/// Equality is structural (key, name, and every atom). Use [`Residue::cmp_by_sequence`]
/// to order residues by sequence number alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    key: ResidueKey,
    res_name: String,
    atoms: Vec<Atom>,
}

impl Residue {
    /// Builds a residue from atoms that all carry the same residue key.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyResidueGroup`] for an empty atom list,
    /// [`ModelError::InconsistentResidue`] if an atom belongs to another residue, and
    /// [`ModelError::Record`] if a sequence number cannot be parsed.
    pub fn new(atoms: Vec<Atom>) -> Result<Self, ModelError> {
        let first = atoms.first().ok_or_else(|| ModelError::EmptyResidueGroup {
            key: "<unknown>".to_string(),
        })?;
        let key = ResidueKey::of(first.record())?;
        Self::from_group(key, atoms)
    }

    pub(crate) fn from_group(key: ResidueKey, atoms: Vec<Atom>) -> Result<Self, ModelError> {
        let first = atoms.first().ok_or_else(|| ModelError::EmptyResidueGroup {
            key: key.to_string(),
        })?;
        let res_name = first.res_name().to_string();

        for atom in &atoms[1..] {
            let atom_key = ResidueKey::of(atom.record())?;
            if atom_key != key {
                return Err(ModelError::InconsistentResidue {
                    expected: key.to_string(),
                    found: atom_key.to_string(),
                });
            }
        }

        Ok(Self {
            key,
            res_name,
            atoms,
        })
    }

    pub fn key(&self) -> &ResidueKey {
        &self.key
    }

    pub fn chain_id(&self) -> &str {
        &self.key.chain_id
    }

    pub fn sequence_number(&self) -> i32 {
        self.key.sequence_number
    }

    pub fn res_name(&self) -> &str {
        &self.res_name
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|atom| atom.name() == name)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Vector sum of the member atom forces.
    pub fn force(&self) -> Vector3<f64> {
        self.atoms
            .iter()
            .fold(Vector3::zeros(), |sum, atom| sum + atom.force())
    }

    /// Removes every hydrogen atom and returns how many were removed.
    pub fn strip_hydrogens(&mut self) -> usize {
        let before = self.atoms.len();
        self.atoms.retain(|atom| !atom.is_hydrogen());
        before - self.atoms.len()
    }

    /// Returns true if any heavy-atom pair between `self` and `other` is strictly
    /// closer than `distance`.
    pub fn is_closer_than(&self, distance: f64, other: &Residue) -> bool {
        self.atoms
            .iter()
            .filter(|atom| !atom.is_hydrogen())
            .any(|atom| {
                other
                    .atoms
                    .iter()
                    .filter(|other_atom| !other_atom.is_hydrogen())
                    .any(|other_atom| atom.distance_to(other_atom) < distance)
            })
    }

    /// Reorders the atoms to follow `names`.
    ///
    /// Duplicate names are matched in their current relative order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NameMismatch`] unless `names` is exactly the multiset of the
    /// current atom names; the residue is left unchanged in that case.
    pub fn reorder_by_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), ModelError> {
        let mismatch = |atoms: &[Atom]| ModelError::NameMismatch {
            residue: self.key.to_string(),
            requested: names.iter().map(|n| n.as_ref().to_string()).collect(),
            actual: atoms.iter().map(|a| a.name().to_string()).collect(),
        };

        if names.len() != self.atoms.len() {
            return Err(mismatch(&self.atoms));
        }

        let mut taken = vec![false; self.atoms.len()];
        let mut order = Vec::with_capacity(names.len());
        for name in names {
            let slot = self
                .atoms
                .iter()
                .enumerate()
                .position(|(i, atom)| !taken[i] && atom.name() == name.as_ref())
                .ok_or_else(|| mismatch(&self.atoms))?;
            taken[slot] = true;
            order.push(slot);
        }

        let mut slots: Vec<Option<Atom>> = std::mem::take(&mut self.atoms)
            .into_iter()
            .map(Some)
            .collect();
        self.atoms = order
            .into_iter()
            .filter_map(|slot| slots[slot].take())
            .collect();
        Ok(())
    }

    /// Replaces every atom with a copy renamed through `names_map`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingRename`] if an atom name has no entry in the map; no
    /// atom is renamed in that case.
    pub fn rename_atoms(&mut self, names_map: &HashMap<String, String>) -> Result<(), ModelError> {
        let renamed = self
            .atoms
            .iter()
            .map(|atom| {
                names_map
                    .get(atom.name())
                    .map(|new_name| atom.with_name(new_name))
                    .ok_or_else(|| ModelError::MissingRename {
                        name: atom.name().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.atoms = renamed;
        Ok(())
    }

    /// Orders residues by sequence number only.
    pub fn cmp_by_sequence(&self, other: &Residue) -> Ordering {
        self.key.sequence_number.cmp(&other.key.sequence_number)
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, atom) in self.atoms.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", atom)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::records::RecordKind;

    fn atom(name: &str, element: &str, res_seq: &str, xyz: [f64; 3]) -> Atom {
        let record = AtomRecord::new(RecordKind::Atom)
            .with_serial("1")
            .with_name(name)
            .with_res_name("GLY")
            .with_chain_id("A")
            .with_res_seq(res_seq)
            .with_position(&nalgebra::Point3::new(xyz[0], xyz[1], xyz[2]))
            .with_element(element);
        Atom::new(record).unwrap()
    }

    fn glycine(res_seq: &str, offset: f64) -> Residue {
        Residue::new(vec![
            atom("N", "N", res_seq, [offset, 0.0, 0.0]),
            atom("CA", "C", res_seq, [offset + 1.0, 0.0, 0.0]),
            atom("H1", "H", res_seq, [offset, 1.0, 0.0]),
            atom("H2", "H", res_seq, [offset, -1.0, 0.0]),
        ])
        .unwrap()
    }

    fn names(residue: &Residue) -> Vec<&str> {
        residue.atoms().iter().map(|a| a.name()).collect()
    }

    #[test]
    fn new_residue_takes_key_and_name_from_atoms() {
        let residue = glycine("7", 0.0);
        assert_eq!(residue.key(), &ResidueKey::new("A", 7, ""));
        assert_eq!(residue.res_name(), "GLY");
        assert_eq!(residue.len(), 4);
        assert_eq!(residue.atom("CA").unwrap().name(), "CA");
        assert!(residue.atom("CB").is_none());
    }

    #[test]
    fn new_residue_rejects_empty_groups() {
        assert!(matches!(
            Residue::new(Vec::new()),
            Err(ModelError::EmptyResidueGroup { .. })
        ));
    }

    #[test]
    fn new_residue_rejects_atoms_from_other_residues() {
        let result = Residue::new(vec![
            atom("N", "N", "1", [0.0; 3]),
            atom("CA", "C", "2", [0.0; 3]),
        ]);
        assert_eq!(
            result,
            Err(ModelError::InconsistentResidue {
                expected: "A:1".to_string(),
                found: "A:2".to_string()
            })
        );
    }

    #[test]
    fn strip_hydrogens_removes_hydrogens_and_is_idempotent() {
        let mut residue = glycine("1", 0.0);
        assert_eq!(residue.strip_hydrogens(), 2);
        assert_eq!(names(&residue), ["N", "CA"]);
        assert_eq!(residue.strip_hydrogens(), 0);
        assert_eq!(names(&residue), ["N", "CA"]);
    }

    #[test]
    fn force_is_the_sum_of_atom_forces() {
        let mut residue = glycine("1", 0.0);
        residue.atoms_mut()[0].set_force(Vector3::new(1.0, 2.0, 3.0));
        residue.atoms_mut()[3].set_force(Vector3::new(-0.5, 0.0, 1.0));
        assert_eq!(residue.force(), Vector3::new(0.5, 2.0, 4.0));
    }

    #[test]
    fn is_closer_than_uses_strict_inequality_on_heavy_atoms() {
        let first = glycine("1", 0.0);
        let second = glycine("2", 4.0);
        // Closest heavy pair is CA(1.0) to N(4.0): 3.0 apart.
        assert!(first.is_closer_than(3.01, &second));
        assert!(!first.is_closer_than(3.0, &second));
        assert!(second.is_closer_than(3.01, &first));
    }

    #[test]
    fn is_closer_than_ignores_hydrogens() {
        let heavy = Residue::new(vec![atom("O", "O", "1", [0.0, 0.0, 0.0])]).unwrap();
        let with_hydrogen = Residue::new(vec![
            atom("HG", "H", "2", [0.5, 0.0, 0.0]),
            atom("OG", "O", "2", [5.0, 0.0, 0.0]),
        ])
        .unwrap();
        assert!(!heavy.is_closer_than(1.0, &with_hydrogen));
        assert!(heavy.is_closer_than(5.5, &with_hydrogen));
    }

    #[test]
    fn reorder_by_names_permutes_atoms() {
        let mut residue = glycine("1", 0.0);
        residue.reorder_by_names(&["H2", "CA", "N", "H1"]).unwrap();
        assert_eq!(names(&residue), ["H2", "CA", "N", "H1"]);
    }

    #[test]
    fn reorder_by_names_rejects_mismatched_names_without_changes() {
        let mut residue = glycine("1", 0.0);
        let err = residue.reorder_by_names(&["N", "CA", "H1", "H3"]).unwrap_err();
        assert!(matches!(err, ModelError::NameMismatch { .. }));
        assert!(residue.reorder_by_names(&["N", "CA", "H1"]).is_err());
        assert!(residue.reorder_by_names(&["N", "N", "H1", "H2"]).is_err());
        assert_eq!(names(&residue), ["N", "CA", "H1", "H2"]);
    }

    #[test]
    fn reorder_by_names_handles_duplicate_names() {
        let mut residue = Residue::new(vec![
            atom("X", "C", "1", [1.0, 0.0, 0.0]),
            atom("Y", "C", "1", [2.0, 0.0, 0.0]),
            atom("X", "C", "1", [3.0, 0.0, 0.0]),
        ])
        .unwrap();
        residue.reorder_by_names(&["X", "X", "Y"]).unwrap();
        let xs: Vec<f64> = residue.atoms().iter().map(|a| a.position().x).collect();
        assert_eq!(xs, [1.0, 3.0, 2.0]);
    }

    #[test]
    fn rename_atoms_renames_through_the_map() {
        let mut residue = glycine("1", 0.0);
        let map: HashMap<String, String> = [("N", "N"), ("CA", "CA"), ("H1", "HN1"), ("H2", "HN2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        residue.rename_atoms(&map).unwrap();
        assert_eq!(names(&residue), ["N", "CA", "HN1", "HN2"]);
        assert_eq!(residue.atoms()[2].record().name(), "HN1");
    }

    #[test]
    fn rename_atoms_fails_without_partial_changes() {
        let mut residue = glycine("1", 0.0);
        let map: HashMap<String, String> = [("N".to_string(), "NT".to_string())].into();
        assert_eq!(
            residue.rename_atoms(&map),
            Err(ModelError::MissingRename {
                name: "CA".to_string()
            })
        );
        assert_eq!(names(&residue), ["N", "CA", "H1", "H2"]);
    }

    #[test]
    fn cmp_by_sequence_orders_numerically() {
        let nine = glycine("9", 0.0);
        let ten = glycine("10", 0.0);
        assert_eq!(nine.cmp_by_sequence(&ten), Ordering::Less);
        assert_eq!(ten.cmp_by_sequence(&nine), Ordering::Greater);
    }

    #[test]
    fn equality_compares_atom_contents() {
        let a = glycine("3", 0.0);
        let b = glycine("3", 10.0);
        assert_eq!(a.cmp_by_sequence(&b), Ordering::Equal);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn display_prints_one_line_per_atom() {
        let residue = glycine("1", 0.0);
        let text = residue.to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().all(|line| line.starts_with("ATOM")));
    }
}
