use phf::{Map, phf_map};
use std::fmt;
use thiserror::Error;

/// One of the 20 canonical amino acids.
///
/// The `group` field is the interaction class designated in Sec. 2.4.2 of
/// Ray et al., Struct. Bioinf. 26:3067 (2010):
///
/// 1. basic (Lys, Arg)
/// 2. acidic (Asp, Glu)
/// 3. aromatic (Phe, Trp, Tyr, His)
/// 4. polar (Ser, Thr, Asn, Gln)
/// 5. hydrophobic (Ala, Val, Leu, Ile, Met, Cys)
/// 6. conformationally special (Pro, Gly)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AminoAcid {
    pub letter: char,
    pub abbreviation: &'static str,
    pub name: &'static str,
    pub group: u8,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AminoAcidError {
    #[error("Unknown amino acid: '{0}'")]
    UnknownAminoAcid(String),
}

#[rustfmt::skip]
static AMINO_ACIDS: [AminoAcid; 20] = [
    AminoAcid { letter: 'A', abbreviation: "ALA", name: "Alanine", group: 5 },
    AminoAcid { letter: 'V', abbreviation: "VAL", name: "Valine", group: 5 },
    AminoAcid { letter: 'L', abbreviation: "LEU", name: "Leucine", group: 5 },
    AminoAcid { letter: 'I', abbreviation: "ILE", name: "Isoleucine", group: 5 },
    AminoAcid { letter: 'P', abbreviation: "PRO", name: "Proline", group: 6 },
    AminoAcid { letter: 'F', abbreviation: "PHE", name: "Phenylalanine", group: 3 },
    AminoAcid { letter: 'W', abbreviation: "TRP", name: "Tryptophan", group: 3 },
    AminoAcid { letter: 'M', abbreviation: "MET", name: "Methionine", group: 5 },
    AminoAcid { letter: 'G', abbreviation: "GLY", name: "Glycine", group: 6 },
    AminoAcid { letter: 'S', abbreviation: "SER", name: "Serine", group: 4 },
    AminoAcid { letter: 'T', abbreviation: "THR", name: "Threonine", group: 4 },
    AminoAcid { letter: 'C', abbreviation: "CYS", name: "Cysteine", group: 5 },
    AminoAcid { letter: 'Y', abbreviation: "TYR", name: "Tyrosine", group: 3 },
    AminoAcid { letter: 'N', abbreviation: "ASN", name: "Asparagine", group: 4 },
    AminoAcid { letter: 'Q', abbreviation: "GLN", name: "Glutamine", group: 4 },
    AminoAcid { letter: 'D', abbreviation: "ASP", name: "Aspartic Acid", group: 2 },
    AminoAcid { letter: 'E', abbreviation: "GLU", name: "Glutamic Acid", group: 2 },
    AminoAcid { letter: 'K', abbreviation: "LYS", name: "Lysine", group: 1 },
    AminoAcid { letter: 'R', abbreviation: "ARG", name: "Arginine", group: 1 },
    AminoAcid { letter: 'H', abbreviation: "HIS", name: "Histidine", group: 3 },
];

// Both indexes point into AMINO_ACIDS.
#[rustfmt::skip]
static BY_ABBREVIATION: Map<&'static str, usize> = phf_map! {
    "ALA" => 0, "VAL" => 1, "LEU" => 2, "ILE" => 3, "PRO" => 4,
    "PHE" => 5, "TRP" => 6, "MET" => 7, "GLY" => 8, "SER" => 9,
    "THR" => 10, "CYS" => 11, "TYR" => 12, "ASN" => 13, "GLN" => 14,
    "ASP" => 15, "GLU" => 16, "LYS" => 17, "ARG" => 18, "HIS" => 19,
};

#[rustfmt::skip]
static BY_LETTER: Map<char, usize> = phf_map! {
    'A' => 0, 'V' => 1, 'L' => 2, 'I' => 3, 'P' => 4,
    'F' => 5, 'W' => 6, 'M' => 7, 'G' => 8, 'S' => 9,
    'T' => 10, 'C' => 11, 'Y' => 12, 'N' => 13, 'Q' => 14,
    'D' => 15, 'E' => 16, 'K' => 17, 'R' => 18, 'H' => 19,
};

impl AminoAcid {
    /// Looks up an amino acid by its three-letter abbreviation, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AminoAcidError::UnknownAminoAcid`] if the abbreviation is not one of the
    /// 20 canonical residues.
    pub fn by_abbreviation(abbreviation: &str) -> Result<&'static AminoAcid, AminoAcidError> {
        BY_ABBREVIATION
            .get(abbreviation.to_ascii_uppercase().as_str())
            .map(|&index| &AMINO_ACIDS[index])
            .ok_or_else(|| AminoAcidError::UnknownAminoAcid(abbreviation.to_string()))
    }

    /// Looks up an amino acid by its one-letter code, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AminoAcidError::UnknownAminoAcid`] if the letter is not a canonical code.
    pub fn by_letter(letter: char) -> Result<&'static AminoAcid, AminoAcidError> {
        BY_LETTER
            .get(&letter.to_ascii_uppercase())
            .map(|&index| &AMINO_ACIDS[index])
            .ok_or_else(|| AminoAcidError::UnknownAminoAcid(letter.to_string()))
    }

    pub fn all() -> &'static [AminoAcid] {
        &AMINO_ACIDS
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.abbreviation, self.letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn by_abbreviation_is_case_insensitive() {
        let upper = AminoAcid::by_abbreviation("ALA").unwrap();
        let lower = AminoAcid::by_abbreviation("ala").unwrap();
        let mixed = AminoAcid::by_abbreviation("aLa").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper, mixed);
        assert_eq!(upper.letter, 'A');
        assert_eq!(upper.group, 5);
    }

    #[test]
    fn by_abbreviation_fails_for_unknown_code() {
        assert_eq!(
            AminoAcid::by_abbreviation("ZZZ"),
            Err(AminoAcidError::UnknownAminoAcid("ZZZ".to_string()))
        );
        assert!(AminoAcid::by_abbreviation("").is_err());
        assert!(AminoAcid::by_abbreviation("HOH").is_err());
    }

    #[test]
    fn by_letter_is_case_insensitive() {
        assert_eq!(AminoAcid::by_letter('s').unwrap().abbreviation, "SER");
        assert_eq!(AminoAcid::by_letter('S').unwrap().abbreviation, "SER");
        assert_eq!(
            AminoAcid::by_letter('B'),
            Err(AminoAcidError::UnknownAminoAcid("B".to_string()))
        );
    }

    #[test]
    fn letter_and_abbreviation_indexes_agree_for_every_entry() {
        for acid in AminoAcid::all() {
            assert_eq!(AminoAcid::by_letter(acid.letter).unwrap(), acid);
            assert_eq!(AminoAcid::by_abbreviation(acid.abbreviation).unwrap(), acid);
        }
    }

    #[test]
    fn table_has_twenty_unique_entries_with_groups_in_range() {
        let all = AminoAcid::all();
        assert_eq!(all.len(), 20);
        let letters: HashSet<_> = all.iter().map(|a| a.letter).collect();
        let abbreviations: HashSet<_> = all.iter().map(|a| a.abbreviation).collect();
        assert_eq!(letters.len(), 20);
        assert_eq!(abbreviations.len(), 20);
        assert!(all.iter().all(|a| (1..=6).contains(&a.group)));
    }

    #[test]
    fn groups_follow_the_interaction_classes() {
        let group = |abbr: &str| AminoAcid::by_abbreviation(abbr).unwrap().group;
        assert_eq!(group("LYS"), 1);
        assert_eq!(group("ARG"), 1);
        assert_eq!(group("ASP"), 2);
        assert_eq!(group("HIS"), 3);
        assert_eq!(group("SER"), 4);
        assert_eq!(group("CYS"), 5);
        assert_eq!(group("GLY"), 6);
    }

    #[test]
    fn display_shows_name_and_codes() {
        let acid = AminoAcid::by_letter('W').unwrap();
        assert_eq!(acid.to_string(), "Tryptophan (TRP, W)");
    }
}
