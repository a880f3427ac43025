use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PDB_ID_LEN: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("PDB id '{0}' is shorter than four characters")]
    InvalidPdbId(String),
    #[error("Invalid resolution value '{0}'")]
    InvalidResolution(String),
}

/// A four-character, upper-case Protein Data Bank identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PdbId(String);

impl PdbId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PdbId {
    type Err = ResolutionError;

    /// Keeps the first four characters of `s`, upper-cased. Longer input such as a file
    /// stem (`2rh1_clean`) is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: String = s.trim().chars().take(PDB_ID_LEN).collect();
        if id.chars().count() < PDB_ID_LEN {
            return Err(ResolutionError::InvalidPdbId(s.to_string()));
        }
        Ok(Self(id.to_uppercase()))
    }
}

impl fmt::Display for PdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Experimental resolution of a structure as reported by a resolution source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Resolution in Angstroms.
    Angstroms(f64),
    /// The entry exists but reports no resolution ("N/A").
    NotAvailable,
    /// The entry could not be found ("N/F").
    NotFound,
}

impl Resolution {
    pub fn angstroms(&self) -> Option<f64> {
        match self {
            Resolution::Angstroms(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromStr for Resolution {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "N/A" => Ok(Resolution::NotAvailable),
            "N/F" => Ok(Resolution::NotFound),
            value => value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(Resolution::Angstroms)
                .ok_or_else(|| ResolutionError::InvalidResolution(s.to_string())),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Angstroms(value) => write!(f, "{:.2}", value),
            Resolution::NotAvailable => f.write_str("N/A"),
            Resolution::NotFound => f.write_str("N/F"),
        }
    }
}
