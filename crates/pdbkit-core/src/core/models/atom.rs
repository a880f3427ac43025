use super::error::ModelError;
use crate::core::io::records::AtomRecord;
use nalgebra::{Point3, Vector3};
use std::fmt;

/// An atom built from one ATOM/HETATM record.
///
/// The position is parsed from the record's coordinate fields once, at construction.
/// The name is always read through the record, so a renamed atom can never disagree
/// with the record it will be written back as.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    record: AtomRecord,
    /// Cartesian coordinates in Angstroms.
    position: Point3<f64>,
    /// Force acting on the atom; zero unless supplied.
    force: Vector3<f64>,
}

impl Atom {
    /// Creates an atom with zero force.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Record`] if a coordinate field is not a number.
    pub fn new(record: AtomRecord) -> Result<Self, ModelError> {
        Self::with_force(record, Vector3::zeros())
    }

    /// Creates an atom carrying the given force vector.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Record`] if a coordinate field is not a number.
    pub fn with_force(record: AtomRecord, force: Vector3<f64>) -> Result<Self, ModelError> {
        let position = record.position()?;
        Ok(Self {
            record,
            position,
            force,
        })
    }

    pub fn record(&self) -> &AtomRecord {
        &self.record
    }

    pub fn name(&self) -> &str {
        self.record.name()
    }

    pub fn serial(&self) -> &str {
        self.record.serial()
    }

    pub fn element(&self) -> &str {
        self.record.element()
    }

    pub fn res_name(&self) -> &str {
        self.record.res_name()
    }

    pub fn res_seq(&self) -> &str {
        self.record.res_seq()
    }

    pub fn chain_id(&self) -> &str {
        self.record.chain_id()
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    pub fn force(&self) -> &Vector3<f64> {
        &self.force
    }

    pub fn set_force(&mut self, force: Vector3<f64>) {
        self.force = force;
    }

    pub fn is_hydrogen(&self) -> bool {
        self.record.is_hydrogen()
    }

    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    /// Returns a copy of this atom whose name and backing record carry `name`.
    pub fn with_name(&self, name: &str) -> Self {
        Self {
            record: self.record.with_name(name),
            ..self.clone()
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}
