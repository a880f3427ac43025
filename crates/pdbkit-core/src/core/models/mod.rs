//! # Core Models Module
//!
//! The three-level ownership hierarchy built from parsed atom records, plus the static
//! amino acid registry used to classify residues.
//!
//! ## Key Components
//!
//! - [`amino_acid`] - The 20 canonical amino acids and their interaction groups
//! - [`atom`] - One atom record with its cached position and force
//! - [`residue`] - Ordered atoms sharing one chain and sequence number
//! - [`protein`] - Residues grouped in first-seen order
//! - [`error`] - Failures raised while building or editing the hierarchy
//!
//! ## Usage
//!
//! ```ignore
//! use pdbkit::core::models::protein::Protein;
//!
//! let protein = Protein::from_records(records, None)?;
//! for residue in protein.residues() {
//!     println!("{} {}", residue.res_name(), residue.sequence_number());
//! }
//! ```

pub mod amino_acid;
pub mod atom;
pub mod error;
pub mod protein;
pub mod residue;
