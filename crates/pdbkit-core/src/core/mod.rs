//! # Core Module
//!
//! The building blocks every higher-level analysis starts from.
//!
//! ## Architecture
//!
//! - **File I/O** ([`io`]) - Fixed-column PDB record codec and whole-file reading/writing
//! - **Molecular Representation** ([`models`]) - Atoms, residues, proteins, and the amino acid registry
//! - **Utilities** ([`utils`]) - Range expansion, distribution union, and lenient float parsing
//!
//! ## Usage
//!
//! ```ignore
//! use pdbkit::core::io::pdb::parse_atom_line;
//! use pdbkit::core::models::protein::Protein;
//!
//! let records: Vec<_> = text.lines().filter_map(parse_atom_line).collect();
//! let mut protein = Protein::from_records(records, None)?;
//! protein.strip_hydrogens();
//! ```

pub mod io;
pub mod models;
pub mod utils;
