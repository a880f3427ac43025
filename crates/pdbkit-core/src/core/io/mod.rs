//! Provides input/output functionality for the PDB fixed-column text format.
//!
//! The [`pdb`] module holds the line-level codec for ATOM/HETATM and HELIX records and a
//! whole-file reader/writer built on it. [`traits`] defines the stream interface shared by
//! file formats.

pub mod pdb;
pub mod records;
pub mod traits;
