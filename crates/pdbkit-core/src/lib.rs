//! # pdbkit Core Library
//!
//! Structured access to Protein Data Bank (PDB) fixed-column text and to MOE-style
//! residue-contact reports, with lossless reconstruction of the original records.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers:
//!
//! - **[`core`]: The Foundation.** The fixed-column record codec (`io`), the
//!   Atom → Residue → Protein ownership hierarchy (`models`), the static amino acid
//!   registry, and small numeric helpers (`utils`).
//!
//! - **[`analysis`]: Derived Knowledge.** Classification built on top of the foundation:
//!   canonical interaction-pair labels for residue contacts, and the typed side of the
//!   structure-resolution lookup contract.

pub mod analysis;
pub mod core;
