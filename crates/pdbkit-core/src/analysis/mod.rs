//! # Analysis Module
//!
//! Classification and lookup contracts layered over the core model.
//!
//! - [`contacts`] - Interresidue contact parsing and canonical interaction-pair statistics
//! - [`resolution`] - PDB identifiers and experimental resolution values

pub mod contacts;
pub mod resolution;
