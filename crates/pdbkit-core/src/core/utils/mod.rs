//! Independent numeric helpers used by analysis scripts around the core model.

pub mod distro;
pub mod numeric;
pub mod ranges;
