pub mod contacts;
pub mod helices;
pub mod neighbors;
pub mod reformat;

use crate::error::{CliError, Result};
use pdbkit::core::io::pdb::{PdbContents, PdbFile};
use pdbkit::core::io::traits::RecordFile;
use std::path::Path;
use tracing::info;

fn read_pdb(path: &Path) -> Result<PdbContents> {
    info!("Loading input structure from {:?}", path);
    PdbFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}
