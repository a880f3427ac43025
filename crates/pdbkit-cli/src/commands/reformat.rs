use super::read_pdb;
use crate::cli::ReformatArgs;
use crate::config::Settings;
use crate::error::{CliError, Result};
use pdbkit::core::io::pdb::PdbFile;
use pdbkit::core::io::traits::RecordFile;
use pdbkit::core::models::protein::Protein;
use tracing::info;

pub fn run(args: ReformatArgs, settings: &Settings) -> Result<()> {
    let mut contents = read_pdb(&args.input)?;

    let mut protein = Protein::from_records(contents.atoms().cloned().collect(), None)?;
    info!(
        residues = protein.len(),
        atoms = protein.atom_count(),
        "Built protein model."
    );

    if settings.strip_hydrogens {
        let removed = protein.strip_hydrogens();
        info!("Stripped {} hydrogen atom(s).", removed);
    }
    if !settings.rename.is_empty() {
        protein.rename_atoms(&settings.rename)?;
        info!("Renamed atoms using {} mapping(s).", settings.rename.len());
    }

    contents.replace_atoms(protein.to_records());

    info!("Writing reformatted structure to {:?}", &args.output);
    PdbFile::write_to_path(&contents, &args.output).map_err(|e| CliError::FileParsing {
        path: args.output.clone(),
        source: e.into(),
    })?;

    println!(
        "Wrote {} residue(s), {} atom(s) to {}",
        protein.len(),
        protein.atom_count(),
        args.output.display()
    );
    Ok(())
}
