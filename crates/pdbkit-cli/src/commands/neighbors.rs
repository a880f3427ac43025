use super::read_pdb;
use crate::cli::NeighborsArgs;
use crate::config::Settings;
use crate::error::{CliError, Result};
use pdbkit::core::models::protein::Protein;
use pdbkit::core::models::residue::ResidueKey;
use tracing::{info, warn};

/// Keys of the residues within the configured cutoff of the query residue.
fn find_neighbors(protein: &Protein, args: &NeighborsArgs, cutoff: f64) -> Result<Vec<ResidueKey>> {
    let target = protein
        .residue_by_number(&args.chain, args.residue)
        .ok_or_else(|| {
            CliError::Argument(format!(
                "Residue {} not found on chain '{}'",
                args.residue, args.chain
            ))
        })?;

    Ok(protein
        .residues_near(cutoff, target)
        .into_iter()
        .map(|residue| residue.key().clone())
        .collect())
}

pub fn run(args: NeighborsArgs, settings: &Settings) -> Result<()> {
    let contents = read_pdb(&args.input)?;
    let protein = Protein::from_records(contents.atoms().cloned().collect(), None)?;

    let cutoff = settings.distance_cutoff;
    info!(
        chain = %args.chain,
        residue = args.residue,
        cutoff,
        "Searching for neighboring residues."
    );
    let neighbors = find_neighbors(&protein, &args, cutoff)?;

    if neighbors.is_empty() {
        warn!("No residues found within {:.2} Angstroms.", cutoff);
    }
    for key in &neighbors {
        if let Some(residue) = protein.residue(key) {
            println!("{} {}", key, residue.res_name());
        }
    }
    Ok(())
}
