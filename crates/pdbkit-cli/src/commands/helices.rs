use super::read_pdb;
use crate::cli::HelicesArgs;
use crate::error::Result;
use pdbkit::core::io::records::HelixRecord;
use tracing::info;

fn describe(helix: &HelixRecord) -> Result<String> {
    Ok(format!(
        "{:>3} {:<3} {} {}{}{} -> {} {}{}{} ({} residues)",
        helix.ser_num().trim(),
        helix.helix_id().trim(),
        helix.init_res_name().trim(),
        helix.init_chain_id().trim(),
        helix.init_seq_num().trim(),
        helix.init_i_code().trim(),
        helix.end_res_name().trim(),
        helix.end_chain_id().trim(),
        helix.end_seq_num().trim(),
        helix.end_i_code().trim(),
        helix.residue_count()?,
    ))
}

pub fn run(args: HelicesArgs) -> Result<()> {
    let contents = read_pdb(&args.input)?;
    let lines = contents
        .helices()
        .map(describe)
        .collect::<Result<Vec<_>>>()?;

    info!("Found {} HELIX record(s).", lines.len());
    if lines.is_empty() {
        println!("No HELIX records in {}", args.input.display());
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
