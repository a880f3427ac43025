use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Andrew J. Heim",
    version,
    about = "pdbkit - Reformat PDB structures, list helices, find neighboring residues, and tally MOE contact reports.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S contacts.distance-cutoff=3.5
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-render a PDB file in canonical fixed-column layout.
    Reformat(ReformatArgs),
    /// List the HELIX records of a PDB file.
    Helices(HelicesArgs),
    /// List residues within a distance cutoff of a given residue.
    Neighbors(NeighborsArgs),
    /// Tally interaction-pair labels of a MOE protein contact report.
    Contacts(ContactsArgs),
}

/// Arguments for the `reformat` subcommand.
#[derive(Args, Debug)]
pub struct ReformatArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Remove hydrogen atoms, overriding `atoms.strip-hydrogens` from the config file.
    #[arg(long)]
    pub strip_hydrogens: bool,
}

/// Arguments for the `helices` subcommand.
#[derive(Args, Debug)]
pub struct HelicesArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `neighbors` subcommand.
#[derive(Args, Debug)]
pub struct NeighborsArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Chain identifier of the query residue.
    #[arg(long, default_value = "", value_name = "ID")]
    pub chain: String,

    /// Sequence number of the query residue.
    #[arg(short, long, required = true, allow_negative_numbers = true, value_name = "INT")]
    pub residue: i32,

    /// Distance cutoff in Angstroms, overriding `contacts.distance-cutoff`.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,
}

/// Arguments for the `contacts` subcommand.
#[derive(Args, Debug)]
pub struct ContactsArgs {
    /// Path to the MOE contact report.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Write the statistics to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format, overriding `contacts.output-format`.
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
}
