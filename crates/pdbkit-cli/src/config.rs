pub mod defaults;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::error::{CliError, Result};
use clap::ValueEnum;
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialAtomsConfig {
    #[serde(rename = "strip-hydrogens")]
    strip_hydrogens: Option<bool>,
    rename: Option<HashMap<String, String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialContactsConfig {
    #[serde(rename = "distance-cutoff")]
    distance_cutoff: Option<f64>,
    #[serde(rename = "output-format")]
    output_format: Option<OutputFormat>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    atoms: Option<PartialAtomsConfig>,
    contacts: Option<PartialContactsConfig>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub strip_hydrogens: bool,
    /// Atom renaming table; empty means atoms keep their names.
    pub rename: HashMap<String, String>,
    pub distance_cutoff: f64,
    pub output_format: OutputFormat,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file if one was given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final settings. Precedence: command flags, then `--set` values,
    /// then the file, then the built-in defaults.
    pub fn merge_with_cli(mut self, cli: &Cli) -> Result<Settings> {
        self.apply_set_values(&cli.set_values)?;

        let defaults = DefaultsConfig::default();
        let atoms = self.atoms.take().unwrap_or_default();
        let contacts = self.contacts.take().unwrap_or_default();

        let mut settings = Settings {
            strip_hydrogens: atoms.strip_hydrogens.unwrap_or(defaults.strip_hydrogens),
            rename: atoms.rename.unwrap_or_default(),
            distance_cutoff: contacts.distance_cutoff.unwrap_or(defaults.distance_cutoff),
            output_format: contacts.output_format.unwrap_or(defaults.output_format),
        };

        match &cli.command {
            Commands::Reformat(args) => {
                if args.strip_hydrogens {
                    settings.strip_hydrogens = true;
                }
            }
            Commands::Neighbors(args) => {
                if let Some(cutoff) = args.cutoff {
                    settings.distance_cutoff = cutoff;
                }
            }
            Commands::Contacts(args) => {
                if let Some(format) = args.format {
                    settings.output_format = format;
                }
            }
            Commands::Helices(_) => {}
        }

        if !(settings.distance_cutoff.is_finite() && settings.distance_cutoff > 0.0) {
            return Err(CliError::Config(format!(
                "`contacts.distance-cutoff` must be a positive number, got {}",
                settings.distance_cutoff
            )));
        }

        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            match key {
                "atoms.strip-hydrogens" => {
                    self.atoms
                        .get_or_insert_with(Default::default)
                        .strip_hydrogens = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "contacts.distance-cutoff" => {
                    self.contacts
                        .get_or_insert_with(Default::default)
                        .distance_cutoff = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?);
                }
                "contacts.output-format" => {
                    self.contacts
                        .get_or_insert_with(Default::default)
                        .output_format =
                        Some(OutputFormat::from_str(value_str, true).map_err(|_| {
                            CliError::Config(format!(
                                "Invalid output format for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("pdbkit.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn resolve(config: PartialConfig, args: &[&str]) -> Result<Settings> {
        let cli = Cli::parse_from(std::iter::once("pdbkit").chain(args.iter().copied()));
        config.merge_with_cli(&cli)
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = resolve(PartialConfig::default(), &["helices", "-i", "in.pdb"]).unwrap();
        assert!(!settings.strip_hydrogens);
        assert!(settings.rename.is_empty());
        assert_eq!(settings.distance_cutoff, 4.0);
        assert_eq!(settings.output_format, OutputFormat::Table);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [atoms]
            strip-hydrogens = true

            [atoms.rename]
            HN = "H"
            CA = "CA"

            [contacts]
            distance-cutoff = 3.5
            output-format = "csv"
            "#,
        );
        let config = PartialConfig::from_file(&path).unwrap();
        let settings = resolve(config, &["contacts", "-i", "report.txt"]).unwrap();
        assert!(settings.strip_hydrogens);
        assert_eq!(settings.rename.get("HN").map(String::as_str), Some("H"));
        assert_eq!(settings.distance_cutoff, 3.5);
        assert_eq!(settings.output_format, OutputFormat::Csv);
    }

    #[test]
    fn command_flags_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "[contacts]\ndistance-cutoff = 3.5\n");
        let config = PartialConfig::load(Some(&path)).unwrap();
        let settings = resolve(
            config,
            &["neighbors", "-i", "in.pdb", "--residue", "4", "--cutoff", "6.0"],
        )
        .unwrap();
        assert_eq!(settings.distance_cutoff, 6.0);
    }

    #[test]
    fn set_values_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "[contacts]\noutput-format = \"table\"\n");
        let config = PartialConfig::from_file(&path).unwrap();
        let settings = resolve(
            config,
            &[
                "-S",
                "contacts.output-format=CSV",
                "-S",
                "atoms.strip-hydrogens=true",
                "reformat",
                "-i",
                "in.pdb",
                "-o",
                "out.pdb",
            ],
        )
        .unwrap();
        assert_eq!(settings.output_format, OutputFormat::Csv);
        assert!(settings.strip_hydrogens);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "[contacts]\ncutoff = 3.0\n");
        assert!(matches!(
            PartialConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));

        let result = resolve(
            PartialConfig::default(),
            &["-S", "atoms.colour=red", "helices", "-i", "in.pdb"],
        );
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn non_positive_cutoffs_are_rejected() {
        let result = resolve(
            PartialConfig::default(),
            &["neighbors", "-i", "in.pdb", "--residue", "4", "--cutoff", "0"],
        );
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("distance-cutoff")));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = PartialConfig::from_file(Path::new("/nonexistent/pdbkit.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
