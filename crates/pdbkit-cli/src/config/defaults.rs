use crate::cli::OutputFormat;

pub struct DefaultsConfig {
    pub strip_hydrogens: bool,
    pub distance_cutoff: f64,
    pub output_format: OutputFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            strip_hydrogens: false,
            distance_cutoff: 4.0,
            output_format: OutputFormat::Table,
        }
    }
}
