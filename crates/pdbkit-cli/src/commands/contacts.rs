use crate::cli::{ContactsArgs, OutputFormat};
use crate::config::Settings;
use crate::error::{CliError, Result};
use pdbkit::analysis::contacts::{ContactReport, ContactReportFile};
use pdbkit::core::io::traits::RecordFile;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use tracing::info;

#[derive(Serialize, Debug, PartialEq)]
struct PairRow {
    low_group: u8,
    high_group: u8,
    interaction_type: String,
    count: usize,
    fraction: f64,
}

fn pair_rows(report: &ContactReport) -> Vec<PairRow> {
    let total = report.len().max(1) as f64;
    report
        .pair_statistics()
        .into_iter()
        .map(|(pair, count)| PairRow {
            low_group: pair.low_group,
            high_group: pair.high_group,
            interaction_type: pair.interaction_type,
            count,
            fraction: count as f64 / total,
        })
        .collect()
}

fn write_csv<W: Write>(rows: &[PairRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn write_table<W: Write>(rows: &[PairRow], mut writer: W) -> Result<()> {
    writeln!(writer, "{:<12} {:>6} {:>8}", "pair", "count", "fraction")?;
    for row in rows {
        let label = format!("{} {} {}", row.low_group, row.high_group, row.interaction_type);
        writeln!(writer, "{:<12} {:>6} {:>8.3}", label, row.count, row.fraction)?;
    }
    Ok(())
}

pub fn run(args: ContactsArgs, settings: &Settings) -> Result<()> {
    info!("Loading contact report from {:?}", &args.input);
    let report =
        ContactReportFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;
    info!(
        contacts = report.len(),
        networks = report.networks().len(),
        "Parsed contact report."
    );

    let rows = pair_rows(&report);
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    match settings.output_format {
        OutputFormat::Csv => write_csv(&rows, writer)?,
        OutputFormat::Table => write_table(&rows, writer)?,
    }

    if let Some(path) = &args.output {
        println!(
            "Wrote statistics for {} interaction pair(s) to {}",
            rows.len(),
            path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::write_file;
    use std::collections::HashMap;

    const REPORT: &str = "\
    Type   Chain     Pos Residue       Chain     Pos Residue      Net
1     HB    1:1C3WA_c   3 LEU13.O       1:1C3WA_c   7 THR17.OG1     16
2     HB    1:1C3WA_c   7 THR17.OG1     1:1C3WA_c   3 LEU13.O       16
3     ION   1:1C3WA_c  30 LYS113.NZ     1:1C3WA_c  34 GLU117.OE1    17
4     HB    1:1C3WA_c   8 SER18.OG      1:1C3WA_c   2 ALA12.O       18
";

    fn settings(output_format: OutputFormat) -> Settings {
        Settings {
            strip_hydrogens: false,
            rename: HashMap::new(),
            distance_cutoff: 4.0,
            output_format,
        }
    }

    #[test]
    fn csv_output_lists_each_canonical_pair() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(&dir, "report.txt", REPORT);
        let output = dir.path().join("stats.csv");

        run(
            ContactsArgs {
                input,
                output: Some(output.clone()),
                format: Some(OutputFormat::Csv),
            },
            &settings(OutputFormat::Csv),
        )
        .unwrap();

        let written = std::fs::read_to_string(output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            [
                "low_group,high_group,interaction_type,count,fraction",
                "1,2,ION,1,0.25",
                "4,5,HB,3,0.75",
            ]
        );
    }

    #[test]
    fn table_output_writes_labels() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(&dir, "report.txt", REPORT);
        let output = dir.path().join("stats.txt");

        run(
            ContactsArgs {
                input,
                output: Some(output.clone()),
                format: None,
            },
            &settings(OutputFormat::Table),
        )
        .unwrap();

        let written = std::fs::read_to_string(output).unwrap();
        assert!(written.starts_with("pair"));
        assert!(written.contains("4 5 HB"));
        assert!(written.contains("0.750"));
    }

    #[test]
    fn malformed_reports_are_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(&dir, "report.txt", "1 HB 1:1C3WA_c 3 XYZ13.O 1:1C3WA_c 7 THR17.OG1 16\n");
        let result = run(
            ContactsArgs {
                input,
                output: None,
                format: None,
            },
            &settings(OutputFormat::Table),
        );
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
