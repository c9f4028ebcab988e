use super::load_mesh;
use crate::cli::ExportArgs;
use crate::config::{CliOverrides, PartialCliConfig};
use crate::error::{CliError, Result};
use srw_native::core::io::export::{ExportError, write_grid_csv};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

pub fn run(args: ExportArgs, config: &PartialCliConfig, out: &mut impl Write) -> Result<()> {
    let settings = config.resolve(CliOverrides {
        precision: args.precision,
        delimiter: args.delimiter,
        include_header: args.header.as_override(),
        ..Default::default()
    })?;

    let data = load_mesh(&args.input)?;
    if !data.is_complete() {
        return Err(CliError::Export {
            path: args.input,
            source: ExportError::ValueCountMismatch {
                expected: data.metadata.expected_value_count(),
                found: data.values.len(),
            },
        });
    }

    info!("Exporting grid to {:?}", &args.output);
    let writer = BufWriter::new(File::create(&args.output)?);
    let rows = write_grid_csv(&data, &settings.export, writer).map_err(|source| {
        CliError::Export {
            path: args.input.clone(),
            source,
        }
    })?;

    writeln!(out, "Exported {} row(s) to {}", rows, args.output.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::IncludeHeader;
    use crate::commands::test_support::{MINIMAL_FILE, write_file};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn export_args(input: PathBuf, output: PathBuf) -> ExportArgs {
        ExportArgs {
            input,
            output,
            delimiter: None,
            header: IncludeHeader {
                with_header: false,
                no_header: false,
            },
            precision: None,
        }
    }

    #[test]
    fn writes_one_row_per_grid_point() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "mesh.dat", MINIMAL_FILE);
        let output = dir.path().join("mesh.csv");

        let mut out = Vec::new();
        run(
            export_args(input, output.clone()),
            &PartialCliConfig::default(),
            &mut out,
        )
        .unwrap();

        let csv = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "energy,x,y,value");
        assert_eq!(lines[2], "50.0,-1.0,-0.5,2.0");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Exported 12 row(s) to {}\n", output.display())
        );
    }

    #[test]
    fn cli_flags_control_delimiter_and_header() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "mesh.dat", MINIMAL_FILE);
        let output = dir.path().join("mesh.tsv");
        let mut args = export_args(input, output.clone());
        args.delimiter = Some('\t');
        args.header.no_header = true;
        args.precision = Some(1);

        run(args, &PartialCliConfig::default(), &mut Vec::new()).unwrap();

        let csv = std::fs::read_to_string(&output).unwrap();
        assert_eq!(csv.lines().next(), Some("0.0\t-1.0\t-0.5\t1.0"));
        assert_eq!(csv.lines().count(), 12);
    }

    #[test]
    fn incomplete_grid_is_refused_before_creating_output() {
        let dir = TempDir::new().unwrap();
        let content = MINIMAL_FILE.replace(" 12\n", "\n");
        let input = write_file(&dir, "short.dat", &content);
        let output = dir.path().join("short.csv");

        let err = run(
            export_args(input, output.clone()),
            &PartialCliConfig::default(),
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CliError::Export {
                source: ExportError::ValueCountMismatch {
                    expected: 12,
                    found: 11
                },
                ..
            }
        ));
        assert!(!output.exists());
    }
}
