use crate::cli::{OutputFormat, SumArgs};
use crate::config::{CliOverrides, PartialCliConfig};
use crate::error::{CliError, Result};
use crate::utils::report::{SumReport, format_number};
use std::io::Write;
use tracing::info;

pub fn run(args: SumArgs, config: &PartialCliConfig, out: &mut impl Write) -> Result<()> {
    let settings = config.resolve(CliOverrides {
        format: args.format,
        precision: args.precision,
        ..Default::default()
    })?;

    let values = if args.raw {
        info!("Reading {:?} without decoding a mesh header.", &args.input);
        srw_native::load_raw_file(&args.input)
            .map_err(|e| CliError::FileParsing {
                path: args.input.clone(),
                source: e.into(),
            })?
            .values
    } else {
        super::load_mesh(&args.input)?.values
    };
    let report = SumReport::new(&args.input, &values);

    match settings.format {
        OutputFormat::Text => writeln!(out, "{}", format_number(report.sum, settings.precision))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
