use super::load_mesh;
use crate::cli::{InspectArgs, OutputFormat};
use crate::config::{CliOverrides, PartialCliConfig};
use crate::error::Result;
use crate::utils::report::InspectReport;
use std::io::Write;
use tracing::info;

pub fn run(args: InspectArgs, config: &PartialCliConfig, out: &mut impl Write) -> Result<()> {
    let settings = config.resolve(CliOverrides {
        format: args.format,
        precision: args.precision,
        ..Default::default()
    })?;

    let data = load_mesh(&args.input)?;
    let report = InspectReport::new(&args.input, &data);
    info!(
        "Decoded mesh {}x{}x{} with {} value(s).",
        data.metadata.point_count_energy,
        data.metadata.point_count_x,
        data.metadata.point_count_y,
        report.value_count
    );

    match settings.format {
        OutputFormat::Text => report.write_text(out, settings.precision)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
