use super::load_mesh;
use crate::cli::ScaleArgs;
use crate::error::{CliError, Result};
use anyhow::Context;
use srw_native::core::io::dat::DatFile;
use srw_native::core::io::traits::GridFile;
use std::io::Write;
use tracing::info;

pub fn run(args: ScaleArgs, out: &mut impl Write) -> Result<()> {
    let mut data = load_mesh(&args.input)?;

    info!(
        "Scaling {} value(s) by {}.",
        data.values.len(),
        args.factor
    );
    srw_native::scale(&mut data.values, args.factor);

    DatFile::write_to_path(&data, &args.output)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))
        .map_err(CliError::Other)?;

    writeln!(
        out,
        "Wrote {} scaled value(s) to {}",
        data.values.len(),
        args.output.display()
    )?;
    Ok(())
}
