use super::config::ExportConfig;
use crate::core::models::data::MeshData;
use std::io::Write;
use thiserror::Error;
use tracing::{info, instrument};

const COLUMNS: [&str; 4] = ["energy", "x", "y", "value"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Mesh describes {expected} points but the file holds {found} values")]
    ValueCountMismatch { expected: u64, found: usize },
}

fn format_value(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(digits) => format!("{:.*}", digits, value),
        None => format!("{:?}", value),
    }
}

/// Writes the mesh as `energy, x, y, value` rows with energy varying fastest,
/// then x, then y. Returns the number of data rows written.
///
/// # Errors
///
/// Fails with [`ExportError::ValueCountMismatch`] unless the value count equals
/// `ne * nx * ny`, and with [`ExportError::Csv`] if writing fails.
#[instrument(skip_all, name = "write_grid_csv")]
pub fn write_grid_csv(
    data: &MeshData,
    config: &ExportConfig,
    writer: impl Write,
) -> Result<usize, ExportError> {
    let meta = &data.metadata;
    if !data.is_complete() {
        return Err(ExportError::ValueCountMismatch {
            expected: meta.expected_value_count(),
            found: data.values.len(),
        });
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(writer);
    if config.include_header {
        csv_writer.write_record(COLUMNS)?;
    }

    let (energy_axis, x_axis, y_axis) = (meta.energy_axis(), meta.x_axis(), meta.y_axis());
    let ne = energy_axis.count as usize;
    let nx = x_axis.count as usize;
    let mut rows = 0usize;
    for (i, &value) in data.values.iter().enumerate() {
        let e = energy_axis.value_at((i % ne) as u32);
        let x = x_axis.value_at(((i / ne) % nx) as u32);
        let y = y_axis.value_at((i / (ne * nx)) as u32);
        csv_writer.write_record([e, x, y, value].map(|v| format_value(v, config.precision)))?;
        rows += 1;
    }
    csv_writer.flush()?;

    info!("Exported {} grid rows.", rows);
    Ok(rows)
}
