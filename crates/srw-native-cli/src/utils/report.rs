use serde::Serialize;
use srw_native::{Axis, MeshData, MeshMetadata};
use std::io::{self, Write};
use std::path::Path;

pub fn format_number(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(digits) => format!("{:.*}", digits, value),
        None => value.to_string(),
    }
}

fn write_axis(
    out: &mut impl Write,
    name: &str,
    axis: Axis,
    precision: Option<usize>,
) -> io::Result<()> {
    writeln!(
        out,
        "{:<8}{} point(s) from {} to {}",
        name,
        axis.count,
        format_number(axis.min, precision),
        format_number(axis.max, precision)
    )
}

#[derive(Debug, Serialize)]
pub struct InspectReport<'a> {
    pub path: String,
    pub characteristic: Option<&'a str>,
    pub metadata: &'a MeshMetadata,
    pub header_lines: &'a [String],
    pub value_count: usize,
    pub expected_value_count: u64,
    pub sum: f64,
}

impl<'a> InspectReport<'a> {
    pub fn new(path: &Path, data: &'a MeshData) -> Self {
        Self {
            path: path.display().to_string(),
            characteristic: data.characteristic(),
            metadata: &data.metadata,
            header_lines: &data.header_lines,
            value_count: data.values.len(),
            expected_value_count: data.metadata.expected_value_count(),
            sum: srw_native::sum(&data.values),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.metadata.matches_value_count(self.value_count)
    }

    pub fn write_text(&self, out: &mut impl Write, precision: Option<usize>) -> io::Result<()> {
        writeln!(out, "File:   {}", self.path)?;
        writeln!(out, "Label:  {}", self.characteristic.unwrap_or("-"))?;
        write_axis(out, "Energy:", self.metadata.energy_axis(), precision)?;
        write_axis(out, "X:", self.metadata.x_axis(), precision)?;
        write_axis(out, "Y:", self.metadata.y_axis(), precision)?;
        writeln!(
            out,
            "Values: {} (mesh size {})",
            self.value_count, self.expected_value_count
        )?;
        writeln!(out, "Sum:    {}", format_number(self.sum, precision))?;
        if !self.is_complete() {
            writeln!(
                out,
                "Warning: value count does not match the mesh size described by the header."
            )?;
        }
        writeln!(out, "Header lines:")?;
        for (i, line) in self.header_lines.iter().enumerate() {
            writeln!(out, "  [{}] {}", i, line)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct SumReport {
    pub path: String,
    pub value_count: usize,
    pub sum: f64,
}

impl SumReport {
    pub fn new(path: &Path, values: &[f64]) -> Self {
        Self {
            path: path.display().to_string(),
            value_count: values.len(),
            sum: srw_native::sum(values),
        }
    }
}
