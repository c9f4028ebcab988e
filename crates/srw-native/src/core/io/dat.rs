use super::header::{HEADER_LINE_COUNT, HEADER_MARKER, HeaderParseErrorKind, decode_header, strip_marker};
use super::traits::GridFile;
use super::values::read_values;
use crate::core::models::data::{MeshData, RawDat};
use std::io::{self, BufRead, Cursor, Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

const DEFAULT_CHARACTERISTIC: &str = "Characteristic [arb]";

const FIELD_DESCRIPTIONS: [&str; 9] = [
    "Initial Photon Energy [eV]",
    "Final Photon Energy [eV]",
    "Number of points vs Photon Energy",
    "Initial Horizontal Position [m]",
    "Final Horizontal Position [m]",
    "Number of points vs Horizontal Position",
    "Initial Vertical Position [m]",
    "Final Vertical Position [m]",
    "Number of points vs Vertical Position",
];

#[derive(Debug, Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(
        "Incomplete header: expected {expected} header lines, found {found}",
        expected = HEADER_LINE_COUNT
    )]
    Schema { found: usize },
    #[error("Parse error on header line {line}: {kind}")]
    Parse {
        line: usize,
        kind: HeaderParseErrorKind,
    },
}

/// The SRW `.dat` mesh format: a ten-line header decoded into metadata, then values.
pub struct DatFile;

/// Any text file with leading `#` comment lines followed by numeric tokens.
/// Nothing is decoded and the number of comment lines is unbounded.
pub struct RawDatFile;

/// Collects leading header lines, stopping at `limit` lines, at EOF, or at the
/// first line without the marker. That line is handed back unconsumed, as raw
/// bytes, so the caller can feed it to the value reader.
///
/// Header text is decoded lossily; a unit label in a legacy encoding never makes
/// a file unreadable.
fn collect_header(
    reader: &mut impl BufRead,
    limit: Option<usize>,
) -> io::Result<(Vec<String>, Option<Vec<u8>>)> {
    let mut header_lines = Vec::new();
    loop {
        if limit.is_some_and(|max| header_lines.len() >= max) {
            return Ok((header_lines, None));
        }
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok((header_lines, None));
        }
        let header_text = strip_marker(&String::from_utf8_lossy(&line)).map(str::to_owned);
        match header_text {
            Some(text) => header_lines.push(text),
            None => return Ok((header_lines, Some(line))),
        }
    }
}

fn read_body(reader: &mut impl BufRead, boundary: Option<Vec<u8>>) -> io::Result<Vec<f64>> {
    let mut body = Cursor::new(boundary.unwrap_or_default()).chain(reader);
    read_values(&mut body)
}

fn write_values(values: &[f64], writer: &mut impl Write) -> io::Result<()> {
    for v in values {
        writeln!(writer, "{:?}", v)?;
    }
    Ok(())
}

impl GridFile for DatFile {
    type Data = MeshData;
    type Error = DatError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        let (header_lines, boundary) = collect_header(reader, Some(HEADER_LINE_COUNT))?;
        let metadata = decode_header(&header_lines)?;
        let values = read_body(reader, boundary)?;

        if !metadata.matches_value_count(values.len()) {
            debug!(
                "Value count {} differs from mesh size {}.",
                values.len(),
                metadata.expected_value_count()
            );
        }
        Ok(MeshData {
            metadata,
            header_lines,
            values,
        })
    }

    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        let m = &data.metadata;
        writeln!(
            writer,
            "{}{}",
            HEADER_MARKER,
            data.characteristic().unwrap_or(DEFAULT_CHARACTERISTIC)
        )?;

        let fields = [
            format!("{:?}", m.energy_min),
            format!("{:?}", m.energy_max),
            m.point_count_energy.to_string(),
            format!("{:?}", m.x_min),
            format!("{:?}", m.x_max),
            m.point_count_x.to_string(),
            format!("{:?}", m.y_min),
            format!("{:?}", m.y_max),
            m.point_count_y.to_string(),
        ];
        for (value, description) in fields.iter().zip(FIELD_DESCRIPTIONS) {
            writeln!(
                writer,
                "{}{} {}{}",
                HEADER_MARKER, value, HEADER_MARKER, description
            )?;
        }

        write_values(&data.values, writer)?;
        Ok(())
    }
}

impl GridFile for RawDatFile {
    type Data = RawDat;
    type Error = DatError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        let (header_lines, boundary) = collect_header(reader, None)?;
        let values = read_body(reader, boundary)?;
        Ok(RawDat {
            header_lines,
            values,
        })
    }

    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        for line in &data.header_lines {
            writeln!(writer, "{}{}", HEADER_MARKER, line)?;
        }
        write_values(&data.values, writer)?;
        Ok(())
    }
}

/// Loads an SRW `.dat` mesh file.
///
/// # Errors
///
/// [`DatError::Io`] if the file cannot be opened or read, [`DatError::Schema`] if
/// it has fewer than ten header lines, [`DatError::Parse`] if a header field is
/// not numeric. Malformed value tokens are skipped, not reported.
#[instrument(skip_all, name = "load_file", fields(path = %path.as_ref().display()))]
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<MeshData, DatError> {
    let data = DatFile::read_from_path(path)?;
    debug!(
        "Loaded {} header line(s) and {} value(s).",
        data.header_lines.len(),
        data.values.len()
    );
    Ok(data)
}

/// Loads every leading `#` line and every numeric token of a text file.
///
/// # Errors
///
/// Only [`DatError::Io`].
#[instrument(skip_all, name = "load_raw_file", fields(path = %path.as_ref().display()))]
pub fn load_raw_file<P: AsRef<Path>>(path: P) -> Result<RawDat, DatError> {
    let data = RawDatFile::read_from_path(path)?;
    debug!(
        "Loaded {} header line(s) and {} value(s).",
        data.header_lines.len(),
        data.values.len()
    );
    Ok(data)
}
