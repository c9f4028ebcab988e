use std::io::{self, BufRead};
use tracing::{debug, trace};

/// Outcome of reading the value section of a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueScan {
    pub values: Vec<f64>,
    pub skipped_tokens: usize,
}

/// Reads every whitespace-delimited token left in `reader` as an `f64`, in order.
///
/// The input is treated as bytes. Tokens that are not valid UTF-8 or do not
/// parse are skipped and counted rather than failing the read.
///
/// # Errors
///
/// Only I/O errors from the reader are returned.
pub fn scan_values(reader: &mut impl BufRead) -> io::Result<ValueScan> {
    let mut scan = ValueScan::default();
    let mut line = Vec::new();
    let mut line_num = 0usize;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_num += 1;
        for token in line
            .split(u8::is_ascii_whitespace)
            .filter(|token| !token.is_empty())
        {
            match parse_token(token) {
                Some(v) => scan.values.push(v),
                None => {
                    trace!(
                        line = line_num,
                        token = %String::from_utf8_lossy(token),
                        "Skipping non-numeric value token"
                    );
                    scan.skipped_tokens += 1;
                }
            }
        }
    }

    if scan.skipped_tokens > 0 {
        debug!(
            "Skipped {} non-numeric token(s) while reading {} value(s).",
            scan.skipped_tokens,
            scan.values.len()
        );
    }
    Ok(scan)
}

fn parse_token(token: &[u8]) -> Option<f64> {
    std::str::from_utf8(token).ok()?.parse().ok()
}

/// Same as [`scan_values`], keeping only the values.
pub fn read_values(reader: &mut impl BufRead) -> io::Result<Vec<f64>> {
    scan_values(reader).map(|scan| scan.values)
}
