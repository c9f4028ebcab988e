//! Decoding of the fixed ten-line SRW header into [`MeshMetadata`].
//!
//! | Index | Field                        |
//! |-------|------------------------------|
//! | 0     | units / characteristic label |
//! | 1, 2  | energy min, max              |
//! | 3     | energy point count           |
//! | 4, 5  | x min, max                   |
//! | 6     | x point count                |
//! | 7, 8  | y min, max                   |
//! | 9     | y point count                |

use super::dat::DatError;
use crate::core::models::mesh::MeshMetadata;
use std::str::FromStr;
use thiserror::Error;

pub const HEADER_MARKER: char = '#';
pub const HEADER_LINE_COUNT: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderParseErrorKind {
    #[error("Invalid real number format (value: '{value}')")]
    InvalidFloat { value: String },
    #[error("Invalid point count format, expected a non-negative integer (value: '{value}')")]
    InvalidCount { value: String },
}

/// Returns the header text of `line` if it is a header line: trailing line
/// terminators and the leading marker removed, leading whitespace trimmed.
pub fn strip_marker(line: &str) -> Option<&str> {
    line.trim_end_matches(['\r', '\n'])
        .strip_prefix(HEADER_MARKER)
        .map(str::trim_start)
}

/// Decodes the mesh metadata carried by header lines 1 through 9.
///
/// Each designated line holds one number. It is taken from the start of the
/// line (`1000.0 #Initial Photon Energy [eV]`) or, failing that, from just
/// after the first marker (`Energy#1000.0`). Decoding is all-or-nothing.
///
/// # Errors
///
/// Returns [`DatError::Schema`] for fewer than ten lines and [`DatError::Parse`]
/// (carrying the 1-based file line) for the first line whose field is not numeric.
pub fn decode_header<S: AsRef<str>>(lines: &[S]) -> Result<MeshMetadata, DatError> {
    if lines.len() < HEADER_LINE_COUNT {
        return Err(DatError::Schema { found: lines.len() });
    }
    let line = |index: usize| lines[index].as_ref();

    Ok(MeshMetadata {
        energy_min: parse_real(line(1), 1)?,
        energy_max: parse_real(line(2), 2)?,
        point_count_energy: parse_count(line(3), 3)?,
        x_min: parse_real(line(4), 4)?,
        x_max: parse_real(line(5), 5)?,
        point_count_x: parse_count(line(6), 6)?,
        y_min: parse_real(line(7), 7)?,
        y_max: parse_real(line(8), 8)?,
        point_count_y: parse_count(line(9), 9)?,
    })
}

fn parse_real(line: &str, index: usize) -> Result<f64, DatError> {
    numeric_field(line).ok_or_else(|| DatError::Parse {
        line: index + 1,
        kind: HeaderParseErrorKind::InvalidFloat {
            value: line.trim().into(),
        },
    })
}

fn parse_count(line: &str, index: usize) -> Result<u32, DatError> {
    numeric_field(line).ok_or_else(|| DatError::Parse {
        line: index + 1,
        kind: HeaderParseErrorKind::InvalidCount {
            value: line.trim().into(),
        },
    })
}

fn numeric_field<T: FromStr>(line: &str) -> Option<T> {
    let (head, tail) = match line.split_once(HEADER_MARKER) {
        Some((head, tail)) => (head, Some(tail)),
        None => (line, None),
    };
    first_token(head)
        .or_else(|| tail.and_then(first_token))
}

fn first_token<T: FromStr>(text: &str) -> Option<T> {
    text.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_HEADER: [&str; 10] = [
        "Characteristic [arb]",
        "0.0",
        "100.0",
        "3",
        "-1.0",
        "1.0",
        "2",
        "-0.5",
        "0.5",
        "2",
    ];

    fn expected_minimal() -> MeshMetadata {
        MeshMetadata {
            point_count_energy: 3,
            point_count_x: 2,
            point_count_y: 2,
            energy_min: 0.0,
            energy_max: 100.0,
            x_min: -1.0,
            x_max: 1.0,
            y_min: -0.5,
            y_max: 0.5,
        }
    }

    mod strip_marker_tests {
        use super::*;

        #[test]
        fn removes_marker_and_leading_whitespace() {
            assert_eq!(strip_marker("#   header line 1\n"), Some("header line 1"));
            assert_eq!(strip_marker("#0.0\r\n"), Some("0.0"));
            assert_eq!(strip_marker("#"), Some(""));
        }

        #[test]
        fn keeps_trailing_whitespace_inside_the_line() {
            assert_eq!(strip_marker("# value  \n"), Some("value  "));
        }

        #[test]
        fn rejects_lines_without_leading_marker() {
            assert_eq!(strip_marker("1 2 3"), None);
            assert_eq!(strip_marker(" #indented"), None);
            assert_eq!(strip_marker(""), None);
        }
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn decodes_minimal_header() {
            let meta = decode_header(&MINIMAL_HEADER).unwrap();
            assert_eq!(meta, expected_minimal());
        }

        #[test]
        fn decodes_srw_style_header_with_trailing_descriptions() {
            let lines = [
                "Intensity [ph/s/.1%bw/mm^2] (C-aligned, inner loop is vs E, outer loop is vs Y)",
                "9000.0 #Initial Photon Energy [eV]",
                "9100.0 #Final Photon Energy [eV]",
                "11 #Number of points vs Photon Energy",
                "-0.001 #Initial Horizontal Position [m]",
                "0.001 #Final Horizontal Position [m]",
                "101 #Number of points vs Horizontal Position",
                "-2.5e-4 #Initial Vertical Position [m]",
                "2.5e-4 #Final Vertical Position [m]",
                "51 #Number of points vs Vertical Position",
            ];
            let meta = decode_header(&lines).unwrap();
            assert_eq!(meta.energy_min, 9000.0);
            assert_eq!(meta.energy_max, 9100.0);
            assert_eq!(meta.point_count_energy, 11);
            assert_eq!(meta.x_min, -0.001);
            assert_eq!(meta.point_count_x, 101);
            assert_eq!(meta.y_max, 2.5e-4);
            assert_eq!(meta.point_count_y, 51);
        }

        #[test]
        fn decodes_label_then_marker_form() {
            let lines = [
                "units",
                "Emin#1.5",
                "Emax#2.5",
                "Ne#4",
                "Xmin#-3",
                "Xmax#3",
                "Nx#7",
                "Ymin#-1e-3",
                "Ymax#1e-3",
                "Ny#9",
            ];
            let meta = decode_header(&lines).unwrap();
            assert_eq!(meta.energy_min, 1.5);
            assert_eq!(meta.point_count_energy, 4);
            assert_eq!(meta.x_min, -3.0);
            assert_eq!(meta.point_count_x, 7);
            assert_eq!(meta.y_min, -1e-3);
            assert_eq!(meta.point_count_y, 9);
        }

        #[test]
        fn number_before_the_marker_wins_over_number_after_it() {
            let mut lines = MINIMAL_HEADER;
            lines[1] = "1.0#2.0";
            lines[3] = "5 #7";
            let meta = decode_header(&lines).unwrap();
            assert_eq!(meta.energy_min, 1.0);
            assert_eq!(meta.point_count_energy, 5);
        }

        #[test]
        fn number_after_the_marker_is_used_when_the_head_is_not_numeric() {
            let mut lines = MINIMAL_HEADER;
            lines[2] = "Emax #250.5 trailing words";
            let meta = decode_header(&lines).unwrap();
            assert_eq!(meta.energy_max, 250.5);
        }

        #[test]
        fn label_line_is_never_parsed() {
            let mut lines = MINIMAL_HEADER;
            lines[0] = "not a number at all #nope";
            assert_eq!(decode_header(&lines).unwrap(), expected_minimal());
        }

        #[test]
        fn extra_lines_after_the_tenth_are_ignored() {
            let mut lines: Vec<&str> = MINIMAL_HEADER.to_vec();
            lines.push("garbage");
            assert_eq!(decode_header(&lines).unwrap(), expected_minimal());
        }

        #[test]
        fn nine_lines_fail_with_schema_error() {
            let result = decode_header(&MINIMAL_HEADER[..9]);
            assert!(matches!(result, Err(DatError::Schema { found: 9 })));
        }

        #[test]
        fn empty_header_fails_with_schema_error() {
            let lines: [&str; 0] = [];
            assert!(matches!(
                decode_header(&lines),
                Err(DatError::Schema { found: 0 })
            ));
        }

        #[test]
        fn non_numeric_count_fails_with_parse_error() {
            let mut lines = MINIMAL_HEADER;
            lines[3] = "abc";
            match decode_header(&lines) {
                Err(DatError::Parse { line, kind }) => {
                    assert_eq!(line, 4);
                    assert_eq!(
                        kind,
                        HeaderParseErrorKind::InvalidCount {
                            value: "abc".into()
                        }
                    );
                }
                other => panic!("expected parse error, got {:?}", other),
            }
        }

        #[test]
        fn non_numeric_real_fails_with_parse_error() {
            let mut lines = MINIMAL_HEADER;
            lines[8] = "high #still not a number";
            assert!(matches!(
                decode_header(&lines),
                Err(DatError::Parse {
                    line: 9,
                    kind: HeaderParseErrorKind::InvalidFloat { .. }
                })
            ));
        }

        #[test]
        fn negative_point_count_is_rejected() {
            let mut lines = MINIMAL_HEADER;
            lines[6] = "-2";
            assert!(matches!(
                decode_header(&lines),
                Err(DatError::Parse {
                    line: 7,
                    kind: HeaderParseErrorKind::InvalidCount { .. }
                })
            ));
        }

        #[test]
        fn fractional_point_count_is_rejected() {
            let mut lines = MINIMAL_HEADER;
            lines[9] = "2.5";
            assert!(matches!(
                decode_header(&lines),
                Err(DatError::Parse { line: 10, .. })
            ));
        }

        #[test]
        fn empty_designated_line_is_rejected() {
            let mut lines = MINIMAL_HEADER;
            lines[1] = "";
            assert!(matches!(
                decode_header(&lines),
                Err(DatError::Parse { line: 2, .. })
            ));
        }
    }
}
