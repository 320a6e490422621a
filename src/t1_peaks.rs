//! Parser for Bruker TopSpin "t1peaks.txt" relaxation peak reports
//!
//! TopSpin (version 2.1 or newer) writes T1 relaxation peak picks as a small
//! whitespace-delimited text report:
//!
//! ```text
//! <N>
//! <row0> <row0> <row0>
//! <row1> <row1> <row1>
//! <row2> <row2> <row2>
//! ... one 3x3 block per peak ...
//! -1 0 0
//! ```
//!
//! The first line declares the total line count as `3 * peaks + 1`, the last
//! line is the fixed `-1 0 0` trailer, and every group of three data lines is
//! one peak's 3x3 parameter matrix. Only two cells of each matrix carry
//! information this parser exposes: the peak number (row 0, column 0) and the
//! signal intensity (row 2, column 1).
//!
//! Parsing is a pure function over the in-memory text. Validation runs
//! strictly left to right and stops at the first offending fragment, which is
//! carried verbatim in the returned error.

use serde::{Deserialize, Serialize};

/// Errors that can occur while parsing a "t1peaks.txt" report.
///
/// Each variant carries the raw offending fragment for diagnostics. All
/// errors are terminal: no partial document is ever produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum T1PeaksError {
    /// The first line is not a single parseable integer.
    #[error("first line is not a single integer: {0:?}")]
    InvalidFirstLine(String),

    /// The declared line count is an integer but not of the form `3k + 1`.
    #[error("declared line count {0} is not of the form 3k + 1")]
    InvalidLinesCount(i64),

    /// The last line is not exactly the three integers `-1 0 0`.
    #[error("last line is not \"-1 0 0\": {0:?}")]
    InvalidLastLine(String),

    /// The number of data lines does not match the declared line count.
    #[error("found {} data lines, which does not match the declared line count", .0.len())]
    InvalidMiddleLines(Vec<String>),

    /// A three-line group does not form a 3x3 matrix with parseable numbers
    /// at the peak-number and intensity positions.
    #[error("malformed peak slice: {0:?}")]
    InvalidSlice(Vec<String>),
}

/// A single T1 relaxation peak pick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct T1Peak {
    /// 1-based peak index declared in the report body. Taken verbatim from
    /// the data; not checked for uniqueness, ordering, or contiguity.
    pub number: i64,

    /// Signal intensity (dimensionless). No enforced range.
    pub intensity: f64,
}

/// A validated "t1peaks.txt" document: the ordered sequence of peaks, in the
/// order their slices appear in the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct T1PeaksDocument {
    pub peaks: Vec<T1Peak>,
}

impl T1PeaksDocument {
    /// Get the number of peaks
    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }
}

/// Parse a "t1peaks.txt" report.
///
/// Line separators may be `\n` or `\r\n`. Validation stages run in order and
/// short-circuit on failure: first line and declared count, trailer line,
/// data line count, then slice decoding.
pub fn parse(text: &str) -> Result<T1PeaksDocument, T1PeaksError> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    // A trailing newline would otherwise make the trailer look empty.
    while lines.len() > 1 && lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let first_line = lines[0];
    let declared = parse_declared_count(first_line)?;

    let last_line = if lines.len() > 1 { lines[lines.len() - 1] } else { "" };
    validate_trailer(last_line)?;

    let middle: &[&str] = if lines.len() > 2 {
        &lines[1..lines.len() - 1]
    } else {
        &[]
    };

    // The declared count includes the first line, so a report with k peaks
    // declares 3k + 1 and carries exactly 3k data lines.
    if middle.len() as i64 != declared - 1 {
        return Err(T1PeaksError::InvalidMiddleLines(
            middle.iter().map(|line| line.to_string()).collect(),
        ));
    }

    let mut peaks = Vec::with_capacity(middle.len() / 3);
    for slice in middle.chunks(3) {
        peaks.push(decode_slice(slice)?);
    }

    Ok(T1PeaksDocument { peaks })
}

/// Validate the first line: exactly one whitespace-delimited token, parsed as
/// an integer, congruent to 1 modulo 3.
///
/// A multi-token or non-integer first line is one error kind; a well-formed
/// integer that fails the congruence check is a distinct kind.
fn parse_declared_count(first_line: &str) -> Result<i64, T1PeaksError> {
    let mut tokens = first_line.split_whitespace();
    let declared = match (tokens.next(), tokens.next()) {
        (Some(token), None) => token
            .parse::<i64>()
            .map_err(|_| T1PeaksError::InvalidFirstLine(first_line.to_string()))?,
        _ => return Err(T1PeaksError::InvalidFirstLine(first_line.to_string())),
    };

    if (declared - 1) % 3 == 0 {
        Ok(declared)
    } else {
        Err(T1PeaksError::InvalidLinesCount(declared))
    }
}

/// Validate the trailer line: tokenized as integers it must be `[-1, 0, 0]`.
fn validate_trailer(last_line: &str) -> Result<(), T1PeaksError> {
    let fields: Result<Vec<i64>, _> = last_line
        .split_whitespace()
        .map(str::parse)
        .collect();

    match fields {
        Ok(fields) if fields == [-1, 0, 0] => Ok(()),
        _ => Err(T1PeaksError::InvalidLastLine(last_line.to_string())),
    }
}

/// Decode one three-line slice into a peak.
///
/// Each row must tokenize into exactly 3 fields. The peak number is the
/// integer at row 0, column 0; the intensity is the float at row 2, column 1.
/// The remaining 7 cells are present in the format but unused.
fn decode_slice(slice: &[&str]) -> Result<T1Peak, T1PeaksError> {
    let invalid = || T1PeaksError::InvalidSlice(slice.iter().map(|line| line.to_string()).collect());

    let rows: Vec<Vec<&str>> = slice
        .iter()
        .map(|line| line.split_whitespace().collect())
        .collect();

    if rows.len() != 3 || rows.iter().any(|row| row.len() != 3) {
        return Err(invalid());
    }

    let number = rows[0][0].parse::<i64>().map_err(|_| invalid())?;
    let intensity = rows[2][1].parse::<f64>().map_err(|_| invalid())?;

    Ok(T1Peak { number, intensity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Render peaks back into report text with canonical triples, the
    /// inverse of what `parse` extracts.
    fn render(peaks: &[(i64, f64)]) -> String {
        let mut out = format!("{}\n", peaks.len() * 3 + 1);
        for (number, intensity) in peaks {
            out.push_str(&format!("{number} 0 0\n0 0 0\n0 {intensity} 0\n"));
        }
        out.push_str("-1 0 0");
        out
    }

    #[test]
    fn test_single_peak_report() {
        let document = parse("4\n1 0 0\n0 0 0\n0 12.5 0\n-1 0 0").unwrap();
        assert_eq!(document.peak_count(), 1);
        assert_eq!(document.peaks[0], T1Peak { number: 1, intensity: 12.5 });
    }

    #[test]
    fn test_empty_report() {
        let document = parse("1\n-1 0 0").unwrap();
        assert!(document.peaks.is_empty());
    }

    #[test]
    fn test_crlf_and_trailing_newline() {
        let document = parse("4\r\n1 0 0\r\n0 0 0\r\n0 12.5 0\r\n-1 0 0\r\n").unwrap();
        assert_eq!(document.peak_count(), 1);
    }

    #[test]
    fn test_peaks_in_slice_order() {
        let document = parse("7\n3 0 0\n0 0 0\n0 1.5 0\n1 0 0\n0 0 0\n0 -2.25 0\n-1 0 0").unwrap();
        assert_eq!(
            document.peaks,
            vec![
                T1Peak { number: 3, intensity: 1.5 },
                T1Peak { number: 1, intensity: -2.25 },
            ]
        );
    }

    #[test]
    fn test_duplicate_peak_numbers_accepted() {
        let document = parse("7\n5 0 0\n0 0 0\n0 1.0 0\n5 0 0\n0 0 0\n0 2.0 0\n-1 0 0").unwrap();
        assert_eq!(document.peaks[0].number, 5);
        assert_eq!(document.peaks[1].number, 5);
    }

    #[test]
    fn test_non_integer_first_line() {
        assert_eq!(
            parse("abc\n-1 0 0"),
            Err(T1PeaksError::InvalidFirstLine("abc".to_string()))
        );
    }

    #[test]
    fn test_multi_token_first_line() {
        assert_eq!(
            parse("4 4\n-1 0 0"),
            Err(T1PeaksError::InvalidFirstLine("4 4".to_string()))
        );
    }

    #[test]
    fn test_declared_count_not_congruent() {
        assert_eq!(parse("5\n-1 0 0"), Err(T1PeaksError::InvalidLinesCount(5)));
    }

    #[test]
    fn test_wrong_trailer_values() {
        assert_eq!(
            parse("1\n0 0 0"),
            Err(T1PeaksError::InvalidLastLine("0 0 0".to_string()))
        );
    }

    #[test]
    fn test_non_integer_trailer() {
        assert_eq!(
            parse("1\n-1 0 x"),
            Err(T1PeaksError::InvalidLastLine("-1 0 x".to_string()))
        );
    }

    #[test]
    fn test_missing_trailer() {
        assert_eq!(
            parse("1"),
            Err(T1PeaksError::InvalidLastLine(String::new()))
        );
    }

    #[test]
    fn test_too_few_middle_lines() {
        assert_eq!(
            parse("4\n1 0 0\n0 0 0\n-1 0 0"),
            Err(T1PeaksError::InvalidMiddleLines(vec![
                "1 0 0".to_string(),
                "0 0 0".to_string(),
            ]))
        );
    }

    #[test]
    fn test_short_slice_row() {
        let text = "4\n1 0 0\n0 0 0\n0 12.5\n-1 0 0";
        assert_eq!(
            parse(text),
            Err(T1PeaksError::InvalidSlice(vec![
                "1 0 0".to_string(),
                "0 0 0".to_string(),
                "0 12.5".to_string(),
            ]))
        );
    }

    #[test]
    fn test_unparseable_intensity() {
        let text = "4\n1 0 0\n0 0 0\n0 twelve 0\n-1 0 0";
        assert!(matches!(parse(text), Err(T1PeaksError::InvalidSlice(_))));
    }

    #[test]
    fn test_stops_at_first_bad_slice() {
        // Second slice is malformed; nothing from the first one leaks out.
        let text = "7\n1 0 0\n0 0 0\n0 1.0 0\n2 0 0\n0 0\n0 2.0 0\n-1 0 0";
        assert_eq!(
            parse(text),
            Err(T1PeaksError::InvalidSlice(vec![
                "2 0 0".to_string(),
                "0 0".to_string(),
                "0 2.0 0".to_string(),
            ]))
        );
    }

    #[test]
    fn test_unused_matrix_cells_ignored() {
        // All cells other than (0,0) and (2,1) may hold arbitrary numbers.
        let document = parse("4\n7 9.1 -3\n4.2 8 1\n99 0.5 -7\n-1 0 0").unwrap();
        assert_eq!(document.peaks, vec![T1Peak { number: 7, intensity: 0.5 }]);
    }

    proptest! {
        #[test]
        fn roundtrip_canonical_triples(
            peaks in prop::collection::vec((any::<i64>(), -1.0e9..1.0e9f64), 0..32)
        ) {
            let document = parse(&render(&peaks)).unwrap();
            prop_assert_eq!(document.peak_count(), peaks.len());
            for (peak, (number, intensity)) in document.peaks.iter().zip(&peaks) {
                prop_assert_eq!(peak.number, *number);
                prop_assert_eq!(peak.intensity, *intensity);
            }
        }
    }
}
