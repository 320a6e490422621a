//! Parser for Bruker TopSpin "*.shifts" chemical shift tables
//!
//! A shifts file is a tab-separated table with a header row naming at least
//! the `number`, `atom`, and `shift` columns. The mapping is a direct
//! column-by-column decode; extra columns are ignored and the header row is
//! discarded.

use serde::{Deserialize, Serialize};

/// Errors that can occur while decoding a "*.shifts" table.
#[derive(Debug, thiserror::Error)]
pub enum ShiftsError {
    /// TSV syntax error from the underlying reader
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks a required column
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    /// A numeric field failed to parse
    #[error("invalid {column} field: {value:?}")]
    InvalidField {
        column: &'static str,
        value: String,
    },
}

/// A decoded "*.shifts" table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftsTable {
    pub rows: Vec<ShiftRow>,
}

impl ShiftsTable {
    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// One assigned atom and its chemical shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRow {
    /// Number of the assigned atom
    pub number: i64,

    /// Chemical element of the assigned atom
    pub atom: String,

    /// Chemical shift (ppm)
    pub shift: f64,
}

/// Decode a "*.shifts" table from its text.
pub fn parse(text: &str) -> Result<ShiftsTable, ShiftsError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let number_index = column_index(&headers, "number")?;
    let atom_index = column_index(&headers, "atom")?;
    let shift_index = column_index(&headers, "shift")?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(ShiftRow {
            number: numeric_field(&record, number_index, "number")?,
            atom: record.get(atom_index).unwrap_or("").to_string(),
            shift: numeric_field(&record, shift_index, "shift")?,
        });
    }

    Ok(ShiftsTable { rows })
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, ShiftsError> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or(ShiftsError::MissingColumn(name))
}

fn numeric_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    column: &'static str,
) -> Result<T, ShiftsError> {
    let raw = record.get(index).unwrap_or("");
    raw.trim().parse().map_err(|_| ShiftsError::InvalidField {
        column,
        value: raw.to_string(),
    })
}
