//! Data models for "peaklist.xml" structures
//!
//! These mirror the XML node tree one struct per element, with optional
//! fields for attributes the writing application may omit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Template for the `modified` and `date` timestamp attributes.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A whole "peaklist.xml" document: the root `<PeakList>` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakListDocument {
    pub root: PeakList,
}

/// The `<PeakList>` root element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakList {
    /// When the peak list was last modified
    pub modified: Option<NaiveDateTime>,

    /// One `<PeakList1D>` per spectrum
    pub children: Vec<PeakList1D>,
}

/// A `<PeakList1D>` element: the picked peaks of one 1D spectrum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakList1D {
    pub header: Option<PeakList1DHeader>,
    pub peaks: Vec<Peak1D>,
}

/// A `<PeakList1DHeader>` element: provenance for one spectrum's peak picks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakList1DHeader {
    /// Creating application
    pub creator: Option<String>,

    /// When the peak picking was run
    pub date: Option<NaiveDateTime>,

    /// Experiment number
    pub exp_no: Option<i64>,

    /// Dataset name
    pub name: Option<String>,

    /// Owning user
    pub owner: Option<String>,

    /// Processing number
    pub proc_no: Option<i64>,

    /// Source data directory
    pub source: Option<String>,

    /// Nested `<PeakPickDetails>` parameters
    pub details: Option<PeakPickDetails>,
}

/// The `<PeakPickDetails>` element, whose text content follows the fixed
/// grammar `F1=<f>ppm, F2=<f>ppm, MI=<f>cm, MAXI=<f>cm, PC=<f>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakPickDetails {
    /// F1 region bound (ppm)
    pub f1: f64,

    /// F2 region bound (ppm)
    pub f2: f64,

    /// Minimum intensity (cm)
    pub mi: f64,

    /// Maximum intensity (cm)
    pub maxi: f64,

    /// Peak picking sensitivity
    pub pc: f64,
}

impl PeakPickDetails {
    /// Parse the fixed-grammar text content of a `<PeakPickDetails>` node.
    /// Returns `None` when the content does not match the grammar.
    pub fn parse_content(content: &str) -> Option<Self> {
        let rest = content.trim();
        let (f1, rest) = scan_field(rest, "F1=", "ppm,")?;
        let (f2, rest) = scan_field(rest, "F2=", "ppm,")?;
        let (mi, rest) = scan_field(rest, "MI=", "cm,")?;
        let (maxi, rest) = scan_field(rest, "MAXI=", "cm,")?;
        let pc = rest.trim().strip_prefix("PC=")?.trim().parse().ok()?;

        Some(Self { f1, f2, mi, maxi, pc })
    }

    /// Render the canonical text content, six decimals per value.
    pub fn format_content(&self) -> String {
        format!(
            "F1={:.6}ppm, F2={:.6}ppm, MI={:.6}cm, MAXI={:.6}cm, PC={:.6}",
            self.f1, self.f2, self.mi, self.maxi, self.pc
        )
    }
}

/// Scan one `<key><value><unit>,` field and return the value and the
/// remaining input.
fn scan_field<'a>(input: &'a str, key: &str, terminator: &str) -> Option<(f64, &'a str)> {
    let rest = input.trim_start().strip_prefix(key)?;
    let end = rest.find(terminator)?;
    let value = rest[..end].trim().parse().ok()?;

    Some((value, &rest[end + terminator.len()..]))
}

/// A `<Peak1D>` element: one picked peak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Peak1D {
    /// F1 coordinate (ppm)
    pub f1: Option<f64>,

    /// Intensity integral (cm)
    pub intensity: Option<f64>,

    /// Peak type code (the `type` attribute; 0 for a regular pick)
    pub kind: Option<i64>,
}
