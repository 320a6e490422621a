//! # Peak List Module
//!
//! Reader and writer for Bruker TopSpin "peaklist.xml" documents, the XML
//! peak list written by the peak-picking tools of TopSpin 2.1 or newer.
//!
//! ## Document Structure
//!
//! ```text
//! PeakList (modified timestamp)
//! └── PeakList1D* (one per spectrum)
//!     ├── PeakList1DHeader (creator, date, expNo, name, owner, procNo, source)
//!     │   └── PeakPickDetails (fixed-grammar text: F1/F2/MI/MAXI/PC)
//!     └── Peak1D* (F1 coordinate, intensity, type)
//! ```
//!
//! The mapping is mechanical, attribute by attribute, with timestamps parsed
//! against the fixed `%Y-%m-%dT%H:%M:%S` template. Serialization is
//! canonical (fixed attribute order, two-space indentation, `%.6` details
//! formatting), so a conformant document survives a parse/serialize
//! round-trip byte for byte.

mod error;
mod models;
mod reader;
mod writer;


pub use error::PeakListError;
pub use models::{
    Peak1D, PeakList, PeakList1D, PeakList1DHeader, PeakListDocument, PeakPickDetails,
    DATETIME_FORMAT,
};
