//! # topspin - Bruker TopSpin Output File Parsers
//!
//! `topspin` parses the output files written by the Bruker TopSpin NMR
//! spectrometer control application (version 2.1 or newer) into plain Rust
//! data structures. It validates and structures the raw reports; it does not
//! interpret the science (no T1 relaxation constants are computed).
//!
//! ## Supported Formats
//!
//! - **`t1peaks.txt`** ([`t1_peaks`]): fixed-structure plain-text T1
//!   relaxation peak report. Fully validated: line-count arithmetic, the
//!   `-1 0 0` trailer, and the 3x3 matrix shape of every peak block.
//!
//! - **`peaklist.xml`** ([`peak_list`]): XML peak list, mapped to a node
//!   tree and serializable back to XML byte for byte for conformant inputs.
//!
//! - **`*.shifts`** ([`shifts`]): tab-separated chemical shift table.
//!
//! ## Quick Start
//!
//! ```rust
//! let report = "4\n1 0 0\n0 0 0\n0 12.5 0\n-1 0 0";
//! let document = topspin::t1_peaks::parse(report)?;
//!
//! assert_eq!(document.peak_count(), 1);
//! assert_eq!(document.peaks[0].number, 1);
//! assert_eq!(document.peaks[0].intensity, 12.5);
//! # Ok::<(), topspin::t1_peaks::T1PeaksError>(())
//! ```
//!
//! All parsers are pure functions over in-memory text: no I/O, no shared
//! state, safe to call concurrently on independent inputs. File reading and
//! encoding detection belong to callers (see the `topspin` CLI binary for
//! one such caller).

pub mod peak_list;
pub mod shifts;
pub mod t1_peaks;
