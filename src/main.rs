//! # TopSpin File Tool
//!
//! A command-line tool for inspecting Bruker TopSpin output files.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize a T1 peak report
//! topspin info t1peaks.txt --format t1peaks
//!
//! # Validate a peak list
//! topspin validate peaklist.xml --format peaklist
//!
//! # Export a shifts table as JSON
//! topspin export ADP_3310.g03.shifts --format shifts
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use topspin::peak_list::PeakListDocument;
use topspin::{shifts, t1_peaks};

/// topspin - Bruker TopSpin Output File Tool
#[derive(Parser)]
#[command(name = "topspin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// "t1peaks.txt" T1 relaxation peak report
    T1peaks,
    /// "peaklist.xml" peak list
    Peaklist,
    /// "*.shifts" chemical shift table
    Shifts,
}

#[derive(Subcommand)]
enum Commands {
    /// Display a summary of a TopSpin output file
    Info {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Input file format
        #[arg(short, long, value_enum)]
        format: Format,
    },

    /// Parse a TopSpin output file and report whether it is well-formed
    Validate {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Input file format
        #[arg(short, long, value_enum)]
        format: Format,
    },

    /// Export a TopSpin output file as JSON
    Export {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Input file format
        #[arg(short, long, value_enum)]
        format: Format,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Info { file, format } => run_info(&file, format),
        Commands::Validate { file, format } => run_validate(&file, format),
        Commands::Export { file, format } => run_export(&file, format),
    }
}

fn read_input(file: &Path, format: Format) -> Result<String> {
    info!("Reading {} as {:?}", file.display(), format);
    fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn parse_peak_list(text: &str) -> Result<PeakListDocument> {
    match PeakListDocument::parse(text)? {
        Some(document) => Ok(document),
        None => bail!("root element is not <PeakList>"),
    }
}

fn run_info(file: &Path, format: Format) -> Result<()> {
    let text = read_input(file, format)?;

    match format {
        Format::T1peaks => {
            let document = t1_peaks::parse(&text)?;
            println!("T1 peaks: {}", document.peak_count());
            for peak in &document.peaks {
                println!("  peak {:>4}  intensity {}", peak.number, peak.intensity);
            }
        }
        Format::Peaklist => {
            let document = parse_peak_list(&text)?;
            if let Some(modified) = document.root.modified {
                println!("Modified: {modified}");
            }
            println!("Peak lists: {}", document.root.children.len());
            for (index, list) in document.root.children.iter().enumerate() {
                let name = list
                    .header
                    .as_ref()
                    .and_then(|header| header.name.as_deref())
                    .unwrap_or("<unnamed>");
                println!("  [{index}] {name}: {} peaks", list.peaks.len());
            }
        }
        Format::Shifts => {
            let table = shifts::parse(&text)?;
            println!("Shift rows: {}", table.row_count());
            for row in &table.rows {
                println!("  {:>4} {:<4} {} ppm", row.number, row.atom, row.shift);
            }
        }
    }

    Ok(())
}

fn run_validate(file: &Path, format: Format) -> Result<()> {
    let text = read_input(file, format)?;

    match format {
        Format::T1peaks => {
            t1_peaks::parse(&text).with_context(|| format!("{}", file.display()))?;
        }
        Format::Peaklist => {
            parse_peak_list(&text).with_context(|| format!("{}", file.display()))?;
        }
        Format::Shifts => {
            shifts::parse(&text).with_context(|| format!("{}", file.display()))?;
        }
    }

    println!("{}: OK", file.display());
    Ok(())
}

fn run_export(file: &Path, format: Format) -> Result<()> {
    let text = read_input(file, format)?;

    let json = match format {
        Format::T1peaks => serde_json::to_string_pretty(&t1_peaks::parse(&text)?)?,
        Format::Peaklist => serde_json::to_string_pretty(&parse_peak_list(&text)?)?,
        Format::Shifts => serde_json::to_string_pretty(&shifts::parse(&text)?)?,
    };

    println!("{json}");
    Ok(())
}
