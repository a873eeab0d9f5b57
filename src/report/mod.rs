//! Report generation module.
//!
//! This module handles:
//! - Building export rows from decoded lookup results
//! - Status and commodity color assignment
//! - Writing CSV and spreadsheet files
//! - Deriving a filesystem-safe output filename
//!
//! # Module Organization
//!
//! - `colors` - Status fills and the commodity color palette
//! - `rows` - Row sequences for each export format
//! - `export` - CSV and XLSX writers

mod colors;
mod export;
mod rows;

pub use export::{export_csv, export_xlsx};
pub use rows::{csv_rows, spreadsheet_rows};

/// Output file variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// Warranty rows only
    Csv,
    /// Warranty rows plus the parts table, with color coding
    #[default]
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    fn file_prefix(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "Warranty_info",
            ExportFormat::Xlsx => "Warranty_and_Parts_info",
        }
    }

    /// Whether this variant includes the parts table
    pub fn includes_parts(&self) -> bool {
        matches!(self, ExportFormat::Xlsx)
    }
}

/// Header layout for CSV output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CsvLayout {
    /// One machine-info header; warranty rows follow without their own header
    #[default]
    Legacy,
    /// Adds a warranty header row before the warranty rows
    Sectioned,
}

const UNSAFE_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace characters that are not allowed in filenames with '_'
pub fn sanitize_serial(serial: &str) -> String {
    serial.chars().map(|c| if UNSAFE_FILENAME_CHARS.contains(&c) { '_' } else { c }).collect()
}

pub fn output_filename(format: ExportFormat, serial: &str) -> String {
    format!("{}_{}.{}", format.file_prefix(), sanitize_serial(serial), format.extension())
}
