//! Report export functions for CSV and XLSX formats.
//!
//! Both writers take a finished row sequence. The output file is only
//! created here, after every lookup step has succeeded.

use super::rows::ReportRow;
use crate::cell::Cell;
use crate::error::{Error, Result};
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, Worksheet};
use std::path::Path;

pub const SHEET_NAME: &str = "Warranty and Parts Info";

/// Write rows as CSV. Rows may differ in length; fills are ignored.
pub fn export_csv(rows: &[ReportRow], output_path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(output_path)?;

    for row in rows {
        writer.write_record(row.texts())?;
    }

    writer.flush().map_err(|source| Error::Io { path: output_path.to_path_buf(), source })?;
    Ok(())
}

/// Write rows to a single-sheet workbook, applying each row's fill
pub fn export_xlsx(rows: &[ReportRow], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (index, row) in rows.iter().enumerate() {
        let format = row_format(row);
        for (col, cell) in row.cells.iter().enumerate() {
            write_cell(sheet, index as u32, col as u16, cell, &format)?;
        }
    }

    workbook.save(output_path)?;
    Ok(())
}

fn row_format(row: &ReportRow) -> Format {
    let mut format = Format::new();
    if row.header {
        format = format.set_bold();
    }
    if let Some(rgb) = row.fill {
        format = format.set_pattern(FormatPattern::Solid).set_background_color(Color::RGB(rgb));
    }
    format
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell, format: &Format) -> Result<()> {
    match cell {
        Cell::Number(n) => match n.as_f64() {
            Some(value) => sheet.write_number_with_format(row, col, value, format)?,
            None => sheet.write_string_with_format(row, col, n.to_string(), format)?,
        },
        Cell::Bool(b) => sheet.write_boolean_with_format(row, col, *b, format)?,
        other => sheet.write_string_with_format(row, col, other.to_string(), format)?,
    };
    Ok(())
}
