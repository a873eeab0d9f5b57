//! Row building for both export formats.
//!
//! Rows are built as plain data first, so the CSV and spreadsheet
//! writers only decide how a `ReportRow` is rendered, never what goes
//! into it.

use super::CsvLayout;
use super::colors::{CommodityColors, status_fill};
use crate::cell::Cell;
use crate::types::{ClassifiedEntitlement, MachineInfo, PartRecord};

pub const MACHINE_HEADER: [&str; 11] = [
    "Serial Number",
    "Model",
    "Product Name",
    "Build Date",
    "Ship-To Location",
    "Status",
    "Brand",
    "Series",
    "Product Image",
    "Warranty Status",
    "Out of Warranty",
];

pub const WARRANTY_HEADER: [&str; 9] = [
    "Warranty Name",
    "Warranty Type",
    "Description",
    "Duration",
    "Start Date",
    "End Date",
    "Delivery Type",
    "Level",
    "Status",
];

pub const PARTS_HEADER: [&str; 5] = ["Part ID", "Part Name", "Substitutes", "Commodity Value", "Image URLs"];

/// One output row with an optional RGB background
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub cells: Vec<Cell>,
    pub fill: Option<u32>,
    pub header: bool,
}

impl ReportRow {
    pub fn blank() -> Self {
        ReportRow { cells: Vec::new(), fill: None, header: false }
    }

    pub fn header(titles: &[&str]) -> Self {
        ReportRow { cells: titles.iter().map(|t| Cell::text(*t)).collect(), fill: None, header: true }
    }

    /// Cell texts as written to CSV
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.to_string()).collect()
    }
}

pub fn machine_row(machine: &MachineInfo) -> ReportRow {
    let out_of_warranty = if machine.out_of_warranty { "Yes" } else { "No" };
    ReportRow {
        cells: vec![
            machine.serial.clone(),
            machine.model.clone(),
            machine.product_name.clone(),
            machine.build_date.clone(),
            machine.ship_to_country.clone(),
            machine.status.clone(),
            machine.brand.clone(),
            machine.series.clone(),
            machine.product_image.clone(),
            machine.warranty_status.clone(),
            Cell::text(out_of_warranty),
        ],
        fill: None,
        header: false,
    }
}

pub fn warranty_row(entitlement: &ClassifiedEntitlement) -> ReportRow {
    let record = &entitlement.record;
    ReportRow {
        cells: vec![
            record.name.clone(),
            record.kind.clone(),
            record.description.clone(),
            record.duration.clone(),
            record.start_date.clone(),
            record.end_date.clone(),
            record.delivery_type_name.clone(),
            record.level.clone(),
            Cell::text(entitlement.status.as_str()),
        ],
        fill: Some(status_fill(entitlement.status)),
        header: false,
    }
}

/// Parts rows colored by commodity group. Takes the color mapping built
/// so far and returns it extended with any new commodity values.
pub fn parts_rows(parts: &[PartRecord], mut colors: CommodityColors) -> (Vec<ReportRow>, CommodityColors) {
    let rows = parts
        .iter()
        .map(|part| {
            let fill = colors.color_for(&part.commodity);
            ReportRow {
                cells: vec![
                    part.id.clone(),
                    part.name.clone(),
                    part.substitutes.clone(),
                    part.commodity.clone(),
                    part.image_urls.clone(),
                ],
                fill: Some(fill),
                header: false,
            }
        })
        .collect();
    (rows, colors)
}

/// CSV row sequence: machine header, machine row, entitlement rows.
///
/// The machine row has 11 cells and entitlement rows 9. `Legacy` keeps
/// the single header; `Sectioned` adds the warranty header before the
/// first entitlement.
pub fn csv_rows(machine: &MachineInfo, entitlements: &[ClassifiedEntitlement], layout: CsvLayout) -> Vec<ReportRow> {
    let mut rows = vec![ReportRow::header(&MACHINE_HEADER), machine_row(machine)];
    if layout == CsvLayout::Sectioned {
        rows.push(ReportRow::header(&WARRANTY_HEADER));
    }
    rows.extend(entitlements.iter().map(warranty_row));
    rows
}

/// Spreadsheet row sequence: warranty header, machine row, colored
/// entitlement rows, a blank separator, then the parts table.
pub fn spreadsheet_rows(
    machine: &MachineInfo,
    entitlements: &[ClassifiedEntitlement],
    parts: &[PartRecord],
) -> (Vec<ReportRow>, CommodityColors) {
    let mut rows = vec![ReportRow::header(&WARRANTY_HEADER), machine_row(machine)];
    rows.extend(entitlements.iter().map(warranty_row));

    rows.push(ReportRow::blank());
    rows.push(ReportRow::header(&PARTS_HEADER));
    let (part_rows, colors) = parts_rows(parts, CommodityColors::new());
    rows.extend(part_rows);

    (rows, colors)
}
