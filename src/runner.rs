/// Lookup pipeline
///
/// One linear pass per run:
/// resolve type -> fetch warranty -> (xlsx) fetch parts -> build rows -> write file.
/// The output file is only created once every lookup has succeeded.
use crate::api::Transport;
use crate::config::LookupConfig;
use crate::error::{Error, Result};
use crate::parts;
use crate::report::{self, ExportFormat};
use crate::resolver;
use crate::status;
use crate::warranty;
use chrono::NaiveDate;
use log::{debug, info};
use std::path::PathBuf;

/// Run one lookup and export, returning the path of the written file
pub fn run(config: &LookupConfig, transport: &dyn Transport, today: NaiveDate) -> Result<PathBuf> {
    let type_info = resolver::resolve_type(transport, &config.endpoints, &config.serial)?;
    let machine_type = type_info.type_number.as_deref().ok_or_else(|| Error::UnresolvedType {
        serial: config.serial.clone(),
        full_type: type_info.full_type.clone(),
    })?;

    let raw = warranty::fetch_warranty(transport, &config.endpoints, &config.serial, machine_type, &config.locale)?;
    let report = warranty::decode_warranty(&raw)?;
    let entitlements = status::classify_report(&report, today)?;
    debug!("classified {} entitlements against {}", entitlements.len(), today);

    let output_path = config.output_dir.join(report::output_filename(config.format, &config.serial));

    let parts = if config.format.includes_parts() {
        let items = parts::fetch_parts(transport, &config.endpoints, &config.serial, machine_type)?;
        parts::unique_parts(&items)
    } else {
        Vec::new()
    };

    match config.format {
        ExportFormat::Csv => {
            let rows = report::csv_rows(&report.machine, &entitlements, config.csv_layout);
            report::export_csv(&rows, &output_path)?;
        }
        ExportFormat::Xlsx => {
            let (rows, colors) = report::spreadsheet_rows(&report.machine, &entitlements, &parts);
            debug!("{} unique parts in {} commodity groups", parts.len(), colors.len());
            report::export_xlsx(&rows, &output_path)?;
        }
    }

    info!("wrote {}", output_path.display());
    Ok(output_path)
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;
