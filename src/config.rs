/// Configuration resolution module
///
/// This module handles:
/// - Obtaining the serial number (flag or interactive prompt)
/// - Building an immutable LookupConfig from CLI arguments
/// - Resolving endpoint URLs
use crate::api::Endpoints;
use crate::cli::CliArgs;
use crate::error::{Error, Result};
use crate::report::{CsvLayout, ExportFormat};
use crate::status::Clock;
use crate::ui;
use crate::warranty::Locale;
use log::debug;
use std::path::PathBuf;

pub const SERIAL_PROMPT: &str = "Enter the serial number: ";

/// Everything one lookup run needs, resolved up front
#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    pub serial: String,
    pub format: ExportFormat,
    pub output_dir: PathBuf,
    pub endpoints: Endpoints,
    pub locale: Locale,
    pub clock: Clock,
    pub csv_layout: CsvLayout,
}

/// Serial number from `--serial`, or from the interactive prompt
pub fn resolve_serial(args: &CliArgs) -> Result<String> {
    match &args.serial {
        Some(serial) => Ok(serial.clone()),
        None => ui::prompt(SERIAL_PROMPT).map_err(|e| Error::Config(format!("failed to read serial number: {}", e))),
    }
}

/// Build a LookupConfig from CLI arguments and the serial number
pub fn build_config(args: &CliArgs, serial: &str) -> Result<LookupConfig> {
    args.validate().map_err(Error::Config)?;

    if serial.trim().is_empty() {
        return Err(Error::Config("serial number must not be empty".to_string()));
    }

    let config = LookupConfig {
        serial: serial.to_string(),
        format: args.format,
        output_dir: args.output_dir.clone(),
        endpoints: Endpoints::new(&args.api_base),
        locale: Locale { country: args.country.clone(), language: args.language.clone() },
        clock: args.clock,
        csv_layout: args.csv_layout,
    };
    debug!("lookup config: {:?}", config);

    Ok(config)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
