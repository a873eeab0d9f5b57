use crate::api::DEFAULT_API_BASE;
use crate::report::{CsvLayout, ExportFormat};
use crate::status::Clock;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "warranty-lookup")]
#[command(about = "Look up warranty and parts entitlements by serial number and export them to CSV or Excel")]
#[command(version)]
pub struct CliArgs {
    /// Serial number to look up (prompted for when omitted)
    #[arg(long, short = 's', value_name = "SERIAL")]
    pub serial: Option<String>,

    /// Output variant: csv (warranty only) or xlsx (warranty and parts, color coded)
    #[arg(long, short = 'f', value_enum, default_value_t = ExportFormat::Xlsx)]
    pub format: ExportFormat,

    /// Directory the output file is written to
    #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Root URL of the support API
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Country code sent with the warranty lookup
    #[arg(long, default_value = "us")]
    pub country: String,

    /// Language code sent with the warranty lookup
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Date used as "today" when classifying entitlements
    #[arg(long, value_enum, default_value_t = Clock::Local)]
    pub clock: Clock,

    /// CSV header layout. "sectioned" adds a header above the warranty rows,
    /// whose columns differ from the machine-info row
    #[arg(long, value_enum, default_value_t = CsvLayout::Legacy)]
    pub csv_layout: CsvLayout,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(format!("--api-base must be an http(s) URL, got '{}'", self.api_base));
        }

        if !self.output_dir.is_dir() {
            return Err(format!("Output directory does not exist: {}", self.output_dir.display()));
        }

        if self.csv_layout != CsvLayout::Legacy && self.format != ExportFormat::Csv {
            return Err("--csv-layout only applies to --format csv".to_string());
        }

        Ok(())
    }
}
