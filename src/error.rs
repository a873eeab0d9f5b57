//! Error type shared by the lookup pipeline and the exporters.
//!
//! Every failure ends the run: nothing here is retried, and no output
//! file is written once an error has been returned.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure or non-success HTTP status
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Response body was not valid JSON
    #[error("failed to decode JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Product lookup returned something other than an object or a non-empty array
    #[error("unexpected product lookup response format: {0}")]
    Format(String),

    /// No "Type <token>" in the product name
    #[error("unable to retrieve machine type for serial number {serial} (product name: {full_type:?})")]
    UnresolvedType { serial: String, full_type: String },

    /// Warranty response is missing a required key, or has one of the wrong shape
    #[error("warranty response has unexpected shape at `{0}`")]
    Shape(String),

    #[error("invalid entitlement end date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
