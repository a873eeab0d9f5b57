/// Entitlement status classification
use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::types::{ClassifiedEntitlement, EntitlementStatus, WarrantyReport};
use chrono::NaiveDate;

/// End date assumed when an entitlement has none
pub const OPEN_ENDED_DATE: &str = "9999-12-31";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "today" for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Clock {
    /// Host local date
    #[default]
    Local,
    /// UTC date
    Utc,
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::Local => chrono::Local::now().date_naive(),
            Clock::Utc => chrono::Utc::now().date_naive(),
        }
    }
}

/// Classify an end date against `today`. A missing end date never expires.
pub fn classify(end_date: Option<&str>, today: NaiveDate) -> Result<EntitlementStatus> {
    let raw = end_date.unwrap_or(OPEN_ENDED_DATE);
    let end = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| Error::InvalidDate(raw.to_string()))?;

    if end >= today { Ok(EntitlementStatus::Active) } else { Ok(EntitlementStatus::Expired) }
}

/// Classify an end date cell; only text and `Missing` are valid dates
pub fn classify_cell(end_date: &Cell, today: NaiveDate) -> Result<EntitlementStatus> {
    match end_date {
        Cell::Missing => classify(None, today),
        Cell::Text(s) => classify(Some(s), today),
        other => Err(Error::InvalidDate(other.to_string())),
    }
}

/// Classify every entitlement of a report, in export order
pub fn classify_report(report: &WarrantyReport, today: NaiveDate) -> Result<Vec<ClassifiedEntitlement>> {
    report
        .entitlements()
        .map(|record| {
            let status = classify_cell(&record.end_date, today)?;
            Ok(ClassifiedEntitlement { record: record.clone(), status })
        })
        .collect()
}
