/// Core data structures for lookup results
///
/// These are the typed forms of the vendor responses. Raw JSON is only
/// handled by the modules that decode it (`resolver`, `warranty`,
/// `parts`); everything downstream works with these types.
use crate::cell::Cell;
use std::fmt;

/// Machine type derived from the product lookup
#[derive(Debug, Clone, PartialEq)]
pub struct MachineTypeInfo {
    pub serial_number: String,
    /// Full product name, e.g. "ThinkPad T14 Gen 1 Type 20S0 - Intel"
    pub full_type: String,
    /// Last "Type <token>" in `full_type`
    pub type_number: Option<String>,
    /// Text before the first " - " in `full_type`
    pub type_name: Option<String>,
}

/// Validity of an entitlement relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitlementStatus {
    Active,
    Expired,
}

impl EntitlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntitlementStatus::Active => "Active",
            EntitlementStatus::Expired => "Expired",
        }
    }
}

impl fmt::Display for EntitlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One warranty or warranty-upgrade entitlement
#[derive(Debug, Clone, PartialEq)]
pub struct WarrantyRecord {
    pub name: Cell,
    pub kind: Cell,
    pub description: Cell,
    pub duration: Cell,
    pub start_date: Cell,
    pub end_date: Cell,
    pub delivery_type_name: Cell,
    pub level: Cell,
}

/// Machine details from `data.machineInfo`, plus the two top-level
/// warranty summary fields
#[derive(Debug, Clone, PartialEq)]
pub struct MachineInfo {
    pub serial: Cell,
    pub model: Cell,
    pub product_name: Cell,
    pub build_date: Cell,
    pub ship_to_country: Cell,
    pub status: Cell,
    pub brand: Cell,
    pub series: Cell,
    pub product_image: Cell,
    pub warranty_status: Cell,
    pub out_of_warranty: bool,
}

/// Decoded warranty lookup response
#[derive(Debug, Clone, PartialEq)]
pub struct WarrantyReport {
    pub machine: MachineInfo,
    pub base: Vec<WarrantyRecord>,
    pub upgrades: Vec<WarrantyRecord>,
    pub current: Option<WarrantyRecord>,
}

impl WarrantyReport {
    /// All entitlements in export order: base, upgrades, then current
    pub fn entitlements(&self) -> impl Iterator<Item = &WarrantyRecord> {
        self.base.iter().chain(self.upgrades.iter()).chain(self.current.iter())
    }
}

/// A replacement part, already flattened for export
#[derive(Debug, Clone, PartialEq)]
pub struct PartRecord {
    pub id: Cell,
    pub name: Cell,
    pub substitutes: Cell,
    /// Vendor part category, used for color grouping
    pub commodity: Cell,
    pub image_urls: Cell,
}

/// An entitlement paired with its classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEntitlement {
    pub record: WarrantyRecord,
    pub status: EntitlementStatus,
}
