//! Background colors for exported rows.

use crate::cell::Cell;
use crate::types::EntitlementStatus;
use std::collections::HashMap;

pub const ACTIVE_FILL: u32 = 0x00FF00;
pub const EXPIRED_FILL: u32 = 0xFF0000;

/// Commodity group colors, assigned in first-seen order
pub const COMMODITY_PALETTE: [u32; 10] =
    [0xFFDDC1, 0xC1FFD7, 0xC1C1FF, 0xFFC1E1, 0xFFD7C1, 0xC1FFFA, 0xD7C1FF, 0xC1FFDD, 0xFFC1C1, 0xC1F5FF];

pub fn status_fill(status: EntitlementStatus) -> u32 {
    match status {
        EntitlementStatus::Active => ACTIVE_FILL,
        EntitlementStatus::Expired => EXPIRED_FILL,
    }
}

/// Commodity value -> palette color.
///
/// Values are compared as cells, so the number `5` and the text `"5"`
/// are separate groups. The n-th distinct commodity gets `COMMODITY_PALETTE[n % 10]`, so
/// groups share a color once more than ten distinct values appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommodityColors {
    assigned: HashMap<Cell, u32>,
}

impl CommodityColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `commodity`, assigning the next palette entry on first sight
    pub fn color_for(&mut self, commodity: &Cell) -> u32 {
        let next = COMMODITY_PALETTE[self.assigned.len() % COMMODITY_PALETTE.len()];
        *self.assigned.entry(commodity.clone()).or_insert(next)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }
}
