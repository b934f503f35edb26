//! Binding surcharges, charged once per order before the copies multiplier.

use crate::constants::*;
use crate::types::BindingKind;

/// Flat soft binding fee.
pub fn soft_fee() -> f64 {
    SOFT_BINDING_FEE
}

/// Tiered spiral binding fee for a document of `page_count` pages.
///
/// Above the last tier every started group of 20 pages adds a flat 5.
pub fn spiral_fee(page_count: u32) -> f64 {
    if page_count <= SPIRAL_TIER_1_PAGES {
        SPIRAL_TIER_1_FEE
    } else if page_count <= SPIRAL_TIER_2_PAGES {
        SPIRAL_TIER_2_FEE
    } else if page_count <= SPIRAL_TIER_3_PAGES {
        SPIRAL_TIER_3_FEE
    } else {
        let extra_groups = (page_count - SPIRAL_TIER_3_PAGES).div_ceil(SPIRAL_EXTRA_GROUP_PAGES);
        SPIRAL_TIER_3_FEE + f64::from(extra_groups) * SPIRAL_EXTRA_GROUP_FEE
    }
}

impl BindingKind {
    /// Binding fee for this kind given the raw (not duplex-adjusted) page count
    pub fn fee(self, page_count: u32) -> f64 {
        match self {
            BindingKind::Soft => soft_fee(),
            BindingKind::Spiral => spiral_fee(page_count),
        }
    }
}
