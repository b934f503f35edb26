//! Shared constants for print pricing
//!
//! This module centralizes the rate table and binding fee tiers used
//! throughout quoting.

// =============================================================================
// Per-page Rates (currency units per page)
// =============================================================================

/// Color page, single-sided
pub const COLOR_SINGLE_RATE: f64 = 8.0;

/// Color page, double-sided
pub const COLOR_DOUBLE_RATE: f64 = 13.0;

/// Black-and-white page, single-sided
pub const BW_SINGLE_RATE: f64 = 1.5;

/// Black-and-white page, double-sided
pub const BW_DOUBLE_RATE: f64 = 1.6;

// =============================================================================
// Binding Fees
// =============================================================================

/// Flat fee for soft binding, charged once per order before copies
pub const SOFT_BINDING_FEE: f64 = 25.0;

/// Spiral tier boundaries (inclusive page counts) and their fees
pub const SPIRAL_TIER_1_PAGES: u32 = 50;
pub const SPIRAL_TIER_1_FEE: f64 = 25.0;
pub const SPIRAL_TIER_2_PAGES: u32 = 70;
pub const SPIRAL_TIER_2_FEE: f64 = 30.0;
pub const SPIRAL_TIER_3_PAGES: u32 = 90;
pub const SPIRAL_TIER_3_FEE: f64 = 35.0;

/// Pages above the last tier are billed in groups of this size
pub const SPIRAL_EXTRA_GROUP_PAGES: u32 = 20;

/// Fee per (possibly partial) extra group
pub const SPIRAL_EXTRA_GROUP_FEE: f64 = 5.0;

// =============================================================================
// Range Grammar
// =============================================================================

/// Keyword selecting every page of the document
pub const ALL_PAGES_KEYWORD: &str = "all";

/// Currency symbol used when displaying prices
pub const CURRENCY_SYMBOL: &str = "₹";
