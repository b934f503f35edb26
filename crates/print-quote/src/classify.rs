use crate::constants::ALL_PAGES_KEYWORD;
use crate::range;
use crate::types::*;

/// Sort the pages of an order into the color and black-and-white buckets.
///
/// The custom color mode counts its two fields independently: overlap
/// between them is counted twice and pages in neither are not counted.
/// Every other mode routes the whole selection into one bucket.
pub fn classify(input: &PricingInput) -> PageBuckets {
    let Some(color_mode) = input.mode.color_mode() else {
        return PageBuckets::default();
    };

    match color_mode {
        ColorMode::Custom => PageBuckets {
            color: range::count(&input.color_pages, input.total_pages),
            bw: range::count(&input.bw_pages, input.total_pages),
        },
        ColorMode::Color => PageBuckets {
            color: selected_count(input),
            bw: 0,
        },
        ColorMode::BlackAndWhite => PageBuckets {
            color: 0,
            bw: selected_count(input),
        },
    }
}

/// The selection field with a blank value read as `all`
pub fn effective_selection(selected_pages: &str) -> &str {
    if selected_pages.trim().is_empty() {
        ALL_PAGES_KEYWORD
    } else {
        selected_pages
    }
}

fn selected_count(input: &PricingInput) -> u32 {
    range::count(effective_selection(&input.selected_pages), input.total_pages)
}
