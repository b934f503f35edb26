use crate::classify::classify;
use crate::options::RateCard;
use crate::types::*;

/// Price an order with the shop's standard rates
pub fn price(input: &PricingInput) -> PricingResult {
    RateCard::default().price(input)
}

/// Break down an order's price with the shop's standard rates.
/// Returns `None` for orders that need a manual quote.
pub fn calculate_breakdown(input: &PricingInput) -> Option<PriceBreakdown> {
    RateCard::default().breakdown(input)
}

impl RateCard {
    pub fn price(&self, input: &PricingInput) -> PricingResult {
        match self.breakdown(input) {
            Some(breakdown) => PricingResult::Priced(breakdown.total),
            None => PricingResult::QuoteRequired,
        }
    }

    pub fn breakdown(&self, input: &PricingInput) -> Option<PriceBreakdown> {
        if input.mode == OrderMode::CustomQuote {
            return None;
        }

        let buckets = classify(input);

        // Mixed color orders bill every page; the others bill sheets.
        let (color_units, bw_units) = if input.mode.uses_split_ranges() {
            (buckets.color, buckets.bw)
        } else {
            (
                billable_sheets(buckets.color, input.duplex),
                billable_sheets(buckets.bw, input.duplex),
            )
        };

        let color_rate = self.color_rate(input.duplex);
        let bw_rate = self.bw_rate(input.duplex);
        let print_cost = f64::from(color_units) * color_rate + f64::from(bw_units) * bw_rate;

        let binding_fee = input
            .mode
            .binding()
            .map_or(0.0, |kind| kind.fee(buckets.total()));

        // The order form treats an empty copies field as a single copy
        let copies = input.copies.max(1);
        let total = (print_cost + binding_fee) * f64::from(copies);

        log::debug!(
            "priced {} order: {} color / {} bw pages, duplex={}, copies={} -> {}",
            input.mode.print_type().as_str(),
            buckets.color,
            buckets.bw,
            input.duplex,
            copies,
            total
        );

        Some(PriceBreakdown {
            buckets,
            color_units,
            bw_units,
            color_rate,
            bw_rate,
            print_cost,
            binding_fee,
            copies,
            total,
        })
    }
}

fn billable_sheets(pages: u32, duplex: bool) -> u32 {
    if duplex { pages.div_ceil(2) } else { pages }
}
