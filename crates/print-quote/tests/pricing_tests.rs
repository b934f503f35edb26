use print_quote::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn plain(color_mode: ColorMode, total_pages: u32) -> PricingInput {
    PricingInput {
        mode: OrderMode::PlainPrint { color_mode },
        total_pages,
        ..Default::default()
    }
}

fn binding(kind: BindingKind, color_mode: ColorMode, total_pages: u32) -> PricingInput {
    PricingInput {
        mode: OrderMode::Binding { kind, color_mode },
        total_pages,
        ..Default::default()
    }
}

#[test]
fn test_black_and_white_single_sided() {
    let input = plain(ColorMode::BlackAndWhite, 10);
    assert_eq!(price(&input), PricingResult::Priced(15.0));
}

#[test]
fn test_black_and_white_double_sided() {
    let mut input = plain(ColorMode::BlackAndWhite, 10);
    input.duplex = true;
    assert_close(price(&input).total_cost(), 8.0);
}

#[test]
fn test_duplex_rounds_odd_pages_up() {
    let mut input = plain(ColorMode::Color, 7);
    input.duplex = true;
    // ceil(7 / 2) = 4 sheets at 13
    assert_close(price(&input).total_cost(), 52.0);
}

#[test]
fn test_color_single_sided_selection() {
    let mut input = plain(ColorMode::Color, 20);
    input.selected_pages = "1-5, 8".to_string();
    input.copies = 3;
    assert_close(price(&input).total_cost(), 6.0 * 8.0 * 3.0);
}

#[test]
fn test_blank_selection_means_all() {
    let mut input = plain(ColorMode::BlackAndWhite, 4);
    input.selected_pages = "  ".to_string();
    assert_close(price(&input).total_cost(), 6.0);
}

#[test]
fn test_custom_color_skips_duplex_halving() {
    let input = PricingInput {
        mode: OrderMode::PlainPrint {
            color_mode: ColorMode::Custom,
        },
        duplex: true,
        copies: 2,
        total_pages: 6,
        color_pages: "1-3".to_string(),
        bw_pages: "4-6".to_string(),
        ..Default::default()
    };
    assert_close(price(&input).total_cost(), 87.6);

    let breakdown = calculate_breakdown(&input).unwrap();
    assert_eq!(breakdown.color_units, 3);
    assert_eq!(breakdown.bw_units, 3);
    assert_eq!(breakdown.color_rate, 13.0);
    assert_eq!(breakdown.bw_rate, 1.6);
}

#[test]
fn test_custom_color_ignores_selected_pages() {
    let input = PricingInput {
        mode: OrderMode::PlainPrint {
            color_mode: ColorMode::Custom,
        },
        total_pages: 10,
        selected_pages: "1-10".to_string(),
        color_pages: "2".to_string(),
        ..Default::default()
    };
    assert_eq!(classify(&input), PageBuckets { color: 1, bw: 0 });
    assert_close(price(&input).total_cost(), 8.0);
}

#[test]
fn test_custom_color_accepts_overlap_and_gaps() {
    let input = PricingInput {
        mode: OrderMode::PlainPrint {
            color_mode: ColorMode::Custom,
        },
        total_pages: 10,
        color_pages: "1-4".to_string(),
        bw_pages: "3-5".to_string(),
        ..Default::default()
    };
    // Pages 3 and 4 land in both buckets, 6-10 in neither
    assert_eq!(classify(&input), PageBuckets { color: 4, bw: 3 });
}

#[test]
fn test_custom_color_with_empty_fields_is_free() {
    let input = PricingInput {
        mode: OrderMode::PlainPrint {
            color_mode: ColorMode::Custom,
        },
        total_pages: 10,
        ..Default::default()
    };
    assert_eq!(classify(&input), PageBuckets::default());
    assert_eq!(price(&input), PricingResult::Priced(0.0));
    assert!(!price(&input).is_quote_required());
}

#[test]
fn test_malformed_ranges_never_fail_pricing() {
    let mut input = plain(ColorMode::BlackAndWhite, 10);
    input.selected_pages = "1-4, banana, 9-2, 40".to_string();
    assert_close(price(&input).total_cost(), 4.0 * 1.5);
}

#[test]
fn test_soft_binding_fee_added_once_before_copies() {
    let mut input = binding(BindingKind::Soft, ColorMode::BlackAndWhite, 10);
    input.copies = 3;
    // (10 * 1.5 + 25) * 3
    assert_close(price(&input).total_cost(), 120.0);

    let breakdown = calculate_breakdown(&input).unwrap();
    assert_eq!(breakdown.binding_fee, 25.0);
    assert_close(breakdown.print_cost, 15.0);
}

#[test]
fn test_spiral_fee_uses_raw_page_count() {
    let mut input = binding(BindingKind::Spiral, ColorMode::Color, 60);
    input.duplex = true;
    // 30 sheets at 13, spiral fee for 60 pages (not 30)
    assert_close(price(&input).total_cost(), 30.0 * 13.0 + 30.0);
}

#[test]
fn test_spiral_fee_on_custom_color_binding() {
    let input = PricingInput {
        mode: OrderMode::Binding {
            kind: BindingKind::Spiral,
            color_mode: ColorMode::Custom,
        },
        total_pages: 100,
        color_pages: "1-10".to_string(),
        bw_pages: "11-100".to_string(),
        ..Default::default()
    };
    // 10 * 8 + 90 * 1.5 + spiral(100)
    assert_close(price(&input).total_cost(), 80.0 + 135.0 + 40.0);
}

#[test]
fn test_zero_copies_counts_as_one() {
    let mut input = plain(ColorMode::BlackAndWhite, 10);
    input.copies = 0;
    assert_close(price(&input).total_cost(), 15.0);
}

#[test]
fn test_custom_quote_short_circuits() {
    let input = PricingInput {
        mode: OrderMode::CustomQuote,
        total_pages: 40,
        selected_pages: "1-40".to_string(),
        color_pages: "1-3".to_string(),
        bw_pages: "nonsense".to_string(),
        copies: 5,
        duplex: true,
    };
    let result = price(&input);
    assert_eq!(result, PricingResult::QuoteRequired);
    assert!(result.is_quote_required());
    assert_eq!(result.total_cost(), 0.0);
    assert_eq!(result.to_string(), "Quote Required");
    assert!(calculate_breakdown(&input).is_none());
    assert_eq!(classify(&input), PageBuckets::default());
}

#[test]
fn test_zero_page_document() {
    let input = plain(ColorMode::Color, 0);
    assert_eq!(price(&input), PricingResult::Priced(0.0));
}

#[test]
fn test_custom_rate_card() {
    let rates = RateCard {
        bw_single: 2.0,
        ..Default::default()
    };
    let input = plain(ColorMode::BlackAndWhite, 10);
    assert_close(rates.price(&input).total_cost(), 20.0);
}

#[test]
fn test_display_rounds_to_two_decimals() {
    assert_eq!(PricingResult::Priced(87.60000000000001).to_string(), "₹87.60");
    assert_eq!(PricingResult::Priced(8.0).to_string(), "₹8.00");
}

#[test]
fn test_spiral_binding_on_huge_custom_order() {
    let everything = format!("1-{}", u32::MAX);
    let input = PricingInput {
        mode: OrderMode::Binding {
            kind: BindingKind::Spiral,
            color_mode: ColorMode::Custom,
        },
        total_pages: u32::MAX,
        color_pages: everything.clone(),
        bw_pages: everything,
        ..Default::default()
    };

    let buckets = classify(&input);
    assert_eq!(buckets.total(), u32::MAX);

    let breakdown = calculate_breakdown(&input).unwrap();
    assert_eq!(breakdown.binding_fee, spiral_fee(u32::MAX));
    assert!(breakdown.total.is_finite());
    assert!(breakdown.total > 0.0);
}
