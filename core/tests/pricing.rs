//! Pricing dispersion analysis and opportunity flagging.

use salesdesk_core::cleaner::{CleaningConfig, DataCleaner};
use salesdesk_core::pricing_analysis::{self, PricingConfig};
use salesdesk_core::record::{parse_order_date, RawOrder};
use salesdesk_core::Dataset;

fn raw(id: &str, product: &str, category: &str, price: f64) -> RawOrder {
    RawOrder {
        order_id: id.to_string(),
        order_date: parse_order_date("2026-05-15 12:00:00"),
        customer_id: "5".to_string(),
        product_name: product.to_string(),
        category: category.to_string(),
        quantity: Some(1.0),
        unit_price: Some(price),
        total_value: Some(price),
        state: "GA".to_string(),
        sales_channel: "Marketplace".to_string(),
    }
}

fn dataset(rows: Vec<RawOrder>) -> Dataset {
    let mut cleaner = DataCleaner::new();
    cleaner.load(None, Some(rows)).unwrap();
    let config = CleaningConfig {
        remove_outliers: false,
        outlier_percentile: 0.99,
    };
    cleaner.clean(&config).unwrap().0
}

/// Five transactions with a wide price spread; CV well above 0.10.
fn volatile_product_rows() -> Vec<RawOrder> {
    [80.0, 100.0, 120.0, 90.0, 140.0]
        .iter()
        .enumerate()
        .map(|(i, &p)| raw(&format!("V{i}"), "Volatile Gadget", "Gadgets", p))
        .collect()
}

#[test]
fn high_variation_products_with_enough_transactions_are_flagged() {
    let mut rows = volatile_product_rows();
    // Stable product: same price every time, never flagged.
    for i in 0..6 {
        rows.push(raw(&format!("S{i}"), "Stable Widget", "Widgets", 50.0));
    }
    let data = dataset(rows);
    let metrics = pricing_analysis::analyze(&data, &PricingConfig::default());

    assert_eq!(metrics.opportunities.len(), 1);
    let opportunity = &metrics.opportunities[0];
    assert_eq!(opportunity.product_name, "Volatile Gadget");
    assert_eq!(opportunity.transactions, 5);
    assert!(opportunity.price_cv > 0.10);
    assert!(!metrics.recommendations.is_empty());
}

#[test]
fn thin_transaction_history_is_not_flagged() {
    // Same spread but only four transactions: below the minimum.
    let mut rows = volatile_product_rows();
    rows.pop();
    let data = dataset(rows);
    let metrics = pricing_analysis::analyze(&data, &PricingConfig::default());

    assert!(metrics.opportunities.is_empty());

    // Relaxing the minimum brings the product back.
    let relaxed = PricingConfig {
        cv_threshold: 0.10,
        min_transactions: 3,
    };
    let metrics = pricing_analysis::analyze(&data, &relaxed);
    assert_eq!(metrics.opportunities.len(), 1);
}

#[test]
fn single_transaction_product_has_no_cv() {
    let rows = vec![raw("A", "One Off", "Misc", 75.0)];
    let data = dataset(rows);
    let metrics = pricing_analysis::analyze(&data, &PricingConfig::default());

    let category = metrics.categories.get("Misc").unwrap();
    assert_eq!(category.price_stddev, None);
    assert_eq!(category.price_cv, None);
    assert!(metrics.opportunities.is_empty());
    // min == max, so the observed spread is zero.
    assert_eq!(category.potential_margin_pct, 0.0);
}

#[test]
fn category_pricing_tracks_observed_extremes() {
    let rows = vec![
        raw("A", "Thing", "Stuff", 10.0),
        raw("B", "Thing", "Stuff", 20.0),
        raw("C", "Other", "Stuff", 30.0),
    ];
    let data = dataset(rows);
    let metrics = pricing_analysis::analyze(&data, &PricingConfig::default());

    let stuff = metrics.categories.get("Stuff").unwrap();
    assert_eq!(stuff.min_price, 10.0);
    assert_eq!(stuff.max_price, 30.0);
    assert_eq!(stuff.mean_price, 20.0);
    // (30 - 10) / 10 * 100
    assert!((stuff.potential_margin_pct - 200.0).abs() < 1e-9);
    assert_eq!(metrics.highest_variation_category.as_deref(), Some("Stuff"));
}
