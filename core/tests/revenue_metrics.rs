//! Revenue conservation across grouping dimensions and Pareto
//! concentration boundaries.

use chrono::NaiveDate;
use salesdesk_core::cleaner::{CleaningConfig, DataCleaner};
use salesdesk_core::record::{parse_order_date, RawOrder};
use salesdesk_core::{analyze_all, generate_orders, AnalysisConfig, Dataset};

fn dataset(rows: Vec<RawOrder>) -> Dataset {
    let mut cleaner = DataCleaner::new();
    cleaner.load(None, Some(rows)).unwrap();
    let config = CleaningConfig {
        remove_outliers: false,
        outlier_percentile: 0.99,
    };
    cleaner.clean(&config).unwrap().0
}

fn generated_dataset(records: usize, seed: u64) -> Dataset {
    let reference = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    dataset(generate_orders(records, seed, reference))
}

fn raw(id: &str, product: &str, total: f64) -> RawOrder {
    RawOrder {
        order_id: id.to_string(),
        order_date: parse_order_date("2026-04-01 12:00:00"),
        customer_id: "7".to_string(),
        product_name: product.to_string(),
        category: "Misc".to_string(),
        quantity: Some(1.0),
        unit_price: Some(total),
        total_value: Some(total),
        state: "TX".to_string(),
        sales_channel: "Online".to_string(),
    }
}

#[test]
fn revenue_is_conserved_across_grouping_dimensions() {
    let data = generated_dataset(3_000, 17);
    let bundle = analyze_all(&data, &AnalysisConfig::default());

    let total = bundle.key_metrics.total_revenue;
    let by_category: f64 = bundle.categories.categories.values().map(|c| c.revenue).sum();
    let by_channel: f64 = bundle.channels.channels.values().map(|c| c.revenue).sum();
    let by_state: f64 = bundle.geography.states.values().map(|s| s.revenue).sum();

    assert!((total - by_category).abs() < 1e-6);
    assert!((total - by_channel).abs() < 1e-6);
    assert!((total - by_state).abs() < 1e-6);

    let share_sum: f64 = bundle
        .categories
        .categories
        .values()
        .map(|c| c.revenue_share_pct)
        .sum();
    assert!((share_sum - 100.0).abs() < 1e-6);
}

#[test]
fn pareto_prefix_never_exceeds_eighty_percent() {
    let data = generated_dataset(2_000, 23);
    let bundle = analyze_all(&data, &AnalysisConfig::default());

    let total = bundle.key_metrics.total_revenue;
    let pareto = &bundle.products.pareto;

    let included: f64 = data
        .orders()
        .iter()
        .filter(|o| pareto.products.contains(&o.product_name))
        .map(|o| o.total_value)
        .sum();
    assert!(
        included / total * 100.0 <= 80.0 + 1e-9,
        "pareto set covers {:.2}% of revenue",
        included / total * 100.0
    );
    assert_eq!(pareto.product_count, pareto.products.len());
}

#[test]
fn pareto_includes_exact_boundary_and_excludes_the_crossing_product() {
    let rows = vec![
        raw("A", "Alpha", 50.0),
        raw("B", "Beta", 30.0),
        raw("C", "Gamma", 20.0),
    ];
    let bundle = analyze_all(&dataset(rows), &AnalysisConfig::default());

    // Alpha (50%) and Beta (80% cumulative) are in; Gamma would cross.
    assert_eq!(bundle.products.pareto.products, vec!["Alpha", "Beta"]);
    assert_eq!(bundle.products.pareto.product_count, 2);
}

#[test]
fn single_product_dataset_degenerates_gracefully() {
    let rows = vec![raw("A", "Alpha", 120.0), raw("B", "Alpha", 80.0)];
    let bundle = analyze_all(&dataset(rows), &AnalysisConfig::default());

    // One product holds 100% of revenue: the 80% prefix is empty, but
    // the leader is still reported.
    assert_eq!(bundle.products.pareto.product_count, 0);
    let leader = bundle.products.leader.as_ref().unwrap();
    assert_eq!(leader.name, "Alpha");
    assert!((leader.revenue_share_pct - 100.0).abs() < 1e-9);
}

#[test]
fn single_day_dataset_has_no_daily_revenue_rate() {
    let rows = vec![raw("A", "Alpha", 10.0), raw("B", "Beta", 20.0)];
    let bundle = analyze_all(&dataset(rows), &AnalysisConfig::default());

    assert_eq!(bundle.key_metrics.period_days, 0);
    assert_eq!(bundle.key_metrics.mean_daily_revenue, None);
    assert_eq!(bundle.key_metrics.order_count, 2);
}

#[test]
fn key_metrics_match_dataset_accessors() {
    let data = generated_dataset(800, 3);
    let bundle = analyze_all(&data, &AnalysisConfig::default());

    assert_eq!(bundle.key_metrics.order_count, data.len());
    assert_eq!(bundle.key_metrics.unique_customers, data.unique_customers());
    assert!((bundle.key_metrics.total_revenue - data.total_revenue()).abs() < 1e-6);
}
