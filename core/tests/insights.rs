//! Insight synthesis rules over the metrics bundle.

use chrono::NaiveDate;
use salesdesk_core::cleaner::{CleaningConfig, DataCleaner};
use salesdesk_core::record::{parse_order_date, RawOrder};
use salesdesk_core::{analyze_all, generate_orders, synthesize, AnalysisConfig, Dataset};

fn raw(id: &str, product: &str, state: &str, channel: &str, total: f64) -> RawOrder {
    RawOrder {
        order_id: id.to_string(),
        order_date: parse_order_date("2026-06-01 09:00:00"),
        customer_id: id.to_string(),
        product_name: product.to_string(),
        category: "Misc".to_string(),
        quantity: Some(1.0),
        unit_price: Some(total),
        total_value: Some(total),
        state: state.to_string(),
        sales_channel: channel.to_string(),
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

#[test]
fn dominant_product_is_a_concentration_risk() {
    let rows = vec![
        raw("A", "Blockbuster", "CA", "Online", 700.0),
        raw("B", "Also-ran", "TX", "Marketplace", 150.0),
        raw("C", "Other", "NY", "Mobile App", 150.0),
    ];
    let bundle = analyze_all(&dataset(rows), &AnalysisConfig::default());
    let insights = synthesize(&bundle);

    assert!(
        insights.risks.iter().any(|r| r.contains("concentration risk")),
        "70% product share must be flagged: {:?}",
        insights.risks
    );
}

#[test]
fn balanced_portfolio_raises_no_product_risk() {
    // Four products at 25% each, three channels well under 70%.
    let rows = vec![
        raw("A", "P1", "CA", "Online", 100.0),
        raw("B", "P2", "TX", "Marketplace", 100.0),
        raw("C", "P3", "NY", "Mobile App", 100.0),
        raw("D", "P4", "FL", "Online", 100.0),
    ];
    let bundle = analyze_all(&dataset(rows), &AnalysisConfig::default());
    let insights = synthesize(&bundle);

    assert!(
        !insights.risks.iter().any(|r| r.contains("concentration risk")),
        "25% product share must not be flagged: {:?}",
        insights.risks
    );
}

#[test]
fn dispersed_geography_is_an_expansion_opportunity() {
    // Five states at 20% each: top 3 hold 60% < 70%.
    let rows = vec![
        raw("A", "P1", "CA", "Online", 100.0),
        raw("B", "P2", "TX", "Marketplace", 100.0),
        raw("C", "P3", "NY", "Online", 100.0),
        raw("D", "P4", "FL", "Marketplace", 100.0),
        raw("E", "P5", "IL", "Online", 100.0),
    ];
    let bundle = analyze_all(&dataset(rows), &AnalysisConfig::default());
    let insights = synthesize(&bundle);

    assert!(
        insights
            .opportunities
            .iter()
            .any(|o| o.contains("expansion")),
        "dispersed geography must surface an expansion opportunity: {:?}",
        insights.opportunities
    );
}

#[test]
fn at_risk_customers_surface_a_reactivation_opportunity() {
    let reference = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    let data = dataset(generate_orders(2_000, 37, reference));
    let bundle = analyze_all(&data, &AnalysisConfig::default());

    let at_risk = bundle.customers.segments.get("At Risk");
    let insights = synthesize(&bundle);
    match at_risk {
        Some(segment) if segment.customers > 0 => {
            assert!(
                insights
                    .opportunities
                    .iter()
                    .any(|o| o.contains("at-risk")),
                "non-empty At Risk segment must be surfaced: {:?}",
                insights.opportunities
            );
        }
        _ => panic!("generated dataset should produce an At Risk segment"),
    }
}

#[test]
fn fixed_recommendation_lists_are_always_present() {
    let rows = vec![raw("A", "P1", "CA", "Online", 10.0)];
    let bundle = analyze_all(&dataset(rows), &AnalysisConfig::default());
    let insights = synthesize(&bundle);

    assert_eq!(insights.immediate_recommendations.len(), 3);
    assert_eq!(insights.mid_term_recommendations.len(), 3);
    assert_eq!(insights.watch_kpis.len(), 6);
    assert!(!insights.discoveries.is_empty());
}

#[test]
fn report_renders_every_section() {
    let reference = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    let data = dataset(generate_orders(300, 41, reference));
    let bundle = analyze_all(&data, &AnalysisConfig::default());
    let insights = synthesize(&bundle);

    let text = salesdesk_core::report::render(&bundle, &insights);
    for heading in [
        "KEY METRICS",
        "DISCOVERIES",
        "OPPORTUNITIES",
        "RISKS",
        "IMMEDIATE RECOMMENDATIONS",
        "MID-TERM RECOMMENDATIONS",
        "KPIS TO WATCH",
    ] {
        assert!(text.contains(heading), "report is missing section {heading}");
    }
}
