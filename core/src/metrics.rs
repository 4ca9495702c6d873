//! Metrics bundle assembly and the aggregations shared by every
//! grouping dimension.
//!
//! Every analysis here is a pure function of the cleaned `Dataset`.
//! Nothing accumulates state between calls: run one analysis in
//! isolation or all of them through `analyze_all`, in any order, and
//! the numbers come out identical.

use crate::category_analysis::{self, CategoryMetrics};
use crate::channel_analysis::{self, ChannelMetrics};
use crate::customer_analysis::{self, CustomerMetrics};
use crate::dataset::Dataset;
use crate::geography_analysis::{self, GeographyMetrics};
use crate::pricing_analysis::{self, PricingConfig, PricingMetrics};
use crate::product_analysis::{self, ProductMetrics};
use crate::record::Order;
use crate::seasonality_analysis::{self, SeasonalityMetrics};
use crate::stats;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Tunables for an analysis run. The pricing thresholds are heuristics
/// carried over from the business side, so they stay configurable.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Window for "recent vs prior" channel growth comparison.
    pub recent_window_days: i64,
    pub pricing: PricingConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            recent_window_days: 30,
            pricing: PricingConfig::default(),
        }
    }
}

/// Headline figures for the whole dataset.
#[derive(Debug, Clone, Serialize)]
pub struct KeyMetrics {
    pub total_revenue: f64,
    pub mean_ticket: Option<f64>,
    pub median_ticket: Option<f64>,
    pub order_count: usize,
    pub unique_products: usize,
    pub unique_categories: usize,
    pub unique_customers: usize,
    pub units_sold: u64,
    pub period_days: i64,
    /// None when all orders fall on a single day.
    pub mean_daily_revenue: Option<f64>,
    pub orders_per_customer: Option<f64>,
}

pub fn compute_key_metrics(dataset: &Dataset) -> KeyMetrics {
    let totals: Vec<f64> = dataset.orders().iter().map(|o| o.total_value).collect();
    let total_revenue: f64 = totals.iter().sum();
    let period_days = match (dataset.earliest_date(), dataset.reference_date()) {
        (Some(start), Some(end)) => (end - start).num_days(),
        _ => 0,
    };
    let unique_customers = dataset.unique_customers();

    KeyMetrics {
        total_revenue,
        mean_ticket: stats::mean(&totals),
        median_ticket: stats::median(&totals),
        order_count: dataset.len(),
        unique_products: dataset.unique_products(),
        unique_categories: dataset.unique_categories(),
        unique_customers,
        units_sold: dataset.orders().iter().map(|o| o.quantity as u64).sum(),
        period_days,
        mean_daily_revenue: (period_days > 0).then(|| total_revenue / period_days as f64),
        orders_per_customer: (unique_customers > 0)
            .then(|| dataset.len() as f64 / unique_customers as f64),
    }
}

/// Per-group aggregate used by the category, geography, and channel
/// breakdowns.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentPerformance {
    pub revenue: f64,
    pub mean_ticket: f64,
    pub median_ticket: f64,
    pub orders: usize,
    pub units: u64,
    pub unique_customers: usize,
    pub revenue_share_pct: f64,
    pub revenue_per_customer: f64,
    pub orders_per_customer: f64,
}

/// Group orders by `key` and compute the shared per-group aggregates.
/// A group is never empty, so the per-customer ratios are always
/// defined; revenue shares are relative to the dataset total.
pub fn segment_performance<F>(orders: &[Order], key: F) -> BTreeMap<String, SegmentPerformance>
where
    F: Fn(&Order) -> &str,
{
    let mut groups: BTreeMap<String, Vec<&Order>> = BTreeMap::new();
    for order in orders {
        groups.entry(key(order).to_string()).or_default().push(order);
    }
    let grand_total: f64 = orders.iter().map(|o| o.total_value).sum();

    groups
        .into_iter()
        .map(|(name, members)| {
            let totals: Vec<f64> = members.iter().map(|o| o.total_value).collect();
            let revenue: f64 = totals.iter().sum();
            let customers = members
                .iter()
                .map(|o| o.customer_id.as_str())
                .collect::<BTreeSet<&str>>()
                .len();
            let perf = SegmentPerformance {
                revenue,
                mean_ticket: stats::mean(&totals).unwrap_or(0.0),
                median_ticket: stats::median(&totals).unwrap_or(0.0),
                orders: members.len(),
                units: members.iter().map(|o| o.quantity as u64).sum(),
                unique_customers: customers,
                revenue_share_pct: if grand_total > 0.0 {
                    revenue / grand_total * 100.0
                } else {
                    0.0
                },
                revenue_per_customer: revenue / customers as f64,
                orders_per_customer: members.len() as f64 / customers as f64,
            };
            (name, perf)
        })
        .collect()
}

/// A named top entry for a grouping dimension.
#[derive(Debug, Clone, Serialize)]
pub struct Leader {
    pub name: String,
    pub revenue: f64,
    pub revenue_share_pct: f64,
}

/// The full output of one analysis run. Owned by the caller; recomputed
/// from scratch on every run.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsBundle {
    pub key_metrics: KeyMetrics,
    pub products: ProductMetrics,
    pub categories: CategoryMetrics,
    pub customers: CustomerMetrics,
    pub geography: GeographyMetrics,
    pub channels: ChannelMetrics,
    pub seasonality: SeasonalityMetrics,
    pub pricing: PricingMetrics,
}

/// Run every analysis over the same immutable dataset.
pub fn analyze_all(dataset: &Dataset, config: &AnalysisConfig) -> MetricsBundle {
    log::info!(
        "analyzing {} orders across {} products",
        dataset.len(),
        dataset.unique_products()
    );
    MetricsBundle {
        key_metrics: compute_key_metrics(dataset),
        products: product_analysis::analyze(dataset),
        categories: category_analysis::analyze(dataset),
        customers: customer_analysis::analyze(dataset),
        geography: geography_analysis::analyze(dataset),
        channels: channel_analysis::analyze(dataset, config.recent_window_days),
        seasonality: seasonality_analysis::analyze(dataset),
        pricing: pricing_analysis::analyze(dataset, &config.pricing),
    }
}
