//! Product performance: top rankings, premium products, and Pareto
//! revenue concentration.

use crate::dataset::Dataset;
use crate::metrics::Leader;
use crate::record::Order;
use crate::stats;
use serde::Serialize;
use std::collections::BTreeMap;

const TOP_N: usize = 10;

/// One (name, value) entry of a descending ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub value: f64,
}

/// Minimal product prefix holding at most 80% of revenue.
#[derive(Debug, Clone, Serialize)]
pub struct ParetoSummary {
    pub product_count: usize,
    pub share_of_catalog_pct: f64,
    pub products: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductMetrics {
    pub top_by_revenue: Vec<RankedEntry>,
    pub top_by_units: Vec<RankedEntry>,
    pub top_by_orders: Vec<RankedEntry>,
    /// Highest mean ticket; a proxy for margin in the absence of cost data.
    pub premium_products: Vec<RankedEntry>,
    pub pareto: ParetoSummary,
    pub leader: Option<Leader>,
}

fn ranked_desc(map: BTreeMap<String, f64>) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = map
        .into_iter()
        .map(|(name, value)| RankedEntry { name, value })
        .collect();
    // Stable sort: equal values keep key order. Callers must not rely
    // on a particular tie order.
    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    entries
}

fn sum_by<F>(orders: &[Order], measure: F) -> BTreeMap<String, f64>
where
    F: Fn(&Order) -> f64,
{
    let mut map: BTreeMap<String, f64> = BTreeMap::new();
    for order in orders {
        *map.entry(order.product_name.clone()).or_default() += measure(order);
    }
    map
}

/// Walk the revenue ranking and keep products while the cumulative
/// share stays at or below 80%. The product that would cross the
/// boundary is excluded, so the returned set's share never exceeds 80%.
fn pareto_products(ranking: &[RankedEntry], catalog_size: usize) -> ParetoSummary {
    let grand_total: f64 = ranking.iter().map(|e| e.value).sum();
    let mut products = Vec::new();
    let mut cumulative = 0.0;
    if grand_total > 0.0 {
        for entry in ranking {
            cumulative += entry.value;
            if cumulative / grand_total * 100.0 > 80.0 {
                break;
            }
            products.push(entry.name.clone());
        }
    }
    ParetoSummary {
        product_count: products.len(),
        share_of_catalog_pct: if catalog_size > 0 {
            products.len() as f64 / catalog_size as f64 * 100.0
        } else {
            0.0
        },
        products,
    }
}

pub fn analyze(dataset: &Dataset) -> ProductMetrics {
    let orders = dataset.orders();
    let revenue_ranking = ranked_desc(sum_by(orders, |o| o.total_value));
    let total_revenue = dataset.total_revenue();

    // Mean ticket per product.
    let mut tickets: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for order in orders {
        tickets
            .entry(order.product_name.clone())
            .or_default()
            .push(order.total_value);
    }
    let mean_tickets: BTreeMap<String, f64> = tickets
        .into_iter()
        .map(|(name, values)| {
            let m = stats::mean(&values).unwrap_or(0.0);
            (name, m)
        })
        .collect();

    let pareto = pareto_products(&revenue_ranking, dataset.unique_products());
    let leader = revenue_ranking.first().map(|top| Leader {
        name: top.name.clone(),
        revenue: top.value,
        revenue_share_pct: if total_revenue > 0.0 {
            top.value / total_revenue * 100.0
        } else {
            0.0
        },
    });

    ProductMetrics {
        top_by_revenue: revenue_ranking.iter().take(TOP_N).cloned().collect(),
        top_by_units: ranked_desc(sum_by(orders, |o| o.quantity as f64))
            .into_iter()
            .take(TOP_N)
            .collect(),
        top_by_orders: ranked_desc(sum_by(orders, |_| 1.0))
            .into_iter()
            .take(TOP_N)
            .collect(),
        premium_products: ranked_desc(mean_tickets).into_iter().take(TOP_N).collect(),
        pareto,
        leader,
    }
}
