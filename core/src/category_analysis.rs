//! Category performance breakdown and leaders.

use crate::dataset::Dataset;
use crate::metrics::{segment_performance, Leader, SegmentPerformance};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryMetrics {
    pub categories: BTreeMap<String, SegmentPerformance>,
    /// Largest revenue.
    pub leader: Option<Leader>,
    /// Highest mean ticket.
    pub highest_ticket: Option<Leader>,
    /// Most orders.
    pub most_popular: Option<Leader>,
}

fn leader_by<F>(
    categories: &BTreeMap<String, SegmentPerformance>,
    rank: F,
) -> Option<Leader>
where
    F: Fn(&SegmentPerformance) -> f64,
{
    categories
        .iter()
        .max_by(|a, b| {
            rank(a.1)
                .partial_cmp(&rank(b.1))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(name, perf)| Leader {
            name: name.clone(),
            revenue: perf.revenue,
            revenue_share_pct: perf.revenue_share_pct,
        })
}

pub fn analyze(dataset: &Dataset) -> CategoryMetrics {
    let categories = segment_performance(dataset.orders(), |o| &o.category);
    CategoryMetrics {
        leader: leader_by(&categories, |p| p.revenue),
        highest_ticket: leader_by(&categories, |p| p.mean_ticket),
        most_popular: leader_by(&categories, |p| p.orders as f64),
        categories,
    }
}
