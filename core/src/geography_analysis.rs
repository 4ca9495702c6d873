//! Geographic performance by state.

use crate::dataset::Dataset;
use crate::metrics::{segment_performance, Leader, SegmentPerformance};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct GeographyMetrics {
    pub states: BTreeMap<String, SegmentPerformance>,
    pub leader: Option<Leader>,
    /// Highest mean ticket.
    pub highest_ticket: Option<Leader>,
    /// Combined revenue share of the three largest states.
    pub top3_revenue_share_pct: f64,
    /// How many states, taken from the top, cover 80% of revenue.
    pub states_covering_80_pct: usize,
}

pub fn analyze(dataset: &Dataset) -> GeographyMetrics {
    let states = segment_performance(dataset.orders(), |o| &o.state);

    let mut by_revenue: Vec<(&String, &SegmentPerformance)> = states.iter().collect();
    by_revenue.sort_by(|a, b| {
        b.1.revenue
            .partial_cmp(&a.1.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let leader = by_revenue.first().map(|(name, perf)| Leader {
        name: (*name).clone(),
        revenue: perf.revenue,
        revenue_share_pct: perf.revenue_share_pct,
    });
    let highest_ticket = states
        .iter()
        .max_by(|a, b| {
            a.1.mean_ticket
                .partial_cmp(&b.1.mean_ticket)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(name, perf)| Leader {
            name: name.clone(),
            revenue: perf.revenue,
            revenue_share_pct: perf.revenue_share_pct,
        });

    let top3_revenue_share_pct = by_revenue
        .iter()
        .take(3)
        .map(|(_, p)| p.revenue_share_pct)
        .sum();

    let mut cumulative = 0.0;
    let mut states_covering_80_pct = 0;
    for (_, perf) in &by_revenue {
        cumulative += perf.revenue_share_pct;
        if cumulative > 80.0 {
            break;
        }
        states_covering_80_pct += 1;
    }

    GeographyMetrics {
        states,
        leader,
        highest_ticket,
        top3_revenue_share_pct,
        states_covering_80_pct,
    }
}
