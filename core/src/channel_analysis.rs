//! Sales channel performance, concentration, and short-window growth.

use crate::dataset::Dataset;
use crate::metrics::{segment_performance, Leader, SegmentPerformance};
use chrono::Duration;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct Diversification {
    pub channel_count: usize,
    pub leader_share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelMetrics {
    pub channels: BTreeMap<String, SegmentPerformance>,
    pub leader: Option<Leader>,
    /// Highest mean ticket.
    pub highest_ticket: Option<Leader>,
    /// Revenue growth of the trailing window vs all prior days, in
    /// percent. None marks channels with no prior-period revenue, where
    /// the ratio is undefined.
    pub growth_pct: BTreeMap<String, Option<f64>>,
    pub diversification: Diversification,
}

pub fn analyze(dataset: &Dataset, recent_window_days: i64) -> ChannelMetrics {
    let channels = segment_performance(dataset.orders(), |o| &o.sales_channel);

    let leader = channels
        .iter()
        .max_by(|a, b| {
            a.1.revenue
                .partial_cmp(&b.1.revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(name, perf)| Leader {
            name: name.clone(),
            revenue: perf.revenue,
            revenue_share_pct: perf.revenue_share_pct,
        });
    let highest_ticket = channels
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

    let mut growth_pct: BTreeMap<String, Option<f64>> = BTreeMap::new();
    if let Some(reference) = dataset.reference_date() {
        let cutoff = reference - Duration::days(recent_window_days);
        let mut recent: BTreeMap<&str, f64> = BTreeMap::new();
        let mut prior: BTreeMap<&str, f64> = BTreeMap::new();
        for order in dataset.orders() {
            let bucket = if order.order_date > cutoff {
                &mut recent
            } else {
                &mut prior
            };
            *bucket.entry(order.sales_channel.as_str()).or_default() += order.total_value;
        }
        for channel in channels.keys() {
            let recent_revenue = recent.get(channel.as_str()).copied().unwrap_or(0.0);
            let prior_revenue = prior.get(channel.as_str()).copied().unwrap_or(0.0);
            let growth = (prior_revenue > 0.0)
                .then(|| (recent_revenue - prior_revenue) / prior_revenue * 100.0);
            growth_pct.insert(channel.clone(), growth);
        }
    }

    let diversification = Diversification {
        channel_count: channels.len(),
        leader_share_pct: leader.as_ref().map(|l| l.revenue_share_pct).unwrap_or(0.0),
    };

    ChannelMetrics {
        channels,
        leader,
        highest_ticket,
        growth_pct,
        diversification,
    }
}
