//! Customer behavior: RFM scoring and segmentation.
//!
//! Recency, frequency, and monetary value are computed per customer
//! relative to the most recent order date in the dataset, then each
//! dimension is bucketed into five equal-population bins (rank-based,
//! first-occurrence tie-break). Recency score 5 means most recent;
//! frequency and monetary score 5 mean highest.

use crate::dataset::Dataset;
use crate::stats;
use crate::types::CustomerId;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const ACTIVE_WINDOW_DAYS: i64 = 30;
const FREQUENT_ORDER_THRESHOLD: usize = 3;
const HIGH_VALUE_QUANTILE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Segment {
    Champions,
    LoyalCustomers,
    PotentialLoyalists,
    AtRisk,
    CannotLoseThem,
    Hibernating,
}

impl Segment {
    /// Thresholds are evaluated in order; first match wins.
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 13 => Self::Champions,
            s if s >= 11 => Self::LoyalCustomers,
            s if s >= 9 => Self::PotentialLoyalists,
            s if s >= 7 => Self::AtRisk,
            s if s >= 5 => Self::CannotLoseThem,
            _ => Self::Hibernating,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Champions => "Champions",
            Self::LoyalCustomers => "Loyal Customers",
            Self::PotentialLoyalists => "Potential Loyalists",
            Self::AtRisk => "At Risk",
            Self::CannotLoseThem => "Cannot Lose Them",
            Self::Hibernating => "Hibernating",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RfmProfile {
    pub customer_id: CustomerId,
    /// Whole days since the customer's last order, relative to the
    /// dataset's most recent order.
    pub recency_days: i64,
    pub frequency: usize,
    pub monetary: f64,
    pub recency_score: u8,
    pub frequency_score: u8,
    pub monetary_score: u8,
    /// Sum of the three scores, 3..=15.
    pub rfm_score: u8,
    pub segment: Segment,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentStats {
    pub customers: usize,
    pub share_pct: f64,
    pub mean_recency_days: f64,
    pub mean_frequency: f64,
    pub mean_monetary: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopCustomer {
    pub customer_id: CustomerId,
    pub frequency: usize,
    pub monetary: f64,
    pub recency_days: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerMetrics {
    pub total_customers: usize,
    pub active_last_30d: usize,
    pub frequent_customers: usize,
    pub high_value_customers: usize,
    pub segments: BTreeMap<String, SegmentStats>,
    pub top_customers: Vec<TopCustomer>,
    pub mean_recency_days: Option<f64>,
    pub mean_frequency: Option<f64>,
    pub mean_monetary: Option<f64>,
}

/// Compute the full per-customer RFM table. Customers appear in order
/// of first occurrence in the dataset, which is also the tie-break
/// order for the rank-based quantile buckets.
pub fn rfm_profiles(dataset: &Dataset) -> Vec<RfmProfile> {
    let reference = match dataset.reference_date() {
        Some(d) => d,
        None => return Vec::new(),
    };

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ids: Vec<CustomerId> = Vec::new();
    let mut last_order: Vec<chrono::NaiveDateTime> = Vec::new();
    let mut frequency: Vec<usize> = Vec::new();
    let mut monetary: Vec<f64> = Vec::new();

    for order in dataset.orders() {
        let i = *index.entry(order.customer_id.as_str()).or_insert_with(|| {
            ids.push(order.customer_id.clone());
            last_order.push(order.order_date);
            frequency.push(0);
            monetary.push(0.0);
            ids.len() - 1
        });
        if order.order_date > last_order[i] {
            last_order[i] = order.order_date;
        }
        frequency[i] += 1;
        monetary[i] += order.total_value;
    }

    let recency: Vec<i64> = last_order
        .iter()
        .map(|last| (reference - *last).num_days())
        .collect();

    let recency_f: Vec<f64> = recency.iter().map(|&d| d as f64).collect();
    let frequency_f: Vec<f64> = frequency.iter().map(|&f| f as f64).collect();
    let recency_buckets = stats::equal_population_buckets(&recency_f, 5);
    let frequency_buckets = stats::equal_population_buckets(&frequency_f, 5);
    let monetary_buckets = stats::equal_population_buckets(&monetary, 5);

    ids.into_iter()
        .enumerate()
        .map(|(i, customer_id)| {
            // Smallest recency is best: bucket 0 maps to score 5.
            let recency_score = (5 - recency_buckets[i]) as u8;
            let frequency_score = (frequency_buckets[i] + 1) as u8;
            let monetary_score = (monetary_buckets[i] + 1) as u8;
            let rfm_score = recency_score + frequency_score + monetary_score;
            RfmProfile {
                customer_id,
                recency_days: recency[i],
                frequency: frequency[i],
                monetary: monetary[i],
                recency_score,
                frequency_score,
                monetary_score,
                rfm_score,
                segment: Segment::from_score(rfm_score),
            }
        })
        .collect()
}

pub fn analyze(dataset: &Dataset) -> CustomerMetrics {
    let profiles = rfm_profiles(dataset);
    summarize(&profiles)
}

/// Aggregate a profile table into the reported customer metrics.
pub fn summarize(profiles: &[RfmProfile]) -> CustomerMetrics {
    let total = profiles.len();
    let monetary: Vec<f64> = profiles.iter().map(|p| p.monetary).collect();
    let high_value_cutoff = stats::quantile(&monetary, HIGH_VALUE_QUANTILE);

    let mut segments: BTreeMap<String, Vec<&RfmProfile>> = BTreeMap::new();
    for profile in profiles {
        segments
            .entry(profile.segment.label().to_string())
            .or_default()
            .push(profile);
    }
    let segments = segments
        .into_iter()
        .map(|(label, members)| {
            let stats = SegmentStats {
                customers: members.len(),
                share_pct: members.len() as f64 / total as f64 * 100.0,
                mean_recency_days: members.iter().map(|p| p.recency_days as f64).sum::<f64>()
                    / members.len() as f64,
                mean_frequency: members.iter().map(|p| p.frequency as f64).sum::<f64>()
                    / members.len() as f64,
                mean_monetary: members.iter().map(|p| p.monetary).sum::<f64>()
                    / members.len() as f64,
            };
            (label, stats)
        })
        .collect();

    let mut by_monetary: Vec<&RfmProfile> = profiles.iter().collect();
    by_monetary.sort_by(|a, b| {
        b.monetary
            .partial_cmp(&a.monetary)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let top_customers = by_monetary
        .into_iter()
        .take(10)
        .map(|p| TopCustomer {
            customer_id: p.customer_id.clone(),
            frequency: p.frequency,
            monetary: p.monetary,
            recency_days: p.recency_days,
        })
        .collect();

    CustomerMetrics {
        total_customers: total,
        active_last_30d: profiles
            .iter()
            .filter(|p| p.recency_days <= ACTIVE_WINDOW_DAYS)
            .count(),
        frequent_customers: profiles
            .iter()
            .filter(|p| p.frequency >= FREQUENT_ORDER_THRESHOLD)
            .count(),
        high_value_customers: high_value_cutoff
            .map(|cutoff| profiles.iter().filter(|p| p.monetary >= cutoff).count())
            .unwrap_or(0),
        segments,
        top_customers,
        mean_recency_days: stats::mean(
            &profiles.iter().map(|p| p.recency_days as f64).collect::<Vec<_>>(),
        ),
        mean_frequency: stats::mean(
            &profiles.iter().map(|p| p.frequency as f64).collect::<Vec<_>>(),
        ),
        mean_monetary: stats::mean(&monetary),
    }
}
