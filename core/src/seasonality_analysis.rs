//! Seasonal revenue patterns by quarter, month, and weekday.
//!
//! Seasonality strength is the coefficient of variation of quarterly
//! revenue: above 0.30 is High, above 0.15 Medium, otherwise Low.

use crate::dataset::Dataset;
use crate::record::{month_name, Order};
use crate::stats;
use serde::Serialize;
use std::collections::BTreeMap;

const HIGH_CV: f64 = 0.30;
const MEDIUM_CV: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeasonalityLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodStats {
    pub revenue: f64,
    pub mean_ticket: f64,
    pub orders: usize,
    pub units: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonalityMetrics {
    pub quarters: BTreeMap<u32, PeriodStats>,
    pub months: BTreeMap<u32, PeriodStats>,
    pub weekdays: BTreeMap<String, PeriodStats>,
    pub best_quarter: Option<u32>,
    pub best_month: Option<u32>,
    pub best_weekday: Option<String>,
    /// None when fewer than two quarters (or months) have revenue.
    pub quarterly_cv: Option<f64>,
    pub monthly_cv: Option<f64>,
    pub level: SeasonalityLevel,
    pub recommendations: Vec<String>,
}

fn period_stats<K: Ord, F: Fn(&Order) -> K>(
    orders: &[Order],
    key: F,
) -> BTreeMap<K, PeriodStats> {
    let mut groups: BTreeMap<K, Vec<&Order>> = BTreeMap::new();
    for order in orders {
        groups.entry(key(order)).or_default().push(order);
    }
    groups
        .into_iter()
        .map(|(k, members)| {
            let totals: Vec<f64> = members.iter().map(|o| o.total_value).collect();
            let stats = PeriodStats {
                revenue: totals.iter().sum(),
                mean_ticket: stats::mean(&totals).unwrap_or(0.0),
                orders: members.len(),
                units: members.iter().map(|o| o.quantity as u64).sum(),
            };
            (k, stats)
        })
        .collect()
}

fn best_period<K: Clone + Ord>(periods: &BTreeMap<K, PeriodStats>) -> Option<K> {
    periods
        .iter()
        .max_by(|a, b| {
            a.1.revenue
                .partial_cmp(&b.1.revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(k, _)| k.clone())
}

fn level_for(cv: Option<f64>) -> SeasonalityLevel {
    match cv {
        Some(cv) if cv > HIGH_CV => SeasonalityLevel::High,
        Some(cv) if cv > MEDIUM_CV => SeasonalityLevel::Medium,
        _ => SeasonalityLevel::Low,
    }
}

fn recommendations(
    level: SeasonalityLevel,
    best_quarter: Option<u32>,
    best_month: Option<u32>,
    best_weekday: Option<&str>,
) -> Vec<String> {
    let mut out = Vec::new();
    if level == SeasonalityLevel::High {
        if let Some(q) = best_quarter {
            out.push(format!(
                "High seasonality detected: concentrate marketing spend in Q{q}"
            ));
        }
        out.push("Plan inventory levels around the seasonal peaks".to_string());
    }
    if let Some(m) = best_month {
        out.push(format!(
            "Strongest month is {}: intensify campaigns in that period",
            month_name(m)
        ));
    }
    if let Some(day) = best_weekday {
        out.push(format!(
            "Sales peak on {day}s: schedule campaigns for that day"
        ));
    }
    out
}

pub fn analyze(dataset: &Dataset) -> SeasonalityMetrics {
    let orders = dataset.orders();
    let quarters = period_stats(orders, |o| o.quarter);
    let months = period_stats(orders, |o| o.month);
    let weekdays = period_stats(orders, |o| o.weekday_name.clone());

    let quarterly_revenue: Vec<f64> = quarters.values().map(|p| p.revenue).collect();
    let monthly_revenue: Vec<f64> = months.values().map(|p| p.revenue).collect();
    let quarterly_cv = stats::coefficient_of_variation(&quarterly_revenue);
    let monthly_cv = stats::coefficient_of_variation(&monthly_revenue);
    let level = level_for(quarterly_cv);

    let best_quarter = best_period(&quarters);
    let best_month = best_period(&months);
    let best_weekday = best_period(&weekdays);

    SeasonalityMetrics {
        recommendations: recommendations(
            level,
            best_quarter,
            best_month,
            best_weekday.as_deref(),
        ),
        quarters,
        months,
        weekdays,
        best_quarter,
        best_month,
        best_weekday,
        quarterly_cv,
        monthly_cv,
        level,
    }
}
