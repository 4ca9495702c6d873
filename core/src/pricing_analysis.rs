//! Unit-price dispersion by category and product, and the products
//! whose price spread suggests a standardization opportunity.

use crate::dataset::Dataset;
use crate::record::Order;
use crate::stats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Thresholds for flagging a pricing opportunity. These are business
/// heuristics rather than derived constants, so they are configurable.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Minimum price coefficient of variation.
    pub cv_threshold: f64,
    /// Minimum number of transactions for the CV to be meaningful.
    pub min_transactions: usize,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cv_threshold: 0.10,
            min_transactions: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPricing {
    pub mean_price: f64,
    pub median_price: f64,
    /// None for single-transaction categories.
    pub price_stddev: Option<f64>,
    pub min_price: f64,
    pub max_price: f64,
    pub price_cv: Option<f64>,
    /// Spread between the highest and lowest observed price, as a
    /// percentage of the lowest.
    pub potential_margin_pct: f64,
    pub units: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PricingOpportunity {
    pub product_name: String,
    pub mean_price: f64,
    pub price_cv: f64,
    pub transactions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PricingMetrics {
    pub categories: BTreeMap<String, CategoryPricing>,
    pub highest_variation_category: Option<String>,
    pub highest_margin_category: Option<String>,
    /// Products with price CV above the threshold and enough
    /// transactions, highest CV first.
    pub opportunities: Vec<PricingOpportunity>,
    pub recommendations: Vec<String>,
}

fn category_pricing(orders: &[Order]) -> BTreeMap<String, CategoryPricing> {
    let mut groups: BTreeMap<String, Vec<&Order>> = BTreeMap::new();
    for order in orders {
        groups.entry(order.category.clone()).or_default().push(order);
    }
    groups
        .into_iter()
        .map(|(category, members)| {
            let prices: Vec<f64> = members.iter().map(|o| o.unit_price).collect();
            let min_price = prices.iter().copied().fold(f64::INFINITY, f64::min);
            let max_price = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let pricing = CategoryPricing {
                mean_price: stats::mean(&prices).unwrap_or(0.0),
                median_price: stats::median(&prices).unwrap_or(0.0),
                price_stddev: stats::sample_stddev(&prices),
                min_price,
                max_price,
                price_cv: stats::coefficient_of_variation(&prices),
                potential_margin_pct: (max_price - min_price) / min_price * 100.0,
                units: members.iter().map(|o| o.quantity as u64).sum(),
                revenue: members.iter().map(|o| o.total_value).sum(),
            };
            (category, pricing)
        })
        .collect()
}

fn max_category_by<F>(categories: &BTreeMap<String, CategoryPricing>, rank: F) -> Option<String>
where
    F: Fn(&CategoryPricing) -> Option<f64>,
{
    categories
        .iter()
        .filter_map(|(name, p)| rank(p).map(|v| (name, v)))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(name, _)| name.clone())
}

fn product_opportunities(orders: &[Order], config: &PricingConfig) -> Vec<PricingOpportunity> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for order in orders {
        groups
            .entry(order.product_name.as_str())
            .or_default()
            .push(order.unit_price);
    }
    let mut opportunities: Vec<PricingOpportunity> = groups
        .into_iter()
        .filter_map(|(name, prices)| {
            let cv = stats::coefficient_of_variation(&prices)?;
            if cv > config.cv_threshold && prices.len() >= config.min_transactions {
                Some(PricingOpportunity {
                    product_name: name.to_string(),
                    mean_price: stats::mean(&prices).unwrap_or(0.0),
                    price_cv: cv,
                    transactions: prices.len(),
                })
            } else {
                None
            }
        })
        .collect();
    opportunities.sort_by(|a, b| {
        b.price_cv
            .partial_cmp(&a.price_cv)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    opportunities.truncate(10);
    opportunities
}

fn recommendations(
    highest_variation: Option<&str>,
    highest_margin: Option<&str>,
    opportunity_count: usize,
) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(category) = highest_variation {
        out.push(format!(
            "Review the pricing strategy for '{category}' (widest price variation)"
        ));
    }
    if let Some(category) = highest_margin {
        out.push(format!(
            "Explore price increases in '{category}' (largest potential margin)"
        ));
    }
    if opportunity_count > 0 {
        out.push(format!(
            "Standardize prices for {opportunity_count} high-variation products"
        ));
        out.push("Run A/B price tests before rolling out adjustments".to_string());
    }
    out
}

pub fn analyze(dataset: &Dataset, config: &PricingConfig) -> PricingMetrics {
    let categories = category_pricing(dataset.orders());
    let highest_variation_category = max_category_by(&categories, |p| p.price_cv);
    let highest_margin_category =
        max_category_by(&categories, |p| Some(p.potential_margin_pct));
    let opportunities = product_opportunities(dataset.orders(), config);
    let recommendations = recommendations(
        highest_variation_category.as_deref(),
        highest_margin_category.as_deref(),
        opportunities.len(),
    );

    PricingMetrics {
        categories,
        highest_variation_category,
        highest_margin_category,
        opportunities,
        recommendations,
    }
}
