//! Strategic insight synthesis: a pure transform from the metrics
//! bundle into qualitative findings.
//!
//! Every rule is evaluated independently and all matching findings are
//! included; the recommendation and KPI lists are fixed and not
//! data-dependent.

use crate::metrics::MetricsBundle;
use serde::Serialize;

/// Revenue share above which a single product is a concentration risk.
const PRODUCT_CONCENTRATION_PCT: f64 = 30.0;
/// Revenue share above which a single channel is an operational risk.
const CHANNEL_CONCENTRATION_PCT: f64 = 70.0;
/// Top-3 state share below which geographic expansion looks viable.
const GEO_CONCENTRATION_PCT: f64 = 70.0;

#[derive(Debug, Clone, Serialize)]
pub struct StrategicInsights {
    pub discoveries: Vec<String>,
    pub opportunities: Vec<String>,
    pub risks: Vec<String>,
    pub immediate_recommendations: Vec<String>,
    pub mid_term_recommendations: Vec<String>,
    pub watch_kpis: Vec<String>,
}

pub fn synthesize(bundle: &MetricsBundle) -> StrategicInsights {
    let mut discoveries = Vec::new();
    let mut opportunities = Vec::new();
    let mut risks = Vec::new();

    if let Some(product) = &bundle.products.leader {
        discoveries.push(format!(
            "Product '{}' accounts for {:.1}% of total revenue",
            product.name, product.revenue_share_pct
        ));
        if product.revenue_share_pct > PRODUCT_CONCENTRATION_PCT {
            risks.push(format!(
                "Heavy dependence on one product ({:.1}% of revenue): concentration risk",
                product.revenue_share_pct
            ));
        }
    }

    if let Some(category) = &bundle.categories.leader {
        discoveries.push(format!(
            "Category '{}' leads with {:.1}% of revenue",
            category.name, category.revenue_share_pct
        ));
    }

    if let Some(channel) = &bundle.channels.leader {
        discoveries.push(format!(
            "Channel '{}' concentrates {:.1}% of sales",
            channel.name, channel.revenue_share_pct
        ));
    }
    if bundle.channels.diversification.leader_share_pct > CHANNEL_CONCENTRATION_PCT {
        risks.push(format!(
            "Heavy dependence on one channel ({:.1}% of revenue): operational risk",
            bundle.channels.diversification.leader_share_pct
        ));
    }

    if let Some(at_risk) = bundle.customers.segments.get("At Risk") {
        if at_risk.customers > 0 {
            opportunities.push(format!(
                "Reactivate {} at-risk customers with targeted campaigns",
                at_risk.customers
            ));
        }
    }

    if bundle.geography.top3_revenue_share_pct < GEO_CONCENTRATION_PCT {
        opportunities.push(
            "Low geographic concentration: opportunity for nationwide expansion".to_string(),
        );
    }

    StrategicInsights {
        discoveries,
        opportunities,
        risks,
        immediate_recommendations: vec![
            "Stand up a live monitoring dashboard".to_string(),
            "Configure alerts for performance drops on flagship products".to_string(),
            "Launch a loyalty program for Champions customers".to_string(),
        ],
        mid_term_recommendations: vec![
            "Diversify the product portfolio to reduce concentration".to_string(),
            "Expand into additional sales channels".to_string(),
            "Introduce predictive demand forecasting".to_string(),
        ],
        watch_kpis: vec![
            "Monthly revenue and MoM growth".to_string(),
            "Mean ticket by channel and category".to_string(),
            "Customer retention rate".to_string(),
            "Revenue concentration (products and channels)".to_string(),
            "Geographic performance".to_string(),
            "Seasonality and trend".to_string(),
        ],
    }
}
