//! Plain-text report rendering and flat-file export of analysis output.

use crate::error::AnalyticsResult;
use crate::insights::StrategicInsights;
use crate::metrics::MetricsBundle;
use std::fmt::Write as _;
use std::path::Path;

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(30));
}

fn bullet_list(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "* {item}");
    }
    let _ = writeln!(out);
}

/// Render the bundle and insights as a sectioned plain-text report.
pub fn render(bundle: &MetricsBundle, insights: &StrategicInsights) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "E-COMMERCE BUSINESS INSIGHTS REPORT");
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out);

    section(&mut out, "KEY METRICS");
    let km = &bundle.key_metrics;
    let _ = writeln!(out, "Total revenue:      {:.2}", km.total_revenue);
    if let Some(ticket) = km.mean_ticket {
        let _ = writeln!(out, "Mean ticket:        {ticket:.2}");
    }
    let _ = writeln!(out, "Orders:             {}", km.order_count);
    let _ = writeln!(out, "Unique customers:   {}", km.unique_customers);
    let _ = writeln!(out, "Unique products:    {}", km.unique_products);
    let _ = writeln!(out, "Period:             {} days", km.period_days);
    match km.mean_daily_revenue {
        Some(daily) => {
            let _ = writeln!(out, "Mean daily revenue: {daily:.2}");
        }
        None => {
            let _ = writeln!(out, "Mean daily revenue: not computable (single-day period)");
        }
    }
    let _ = writeln!(out);

    section(&mut out, "DISCOVERIES");
    bullet_list(&mut out, &insights.discoveries);

    section(&mut out, "OPPORTUNITIES");
    bullet_list(&mut out, &insights.opportunities);

    section(&mut out, "RISKS");
    bullet_list(&mut out, &insights.risks);

    section(&mut out, "IMMEDIATE RECOMMENDATIONS");
    bullet_list(&mut out, &insights.immediate_recommendations);

    section(&mut out, "MID-TERM RECOMMENDATIONS");
    bullet_list(&mut out, &insights.mid_term_recommendations);

    section(&mut out, "KPIS TO WATCH");
    bullet_list(&mut out, &insights.watch_kpis);

    out
}

/// Write the rendered report to a file.
pub fn write_report(
    path: &Path,
    bundle: &MetricsBundle,
    insights: &StrategicInsights,
) -> AnalyticsResult<()> {
    std::fs::write(path, render(bundle, insights))?;
    log::info!("wrote insights report to {}", path.display());
    Ok(())
}

/// Serialize the full metrics bundle as pretty JSON.
pub fn write_metrics_json(path: &Path, bundle: &MetricsBundle) -> AnalyticsResult<()> {
    let json = serde_json::to_string_pretty(bundle)?;
    std::fs::write(path, json)?;
    log::info!("wrote metrics bundle to {}", path.display());
    Ok(())
}
