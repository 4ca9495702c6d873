//! report-runner: headless analytics runner.
//!
//! Usage:
//!   report-runner --records 5000 --seed 42 --out-dir reports
//!   report-runner --input data/orders.csv --out-dir reports
//!   report-runner --records 1000 --keep-outliers

use anyhow::Result;
use chrono::Utc;
use salesdesk_core::{
    analyze_all, cleaner::DataCleaner, generate_orders, loader, report, synthesize,
    AnalysisConfig, CleaningConfig,
};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let records = parse_arg(&args, "--records", 5_000usize);
    let percentile = parse_arg(&args, "--percentile", 0.99f64);
    let keep_outliers = args.iter().any(|a| a == "--keep-outliers");
    let input: Option<PathBuf> = args
        .windows(2)
        .find(|w| w[0] == "--input")
        .map(|w| PathBuf::from(&w[1]));
    let out_dir = args
        .windows(2)
        .find(|w| w[0] == "--out-dir")
        .map(|w| PathBuf::from(&w[1]))
        .unwrap_or_else(|| PathBuf::from("reports"));

    println!("SalesDesk report-runner");
    match &input {
        Some(path) => println!("  input:    {}", path.display()),
        None => println!("  input:    generated ({records} records, seed {seed})"),
    }
    println!("  out dir:  {}", out_dir.display());
    println!();

    std::fs::create_dir_all(&out_dir)?;

    // Load or generate the raw table.
    let mut cleaner = DataCleaner::new();
    let rows_loaded = match &input {
        Some(path) => cleaner.load(Some(path), None)?,
        None => {
            let reference_date = Utc::now().date_naive();
            let rows = generate_orders(records, seed, reference_date);
            cleaner.load(None, Some(rows))?
        }
    };
    log::info!("loaded {rows_loaded} raw rows");

    let quality = cleaner.quality_report()?;
    println!("Raw data quality:");
    println!("  rows:            {}", quality.rows);
    println!("  null dates:      {}", quality.null_order_date);
    println!("  null quantities: {}", quality.null_quantity);
    println!("  null prices:     {}", quality.null_unit_price);
    println!("  null totals:     {}", quality.null_total_value);
    println!("  duplicates:      {}", quality.duplicate_rows);
    println!();

    // Clean.
    let cleaning = CleaningConfig {
        remove_outliers: !keep_outliers,
        outlier_percentile: percentile,
    };
    let (dataset, cleaning_report) = cleaner.clean(&cleaning)?;
    println!("Cleaning:");
    println!("  rows in:       {}", cleaning_report.rows_in);
    println!("  nulls dropped: {}", cleaning_report.nulls_dropped);
    println!("  dups dropped:  {}", cleaning_report.duplicates_dropped);
    println!("  <=0 dropped:   {}", cleaning_report.nonpositive_dropped);
    println!("  outliers:      {}", cleaning_report.outliers_dropped);
    println!("  repaired:      {}", cleaning_report.values_repaired);
    println!(
        "  rows out:      {} ({:.1}% retained)",
        cleaning_report.rows_out,
        cleaning_report.retention_pct()
    );
    println!();

    // Analyze and synthesize.
    let bundle = analyze_all(&dataset, &AnalysisConfig::default());
    let insights = synthesize(&bundle);

    print_headline(&bundle);

    // Export everything.
    loader::write_orders(&out_dir.join("orders_cleaned.csv"), dataset.orders())?;
    report::write_metrics_json(&out_dir.join("metrics.json"), &bundle)?;
    report::write_report(&out_dir.join("business_insights.txt"), &bundle, &insights)?;
    println!("Reports written to {}", out_dir.display());

    Ok(())
}

fn print_headline(bundle: &salesdesk_core::MetricsBundle) {
    let km = &bundle.key_metrics;
    println!("Headline metrics:");
    println!("  total revenue:    {:.2}", km.total_revenue);
    if let Some(ticket) = km.mean_ticket {
        println!("  mean ticket:      {ticket:.2}");
    }
    println!("  orders:           {}", km.order_count);
    println!("  unique customers: {}", km.unique_customers);
    if let Some(leader) = &bundle.products.leader {
        println!(
            "  top product:      {} ({:.1}% of revenue)",
            leader.name, leader.revenue_share_pct
        );
    }
    if let Some(leader) = &bundle.channels.leader {
        println!(
            "  top channel:      {} ({:.1}% of revenue)",
            leader.name, leader.revenue_share_pct
        );
    }
    println!("  seasonality:      {:?}", bundle.seasonality.level);
    println!();
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
