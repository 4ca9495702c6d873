//! Data cleaning: turn a raw order table into an invariant-respecting
//! `Dataset`.
//!
//! Steps run in a fixed order. Each step filters the previous step's
//! output, and the outlier threshold is computed on the table as it
//! stands after the null/duplicate/non-positive filters, not on the
//! original input:
//!   1. type coercion (done at parse time; bad dates are already None)
//!   2. drop rows with null critical fields
//!   3. drop exact duplicate rows
//!   4. drop rows with non-positive measures
//!   5. drop outliers above the configured total_value percentile
//!   6. derive temporal columns and repair inconsistent totals
//!
//! The raw table is never mutated; cleaning always works on a copy, and
//! every dropped or repaired row is counted in the CleaningReport.

use crate::dataset::Dataset;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::loader;
use crate::record::{temporal_fields, Order, RawOrder};
use crate::stats;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// Maximum tolerated |total_value - quantity * unit_price| before the
/// total is recomputed.
pub const VALUE_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct CleaningConfig {
    pub remove_outliers: bool,
    /// Percentile of the total_value distribution above which rows are
    /// treated as outliers.
    pub outlier_percentile: f64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            remove_outliers: true,
            outlier_percentile: 0.99,
        }
    }
}

/// Pre-cleaning look at the raw table.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub rows: usize,
    pub null_order_date: usize,
    pub null_quantity: usize,
    pub null_unit_price: usize,
    pub null_total_value: usize,
    pub duplicate_rows: usize,
}

/// Accounting for one cleaning run. Invariant:
/// rows_in == rows_out + nulls_dropped + duplicates_dropped
///            + nonpositive_dropped + outliers_dropped.
#[derive(Debug, Clone, Serialize)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub nulls_dropped: usize,
    pub duplicates_dropped: usize,
    pub nonpositive_dropped: usize,
    pub outliers_dropped: usize,
    pub values_repaired: usize,
    pub rows_out: usize,
}

impl CleaningReport {
    pub fn retention_pct(&self) -> f64 {
        if self.rows_in == 0 {
            return 100.0;
        }
        self.rows_out as f64 / self.rows_in as f64 * 100.0
    }
}

/// Holds a loaded raw table and produces cleaned datasets from it.
/// The raw table is kept unmodified alongside any number of cleaning
/// runs over it.
#[derive(Debug, Default)]
pub struct DataCleaner {
    raw: Option<Vec<RawOrder>>,
}

impl DataCleaner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the raw table from a file, an in-memory table, or fail with
    /// InvalidInput when neither is given.
    pub fn load(
        &mut self,
        path: Option<&Path>,
        records: Option<Vec<RawOrder>>,
    ) -> AnalyticsResult<usize> {
        let rows = loader::load_orders(path, records)?;
        let count = rows.len();
        self.raw = Some(rows);
        Ok(count)
    }

    pub fn raw(&self) -> Option<&[RawOrder]> {
        self.raw.as_deref()
    }

    fn raw_or_not_loaded(&self, operation: &'static str) -> AnalyticsResult<&[RawOrder]> {
        self.raw
            .as_deref()
            .ok_or(AnalyticsError::NotLoaded { operation })
    }

    /// Survey the raw table before cleaning.
    pub fn quality_report(&self) -> AnalyticsResult<QualityReport> {
        let rows = self.raw_or_not_loaded("quality_report")?;
        let mut seen = HashSet::with_capacity(rows.len());
        let mut duplicate_rows = 0;
        for row in rows {
            if !seen.insert(row.fingerprint()) {
                duplicate_rows += 1;
            }
        }
        Ok(QualityReport {
            rows: rows.len(),
            null_order_date: rows.iter().filter(|r| r.order_date.is_none()).count(),
            null_quantity: rows.iter().filter(|r| r.quantity.is_none()).count(),
            null_unit_price: rows.iter().filter(|r| r.unit_price.is_none()).count(),
            null_total_value: rows.iter().filter(|r| r.total_value.is_none()).count(),
            duplicate_rows,
        })
    }

    /// Run the full cleaning pass over a copy of the raw table.
    pub fn clean(&self, config: &CleaningConfig) -> AnalyticsResult<(Dataset, CleaningReport)> {
        // NaN fails both comparisons and is rejected too.
        if !(config.outlier_percentile > 0.0 && config.outlier_percentile <= 1.0) {
            return Err(AnalyticsError::InvalidInput(format!(
                "outlier_percentile must be in (0, 1], got {}",
                config.outlier_percentile
            )));
        }
        let raw = self.raw_or_not_loaded("clean")?;
        let rows_in = raw.len();

        // Step 2: critical-field nulls. A row without a parseable date
        // cannot receive derived temporal columns, so it counts here too.
        let mut table: Vec<&RawOrder> = raw
            .iter()
            .filter(|r| {
                r.order_date.is_some()
                    && r.quantity.is_some()
                    && r.unit_price.is_some()
                    && r.total_value.is_some()
            })
            .collect();
        let nulls_dropped = rows_in - table.len();
        if nulls_dropped > 0 {
            log::info!("cleaning: dropped {nulls_dropped} rows with null critical fields");
        }

        // Step 3: exact duplicates, first occurrence wins.
        let mut seen = HashSet::with_capacity(table.len());
        let before = table.len();
        table.retain(|r| seen.insert(r.fingerprint()));
        let duplicates_dropped = before - table.len();
        if duplicates_dropped > 0 {
            log::info!("cleaning: dropped {duplicates_dropped} duplicate rows");
        }

        // Step 4: non-positive measures. Quantities are rounded to whole
        // units in step 6, so anything that rounds below one unit is
        // dropped here as well.
        let before = table.len();
        table.retain(|r| {
            r.quantity.unwrap_or(0.0).round() >= 1.0
                && r.unit_price.unwrap_or(0.0) > 0.0
                && r.total_value.unwrap_or(0.0) > 0.0
        });
        let nonpositive_dropped = before - table.len();
        if nonpositive_dropped > 0 {
            log::info!("cleaning: dropped {nonpositive_dropped} rows with non-positive values");
        }

        // Step 5: outliers, threshold taken from the table as filtered so far.
        let mut outliers_dropped = 0;
        if config.remove_outliers {
            let totals: Vec<f64> = table.iter().filter_map(|r| r.total_value).collect();
            if let Some(threshold) = stats::quantile(&totals, config.outlier_percentile) {
                let before = table.len();
                table.retain(|r| r.total_value.unwrap_or(0.0) <= threshold);
                outliers_dropped = before - table.len();
                if outliers_dropped > 0 {
                    log::info!(
                        "cleaning: dropped {} outliers above total_value {:.2} (p{:.0})",
                        outliers_dropped,
                        threshold,
                        config.outlier_percentile * 100.0
                    );
                }
            }
        }

        // Step 6: derived columns and value-consistency repair.
        let mut values_repaired = 0;
        let orders: Vec<Order> = table
            .iter()
            .map(|r| {
                let order_date = r.order_date.expect("nulls filtered in step 2");
                let quantity_raw = r.quantity.expect("nulls filtered in step 2");
                let unit_price = r.unit_price.expect("nulls filtered in step 2");
                let mut total_value = r.total_value.expect("nulls filtered in step 2");

                // The repair uses the rounded quantity the cleaned row
                // carries, so quantity and total stay consistent.
                let quantity = quantity_raw.round() as u32;
                let computed = quantity as f64 * unit_price;
                if (total_value - computed).abs() > VALUE_TOLERANCE {
                    total_value = computed;
                    values_repaired += 1;
                }

                let (year, month, month_name, weekday_name, quarter, iso_week) =
                    temporal_fields(order_date);
                Order {
                    order_id: r.order_id.clone(),
                    order_date,
                    customer_id: r.customer_id.clone(),
                    product_name: r.product_name.clone(),
                    category: r.category.clone(),
                    quantity,
                    unit_price,
                    total_value,
                    state: r.state.clone(),
                    sales_channel: r.sales_channel.clone(),
                    year,
                    month,
                    month_name,
                    weekday_name,
                    quarter,
                    iso_week,
                }
            })
            .collect();
        if values_repaired > 0 {
            log::info!("cleaning: repaired {values_repaired} inconsistent total_value rows");
        }

        let report = CleaningReport {
            rows_in,
            nulls_dropped,
            duplicates_dropped,
            nonpositive_dropped,
            outliers_dropped,
            values_repaired,
            rows_out: orders.len(),
        };
        log::info!(
            "cleaning: {} rows in, {} rows out ({:.1}% retained)",
            report.rows_in,
            report.rows_out,
            report.retention_pct()
        );
        debug_assert_eq!(
            report.rows_in,
            report.rows_out
                + report.nulls_dropped
                + report.duplicates_dropped
                + report.nonpositive_dropped
                + report.outliers_dropped
        );

        Ok((Dataset::new(orders), report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_before_load_is_not_loaded() {
        let cleaner = DataCleaner::new();
        let err = cleaner.clean(&CleaningConfig::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::NotLoaded { operation: "clean" }));
        let err = cleaner.quality_report().unwrap_err();
        assert!(matches!(err, AnalyticsError::NotLoaded { .. }));
    }
}
