//! Flat-file ingestion and export for order tables.
//!
//! Only delimited text is supported (.csv and .tsv). Spreadsheet
//! extensions are recognized but rejected with UnsupportedFormat so the
//! caller gets a precise error instead of a parse failure.

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::record::{Order, RawOrder};
use std::path::Path;

fn delimiter_for(path: &Path) -> AnalyticsResult<u8> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match extension.as_str() {
        "csv" => Ok(b','),
        "tsv" => Ok(b'\t'),
        _ => Err(AnalyticsError::UnsupportedFormat { extension }),
    }
}

/// Read raw orders from a delimited-text file. Dirty values in nullable
/// columns become None; a malformed row structure (wrong column count,
/// bad header) is a hard error.
pub fn read_orders(path: &Path) -> AnalyticsResult<Vec<RawOrder>> {
    let delimiter = delimiter_for(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut orders = Vec::new();
    for row in reader.deserialize() {
        let order: RawOrder = row?;
        orders.push(order);
    }
    log::info!("loaded {} raw orders from {}", orders.len(), path.display());
    Ok(orders)
}

/// Resolve the data source for a cleaning run: a file path, an in-memory
/// table, or neither (which is an InvalidInput error). When both are
/// given the file wins, matching the precedence of the ingestion CLI.
pub fn load_orders(
    path: Option<&Path>,
    records: Option<Vec<RawOrder>>,
) -> AnalyticsResult<Vec<RawOrder>> {
    match (path, records) {
        (Some(p), _) => read_orders(p),
        (None, Some(rows)) => Ok(rows),
        (None, None) => Err(AnalyticsError::InvalidInput(
            "provide a file path or an in-memory table".into(),
        )),
    }
}

/// Write cleaned orders (including derived columns) to a delimited file.
pub fn write_orders(path: &Path, orders: &[Order]) -> AnalyticsResult<()> {
    let delimiter = delimiter_for(path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;
    for order in orders {
        writer.serialize(order)?;
    }
    writer.flush()?;
    log::info!("exported {} orders to {}", orders.len(), path.display());
    Ok(())
}
