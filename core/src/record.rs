//! Order record types: the raw ingested row and the cleaned, enriched row.
//!
//! `RawOrder` is what loaders and the sample generator produce. Any field
//! that can be dirty in source data is an Option; parse failures become
//! None rather than aborting ingestion. `Order` is the invariant-respecting
//! row the cleaner emits; every downstream analysis reads only `Order`s.

use crate::types::{CustomerId, OrderId};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One ingested row, possibly dirty. Column names are significant and
/// match the expected CSV header exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrder {
    pub order_id: OrderId,
    #[serde(with = "lenient_datetime")]
    pub order_date: Option<NaiveDateTime>,
    pub customer_id: CustomerId,
    pub product_name: String,
    pub category: String,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total_value: Option<f64>,
    pub state: String,
    pub sales_channel: String,
}

impl RawOrder {
    /// Stable full-row fingerprint used for exact-duplicate detection.
    /// Floats are rendered with full precision so 10.0 and 10.00000001
    /// are distinct rows.
    pub fn fingerprint(&self) -> String {
        format!(
            "{}\x1f{:?}\x1f{}\x1f{}\x1f{}\x1f{:?}\x1f{:?}\x1f{:?}\x1f{}\x1f{}",
            self.order_id,
            self.order_date,
            self.customer_id,
            self.product_name,
            self.category,
            self.quantity,
            self.unit_price,
            self.total_value,
            self.state,
            self.sales_channel,
        )
    }
}

/// One cleaned order. Immutable once built; the derived temporal fields
/// are always recomputed from `order_date`, never trusted from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub order_date: NaiveDateTime,
    pub customer_id: CustomerId,
    pub product_name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_value: f64,
    pub state: String,
    pub sales_channel: String,
    // Derived from order_date during cleaning.
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub weekday_name: String,
    pub quarter: u32,
    pub iso_week: u32,
}

impl Order {
    pub fn date(&self) -> NaiveDate {
        self.order_date.date()
    }

    /// Downgrade to a raw row, e.g. to re-run cleaning over an already
    /// cleaned table. Derived fields are discarded; they are recomputed
    /// on the next cleaning pass.
    pub fn to_raw(&self) -> RawOrder {
        RawOrder {
            order_id: self.order_id.clone(),
            order_date: Some(self.order_date),
            customer_id: self.customer_id.clone(),
            product_name: self.product_name.clone(),
            category: self.category.clone(),
            quantity: Some(self.quantity as f64),
            unit_price: Some(self.unit_price),
            total_value: Some(self.total_value),
            state: self.state.clone(),
            sales_channel: self.sales_channel.clone(),
        }
    }
}

/// English month name, 1-based.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// English weekday name.
pub fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}

/// Derive the temporal fields from a timestamp.
pub fn temporal_fields(dt: NaiveDateTime) -> (i32, u32, String, String, u32, u32) {
    let date = dt.date();
    (
        date.year(),
        date.month(),
        month_name(date.month()).to_string(),
        weekday_name(date.weekday()).to_string(),
        (date.month() - 1) / 3 + 1,
        date.iso_week().week(),
    )
}

/// Lenient timestamp parsing for the `order_date` column.
/// Accepted formats, tried in order; anything else becomes None.
mod lenient_datetime {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        for fmt in FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt);
            }
        }
        // Bare dates are valid order dates at midnight.
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }
}

pub use lenient_datetime::parse as parse_order_date;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_date_formats() {
        assert!(parse_order_date("2026-03-14 10:30:00").is_some());
        assert!(parse_order_date("2026-03-14T10:30:00").is_some());
        assert!(parse_order_date("2026-03-14").is_some());
        assert!(parse_order_date("14/03/2026").is_none());
        assert!(parse_order_date("").is_none());
        assert!(parse_order_date("not a date").is_none());
    }

    #[test]
    fn temporal_fields_are_consistent() {
        // 2026-08-31 is a Monday in Q3, ISO week 36.
        let dt = NaiveDate::from_ymd_opt(2026, 8, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let (year, month, name, weekday, quarter, week) = temporal_fields(dt);
        assert_eq!(year, 2026);
        assert_eq!(month, 8);
        assert_eq!(name, "August");
        assert_eq!(weekday, "Monday");
        assert_eq!(quarter, 3);
        assert_eq!(week, 36);
    }
}
