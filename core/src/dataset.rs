//! The cleaned, immutable order table every analysis reads.

use crate::record::Order;
use crate::types::CustomerId;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeSet;

/// A cleaned order table. Built once by the cleaner, then treated as an
/// immutable value: analyses borrow it and never mutate it.
#[derive(Debug, Clone)]
pub struct Dataset {
    orders: Vec<Order>,
}

impl Dataset {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn into_orders(self) -> Vec<Order> {
        self.orders
    }

    pub fn total_revenue(&self) -> f64 {
        self.orders.iter().map(|o| o.total_value).sum()
    }

    /// The analysis reference point: the most recent order timestamp.
    pub fn reference_date(&self) -> Option<NaiveDateTime> {
        self.orders.iter().map(|o| o.order_date).max()
    }

    pub fn earliest_date(&self) -> Option<NaiveDateTime> {
        self.orders.iter().map(|o| o.order_date).min()
    }

    pub fn unique_customers(&self) -> usize {
        self.orders
            .iter()
            .map(|o| &o.customer_id)
            .collect::<BTreeSet<&CustomerId>>()
            .len()
    }

    pub fn unique_products(&self) -> usize {
        self.orders
            .iter()
            .map(|o| o.product_name.as_str())
            .collect::<BTreeSet<&str>>()
            .len()
    }

    pub fn unique_categories(&self) -> usize {
        self.orders
            .iter()
            .map(|o| o.category.as_str())
            .collect::<BTreeSet<&str>>()
            .len()
    }

    pub fn summary(&self) -> DatasetSummary {
        let totals: Vec<f64> = self.orders.iter().map(|o| o.total_value).collect();
        DatasetSummary {
            total_records: self.len(),
            start_date: self.earliest_date(),
            end_date: self.reference_date(),
            unique_products: self.unique_products(),
            unique_categories: self.unique_categories(),
            unique_customers: self.unique_customers(),
            total_revenue: totals.iter().sum(),
            mean_ticket: crate::stats::mean(&totals),
            median_ticket: crate::stats::median(&totals),
        }
    }
}

/// Basic shape of a cleaned dataset, for logging and reports.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub unique_products: usize,
    pub unique_categories: usize,
    pub unique_customers: usize,
    pub total_revenue: f64,
    pub mean_ticket: Option<f64>,
    pub median_ticket: Option<f64>,
}
