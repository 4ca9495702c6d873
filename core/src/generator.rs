//! Synthetic order generation for demos and tests.
//!
//! Generation is a pure function of (count, seed, reference_date):
//! the same inputs always produce byte-identical records. Attribute
//! distributions are weighted to look like a plausible consumer
//! electronics storefront: a handful of states and channels dominate,
//! most orders are single-unit, and prices jitter within 20% of a base.

use crate::record::RawOrder;
use crate::rng::GeneratorRng;
use chrono::{Duration, NaiveDate};

/// (product_name, category, base_price)
const CATALOG: [(&str, &str, f64); 16] = [
    ("Samsung Galaxy Smartphone", "Smartphones", 1200.0),
    ("iPhone 14", "Smartphones", 4500.0),
    ("Dell Inspiron Notebook", "Notebooks", 2800.0),
    ("iPad Tablet", "Tablets", 2200.0),
    ("JBL Bluetooth Headphones", "Audio", 300.0),
    ("Apple Smartwatch", "Wearables", 2000.0),
    ("Canon EOS Camera", "Photography", 3500.0),
    ("LG OLED 55\" TV", "TVs", 2500.0),
    ("Lenovo ThinkPad Notebook", "Notebooks", 3200.0),
    ("Logitech Gaming Mouse", "Peripherals", 150.0),
    ("Corsair Mechanical Keyboard", "Peripherals", 400.0),
    ("Samsung 24\" Monitor", "Monitors", 800.0),
    ("Wireless Charger", "Accessories", 200.0),
    ("JBL Portable Speaker", "Audio", 500.0),
    ("1TB External Drive", "Storage", 300.0),
    ("64GB Flash Drive", "Storage", 80.0),
];

const STATES: [&str; 8] = ["CA", "TX", "NY", "FL", "IL", "PA", "OH", "GA"];
const STATE_WEIGHTS: [f64; 8] = [0.35, 0.15, 0.12, 0.08, 0.08, 0.05, 0.07, 0.10];

const CHANNELS: [&str; 3] = ["Online", "Marketplace", "Mobile App"];
const CHANNEL_WEIGHTS: [f64; 3] = [0.50, 0.35, 0.15];

const QUANTITIES: [u32; 5] = [1, 2, 3, 4, 5];
const QUANTITY_WEIGHTS: [f64; 5] = [0.60, 0.20, 0.10, 0.06, 0.04];

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Generate `count` plausible raw orders, dated uniformly over the
/// 365 days trailing `reference_date`.
pub fn generate_orders(count: usize, seed: u64, reference_date: NaiveDate) -> Vec<RawOrder> {
    let mut rng = GeneratorRng::new(seed);
    let mut orders = Vec::with_capacity(count);

    for i in 0..count {
        let days_back = rng.next_u64_below(365) as i64;
        let second_of_day = rng.next_u64_below(86_400) as u32;
        let order_date = (reference_date - Duration::days(days_back))
            .and_hms_opt(second_of_day / 3600, second_of_day / 60 % 60, second_of_day % 60)
            .expect("derived time of day is always valid");

        let (product_name, category, base_price) =
            CATALOG[rng.next_u64_below(CATALOG.len() as u64) as usize];
        let unit_price = round2(base_price * rng.uniform(0.8, 1.2));
        let quantity = QUANTITIES[rng.weighted_index(&QUANTITY_WEIGHTS)];

        let customer_id = 1000 + rng.next_u64_below(9000);
        let state = STATES[rng.weighted_index(&STATE_WEIGHTS)];
        let sales_channel = CHANNELS[rng.weighted_index(&CHANNEL_WEIGHTS)];

        orders.push(RawOrder {
            order_id: format!("ORD{:05}", 10_000 + i),
            order_date: Some(order_date),
            customer_id: customer_id.to_string(),
            product_name: product_name.to_string(),
            category: category.to_string(),
            quantity: Some(quantity as f64),
            unit_price: Some(unit_price),
            total_value: Some(round2(quantity as f64 * unit_price)),
            state: state.to_string(),
            sales_channel: sales_channel.to_string(),
        });
    }

    orders
}
