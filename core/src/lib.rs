//! salesdesk-core: batch analytics pipeline for e-commerce order data.
//!
//! Data flows strictly forward:
//!   raw table -> DataCleaner -> Dataset -> analyze_all -> MetricsBundle
//!             -> synthesize -> StrategicInsights
//!
//! The cleaner is the only stateful piece (it holds the loaded raw
//! table); every analysis is a pure function of the immutable cleaned
//! dataset, so analyses can run in any order or in isolation.

pub mod category_analysis;
pub mod channel_analysis;
pub mod cleaner;
pub mod customer_analysis;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod geography_analysis;
pub mod insights;
pub mod loader;
pub mod metrics;
pub mod pricing_analysis;
pub mod product_analysis;
pub mod record;
pub mod report;
pub mod rng;
pub mod seasonality_analysis;
pub mod stats;
pub mod types;

pub use cleaner::{CleaningConfig, CleaningReport, DataCleaner};
pub use dataset::Dataset;
pub use error::{AnalyticsError, AnalyticsResult};
pub use generator::generate_orders;
pub use insights::{synthesize, StrategicInsights};
pub use metrics::{analyze_all, AnalysisConfig, MetricsBundle};
pub use record::{Order, RawOrder};
