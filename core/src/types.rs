//! Shared primitive types used across the pipeline.

/// A unique order identifier (e.g. "ORD1042").
pub type OrderId = String;

/// A customer identifier. Upstream systems may send numeric ids;
/// they are carried as strings and never interpreted.
pub type CustomerId = String;
