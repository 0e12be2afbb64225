//! Metrics for connection attempts
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! application installs a recorder (Prometheus exporter, etc.).

pub mod counters;
pub mod histograms;
pub mod labels;
