//! Utility Module Implementation
//! Author: kartik4091
//! Created: 2025-06-07 09:30:02 UTC

pub mod metrics;

pub use metrics::{Metrics, MetricsSnapshot};
