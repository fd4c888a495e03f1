//! Read-only views over stored metrics.
//!
//! [`rolling_average`] smooths one metric of one host over calendar days and
//! [`diff_runs`] compares two runs key by key. Neither treats unknown hosts,
//! runs, or metric names as errors; they simply produce empty results.

mod diff;
mod rolling;

pub use diff::{MetricDelta, diff_metrics, diff_runs};
pub use rolling::{ROLLING_WINDOW_DAYS, RollingPoint, rolling_average, rolling_window};
