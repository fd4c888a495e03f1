//! Metric extraction and health scoring
//!
//! This module turns the raw text of a diagnostic bundle into a flat set of
//! named numeric metrics and folds a subset of them into one composite health
//! score.
//!
//! # Implementation Model
//!
//! Metric names come from the closed [`MetricKey`] enumeration, so an
//! extractor can never emit a key outside the known schema. A [`MetricSet`]
//! maps keys to finite values.
//!
//! Extractors are registered in a static table ([`EXTRACTORS`]). Each entry
//! names the bundle file it reads and a plain scanning function that converts
//! that file's text into zero or more metrics. Extractors are independent: a
//! missing or unparseable file only means that extractor contributes nothing.
//!
//! [`health_score`] is a pure function of five metrics (disk, memory, log
//! error signals, failed systemd units, not-ready Kubernetes nodes) and is
//! always recorded under [`MetricKey::HealthScore`].

mod extractors;
mod health;
mod metric_key;
mod metric_set;
mod rounding;

pub use extractors::{
    EXTRACTORS, ExtractorDef, UNKNOWN_HOST, extract_disk, extract_failed_units, extract_host, extract_k8s_nodes, extract_k8s_pods,
    extract_log_errors, extract_memory, extract_metrics, extract_running_services,
};
pub use health::{apply_health_score, health_score};
pub use metric_key::{MetricKey, Unit};
pub use metric_set::MetricSet;
pub use rounding::round_to;
