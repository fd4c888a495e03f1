use super::rounding::round_to;
use super::{MetricKey, MetricSet};

/// Usage thresholds and their penalties, highest first. Only the first match applies.
const USAGE_PENALTIES: &[(f64, f64)] = &[(90.0, 25.0), (80.0, 15.0), (70.0, 8.0)];

const POINTS_PER_ERROR_SIGNAL: f64 = 2.0;
const MAX_ERROR_SIGNAL_PENALTY: f64 = 20.0;

const POINTS_PER_FAILED_UNIT: f64 = 5.0;
const MAX_FAILED_UNIT_PENALTY: f64 = 15.0;

const POINTS_PER_NOT_READY_NODE: f64 = 10.0;
const MAX_NOT_READY_NODE_PENALTY: f64 = 20.0;

fn usage_penalty(pct: f64) -> f64 {
    USAGE_PENALTIES
        .iter()
        .find(|(threshold, _)| pct >= *threshold)
        .map_or(0.0, |(_, penalty)| *penalty)
}

/// Combine disk, memory, log, systemd, and Kubernetes signals into a 0..100 score.
///
/// Absent inputs count as zero, so a run with none of them scores exactly 100.
#[must_use]
pub fn health_score(metrics: &MetricSet) -> f64 {
    let disk = metrics.get_or_zero(MetricKey::DiskRootUsedPct);
    let mem = metrics.get_or_zero(MetricKey::MemUsedPct);
    let errors = metrics.get_or_zero(MetricKey::LogErrorSignals);
    let failed = metrics.get_or_zero(MetricKey::SystemdFailedUnits);
    let not_ready = metrics.get_or_zero(MetricKey::K8sNodesNotReady);

    let mut score = 100.0;
    score -= usage_penalty(disk);
    score -= usage_penalty(mem);
    score -= (errors * POINTS_PER_ERROR_SIGNAL).min(MAX_ERROR_SIGNAL_PENALTY);
    score -= (failed * POINTS_PER_FAILED_UNIT).min(MAX_FAILED_UNIT_PENALTY);
    score -= (not_ready * POINTS_PER_NOT_READY_NODE).min(MAX_NOT_READY_NODE_PENALTY);

    // negative counts never come out of the extractors, but the range holds regardless
    round_to(score, 1).clamp(0.0, 100.0)
}

/// Compute the health score and record it under [`MetricKey::HealthScore`].
pub fn apply_health_score(metrics: &mut MetricSet) -> f64 {
    let score = health_score(metrics);
    let _ = metrics.insert(MetricKey::HealthScore, score);
    score
}
