use crate::Result;
use crate::metrics::{MetricKey, MetricSet, round_to};
use crate::runs::RunId;
use crate::storage::Store;
use serde::Serialize;
use std::collections::BTreeSet;

/// How one metric changed between two runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDelta {
    pub key: MetricKey,
    pub a: Option<f64>,
    pub b: Option<f64>,

    /// `b - a` rounded to three decimals, present only when both runs have the metric.
    pub delta: Option<f64>,
}

/// Compare two metric sets key by key, sorted by key name.
#[must_use]
pub fn diff_metrics(a: &MetricSet, b: &MetricSet) -> Vec<MetricDelta> {
    let keys: BTreeSet<MetricKey> = a.keys().chain(b.keys()).collect();

    let mut deltas: Vec<MetricDelta> = keys
        .into_iter()
        .map(|key| {
            let (a, b) = (a.get(key), b.get(key));
            let delta = match (a, b) {
                (Some(a), Some(b)) => Some(round_to(b - a, 3)),
                _ => None,
            };
            MetricDelta { key, a, b, delta }
        })
        .collect();

    deltas.sort_by_key(|d| d.key.name());
    deltas
}

/// Compare the stored metrics of two runs.
///
/// A run that does not exist contributes no values, so two unknown runs yield an empty diff.
pub fn diff_runs<S: Store + ?Sized>(store: &S, run_a: RunId, run_b: RunId) -> Result<Vec<MetricDelta>> {
    let a = store.metrics_map(run_a)?;
    let b = store.metrics_map(run_b)?;
    Ok(diff_metrics(&a, &b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn metrics(pairs: &[(MetricKey, f64)]) -> MetricSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_union_sorted_by_name() {
        let a = metrics(&[(MetricKey::MemUsedPct, 40.0), (MetricKey::HealthScore, 90.0)]);
        let b = metrics(&[(MetricKey::HealthScore, 85.5), (MetricKey::DiskRootUsedPct, 71.0)]);

        let diff = diff_metrics(&a, &b);
        let names: Vec<&str> = diff.iter().map(|d| d.key.name()).collect();
        assert_eq!(names, ["disk_root_used_pct", "health_score", "mem_used_pct"]);

        assert_eq!(diff[0].a, None);
        assert_eq!(diff[0].b, Some(71.0));
        assert_eq!(diff[0].delta, None);

        assert_eq!(diff[1].delta, Some(-4.5));

        assert_eq!(diff[2].a, Some(40.0));
        assert_eq!(diff[2].b, None);
        assert_eq!(diff[2].delta, None);
    }

    #[test]
    fn test_delta_rounded_to_three_decimals() {
        let a = metrics(&[(MetricKey::MemUsedPct, 10.0)]);
        let b = metrics(&[(MetricKey::MemUsedPct, 10.123_456)]);
        assert_eq!(diff_metrics(&a, &b)[0].delta, Some(0.123));
    }

    #[test]
    fn test_delta_tie_rounds_to_even() {
        let a = metrics(&[(MetricKey::MemUsedPct, 0.0)]);
        let b = metrics(&[(MetricKey::MemUsedPct, 0.0625)]);
        assert_eq!(diff_metrics(&a, &b)[0].delta, Some(0.062));
        assert_eq!(diff_metrics(&b, &a)[0].delta, Some(-0.062));
    }

    #[test]
    fn test_delta_is_antisymmetric() {
        let a = metrics(&[
            (MetricKey::HealthScore, 64.0),
            (MetricKey::MemUsedPct, 33.335),
            (MetricKey::LogErrorSignals, 3.0),
        ]);
        let b = metrics(&[
            (MetricKey::HealthScore, 92.0),
            (MetricKey::MemUsedPct, 12.3456),
            (MetricKey::LogErrorSignals, 0.0),
        ]);

        for (ab, ba) in diff_metrics(&a, &b).iter().zip(diff_metrics(&b, &a)) {
            assert_eq!(ab.key, ba.key);
            let (x, y) = (ab.delta.unwrap(), ba.delta.unwrap());
            assert!((x + y).abs() < 1e-12, "{} vs {}", x, y);
        }
    }

    #[test]
    fn test_empty_sets() {
        assert!(diff_metrics(&MetricSet::new(), &MetricSet::new()).is_empty());
    }

    #[test]
    fn test_unknown_runs_yield_empty_diff() {
        let store = MemoryStore::new();
        assert!(diff_runs(&store, RunId::new(), RunId::new()).unwrap().is_empty());
    }
}
